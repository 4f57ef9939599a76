use serde::Serialize;

/// A user identity. The api key is the opaque credential presented on
/// every authenticated request; it is never serialized outward.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub api_key: String,
    pub name: String,
}

/// The authenticated identity injected by the api-key middleware.
#[derive(Debug, Clone)]
pub struct Identity {
    pub id: i64,
    pub name: String,
}

/// Brief user info embedded in tweets and follower lists.
#[derive(Debug, Clone, Serialize)]
pub struct UserBrief {
    pub id: i64,
    pub name: String,
}

/// Public profile: the user plus who follows them and whom they follow.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub followers: Vec<UserBrief>,
    pub following: Vec<UserBrief>,
}

impl From<&User> for UserBrief {
    fn from(u: &User) -> Self {
        UserBrief {
            id: u.id,
            name: u.name.clone(),
        }
    }
}
