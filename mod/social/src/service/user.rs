use tracing::{debug, warn};

use microblog_sql::{Row, Value};

use crate::model::{User, UserBrief, UserProfile};
use crate::service::{SocialError, SocialService};

fn user_from_row(row: &Row) -> Result<User, SocialError> {
    Ok(User {
        id: row
            .get_i64("id")
            .ok_or_else(|| SocialError::Internal("missing id column".into()))?,
        api_key: row
            .get_str("api_key")
            .ok_or_else(|| SocialError::Internal("missing api_key column".into()))?
            .to_string(),
        name: row
            .get_str("name")
            .ok_or_else(|| SocialError::Internal("missing name column".into()))?
            .to_string(),
    })
}

impl SocialService {
    /// Register a user. No HTTP endpoint exposes this; the binary's
    /// debug seeding and the tests call it directly.
    pub fn create_user(&self, api_key: &str, name: &str) -> Result<User, SocialError> {
        let rows = self
            .sql
            .query(
                "INSERT INTO users (api_key, name) VALUES (?1, ?2) RETURNING id",
                &[Value::Text(api_key.to_string()), Value::Text(name.to_string())],
            )
            .map_err(|e| {
                Self::map_insert_err(e, format!("api_key already registered: {}", api_key))
            })?;
        let id = rows
            .first()
            .and_then(|r| r.get_i64("id"))
            .ok_or_else(|| SocialError::Internal("insert returned no id".into()))?;
        debug!(user_id = id, "user created");
        Ok(User {
            id,
            api_key: api_key.to_string(),
            name: name.to_string(),
        })
    }

    /// Register a user unless the api key is already taken; either way
    /// returns the owning user. Used by idempotent seeding.
    pub fn ensure_user(&self, api_key: &str, name: &str) -> Result<User, SocialError> {
        match self.resolve_api_key(api_key) {
            Ok(user) => Ok(user),
            Err(SocialError::Unauthorized(_)) => self.create_user(api_key, name),
            Err(e) => Err(e),
        }
    }

    /// Identity resolution: map a credential to its owning user.
    pub fn resolve_api_key(&self, api_key: &str) -> Result<User, SocialError> {
        let rows = self
            .sql
            .query(
                "SELECT id, api_key, name FROM users WHERE api_key = ?1",
                &[Value::Text(api_key.to_string())],
            )
            .map_err(|e| SocialError::Storage(e.to_string()))?;
        match rows.first() {
            Some(row) => user_from_row(row),
            None => {
                warn!("api_key not exists");
                Err(SocialError::Unauthorized("api_key not exists".into()))
            }
        }
    }

    /// Get a user by id.
    pub fn get_user(&self, id: i64) -> Result<User, SocialError> {
        let rows = self
            .sql
            .query(
                "SELECT id, api_key, name FROM users WHERE id = ?1",
                &[Value::Integer(id)],
            )
            .map_err(|e| SocialError::Storage(e.to_string()))?;
        match rows.first() {
            Some(row) => user_from_row(row),
            None => Err(SocialError::NotFound(format!("user {} not exists", id))),
        }
    }

    /// Public profile: the user plus follower/following brief lists.
    pub fn user_profile(&self, id: i64) -> Result<UserProfile, SocialError> {
        let user = self.get_user(id)?;
        Ok(UserProfile {
            id: user.id,
            name: user.name,
            followers: self.followers_of(id)?,
            following: self.following_of(id)?,
        })
    }

    /// Users following `user_id`, ordered by id.
    pub fn followers_of(&self, user_id: i64) -> Result<Vec<UserBrief>, SocialError> {
        self.brief_query(
            "SELECT u.id, u.name FROM follows f
             JOIN users u ON u.id = f.follower_id
             WHERE f.author_id = ?1 ORDER BY u.id",
            user_id,
        )
    }

    /// Authors `user_id` follows, ordered by id.
    pub fn following_of(&self, user_id: i64) -> Result<Vec<UserBrief>, SocialError> {
        self.brief_query(
            "SELECT u.id, u.name FROM follows f
             JOIN users u ON u.id = f.author_id
             WHERE f.follower_id = ?1 ORDER BY u.id",
            user_id,
        )
    }

    fn brief_query(&self, sql: &str, id: i64) -> Result<Vec<UserBrief>, SocialError> {
        let rows = self
            .sql
            .query(sql, &[Value::Integer(id)])
            .map_err(|e| SocialError::Storage(e.to_string()))?;
        rows.iter()
            .map(|row| {
                Ok(UserBrief {
                    id: row
                        .get_i64("id")
                        .ok_or_else(|| SocialError::Internal("missing id column".into()))?,
                    name: row
                        .get_str("name")
                        .ok_or_else(|| SocialError::Internal("missing name column".into()))?
                        .to_string(),
                })
            })
            .collect()
    }
}
