use serde::{Deserialize, Serialize};

use crate::model::UserBrief;

/// A stored tweet row.
#[derive(Debug, Clone)]
pub struct Tweet {
    pub id: i64,
    pub content: String,
    pub author_id: i64,
}

/// Request body for tweet creation. Field names follow the wire
/// contract the browser client submits.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTweet {
    pub tweet_data: String,
    #[serde(default)]
    pub tweet_media_ids: Option<Vec<i64>>,
}

/// A user who liked a tweet.
#[derive(Debug, Clone, Serialize)]
pub struct LikeBrief {
    pub user_id: i64,
    pub name: String,
}

/// Public representation of a tweet in the feed.
#[derive(Debug, Clone, Serialize)]
pub struct TweetOut {
    pub id: i64,
    pub content: String,
    /// Blob keys of the attached media, in attachment order.
    pub attachments: Vec<String>,
    pub author: UserBrief,
    pub likes: Vec<LikeBrief>,
}
