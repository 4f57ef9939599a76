use tracing::debug;

use microblog_sql::{Row, Value};

use crate::model::{NewTweet, Tweet};
use crate::service::{SocialError, SocialService};

fn tweet_from_row(row: &Row) -> Result<Tweet, SocialError> {
    Ok(Tweet {
        id: row
            .get_i64("id")
            .ok_or_else(|| SocialError::Internal("missing id column".into()))?,
        content: row
            .get_str("content")
            .ok_or_else(|| SocialError::Internal("missing content column".into()))?
            .to_string(),
        author_id: row
            .get_i64("author_id")
            .ok_or_else(|| SocialError::Internal("missing author_id column".into()))?,
    })
}

impl SocialService {
    /// Create a tweet, attaching any referenced media.
    ///
    /// Media ids are validated first: each must exist and be an orphan.
    /// A violation fails the whole operation before anything is written.
    pub fn create_tweet(&self, author_id: i64, input: &NewTweet) -> Result<i64, SocialError> {
        let media_ids = input.tweet_media_ids.as_deref().unwrap_or(&[]);
        if !media_ids.is_empty() {
            self.validate_attachable(media_ids)?;
        }

        let rows = self
            .sql
            .query(
                "INSERT INTO tweets (content, author_id) VALUES (?1, ?2) RETURNING id",
                &[
                    Value::Text(input.tweet_data.clone()),
                    Value::Integer(author_id),
                ],
            )
            .map_err(|e| SocialError::Storage(e.to_string()))?;
        let tweet_id = rows
            .first()
            .and_then(|r| r.get_i64("id"))
            .ok_or_else(|| SocialError::Internal("insert returned no id".into()))?;

        if !media_ids.is_empty() {
            let mut params = vec![Value::Integer(tweet_id)];
            let list = Self::push_id_list(media_ids, 2, &mut params);
            self.sql
                .exec(
                    &format!("UPDATE media SET tweet_id = ?1 WHERE id IN ({})", list),
                    &params,
                )
                .map_err(|e| SocialError::Storage(e.to_string()))?;
        }

        debug!(tweet_id, author_id, "tweet created");
        Ok(tweet_id)
    }

    /// Get a tweet by id.
    pub fn get_tweet(&self, tweet_id: i64) -> Result<Tweet, SocialError> {
        let rows = self
            .sql
            .query(
                "SELECT id, content, author_id FROM tweets WHERE id = ?1",
                &[Value::Integer(tweet_id)],
            )
            .map_err(|e| SocialError::Storage(e.to_string()))?;
        match rows.first() {
            Some(row) => tweet_from_row(row),
            None => Err(SocialError::NotFound(format!(
                "tweet_id {} not found",
                tweet_id
            ))),
        }
    }

    /// Delete a tweet owned by `user_id`.
    ///
    /// Explicit application-level cascade: like rows and media rows go
    /// first, then the tweet, then the media backing bytes.
    pub fn delete_tweet(&self, tweet_id: i64, user_id: i64) -> Result<(), SocialError> {
        let tweet = self.get_tweet(tweet_id)?;
        if tweet.author_id != user_id {
            return Err(SocialError::Forbidden(format!(
                "the tweet {} does not belong to user {}",
                tweet_id, user_id
            )));
        }

        let rows = self
            .sql
            .query(
                "SELECT id FROM media WHERE tweet_id = ?1 ORDER BY id",
                &[Value::Integer(tweet_id)],
            )
            .map_err(|e| SocialError::Storage(e.to_string()))?;
        let media_ids: Vec<i64> = rows.iter().filter_map(|r| r.get_i64("id")).collect();

        self.sql
            .exec(
                "DELETE FROM likes WHERE tweet_id = ?1",
                &[Value::Integer(tweet_id)],
            )
            .map_err(|e| SocialError::Storage(e.to_string()))?;
        self.sql
            .exec(
                "DELETE FROM media WHERE tweet_id = ?1",
                &[Value::Integer(tweet_id)],
            )
            .map_err(|e| SocialError::Storage(e.to_string()))?;
        self.sql
            .exec(
                "DELETE FROM tweets WHERE id = ?1",
                &[Value::Integer(tweet_id)],
            )
            .map_err(|e| SocialError::Storage(e.to_string()))?;

        self.delete_media_files(&media_ids)?;

        debug!(tweet_id, medias = media_ids.len(), "tweet deleted");
        Ok(())
    }

    /// All tweets by one author, in posting order (ascending id).
    pub fn tweets_by_author(&self, author_id: i64) -> Result<Vec<Tweet>, SocialError> {
        let rows = self
            .sql
            .query(
                "SELECT id, content, author_id FROM tweets WHERE author_id = ?1 ORDER BY id",
                &[Value::Integer(author_id)],
            )
            .map_err(|e| SocialError::Storage(e.to_string()))?;
        rows.iter().map(tweet_from_row).collect()
    }
}
