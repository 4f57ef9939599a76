use tracing::debug;

use microblog_sql::Value;

use crate::service::{SocialError, SocialService};

impl SocialService {
    /// Subscribe `follower_id` to `author_id`'s tweets.
    ///
    /// Self-follow is rejected here before the author lookup (and the
    /// schema CHECK enforces it as a data invariant too); following
    /// someone twice is an error.
    pub fn follow(&self, follower_id: i64, author_id: i64) -> Result<(), SocialError> {
        if follower_id == author_id {
            return Err(SocialError::Forbidden(
                "a follower cannot subscribe to himself".into(),
            ));
        }
        self.get_user(author_id)?;
        self.sql
            .exec(
                "INSERT INTO follows (follower_id, author_id) VALUES (?1, ?2)",
                &[Value::Integer(follower_id), Value::Integer(author_id)],
            )
            .map_err(|e| {
                Self::map_insert_err(
                    e,
                    format!(
                        "user {} is already following author {}",
                        follower_id, author_id
                    ),
                )
            })?;
        debug!(follower_id, author_id, "followed");
        Ok(())
    }

    /// Remove a subscription. Unfollowing someone not followed is an
    /// error.
    pub fn unfollow(&self, follower_id: i64, author_id: i64) -> Result<(), SocialError> {
        if follower_id == author_id {
            return Err(SocialError::Forbidden(
                "a follower cannot unsubscribe from himself".into(),
            ));
        }
        self.get_user(author_id)?;
        let affected = self
            .sql
            .exec(
                "DELETE FROM follows WHERE follower_id = ?1 AND author_id = ?2",
                &[Value::Integer(follower_id), Value::Integer(author_id)],
            )
            .map_err(|e| SocialError::Storage(e.to_string()))?;
        if affected == 0 {
            return Err(SocialError::Conflict(format!(
                "user {} is not following author {}",
                follower_id, author_id
            )));
        }
        debug!(follower_id, author_id, "unfollowed");
        Ok(())
    }

    /// Ids of the authors `follower_id` follows, ordered by author id.
    /// This is the author-iteration order the feed preserves.
    pub fn followed_authors(&self, follower_id: i64) -> Result<Vec<i64>, SocialError> {
        let rows = self
            .sql
            .query(
                "SELECT author_id FROM follows WHERE follower_id = ?1 ORDER BY author_id",
                &[Value::Integer(follower_id)],
            )
            .map_err(|e| SocialError::Storage(e.to_string()))?;
        rows.iter()
            .map(|row| {
                row.get_i64("author_id")
                    .ok_or_else(|| SocialError::Internal("missing author_id column".into()))
            })
            .collect()
    }
}
