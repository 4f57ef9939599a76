use tracing::debug;

use microblog_sql::Value;

use crate::model::LikeBrief;
use crate::service::{SocialError, SocialService};

impl SocialService {
    /// Like a tweet. Liking the same tweet twice is an error, not a
    /// no-op; the composite primary key also catches concurrent
    /// duplicates at insert time.
    pub fn like_tweet(&self, tweet_id: i64, user_id: i64) -> Result<(), SocialError> {
        self.get_tweet(tweet_id)?;
        self.sql
            .exec(
                "INSERT INTO likes (user_id, tweet_id) VALUES (?1, ?2)",
                &[Value::Integer(user_id), Value::Integer(tweet_id)],
            )
            .map_err(|e| {
                Self::map_insert_err(
                    e,
                    format!("tweet {} already liked by user {}", tweet_id, user_id),
                )
            })?;
        debug!(tweet_id, user_id, "tweet liked");
        Ok(())
    }

    /// Remove a like. Removing one that is not there is an error.
    pub fn unlike_tweet(&self, tweet_id: i64, user_id: i64) -> Result<(), SocialError> {
        self.get_tweet(tweet_id)?;
        let affected = self
            .sql
            .exec(
                "DELETE FROM likes WHERE user_id = ?1 AND tweet_id = ?2",
                &[Value::Integer(user_id), Value::Integer(tweet_id)],
            )
            .map_err(|e| SocialError::Storage(e.to_string()))?;
        if affected == 0 {
            return Err(SocialError::Conflict(format!(
                "tweet {} is not liked by user {}",
                tweet_id, user_id
            )));
        }
        debug!(tweet_id, user_id, "tweet unliked");
        Ok(())
    }

    /// Users who liked a tweet, ordered by user id.
    pub fn likers_of(&self, tweet_id: i64) -> Result<Vec<LikeBrief>, SocialError> {
        let rows = self
            .sql
            .query(
                "SELECT u.id, u.name FROM likes l
                 JOIN users u ON u.id = l.user_id
                 WHERE l.tweet_id = ?1 ORDER BY u.id",
                &[Value::Integer(tweet_id)],
            )
            .map_err(|e| SocialError::Storage(e.to_string()))?;
        rows.iter()
            .map(|row| {
                Ok(LikeBrief {
                    user_id: row
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

#[cfg(test)]
mod tests {
    use crate::model::NewTweet;
    use crate::service::testutil::test_service;
    use crate::service::SocialError;

    #[test]
    fn like_then_duplicate_errors() {
        let (_dir, svc) = test_service();
        let author = svc.create_user("a", "A").unwrap();
        let liker = svc.create_user("b", "B").unwrap();
        let tweet_id = svc
            .create_tweet(
                author.id,
                &NewTweet {
                    tweet_data: "t".into(),
                    tweet_media_ids: None,
                },
            )
            .unwrap();

        svc.like_tweet(tweet_id, liker.id).unwrap();
        assert_eq!(svc.likers_of(tweet_id).unwrap().len(), 1);

        match svc.like_tweet(tweet_id, liker.id) {
            Err(SocialError::Conflict(_)) => {}
            other => panic!("expected Conflict, got {:?}", other),
        }
        // Count unchanged after the failed duplicate.
        assert_eq!(svc.likers_of(tweet_id).unwrap().len(), 1);
    }

    #[test]
    fn unlike_mirrors_like() {
        let (_dir, svc) = test_service();
        let author = svc.create_user("a", "A").unwrap();
        let liker = svc.create_user("b", "B").unwrap();
        let tweet_id = svc
            .create_tweet(
                author.id,
                &NewTweet {
                    tweet_data: "t".into(),
                    tweet_media_ids: None,
                },
            )
            .unwrap();

        svc.like_tweet(tweet_id, liker.id).unwrap();
        svc.unlike_tweet(tweet_id, liker.id).unwrap();
        assert!(svc.likers_of(tweet_id).unwrap().is_empty());

        match svc.unlike_tweet(tweet_id, liker.id) {
            Err(SocialError::Conflict(_)) => {}
            other => panic!("expected Conflict, got {:?}", other),
        }
    }

    #[test]
    fn liking_unknown_tweet_is_not_found() {
        let (_dir, svc) = test_service();
        let user = svc.create_user("a", "A").unwrap();
        assert!(matches!(
            svc.like_tweet(404, user.id),
            Err(SocialError::NotFound(_))
        ));
        assert!(matches!(
            svc.unlike_tweet(404, user.id),
            Err(SocialError::NotFound(_))
        ));
    }

    #[test]
    fn likers_include_self_likes() {
        let (_dir, svc) = test_service();
        let author = svc.create_user("a", "A").unwrap();
        let other = svc.create_user("b", "B").unwrap();
        let tweet_id = svc
            .create_tweet(
                author.id,
                &NewTweet {
                    tweet_data: "t".into(),
                    tweet_media_ids: None,
                },
            )
            .unwrap();

        svc.like_tweet(tweet_id, other.id).unwrap();
        svc.like_tweet(tweet_id, author.id).unwrap();

        let likers = svc.likers_of(tweet_id).unwrap();
        assert_eq!(likers.len(), 2);
        assert_eq!(likers[0].user_id, author.id);
        assert_eq!(likers[1].user_id, other.id);
    }
}
