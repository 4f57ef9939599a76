use std::cmp::Reverse;

use tracing::debug;

use crate::model::{TweetOut, UserBrief};
use crate::service::{SocialError, SocialService};

impl SocialService {
    /// Assemble the tweet feed for a user: every tweet authored by
    /// someone they follow, most-liked first.
    ///
    /// Tweets are gathered in author-iteration order with each author's
    /// posting order preserved, then stable-sorted descending by like
    /// count — ties keep their concatenation order, so the output is
    /// deterministic for a fixed input.
    pub fn feed_for(&self, user_id: i64) -> Result<Vec<TweetOut>, SocialError> {
        let authors = self.followed_authors(user_id)?;

        let mut feed: Vec<TweetOut> = Vec::new();
        for author_id in authors {
            let author = self.get_user(author_id)?;
            let brief = UserBrief::from(&author);
            for tweet in self.tweets_by_author(author_id)? {
                feed.push(TweetOut {
                    id: tweet.id,
                    content: tweet.content,
                    attachments: self.media_files_of_tweet(tweet.id)?,
                    author: brief.clone(),
                    likes: self.likers_of(tweet.id)?,
                });
            }
        }

        feed.sort_by_key(|t| Reverse(t.likes.len()));
        debug!(user_id, tweets = feed.len(), "feed assembled");
        Ok(feed)
    }
}

#[cfg(test)]
mod tests {
    use crate::model::NewTweet;
    use crate::service::testutil::test_service;
    use crate::service::SocialError;

    fn text_tweet(text: &str) -> NewTweet {
        NewTweet {
            tweet_data: text.to_string(),
            tweet_media_ids: None,
        }
    }

    #[test]
    fn empty_for_user_following_nobody() {
        let (_dir, svc) = test_service();
        let a = svc.create_user("a", "A").unwrap();
        assert!(svc.feed_for(a.id).unwrap().is_empty());
    }

    #[test]
    fn empty_when_followed_authors_have_no_tweets() {
        let (_dir, svc) = test_service();
        let a = svc.create_user("a", "A").unwrap();
        let b = svc.create_user("b", "B").unwrap();
        svc.follow(a.id, b.id).unwrap();
        assert!(svc.feed_for(a.id).unwrap().is_empty());
    }

    #[test]
    fn ordered_by_like_count_with_stable_ties() {
        // A follows B. B posts T1, T2, T3. A likes T2 (a second like
        // attempt errors and does not change the count), B self-likes
        // T2, A likes T3. Feed for A must be [T2, T3, T1].
        let (_dir, svc) = test_service();
        let a = svc.create_user("a", "A").unwrap();
        let b = svc.create_user("b", "B").unwrap();
        svc.follow(a.id, b.id).unwrap();

        let t1 = svc.create_tweet(b.id, &text_tweet("T1")).unwrap();
        let t2 = svc.create_tweet(b.id, &text_tweet("T2")).unwrap();
        let t3 = svc.create_tweet(b.id, &text_tweet("T3")).unwrap();

        svc.like_tweet(t2, a.id).unwrap();
        assert!(matches!(
            svc.like_tweet(t2, a.id),
            Err(SocialError::Conflict(_))
        ));
        svc.like_tweet(t2, b.id).unwrap();
        svc.like_tweet(t3, a.id).unwrap();

        let feed = svc.feed_for(a.id).unwrap();
        let ids: Vec<i64> = feed.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![t2, t3, t1]);
        assert_eq!(feed[0].likes.len(), 2);
        assert_eq!(feed[1].likes.len(), 1);
        assert_eq!(feed[2].likes.len(), 0);
        assert_eq!(feed[0].author.id, b.id);
    }

    #[test]
    fn ties_keep_author_iteration_and_posting_order() {
        let (_dir, svc) = test_service();
        let reader = svc.create_user("r", "R").unwrap();
        let b = svc.create_user("b", "B").unwrap();
        let c = svc.create_user("c", "C").unwrap();
        // Follow c first; author iteration is by author id, not by
        // follow order.
        svc.follow(reader.id, c.id).unwrap();
        svc.follow(reader.id, b.id).unwrap();

        let b1 = svc.create_tweet(b.id, &text_tweet("b1")).unwrap();
        let c1 = svc.create_tweet(c.id, &text_tweet("c1")).unwrap();
        let b2 = svc.create_tweet(b.id, &text_tweet("b2")).unwrap();

        let feed = svc.feed_for(reader.id).unwrap();
        let ids: Vec<i64> = feed.iter().map(|t| t.id).collect();
        // All like counts equal (zero): b's tweets before c's, each in
        // posting order.
        assert_eq!(ids, vec![b1, b2, c1]);
    }

    #[test]
    fn own_tweets_are_not_in_the_feed() {
        let (_dir, svc) = test_service();
        let a = svc.create_user("a", "A").unwrap();
        let b = svc.create_user("b", "B").unwrap();
        svc.follow(a.id, b.id).unwrap();

        svc.create_tweet(a.id, &text_tweet("mine")).unwrap();
        let theirs = svc.create_tweet(b.id, &text_tweet("theirs")).unwrap();

        let feed = svc.feed_for(a.id).unwrap();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].id, theirs);
    }

    #[test]
    fn feed_carries_attachments() {
        let (_dir, svc) = test_service();
        let a = svc.create_user("a", "A").unwrap();
        let b = svc.create_user("b", "B").unwrap();
        svc.follow(a.id, b.id).unwrap();

        let m1 = svc.upload_media(b"x", "x.jpg").unwrap();
        let m2 = svc.upload_media(b"y", "y.png").unwrap();
        svc.create_tweet(
            b.id,
            &NewTweet {
                tweet_data: "pics".into(),
                tweet_media_ids: Some(vec![m1, m2]),
            },
        )
        .unwrap();

        let feed = svc.feed_for(a.id).unwrap();
        assert_eq!(
            feed[0].attachments,
            vec![format!("{}.jpg", m1), format!("{}.png", m2)]
        );
    }
}
