use microblog_sql::SQLStore;

use crate::service::SocialError;

/// Initialize the SQLite schema for all social resources.
///
/// Foreign keys are declared for integrity but deletion never relies on
/// implicit cascades: the service deletes children explicitly before
/// the parent (likes and media rows before the tweet).
pub fn init_schema(sql: &dyn SQLStore) -> Result<(), SocialError> {
    sql.exec_batch(
        "CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            api_key TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_users_api_key ON users(api_key);

        CREATE TABLE IF NOT EXISTS tweets (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            content TEXT NOT NULL,
            author_id INTEGER NOT NULL,
            FOREIGN KEY (author_id) REFERENCES users(id)
        );
        CREATE INDEX IF NOT EXISTS idx_tweets_author ON tweets(author_id);

        CREATE TABLE IF NOT EXISTS media (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            tweet_id INTEGER,
            file_name TEXT NOT NULL,
            FOREIGN KEY (tweet_id) REFERENCES tweets(id)
        );
        CREATE INDEX IF NOT EXISTS idx_media_tweet ON media(tweet_id);

        CREATE TABLE IF NOT EXISTS likes (
            user_id INTEGER NOT NULL,
            tweet_id INTEGER NOT NULL,
            PRIMARY KEY (user_id, tweet_id),
            FOREIGN KEY (user_id) REFERENCES users(id),
            FOREIGN KEY (tweet_id) REFERENCES tweets(id)
        );
        CREATE INDEX IF NOT EXISTS idx_likes_tweet ON likes(tweet_id);

        CREATE TABLE IF NOT EXISTS follows (
            follower_id INTEGER NOT NULL,
            author_id INTEGER NOT NULL,
            PRIMARY KEY (follower_id, author_id),
            CHECK (follower_id <> author_id),
            FOREIGN KEY (follower_id) REFERENCES users(id),
            FOREIGN KEY (author_id) REFERENCES users(id)
        );
        CREATE INDEX IF NOT EXISTS idx_follows_author ON follows(author_id);",
    )
    .map_err(|e| SocialError::Storage(e.to_string()))
}
