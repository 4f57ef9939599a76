pub mod feed;
pub mod follow;
pub mod like;
pub mod media;
pub mod schema;
pub mod tweet;
pub mod user;

use std::sync::Arc;

use thiserror::Error;

use microblog_blob::BlobStore;
use microblog_sql::{SQLStore, Value};

/// Social service error type.
#[derive(Debug, Error)]
pub enum SocialError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("storage: {0}")]
    Storage(String),

    #[error("internal: {0}")]
    Internal(String),
}

impl From<SocialError> for microblog_core::ServiceError {
    fn from(e: SocialError) -> Self {
        match e {
            SocialError::NotFound(m) => microblog_core::ServiceError::NotFound(m),
            SocialError::Conflict(m) => microblog_core::ServiceError::Conflict(m),
            SocialError::Validation(m) => microblog_core::ServiceError::Validation(m),
            SocialError::Unauthorized(m) => microblog_core::ServiceError::Unauthorized(m),
            SocialError::Forbidden(m) => microblog_core::ServiceError::Forbidden(m),
            SocialError::Storage(m) => microblog_core::ServiceError::Storage(m),
            SocialError::Internal(m) => microblog_core::ServiceError::Internal(m),
        }
    }
}

/// The social service. Holds the relational store for entities and the
/// blob store for media bytes; both are injected by the binary.
pub struct SocialService {
    pub(crate) sql: Arc<dyn SQLStore>,
    pub(crate) blob: Arc<dyn BlobStore>,
}

impl SocialService {
    /// Create a new SocialService, initializing the DB schema.
    pub fn new(
        sql: Arc<dyn SQLStore>,
        blob: Arc<dyn BlobStore>,
    ) -> Result<Arc<Self>, SocialError> {
        schema::init_schema(sql.as_ref())?;
        Ok(Arc::new(Self { sql, blob }))
    }

    /// Map an exec error: UNIQUE violations are state conflicts, the
    /// rest is a storage failure.
    pub(crate) fn map_insert_err(
        e: microblog_sql::SQLError,
        conflict_msg: impl Into<String>,
    ) -> SocialError {
        let msg = e.to_string();
        if msg.contains("UNIQUE constraint") {
            SocialError::Conflict(conflict_msg.into())
        } else {
            SocialError::Storage(msg)
        }
    }

    /// Build an `IN (?n, ?n+1, ...)` placeholder list for `ids`,
    /// starting at parameter index `start`, and push the params.
    pub(crate) fn push_id_list(
        ids: &[i64],
        start: usize,
        params: &mut Vec<Value>,
    ) -> String {
        let mut placeholders = Vec::with_capacity(ids.len());
        for (i, id) in ids.iter().enumerate() {
            placeholders.push(format!("?{}", start + i));
            params.push(Value::Integer(*id));
        }
        placeholders.join(", ")
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    use std::sync::Arc;

    use microblog_blob::FileStore;
    use microblog_sql::SqliteStore;

    use super::SocialService;

    /// In-memory service over a temp blob dir. The TempDir must stay
    /// alive for the duration of the test.
    pub(crate) fn test_service() -> (tempfile::TempDir, Arc<SocialService>) {
        let dir = tempfile::tempdir().unwrap();
        let sql = Arc::new(SqliteStore::open_in_memory().unwrap());
        let blob = Arc::new(FileStore::open(dir.path()).unwrap());
        let svc = SocialService::new(sql, blob).unwrap();
        (dir, svc)
    }
}
