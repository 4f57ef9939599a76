//! Social module — tweets, likes, follows, media upload, tweet feed.
//!
//! # Resources
//!
//! - **User** — identity owning an opaque api key
//! - **Tweet** — text content with optional media attachments
//! - **Media** — uploaded attachment; orphan until a tweet claims it
//! - **Like** — unique (user, tweet) pairing
//! - **Follow** — unique (follower, author) pairing
//!
//! # Usage
//!
//! ```ignore
//! use social::SocialModule;
//!
//! let module = SocialModule::new(sql, blob)?;
//! let router = module.routes(); // serves /api/...
//! ```

pub mod api;
pub mod model;
pub mod service;

use std::sync::Arc;

use axum::Router;

use microblog_core::Module;

use crate::service::SocialService;

/// Social module implementing the Module trait.
///
/// Holds the SocialService and provides HTTP routes for all endpoints.
pub struct SocialModule {
    service: Arc<SocialService>,
}

impl SocialModule {
    /// Create a new SocialModule over the given stores.
    pub fn new(
        sql: Arc<dyn microblog_sql::SQLStore>,
        blob: Arc<dyn microblog_blob::BlobStore>,
    ) -> Result<Self, microblog_core::ServiceError> {
        let service = SocialService::new(sql, blob)
            .map_err(microblog_core::ServiceError::from)?;
        Ok(Self { service })
    }

    /// Get a reference to the underlying SocialService.
    pub fn service(&self) -> &Arc<SocialService> {
        &self.service
    }
}

impl Module for SocialModule {
    fn name(&self) -> &str {
        "social"
    }

    fn routes(&self) -> Router {
        api::build_router(self.service.clone())
    }
}
