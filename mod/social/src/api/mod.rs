mod medias;
mod middleware;
mod tweets;
mod users;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::Router;

use crate::service::SocialService;

/// Shared application state.
pub type AppState = Arc<SocialService>;

/// Body limit for the HTTP layer. Larger than the media cap so
/// oversized uploads reach the size check and get the documented 403
/// instead of a transport-level 413.
const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

/// Build the complete social API router, serving everything under
/// `/api`. The api-key middleware wraps all routes; the public ones
/// are excluded inside it.
pub fn build_router(svc: Arc<SocialService>) -> Router {
    let api = Router::new()
        .merge(tweets::routes())
        .merge(users::routes())
        .merge(medias::routes());

    Router::new()
        .nest("/api", api)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(axum::middleware::from_fn_with_state(
            svc.clone(),
            middleware::identify,
        ))
        .with_state(svc)
}
