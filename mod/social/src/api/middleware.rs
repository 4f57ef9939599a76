use axum::extract::{Request, State};
use axum::http::Method;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use microblog_core::ServiceError;

use crate::model::Identity;

use super::AppState;

/// Api-key identification middleware.
///
/// Reads the `api-key` header, resolves the owning user and stores an
/// [`Identity`] as a request extension for handlers to pick up via
/// `Extension<Identity>`. Public routes are excluded.
pub async fn identify(State(svc): State<AppState>, mut req: Request, next: Next) -> Response {
    if is_public(req.method(), req.uri().path()) {
        return next.run(req).await;
    }

    let key = req
        .headers()
        .get("api-key")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let Some(key) = key else {
        return ServiceError::Unauthorized("missing api-key header".into()).into_response();
    };

    match svc.resolve_api_key(&key) {
        Ok(user) => {
            req.extensions_mut().insert(Identity {
                id: user.id,
                name: user.name,
            });
            next.run(req).await
        }
        Err(e) => ServiceError::from(e).into_response(),
    }
}

/// The one route served without a credential: `GET /api/users/{id}`
/// with a numeric id (`/api/users/me` still authenticates).
fn is_public(method: &Method, path: &str) -> bool {
    if method != Method::GET {
        return false;
    }
    match path.strip_prefix("/api/users/") {
        Some(rest) => !rest.contains('/') && rest.parse::<i64>().is_ok(),
        None => false,
    }
}
