use axum::extract::{Extension, Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};

use microblog_core::ServiceError;

use crate::model::{Identity, UserProfile};

use super::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users/{id}/follow", post(follow).delete(unfollow))
        .route("/users/me", get(me_profile))
        .route("/users/{id}", get(user_profile))
}

fn profile_json(profile: UserProfile) -> serde_json::Value {
    serde_json::json!({
        "result": true,
        "id": profile.id,
        "name": profile.name,
        "followers": profile.followers,
        "following": profile.following,
    })
}

/// POST /api/users/{id}/follow — subscribe to an author.
async fn follow(
    State(svc): State<AppState>,
    Extension(me): Extension<Identity>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    svc.follow(me.id, id).map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({"result": true})))
}

/// DELETE /api/users/{id}/follow — unsubscribe from an author.
async fn unfollow(
    State(svc): State<AppState>,
    Extension(me): Extension<Identity>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    svc.unfollow(me.id, id).map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({"result": true})))
}

/// GET /api/users/me — the authenticated user's own profile.
async fn me_profile(
    State(svc): State<AppState>,
    Extension(me): Extension<Identity>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let profile = svc.user_profile(me.id).map_err(ServiceError::from)?;
    Ok(Json(profile_json(profile)))
}

/// GET /api/users/{id} — public profile, no credential required.
async fn user_profile(
    State(svc): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let profile = svc.user_profile(id).map_err(ServiceError::from)?;
    Ok(Json(profile_json(profile)))
}
