use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, post};
use axum::{Json, Router};

use microblog_core::ServiceError;

use crate::model::{Identity, NewTweet};

use super::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/tweets", post(create_tweet).get(feed))
        .route("/tweets/{id}", delete(delete_tweet))
        .route("/tweets/{id}/likes", post(like_tweet).delete(unlike_tweet))
}

/// POST /api/tweets — create a tweet, attaching any uploaded media.
async fn create_tweet(
    State(svc): State<AppState>,
    Extension(me): Extension<Identity>,
    Json(input): Json<NewTweet>,
) -> Result<(StatusCode, Json<serde_json::Value>), ServiceError> {
    let tweet_id = svc.create_tweet(me.id, &input).map_err(ServiceError::from)?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({"result": true, "tweet_id": tweet_id})),
    ))
}

/// GET /api/tweets — the feed: tweets from followed authors, most
/// liked first.
async fn feed(
    State(svc): State<AppState>,
    Extension(me): Extension<Identity>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let tweets = svc.feed_for(me.id).map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({"result": true, "tweets": tweets})))
}

/// DELETE /api/tweets/{id} — owner-only deletion with full cascade.
async fn delete_tweet(
    State(svc): State<AppState>,
    Extension(me): Extension<Identity>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    svc.delete_tweet(id, me.id).map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({"result": true})))
}

/// POST /api/tweets/{id}/likes
async fn like_tweet(
    State(svc): State<AppState>,
    Extension(me): Extension<Identity>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    svc.like_tweet(id, me.id).map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({"result": true})))
}

/// DELETE /api/tweets/{id}/likes
async fn unlike_tweet(
    State(svc): State<AppState>,
    Extension(me): Extension<Identity>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    svc.unlike_tweet(id, me.id).map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({"result": true})))
}
