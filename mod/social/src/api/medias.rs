use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use tracing::debug;

use microblog_core::ServiceError;

use super::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/medias", post(upload_media))
}

/// POST /api/medias — multipart upload of one attachment.
///
/// The first part carrying a filename is taken as the file; client
/// variants have named the field both `file` and `image`, so the field
/// name is not significant.
async fn upload_media(
    State(svc): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<serde_json::Value>), ServiceError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServiceError::BadRequest(e.to_string()))?
    {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let data = field
            .bytes()
            .await
            .map_err(|e| ServiceError::BadRequest(e.to_string()))?;
        debug!(file_name, size = data.len(), "media upload received");

        let media_id = svc
            .upload_media(&data, &file_name)
            .map_err(ServiceError::from)?;
        return Ok((
            StatusCode::CREATED,
            Json(serde_json::json!({"result": true, "media_id": media_id})),
        ));
    }

    Err(ServiceError::BadRequest(
        "multipart body contains no file part".into(),
    ))
}
