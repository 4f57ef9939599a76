use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

// ── Error types ─────────────────────────────────────────────────────
//
// Stable, machine-readable identifiers. Clients match on these —
// never on the human-readable message string.

/// Stable `error_type` constants.
///
/// Every error response carries
/// `{"result": false, "error_type": "...", "error_message": "..."}`.
/// Types never change; messages may be reworded.
pub mod error_type {
    pub const IDENTIFICATION: &str = "IdentificationError";
    pub const NOT_FOUND: &str = "NotFoundError";
    pub const FORBIDDEN: &str = "ForbiddenError";
    pub const VALIDATION: &str = "ValidationError";
    pub const CONFLICT: &str = "ConflictError";
    pub const REQUEST: &str = "RequestError";
    pub const STORAGE: &str = "StorageError";
    pub const INTERNAL: &str = "InternalError";
}

// ── ServiceError ────────────────────────────────────────────────────

/// Unified service error type used across all modules.
///
/// Each variant maps to a stable error type (see [`error_type`]) and an
/// HTTP status code. The JSON response always includes all three fields:
///
/// ```json
/// {"result": false, "error_type": "NotFoundError", "error_message": "tweet 7 not found"}
/// ```
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Missing or unknown credential. HTTP 401.
    #[error("{0}")]
    Unauthorized(String),

    /// Resource does not exist. HTTP 404.
    #[error("{0}")]
    NotFound(String),

    /// Authenticated but not allowed to act on this resource. HTTP 403.
    #[error("{0}")]
    Forbidden(String),

    /// Input data is invalid (media size/format/reference). HTTP 403.
    #[error("{0}")]
    Validation(String),

    /// State conflict: duplicate like/follow, or removing one that is
    /// not there. HTTP 400.
    #[error("{0}")]
    Conflict(String),

    /// Malformed request (bad body, missing upload part). HTTP 400.
    #[error("{0}")]
    BadRequest(String),

    /// Storage backend failure. HTTP 500.
    #[error("{0}")]
    Storage(String),

    /// Unexpected internal error. HTTP 500.
    #[error("{0}")]
    Internal(String),
}

impl ServiceError {
    /// Stable, machine-readable error type.
    pub fn error_type(&self) -> &'static str {
        match self {
            ServiceError::Unauthorized(_) => error_type::IDENTIFICATION,
            ServiceError::NotFound(_) => error_type::NOT_FOUND,
            ServiceError::Forbidden(_) => error_type::FORBIDDEN,
            ServiceError::Validation(_) => error_type::VALIDATION,
            ServiceError::Conflict(_) => error_type::CONFLICT,
            ServiceError::BadRequest(_) => error_type::REQUEST,
            ServiceError::Storage(_) => error_type::STORAGE,
            ServiceError::Internal(_) => error_type::INTERNAL,
        }
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
            ServiceError::Validation(_) => StatusCode::FORBIDDEN,
            ServiceError::Conflict(_) => StatusCode::BAD_REQUEST,
            ServiceError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = serde_json::json!({
            "result": false,
            "error_type": self.error_type(),
            "error_message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_code_mapping() {
        assert_eq!(ServiceError::Unauthorized("x".into()).status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ServiceError::NotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ServiceError::Forbidden("x".into()).status_code(), StatusCode::FORBIDDEN);
        assert_eq!(ServiceError::Validation("x".into()).status_code(), StatusCode::FORBIDDEN);
        assert_eq!(ServiceError::Conflict("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ServiceError::BadRequest("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ServiceError::Storage("x".into()).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ServiceError::Internal("x".into()).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn error_type_mapping() {
        assert_eq!(ServiceError::Unauthorized("x".into()).error_type(), "IdentificationError");
        assert_eq!(ServiceError::NotFound("x".into()).error_type(), "NotFoundError");
        assert_eq!(ServiceError::Forbidden("x".into()).error_type(), "ForbiddenError");
        assert_eq!(ServiceError::Validation("x".into()).error_type(), "ValidationError");
        assert_eq!(ServiceError::Conflict("x".into()).error_type(), "ConflictError");
        assert_eq!(ServiceError::BadRequest("x".into()).error_type(), "RequestError");
        assert_eq!(ServiceError::Storage("x".into()).error_type(), "StorageError");
        assert_eq!(ServiceError::Internal("x".into()).error_type(), "InternalError");
    }

    #[test]
    fn json_response_status() {
        let err = ServiceError::NotFound("tweet 7 not found".into());
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn error_display_is_just_message() {
        assert_eq!(ServiceError::NotFound("tweet 7".into()).to_string(), "tweet 7");
        assert_eq!(ServiceError::Conflict("already liked".into()).to_string(), "already liked");
        assert_eq!(ServiceError::Unauthorized("api_key not exists".into()).to_string(), "api_key not exists");
    }
}
