//! Unified error handling for the server.

use axum::{
    extract::{
        multipart::MultipartError,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{header::WWW_AUTHENTICATE, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Engine error: {0}")]
    Engine(#[from] classboard_engine::Error),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Missing form field: {0}")]
    MissingField(&'static str),

    #[error("Invalid JSON body: {0}")]
    JsonBody(#[from] JsonRejection),

    #[error("Invalid path parameter: {0}")]
    PathParams(#[from] PathRejection),

    #[error("Invalid query string: {0}")]
    QueryParams(#[from] QueryRejection),

    #[error("Multipart error: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Not found: {0}")]
    NotFound(&'static str),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error response body. Clients read `detail`.
#[derive(Serialize)]
struct ErrorResponse {
    detail: Value,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            AppError::Engine(classboard_engine::Error::GradeOutOfRange(_)) => (
                StatusCode::BAD_REQUEST,
                json!("grade must be between 0 and 12"),
            ),
            AppError::Engine(e) => {
                tracing::warn!("Engine error: {:?}", e);
                (StatusCode::BAD_REQUEST, json!(e.to_string()))
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!(msg)),
            AppError::MissingField(field) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                validation(&["body", field], "field required".into()),
            ),
            AppError::JsonBody(rejection) => {
                (rejection.status(), validation(&["body"], rejection.body_text()))
            }
            AppError::PathParams(rejection) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                validation(&["path"], rejection.body_text()),
            ),
            AppError::QueryParams(rejection) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                validation(&["query"], rejection.body_text()),
            ),
            AppError::Multipart(e) => (e.status(), json!(e.body_text())),
            AppError::NotFound(what) => (StatusCode::NOT_FOUND, json!(format!("{what} not found"))),
            AppError::Unauthorized => {
                let body = Json(ErrorResponse {
                    detail: json!("invalid username or password"),
                });
                return (
                    StatusCode::UNAUTHORIZED,
                    [(WWW_AUTHENTICATE, "Basic")],
                    body,
                )
                    .into_response();
            }
            AppError::Io(e) => {
                tracing::error!("IO error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!("internal server error"),
                )
            }
        };

        (status, Json(ErrorResponse { detail })).into_response()
    }
}

/// A single-entry validation list, the shape clients join into a message.
fn validation(loc: &[&str], msg: String) -> Value {
    json!([{ "loc": loc, "msg": msg }])
}

/// Result type alias for handlers.
pub type Result<T> = std::result::Result<T, AppError>;
