//! Health check and welcome endpoints.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Root document describing the service.
#[derive(Serialize)]
pub struct WelcomeResponse {
    pub message: String,
    pub health: String,
    pub posts_count: usize,
    pub auth_info: AuthInfo,
}

#[derive(Serialize)]
pub struct AuthInfo {
    #[serde(rename = "type")]
    pub kind: String,
    pub login: String,
}

/// Create health routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/", get(root))
}

/// Health check handler.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Root handler. Public, no credentials needed.
async fn root(State(state): State<AppState>) -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to the Classboard API".to_string(),
        health: "/health".to_string(),
        posts_count: state.db.posts.len(),
        auth_info: AuthInfo {
            kind: "Basic Auth".to_string(),
            login: state.config.auth_username.clone(),
        },
    })
}
