//! Credential check endpoint.

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::auth::AuthUser;
use crate::AppState;

#[derive(Serialize)]
pub struct MeResponse {
    pub username: String,
    pub message: String,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/me", get(me))
}

/// GET /api/me - Echo the authenticated user.
async fn me(auth: AuthUser) -> Json<MeResponse> {
    Json(MeResponse {
        message: format!("Hello, {}! Authentication succeeded.", auth.username),
        username: auth.username,
    })
}
