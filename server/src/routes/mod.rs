//! HTTP route definitions.

mod health;
mod me;
mod posts;
mod students;
mod users;

use crate::AppState;
use axum::Router;
use serde::Serialize;

/// Confirmation body for deletions.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Create all application routes.
pub fn create_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(me::routes())
        .merge(posts::routes())
        .merge(users::routes())
        .merge(students::routes())
}
