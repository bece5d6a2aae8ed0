//! Classboard Server - REST service for users, students and posts.
//!
//! Data is kept in memory for the lifetime of the process. All `/api` routes
//! require HTTP Basic credentials; uploaded images are served from `/uploads`.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::Database;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Fresh state: empty posts and users, seeded students.
    pub fn new(config: Config) -> Self {
        Self {
            db: Database::new_shared(config.upload_dir.clone()),
            config: Arc::new(config),
        }
    }
}

/// Build the router with tracing, CORS and upload serving.
pub fn build_app(state: AppState) -> Router {
    let uploads = ServeDir::new(state.db.uploads.dir());

    Router::new()
        .merge(routes::create_routes())
        .nest_service("/uploads", uploads)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
