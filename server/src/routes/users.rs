//! User endpoints.

use axum::{
    extract::State,
    routing::{get, post},
    Router,
};
use classboard_engine::{NewUser, User, UserId};
use serde::Serialize;

use super::MessageResponse;
use crate::auth::AuthUser;
use crate::db::UserPatch;
use crate::error::Result;
use crate::extract::{Json, Path};
use crate::AppState;

#[derive(Serialize)]
pub struct DemoUsersResponse {
    pub message: String,
    pub users: Vec<User>,
}

/// Create user routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/users", get(list_users).post(create_user))
        .route(
            "/api/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/api/demo-users", post(create_demo_users))
}

/// GET /api/users
async fn list_users(State(state): State<AppState>, _auth: AuthUser) -> Json<Vec<User>> {
    Json(state.db.users.list().await)
}

/// GET /api/users/{id}
async fn get_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<UserId>,
) -> Result<Json<User>> {
    Ok(Json(state.db.users.get(id).await?))
}

/// POST /api/users
async fn create_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(new): Json<NewUser>,
) -> Result<Json<User>> {
    let user = state.db.users.insert(new).await?;
    tracing::info!(user_id = user.id, "created user");
    Ok(Json(user))
}

/// PUT /api/users/{id} - Partial update; absent fields are kept.
async fn update_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<UserId>,
    Json(patch): Json<UserPatch>,
) -> Result<Json<User>> {
    Ok(Json(state.db.users.update(id, patch).await?))
}

/// DELETE /api/users/{id}
async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<UserId>,
) -> Result<Json<MessageResponse>> {
    let user = state.db.users.remove(id).await?;
    tracing::info!(user_id = user.id, "deleted user");
    Ok(Json(MessageResponse {
        message: format!("user '{}' deleted by {}", user.name, auth.username),
    }))
}

/// POST /api/demo-users - Add sample accounts.
async fn create_demo_users(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Json<DemoUsersResponse> {
    let users = state.db.users.create_demo().await;
    Json(DemoUsersResponse {
        message: format!("created {} demo users", users.len()),
        users,
    })
}
