//! Student roster endpoints.

use axum::{
    extract::State,
    routing::{get, put},
    Router,
};
use classboard_engine::{validate_grade, AttendStatus, Student, StudentId};
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::error::{AppError, Result};
use crate::extract::{Json, Path};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct AttendBody {
    pub attend: AttendStatus,
}

/// Grades arrive unchecked and are range-validated here.
#[derive(Debug, Deserialize)]
pub struct GradeBody {
    pub grade: i64,
}

#[derive(Debug, Deserialize)]
pub struct OnlineBody {
    pub online: bool,
}

/// Create student routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/students", get(list_students))
        .route("/api/students/{id}/attend", put(update_attend))
        .route("/api/students/{id}/grade", put(update_grade))
        .route("/api/students/{id}/online", put(update_online))
}

/// GET /api/students
async fn list_students(State(state): State<AppState>, _auth: AuthUser) -> Json<Vec<Student>> {
    Json(state.db.students.list())
}

/// PUT /api/students/{id}/attend
async fn update_attend(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<StudentId>,
    Json(body): Json<AttendBody>,
) -> Result<Json<Student>> {
    modify(&state, id, |s| s.attend = body.attend)
}

/// PUT /api/students/{id}/grade
async fn update_grade(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<StudentId>,
    Json(body): Json<GradeBody>,
) -> Result<Json<Student>> {
    if !state.db.students.contains(id) {
        return Err(AppError::NotFound("student"));
    }
    let grade = validate_grade(body.grade)?;
    modify(&state, id, |s| s.grade = grade)
}

/// PUT /api/students/{id}/online
async fn update_online(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<StudentId>,
    Json(body): Json<OnlineBody>,
) -> Result<Json<Student>> {
    modify(&state, id, |s| s.online = body.online)
}

fn modify(state: &AppState, id: StudentId, f: impl FnOnce(&mut Student)) -> Result<Json<Student>> {
    state
        .db
        .students
        .modify(id, f)
        .map(Json)
        .ok_or(AppError::NotFound("student"))
}
