//! Post endpoints, JSON and multipart.

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    routing::{get, post, put},
    Router,
};
use classboard_engine::{ImageUpload, NewPost, Post, PostId, PostPatch};

use super::MessageResponse;
use crate::auth::AuthUser;
use crate::db::Page;
use crate::error::{AppError, Result};
use crate::extract::{Json, Path, Query};
use crate::AppState;

/// Upper bound on request bodies for these routes.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Create post routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/posts", get(list_posts).post(create_post))
        .route("/api/posts/upload", post(create_post_upload))
        .route(
            "/api/posts/{id}",
            get(get_post).put(update_post).delete(delete_post),
        )
        .route("/api/posts/{id}/upload", put(update_post_upload))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}

/// GET /api/posts - Posts oldest first, optionally windowed.
async fn list_posts(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(page): Query<Page>,
) -> Json<Vec<Post>> {
    Json(state.db.posts.list(page))
}

/// GET /api/posts/{id}
async fn get_post(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<PostId>,
) -> Result<Json<Post>> {
    let post = state.db.posts.get(&id).ok_or(AppError::NotFound("post"))?;
    Ok(Json(post))
}

/// POST /api/posts - Create a post from JSON.
async fn create_post(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(new): Json<NewPost>,
) -> Json<Post> {
    let post = state.db.posts.insert(new, None);
    tracing::info!(post_id = %post.id, "created post");
    Json(post)
}

/// PUT /api/posts/{id} - Apply a partial update.
async fn update_post(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<PostId>,
    Json(patch): Json<PostPatch>,
) -> Result<Json<Post>> {
    let (post, detached) = state
        .db
        .posts
        .update(&id, patch)
        .ok_or(AppError::NotFound("post"))?;
    if let Some(file) = detached {
        state.db.release_file(&file).await;
    }
    Ok(Json(post))
}

/// DELETE /api/posts/{id}
async fn delete_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<PostId>,
) -> Result<Json<MessageResponse>> {
    let post = state
        .db
        .posts
        .remove(&id)
        .ok_or(AppError::NotFound("post"))?;
    if let Some(file) = &post.image_file {
        state.db.release_file(file).await;
    }
    tracing::info!(post_id = %post.id, "deleted post");

    Ok(Json(MessageResponse {
        message: format!("post '{}' deleted by {}", post.title, auth.username),
    }))
}

/// POST /api/posts/upload - Create a post from a form, image optional.
async fn create_post_upload(
    State(state): State<AppState>,
    _auth: AuthUser,
    multipart: Multipart,
) -> Result<Json<Post>> {
    let form = PostForm::read(multipart).await?;
    let new = NewPost::new(
        form.title.ok_or(AppError::MissingField("title"))?,
        form.content.ok_or(AppError::MissingField("content"))?,
        form.author.ok_or(AppError::MissingField("author"))?,
    );

    let image_file = match &form.image {
        Some(image) => Some(state.db.uploads.save(&image.file_name, &image.bytes).await?),
        None => None,
    };
    let post = state.db.posts.insert(new, image_file);
    tracing::info!(post_id = %post.id, with_image = post.image_file.is_some(), "created post");
    Ok(Json(post))
}

/// PUT /api/posts/{id}/upload - Replace the post's image with an upload.
async fn update_post_upload(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<PostId>,
    multipart: Multipart,
) -> Result<Json<Post>> {
    if state.db.posts.get(&id).is_none() {
        return Err(AppError::NotFound("post"));
    }
    let image = PostForm::read(multipart)
        .await?
        .image
        .ok_or_else(|| AppError::BadRequest("no file provided".to_string()))?;
    let saved = state.db.uploads.save(&image.file_name, &image.bytes).await?;

    match state.db.posts.replace_file(&id, saved.clone()) {
        Some((post, previous)) => {
            if let Some(file) = previous {
                state.db.release_file(&file).await;
            }
            Ok(Json(post))
        }
        None => {
            // Deleted while the body was streaming.
            state.db.uploads.remove(&saved).await;
            Err(AppError::NotFound("post"))
        }
    }
}

/// Fields of a post form. Unknown fields are skipped.
#[derive(Default)]
struct PostForm {
    title: Option<String>,
    content: Option<String>,
    author: Option<String>,
    image: Option<ImageUpload>,
}

impl PostForm {
    async fn read(mut multipart: Multipart) -> Result<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };
            match name.as_str() {
                "title" => form.title = Some(field.text().await?),
                "content" => form.content = Some(field.text().await?),
                "author" => form.author = Some(field.text().await?),
                "image_file" => {
                    let file_name = field.file_name().unwrap_or_default().to_string();
                    let content_type = field.content_type().map(str::to_owned);
                    let bytes = field.bytes().await?;
                    // Browsers send an empty part when no file is picked.
                    if !file_name.is_empty() {
                        form.image = Some(ImageUpload {
                            file_name,
                            content_type,
                            bytes: bytes.to_vec(),
                        });
                    }
                }
                _ => {}
            }
        }

        Ok(form)
    }
}
