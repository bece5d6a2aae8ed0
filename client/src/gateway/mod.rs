//! Remote collection gateways.
//!
//! A gateway is a pure request/response boundary: it returns the service's
//! canonical records or fails, and keeps no local state. Stores are generic
//! over these traits so tests and alternative transports can stand in for
//! [`HttpGateway`].

mod http;

pub use http::HttpGateway;

use crate::error::Result;
use async_trait::async_trait;
use classboard_engine::{
    AttendStatus, ImageUpload, NewPost, NewUser, Post, PostId, PostPatch, Student, StudentId,
    User, UserId,
};

/// Calls for the users collection.
#[async_trait]
pub trait UsersGateway: Send + Sync + 'static {
    async fn list_users(&self) -> Result<Vec<User>>;

    async fn create_user(&self, user: &NewUser) -> Result<User>;

    /// Send the full record; the service answers with its canonical version.
    async fn update_user(&self, user: &User) -> Result<User>;

    async fn delete_user(&self, id: UserId) -> Result<()>;
}

/// Calls for the students collection.
#[async_trait]
pub trait StudentsGateway: Send + Sync + 'static {
    async fn list_students(&self) -> Result<Vec<Student>>;

    async fn update_attend(&self, id: StudentId, attend: AttendStatus) -> Result<Student>;

    async fn update_grade(&self, id: StudentId, grade: u8) -> Result<Student>;

    async fn update_online(&self, id: StudentId, online: bool) -> Result<Student>;
}

/// Calls for the posts collection.
///
/// Creates and updates come in a JSON and a file variant; a caller uses
/// exactly one of them per request.
#[async_trait]
pub trait PostsGateway: Send + Sync + 'static {
    async fn list_posts(&self) -> Result<Vec<Post>>;

    async fn create_post(&self, post: &NewPost) -> Result<Post>;

    /// Create a post with an uploaded image. `post.image_url` is not sent.
    async fn create_post_with_file(&self, post: &NewPost, image: &ImageUpload) -> Result<Post>;

    async fn update_post(&self, id: &PostId, patch: &PostPatch) -> Result<Post>;

    /// Replace the post's image with an upload.
    async fn update_post_file(&self, id: &PostId, image: &ImageUpload) -> Result<Post>;

    async fn delete_post(&self, id: &PostId) -> Result<()>;
}
