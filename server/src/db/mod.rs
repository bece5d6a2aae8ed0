//! In-memory storage.
//!
//! Tables live for the lifetime of the process; uploaded images are files
//! under the configured upload directory.

mod posts;
mod students;
mod uploads;
mod users;

pub use posts::{Page, PostsTable};
pub use students::StudentsTable;
pub use uploads::Uploads;
pub use users::{UserPatch, UsersTable};

use std::path::PathBuf;
use std::sync::Arc;

/// All tables plus the upload directory.
pub struct Database {
    pub posts: PostsTable,
    pub users: UsersTable,
    pub students: StudentsTable,
    pub uploads: Uploads,
}

impl Database {
    /// Empty posts and users, seeded students.
    pub fn new(upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            posts: PostsTable::default(),
            users: UsersTable::default(),
            students: StudentsTable::seeded(),
            uploads: Uploads::new(upload_dir),
        }
    }

    /// Create a database wrapped in Arc for sharing.
    pub fn new_shared(upload_dir: impl Into<PathBuf>) -> Arc<Self> {
        Arc::new(Self::new(upload_dir))
    }

    /// Delete an uploaded file unless a post still references it.
    pub async fn release_file(&self, name: &str) {
        if self.posts.file_in_use(name) {
            tracing::debug!(file = name, "upload still referenced, keeping");
            return;
        }
        self.uploads.remove(name).await;
    }
}
