//! Uploaded image files.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use classboard_engine::image_extension;

use crate::error::Result;

/// Directory holding uploaded images, served under `/uploads`.
pub struct Uploads {
    dir: PathBuf,
}

impl Uploads {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Store an image under a fresh random name and return that name.
    ///
    /// Only image extensions are accepted; the original name is not kept.
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> Result<String> {
        let ext = image_extension(original_name)?;
        let name = format!("{}.{ext}", uuid::Uuid::new_v4().simple());

        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(self.dir.join(&name), bytes).await?;
        tracing::info!(file = %name, size = bytes.len(), "stored upload");
        Ok(name)
    }

    /// Delete a stored file. Missing files are ignored.
    pub async fn remove(&self, name: &str) {
        match tokio::fs::remove_file(self.dir.join(name)).await {
            Ok(()) => tracing::info!(file = name, "removed upload"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(file = name, error = %e, "failed to remove upload"),
        }
    }
}
