//! Posts table.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{Local, NaiveDateTime};
use classboard_engine::{NewPost, Post, PostId, PostPatch};
use dashmap::DashMap;
use serde::Deserialize;

/// `_start`/`_limit` listing window. Values of zero or below are ignored.
#[derive(Debug, Default, Clone, Copy, Deserialize)]
pub struct Page {
    #[serde(rename = "_start")]
    pub start: Option<i64>,
    #[serde(rename = "_limit")]
    pub limit: Option<i64>,
}

struct StoredPost {
    /// Insertion counter, breaks `created_at` ties
    seq: u64,
    post: Post,
}

/// Posts keyed by uuid.
#[derive(Default)]
pub struct PostsTable {
    rows: DashMap<PostId, StoredPost>,
    seq: AtomicU64,
}

/// A post change plus the upload it no longer references.
pub type Replaced = (Post, Option<String>);

impl PostsTable {
    /// Posts oldest first, windowed by `page`.
    pub fn list(&self, page: Page) -> Vec<Post> {
        let mut rows: Vec<(NaiveDateTime, u64, Post)> = self
            .rows
            .iter()
            .map(|row| (row.post.created_at, row.seq, row.post.clone()))
            .collect();
        rows.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));

        let start = page.start.filter(|s| *s > 0).unwrap_or(0) as usize;
        let limit = page.limit.filter(|l| *l > 0).map_or(usize::MAX, |l| l as usize);
        rows.into_iter()
            .skip(start)
            .take(limit)
            .map(|(_, _, post)| post)
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<Post> {
        self.rows.get(id).map(|row| row.post.clone())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Store a new post. `image_file` is the saved upload, if any.
    pub fn insert(&self, new: NewPost, image_file: Option<String>) -> Post {
        let now = now();
        let post = Post {
            id: uuid::Uuid::new_v4().to_string(),
            title: new.title,
            content: new.content,
            author: new.author,
            image_url: new.image_url,
            image_file,
            created_at: now,
            updated_at: now,
        };
        let seq = self.seq.fetch_add(1, Ordering::Relaxed);
        self.rows.insert(
            post.id.clone(),
            StoredPost {
                seq,
                post: post.clone(),
            },
        );
        post
    }

    /// Apply the fields present in `patch`.
    ///
    /// A blank `image_url` is stored as null. Setting or clearing
    /// `image_url` detaches the uploaded file, which is returned.
    pub fn update(&self, id: &str, patch: PostPatch) -> Option<Replaced> {
        let mut row = self.rows.get_mut(id)?;
        let post = &mut row.post;
        let mut detached = None;

        if let Some(title) = patch.title {
            post.title = title;
        }
        if let Some(content) = patch.content {
            post.content = content;
        }
        if let Some(author) = patch.author {
            post.author = author;
        }
        if let Some(image_url) = patch.image_url {
            detached = post.image_file.take();
            post.image_url = image_url.filter(|url| !url.trim().is_empty());
        }
        post.updated_at = now();

        Some((post.clone(), detached))
    }

    /// Attach a new upload, clearing `image_url`. Returns the previous file.
    pub fn replace_file(&self, id: &str, file: String) -> Option<Replaced> {
        let mut row = self.rows.get_mut(id)?;
        let post = &mut row.post;
        let previous = post.image_file.replace(file);
        post.image_url = None;
        post.updated_at = now();
        Some((post.clone(), previous))
    }

    pub fn remove(&self, id: &str) -> Option<Post> {
        self.rows.remove(id).map(|(_, row)| row.post)
    }

    /// Whether any post references the upload `name`.
    pub fn file_in_use(&self, name: &str) -> bool {
        self.rows
            .iter()
            .any(|row| row.post.image_file.as_deref() == Some(name))
    }
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}
