//! Posts store.

use std::sync::Arc;

use classboard_engine::{
    Action, CollectionState, ImageUpload, NewPost, Operation, Post, PostId, PostPatch,
};

use super::{Hub, Settlement, Slice};
use crate::gateway::PostsGateway;

/// Posts collection: a feed with newest posts first and one post under edit.
///
/// Inputs are forwarded without local checks; a post with an empty title
/// reaches the service and any rejection lands in `error` verbatim.
pub struct PostsStore<G> {
    gateway: Arc<G>,
    slice: Slice<Post>,
}

impl<G> Clone for PostsStore<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            slice: self.slice.clone(),
        }
    }
}

impl<G: PostsGateway> PostsStore<G> {
    pub(crate) fn new(gateway: Arc<G>, hub: Hub) -> Self {
        Self {
            gateway,
            slice: Slice::new(hub),
        }
    }

    pub fn state(&self) -> CollectionState<Post> {
        self.slice.state()
    }

    pub async fn fetch(&self) -> Settlement<Vec<Post>> {
        let gateway = Arc::clone(&self.gateway);
        let call = async move { gateway.list_posts().await };
        self.slice
            .run(Operation::List, call, |posts| {
                Action::Listed(posts.clone())
            })
            .await
    }

    /// Create a post, uploading `image` when one is attached.
    ///
    /// With an image the multipart endpoint is used and `post.image_url` is
    /// ignored; otherwise the post is sent as JSON.
    pub async fn add(&self, post: NewPost, image: Option<ImageUpload>) -> Settlement<Post> {
        let gateway = Arc::clone(&self.gateway);
        let call = async move {
            match &image {
                Some(image) => gateway.create_post_with_file(&post, image).await,
                None => gateway.create_post(&post).await,
            }
        };
        self.slice
            .run(Operation::Create, call, |created| {
                Action::Created(created.clone())
            })
            .await
    }

    /// Update a post. An attached image replaces the post's picture and
    /// `patch` is not sent; otherwise `patch` is applied as JSON.
    pub async fn update(
        &self,
        id: PostId,
        patch: PostPatch,
        image: Option<ImageUpload>,
    ) -> Settlement<Post> {
        let gateway = Arc::clone(&self.gateway);
        let call = async move {
            match &image {
                Some(image) => gateway.update_post_file(&id, image).await,
                None => gateway.update_post(&id, &patch).await,
            }
        };
        self.slice
            .run(Operation::Update, call, |updated| {
                Action::Updated(updated.clone())
            })
            .await
    }

    pub async fn delete(&self, id: PostId) -> Settlement<PostId> {
        let gateway = Arc::clone(&self.gateway);
        let call = async move { gateway.delete_post(&id).await.map(|()| id) };
        self.slice
            .run(Operation::Delete, call, |id| Action::Deleted(id.clone()))
            .await
    }

    pub fn clear_error(&self) {
        self.slice.commit(Action::ClearError);
    }

    /// Mark a post as being edited, or clear the marker with `None`.
    pub fn set_editing_id(&self, id: Option<PostId>) {
        self.slice.commit(Action::SetEditing(id));
    }
}
