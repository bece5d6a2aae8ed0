//! Users store.

use std::sync::Arc;

use classboard_engine::{Action, CollectionState, NewUser, Operation, User, UserId};

use super::{Hub, Settlement, Slice};
use crate::gateway::UsersGateway;

/// Users collection: new registrations are appended in order.
pub struct UsersStore<G> {
    gateway: Arc<G>,
    slice: Slice<User>,
}

impl<G> Clone for UsersStore<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            slice: self.slice.clone(),
        }
    }
}

impl<G: UsersGateway> UsersStore<G> {
    pub(crate) fn new(gateway: Arc<G>, hub: Hub) -> Self {
        Self {
            gateway,
            slice: Slice::new(hub),
        }
    }

    /// Current users state.
    pub fn state(&self) -> CollectionState<User> {
        self.slice.state()
    }

    /// Load all users, replacing the local list.
    pub async fn fetch(&self) -> Settlement<Vec<User>> {
        let gateway = Arc::clone(&self.gateway);
        let call = async move { gateway.list_users().await };
        self.slice
            .run(Operation::List, call, |users| {
                Action::Listed(users.clone())
            })
            .await
    }

    /// Register a user and append the service's record.
    pub async fn add(&self, user: NewUser) -> Settlement<User> {
        let gateway = Arc::clone(&self.gateway);
        let call = async move { gateway.create_user(&user).await };
        self.slice
            .run(Operation::Create, call, |created| {
                Action::Created(created.clone())
            })
            .await
    }

    /// Save a user; the local copy is replaced by the service's answer.
    pub async fn update(&self, user: User) -> Settlement<User> {
        let gateway = Arc::clone(&self.gateway);
        let call = async move { gateway.update_user(&user).await };
        self.slice
            .run(Operation::Update, call, |updated| {
                Action::Updated(updated.clone())
            })
            .await
    }

    pub async fn delete(&self, id: UserId) -> Settlement<UserId> {
        let gateway = Arc::clone(&self.gateway);
        let call = async move { gateway.delete_user(id).await.map(|()| id) };
        self.slice
            .run(Operation::Delete, call, |id| Action::Deleted(*id))
            .await
    }

    pub fn clear_error(&self) {
        self.slice.commit(Action::ClearError);
    }
}
