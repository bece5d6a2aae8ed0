//! Collection stores - async commands over gateways.
//!
//! Each store owns one slot of the shared [`RootSnapshot`]. A command commits
//! `Begin`, then awaits a spawned task that performs the gateway call and
//! commits the settlement. A caller that stops waiting does not cancel it.
//! Commits are single `send_modify` calls on the snapshot channel, so readers
//! never see a half-applied transition and subscribers are woken once per
//! transition.
//!
//! Overlapping commands on one store are not fenced: whichever call settles
//! last determines the final `loading`/`error`/items.

mod posts;
mod students;
mod users;

pub use posts::PostsStore;
pub use students::StudentsStore;
pub use users::UsersStore;

use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use classboard_engine::{Action, CollectionState, Entity, Operation, Post, RootSnapshot, Student, User};
use tokio::sync::watch;

use crate::error::GatewayError;

/// The channel every store publishes into.
pub(crate) type Hub = Arc<watch::Sender<RootSnapshot>>;

/// How a command settled.
///
/// Failures are already recorded in the store's `error` field; the message is
/// repeated here for callers that want to react inline.
#[derive(Debug, Clone, PartialEq)]
pub enum Settlement<R> {
    Fulfilled(R),
    Rejected(String),
}

impl<R> Settlement<R> {
    pub fn is_fulfilled(&self) -> bool {
        matches!(self, Settlement::Fulfilled(_))
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Settlement::Rejected(_))
    }

    /// The fulfilled value, if any.
    pub fn ok(self) -> Option<R> {
        match self {
            Settlement::Fulfilled(value) => Some(value),
            Settlement::Rejected(_) => None,
        }
    }

    /// The rejection message, if any.
    pub fn rejection(&self) -> Option<&str> {
        match self {
            Settlement::Fulfilled(_) => None,
            Settlement::Rejected(message) => Some(message),
        }
    }

    pub fn into_result(self) -> Result<R, String> {
        match self {
            Settlement::Fulfilled(value) => Ok(value),
            Settlement::Rejected(message) => Err(message),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(R) -> U) -> Settlement<U> {
        match self {
            Settlement::Fulfilled(value) => Settlement::Fulfilled(f(value)),
            Settlement::Rejected(message) => Settlement::Rejected(message),
        }
    }
}

/// Locates a collection inside the root snapshot.
pub(crate) trait Slot: Entity {
    fn view(root: &RootSnapshot) -> &CollectionState<Self>;

    fn view_mut(root: &mut RootSnapshot) -> &mut CollectionState<Self>;
}

impl Slot for User {
    fn view(root: &RootSnapshot) -> &CollectionState<Self> {
        &root.users
    }

    fn view_mut(root: &mut RootSnapshot) -> &mut CollectionState<Self> {
        &mut root.users
    }
}

impl Slot for Student {
    fn view(root: &RootSnapshot) -> &CollectionState<Self> {
        &root.students
    }

    fn view_mut(root: &mut RootSnapshot) -> &mut CollectionState<Self> {
        &mut root.students
    }
}

impl Slot for Post {
    fn view(root: &RootSnapshot) -> &CollectionState<Self> {
        &root.posts
    }

    fn view_mut(root: &mut RootSnapshot) -> &mut CollectionState<Self> {
        &mut root.posts
    }
}

/// Write access to one collection's slot.
pub(crate) struct Slice<T> {
    hub: Hub,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for Slice<T> {
    fn clone(&self) -> Self {
        Self {
            hub: Arc::clone(&self.hub),
            _entity: PhantomData,
        }
    }
}

impl<T: Slot> Slice<T> {
    pub(crate) fn new(hub: Hub) -> Self {
        Self {
            hub,
            _entity: PhantomData,
        }
    }

    /// Current state of this collection.
    pub(crate) fn state(&self) -> CollectionState<T> {
        T::view(&self.hub.borrow()).clone()
    }

    /// Apply one transition and notify subscribers.
    pub(crate) fn commit(&self, action: Action<T>) {
        let name = action.name();
        self.hub.send_modify(|root| {
            let slot = T::view_mut(root);
            let next = slot.apply(action);
            *slot = next;
            root.revision += 1;
        });
        tracing::debug!(collection = T::COLLECTION, action = name, "applied transition");
    }

    /// Run a gateway call through the begin/settle cycle.
    ///
    /// `settle` turns the fulfilled value into the success transition. The
    /// call and its settlement run on a spawned task, so dropping the returned
    /// future does not stop the transition from being committed.
    pub(crate) async fn run<R, F, S>(&self, operation: Operation, call: F, settle: S) -> Settlement<R>
    where
        R: Send + 'static,
        F: Future<Output = Result<R, GatewayError>> + Send + 'static,
        S: FnOnce(&R) -> Action<T> + Send + 'static,
    {
        self.commit(Action::Begin);
        let slice = self.clone();
        let task = tokio::spawn(async move { slice.settle(operation, call.await, settle) });
        match task.await {
            Ok(settled) => settled,
            Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
            Err(err) => {
                tracing::warn!(collection = T::COLLECTION, error = %err, "command task cancelled");
                Settlement::Rejected(operation.fallback_message(T::COLLECTION))
            }
        }
    }

    fn settle<R>(
        &self,
        operation: Operation,
        outcome: Result<R, GatewayError>,
        settle: impl FnOnce(&R) -> Action<T>,
    ) -> Settlement<R> {
        match outcome {
            Ok(value) => {
                self.commit(settle(&value));
                Settlement::Fulfilled(value)
            }
            Err(err) => {
                let message = err
                    .detail()
                    .map(str::to_owned)
                    .unwrap_or_else(|| operation.fallback_message(T::COLLECTION));
                tracing::warn!(
                    collection = T::COLLECTION,
                    operation = operation.as_str(),
                    error = %err,
                    "command rejected"
                );
                self.commit(Action::Failed(message.clone()));
                Settlement::Rejected(message)
            }
        }
    }
}
