//! Collection state - the in-memory mirror of one remote collection.
//!
//! A [`CollectionState`] is an immutable value. [`CollectionState::apply`]
//! returns a new state and leaves the receiver untouched, so any snapshot a
//! consumer still holds stays valid after later transitions.

use crate::{Action, Entity, InsertAt};
use serde::Serialize;
use std::sync::Arc;

/// Records of one collection plus request status.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionState<T: Entity> {
    /// Records in insertion order, at most one per id
    items: Arc<[T]>,
    /// True while a request issued for this collection is outstanding
    loading: bool,
    /// Message of the last rejected request
    error: Option<String>,
    /// Record currently under edit (only posts set this)
    editing_id: Option<T::Id>,
}

impl<T: Entity> Default for CollectionState<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> CollectionState<T> {
    /// An empty, idle collection.
    pub fn new() -> Self {
        Self {
            items: Arc::from(Vec::new()),
            loading: false,
            error: None,
            editing_id: None,
        }
    }

    /// An idle collection holding `items` as given.
    pub fn with_items(items: Vec<T>) -> Self {
        Self {
            items: Arc::from(items),
            ..Self::new()
        }
    }

    /// Apply a transition and return the resulting state.
    pub fn apply(&self, action: Action<T>) -> Self {
        match action {
            Action::Begin => Self {
                loading: true,
                error: None,
                ..self.clone()
            },
            Action::Listed(items) => Self {
                items: Arc::from(items),
                loading: false,
                ..self.clone()
            },
            Action::Created(record) => Self {
                items: inserted(&self.items, record, T::INSERT_AT),
                loading: false,
                ..self.clone()
            },
            Action::Updated(record) => Self {
                items: replaced(&self.items, record),
                loading: false,
                editing_id: None,
                ..self.clone()
            },
            Action::Deleted(id) => Self {
                items: removed(&self.items, &id),
                loading: false,
                ..self.clone()
            },
            Action::Failed(message) => Self {
                loading: false,
                error: Some(message),
                ..self.clone()
            },
            Action::ClearError => Self {
                error: None,
                ..self.clone()
            },
            Action::SetEditing(id) => Self {
                editing_id: id,
                ..self.clone()
            },
        }
    }

    /// All records in order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Shared handle to the record list.
    pub fn items_shared(&self) -> Arc<[T]> {
        Arc::clone(&self.items)
    }

    /// First record with the given id.
    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.items.iter().find(|r| r.id() == id)
    }

    /// Position of the first record with the given id.
    pub fn position(&self, id: &T::Id) -> Option<usize> {
        self.items.iter().position(|r| r.id() == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn editing_id(&self) -> Option<&T::Id> {
        self.editing_id.as_ref()
    }
}

fn inserted<T: Entity>(items: &[T], record: T, at: InsertAt) -> Arc<[T]> {
    let mut next = Vec::with_capacity(items.len() + 1);
    match at {
        InsertAt::Head => {
            next.push(record);
            next.extend_from_slice(items);
        }
        InsertAt::Tail => {
            next.extend_from_slice(items);
            next.push(record);
        }
    }
    Arc::from(next)
}

/// Replace the first record sharing `record`'s id. Misses are dropped.
fn replaced<T: Entity>(items: &[T], record: T) -> Arc<[T]> {
    let mut next = items.to_vec();
    if let Some(slot) = next.iter_mut().find(|r| r.id() == record.id()) {
        *slot = record;
    }
    Arc::from(next)
}

fn removed<T: Entity>(items: &[T], id: &T::Id) -> Arc<[T]> {
    items.iter().filter(|r| r.id() != id).cloned().collect()
}
