//! Transitions applied to a collection.
//!
//! Every command is expressed as a sequence of actions: `Begin` when it is
//! issued, then exactly one of the settlement actions when the gateway call
//! resolves. The two synchronous commands map to a single action each.

use crate::Entity;
use serde::Serialize;

/// A state transition for one collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Action<T: Entity> {
    /// A request was issued.
    Begin,
    /// The list request resolved with the server's sequence.
    Listed(Vec<T>),
    /// A create request resolved with the canonical record.
    Created(T),
    /// An update request resolved with the canonical record.
    Updated(T),
    /// A delete request for this id succeeded.
    Deleted(T::Id),
    /// A request was rejected; the message is what consumers see.
    Failed(String),
    /// Drop the current error message.
    ClearError,
    /// Mark a record as being edited, or clear the marker.
    SetEditing(Option<T::Id>),
}

impl<T: Entity> Action<T> {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Action::Begin => "begin",
            Action::Listed(_) => "listed",
            Action::Created(_) => "created",
            Action::Updated(_) => "updated",
            Action::Deleted(_) => "deleted",
            Action::Failed(_) => "failed",
            Action::ClearError => "clear_error",
            Action::SetEditing(_) => "set_editing",
        }
    }

    /// Whether this action settles an outstanding request.
    pub fn settles(&self) -> bool {
        matches!(
            self,
            Action::Listed(_)
                | Action::Created(_)
                | Action::Updated(_)
                | Action::Deleted(_)
                | Action::Failed(_)
        )
    }
}

/// Remote operations a collection command can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    List,
    Create,
    Update,
    Delete,
    UpdateAttend,
    UpdateGrade,
    UpdateOnline,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::List => "list",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::UpdateAttend => "update_attend",
            Operation::UpdateGrade => "update_grade",
            Operation::UpdateOnline => "update_online",
        }
    }

    /// Message shown when a request fails without a detail from the service.
    pub fn fallback_message(&self, collection: &str) -> String {
        let noun = singular(collection);
        match self {
            Operation::List => format!("failed to load {collection}"),
            Operation::Create => format!("failed to create {noun}"),
            Operation::Update => format!("failed to update {noun}"),
            Operation::Delete => format!("failed to delete {noun}"),
            Operation::UpdateAttend => "failed to update attendance".to_string(),
            Operation::UpdateGrade => "failed to update grade".to_string(),
            Operation::UpdateOnline => "failed to update online status".to_string(),
        }
    }
}

fn singular(collection: &str) -> &str {
    collection.strip_suffix('s').unwrap_or(collection)
}
