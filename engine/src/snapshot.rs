//! The combined, read-only view handed to consumers.

use crate::{CollectionState, Post, Student, User, UserId};
use serde::Serialize;

/// Point-in-time state of all collections.
///
/// Cloning is cheap: record lists are shared behind `Arc`s.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RootSnapshot {
    /// Incremented once per committed transition
    pub revision: u64,
    pub users: CollectionState<User>,
    pub students: CollectionState<Student>,
    pub posts: CollectionState<Post>,
}

impl RootSnapshot {
    /// Empty collections at revision 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a user by id.
    pub fn user_by_id(&self, id: UserId) -> Option<&User> {
        self.users.get(&id)
    }

    /// The post currently marked for editing, if it is loaded.
    pub fn editing_post(&self) -> Option<&Post> {
        self.posts.editing_id().and_then(|id| self.posts.get(id))
    }

    /// Whether any collection has a request outstanding.
    pub fn is_loading(&self) -> bool {
        self.users.is_loading() || self.students.is_loading() || self.posts.is_loading()
    }

    /// Serialize the snapshot to JSON for diagnostics.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Action;

    #[test]
    fn starts_empty() {
        let snapshot = RootSnapshot::new();
        assert_eq!(snapshot.revision, 0);
        assert!(snapshot.users.is_empty());
        assert!(snapshot.students.is_empty());
        assert!(snapshot.posts.is_empty());
        assert!(!snapshot.is_loading());
    }

    #[test]
    fn selectors() {
        let mut snapshot = RootSnapshot::new();
        snapshot.users = CollectionState::with_items(vec![User {
            id: 4,
            name: "Dana".into(),
            email: "dana@example.com".into(),
        }]);
        snapshot.students = snapshot.students.apply(Action::Begin);

        assert_eq!(snapshot.user_by_id(4).map(|u| u.name.as_str()), Some("Dana"));
        assert!(snapshot.user_by_id(5).is_none());
        assert!(snapshot.is_loading());
        assert!(snapshot.editing_post().is_none());
    }

    #[test]
    fn json_shape() {
        let json: serde_json::Value =
            serde_json::from_str(&RootSnapshot::new().to_json().unwrap()).unwrap();
        assert_eq!(json["users"]["items"], serde_json::json!([]));
        assert_eq!(json["posts"]["editingId"], serde_json::Value::Null);
        assert_eq!(json["students"]["loading"], false);
    }
}
