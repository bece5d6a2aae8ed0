//! # Classboard Engine
//!
//! Deterministic collection state for the Classboard client.
//!
//! This crate holds the pure half of the client state layer: the record types
//! mirrored from the remote service, the per-collection state machine and the
//! combined snapshot. Network calls, scheduling and subscriptions live in
//! `classboard-client`; nothing here performs IO.
//!
//! ## Collection state machine
//!
//! Each collection is `idle → loading → idle`, with an `error` field that
//! coexists with `loading = false`. Transitions are [`Action`]s:
//!
//! - [`Action::Begin`] - a request was issued (`loading = true`, error cleared)
//! - [`Action::Listed`] - replace all records, server order preserved
//! - [`Action::Created`] - insert at the head (posts) or tail (users, students)
//! - [`Action::Updated`] - replace in place by id, dropped when absent
//! - [`Action::Deleted`] - remove by id, no-op when absent
//! - [`Action::Failed`] - record the error message, records untouched
//! - [`Action::ClearError`] / [`Action::SetEditing`] - synchronous bookkeeping
//!
//! ## Quick Start
//!
//! ```rust
//! use classboard_engine::{Action, CollectionState, User};
//!
//! let state = CollectionState::<User>::new().apply(Action::Begin);
//! assert!(state.is_loading());
//!
//! let state = state.apply(Action::Listed(vec![User {
//!     id: 1,
//!     name: "Ann".to_string(),
//!     email: "ann@example.com".to_string(),
//! }]));
//! assert_eq!(state.len(), 1);
//! assert!(!state.is_loading());
//! ```
//!
//! States are values: `apply` returns a new state, so snapshots held by
//! consumers never change underneath them.

pub mod action;
pub mod collection;
pub mod error;
pub mod record;
pub mod snapshot;

// Re-export main types at crate root
pub use action::{Action, Operation};
pub use collection::CollectionState;
pub use error::Error;
pub use record::{
    image_extension, validate_grade, AttendStatus, Entity, ImageUpload, InsertAt, NewPost,
    NewUser, Post, PostPatch, Student, User, IMAGE_EXTENSIONS, MAX_GRADE,
};
pub use snapshot::RootSnapshot;

/// Type aliases for clarity
pub type UserId = u64;
pub type StudentId = u64;
pub type PostId = String;
