//! Classboard client - application state for users, students and posts.
//!
//! A [`RootStore`] keeps one [`RootSnapshot`](classboard_engine::RootSnapshot)
//! holding the three collections. Async commands call the remote service
//! through gateway traits and record their progress in the collection's
//! `loading`/`error` fields; consumers read snapshots or subscribe to changes.
//!
//! ```no_run
//! use classboard_client::{ClientConfig, RootStore, UsersCommand};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let store = RootStore::connect(&ClientConfig::from_env()?)?;
//! store.dispatch(UsersCommand::Fetch).await;
//! println!("{} users", store.snapshot().users.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod gateway;
pub mod root;
pub mod store;

pub use config::{ClientConfig, ConfigError};
pub use error::GatewayError;
pub use gateway::{HttpGateway, PostsGateway, StudentsGateway, UsersGateway};
pub use root::{Command, PostsCommand, RootStore, StudentsCommand, UsersCommand};
pub use store::{PostsStore, Settlement, StudentsStore, UsersStore};

pub use classboard_engine as engine;
