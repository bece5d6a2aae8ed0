//! Root store - composes the collection stores into one snapshot.

use std::sync::Arc;

use classboard_engine::{
    AttendStatus, ImageUpload, NewPost, NewUser, PostId, PostPatch, RootSnapshot, StudentId, User,
    UserId,
};
use tokio::sync::watch;

use crate::config::ClientConfig;
use crate::error::GatewayError;
use crate::gateway::{HttpGateway, PostsGateway, StudentsGateway, UsersGateway};
use crate::store::{Hub, PostsStore, Settlement, StudentsStore, UsersStore};

/// Commands for the users collection.
#[derive(Debug, Clone, PartialEq)]
pub enum UsersCommand {
    Fetch,
    Add(NewUser),
    Update(User),
    Delete(UserId),
    ClearError,
}

/// Commands for the students collection.
#[derive(Debug, Clone, PartialEq)]
pub enum StudentsCommand {
    Fetch,
    UpdateAttend { id: StudentId, attend: AttendStatus },
    UpdateGrade { id: StudentId, grade: u8 },
    UpdateOnline { id: StudentId, online: bool },
    ClearError,
}

/// Commands for the posts collection.
#[derive(Debug, Clone, PartialEq)]
pub enum PostsCommand {
    Fetch,
    Add {
        post: NewPost,
        image: Option<ImageUpload>,
    },
    Update {
        id: PostId,
        patch: PostPatch,
        image: Option<ImageUpload>,
    },
    Delete(PostId),
    ClearError,
    SetEditing(Option<PostId>),
}

/// A command addressed to one collection.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Users(UsersCommand),
    Students(StudentsCommand),
    Posts(PostsCommand),
}

impl From<UsersCommand> for Command {
    fn from(command: UsersCommand) -> Self {
        Command::Users(command)
    }
}

impl From<StudentsCommand> for Command {
    fn from(command: StudentsCommand) -> Self {
        Command::Students(command)
    }
}

impl From<PostsCommand> for Command {
    fn from(command: PostsCommand) -> Self {
        Command::Posts(command)
    }
}

/// The application's state container.
///
/// Construct one at startup and hand it to consumers; every instance is
/// independent. Cloning yields another handle to the same state.
pub struct RootStore<U = HttpGateway, S = HttpGateway, P = HttpGateway> {
    hub: Hub,
    users: UsersStore<U>,
    students: StudentsStore<S>,
    posts: PostsStore<P>,
}

impl<U, S, P> Clone for RootStore<U, S, P> {
    fn clone(&self) -> Self {
        Self {
            hub: Arc::clone(&self.hub),
            users: self.users.clone(),
            students: self.students.clone(),
            posts: self.posts.clone(),
        }
    }
}

impl RootStore {
    /// Build a store backed by the HTTP service described by `config`.
    pub fn connect(config: &ClientConfig) -> Result<Self, GatewayError> {
        let gateway = Arc::new(HttpGateway::new(config)?);
        tracing::info!(base_url = %gateway.base_url(), "connected root store");
        Ok(Self::with_gateway(gateway))
    }
}

impl<G> RootStore<G, G, G>
where
    G: UsersGateway + StudentsGateway + PostsGateway,
{
    /// Build a store whose collections share one gateway.
    pub fn with_gateway(gateway: Arc<G>) -> Self {
        Self::new(Arc::clone(&gateway), Arc::clone(&gateway), gateway)
    }
}

impl<U, S, P> RootStore<U, S, P>
where
    U: UsersGateway,
    S: StudentsGateway,
    P: PostsGateway,
{
    /// Build a store with empty collections.
    pub fn new(users: Arc<U>, students: Arc<S>, posts: Arc<P>) -> Self {
        let (tx, _rx) = watch::channel(RootSnapshot::new());
        let hub: Hub = Arc::new(tx);

        Self {
            users: UsersStore::new(users, Arc::clone(&hub)),
            students: StudentsStore::new(students, Arc::clone(&hub)),
            posts: PostsStore::new(posts, Arc::clone(&hub)),
            hub,
        }
    }

    pub fn users(&self) -> &UsersStore<U> {
        &self.users
    }

    pub fn students(&self) -> &StudentsStore<S> {
        &self.students
    }

    pub fn posts(&self) -> &PostsStore<P> {
        &self.posts
    }

    /// The current state of all collections.
    pub fn snapshot(&self) -> RootSnapshot {
        self.hub.borrow().clone()
    }

    /// Receive a notification after every committed transition.
    pub fn subscribe(&self) -> watch::Receiver<RootSnapshot> {
        self.hub.subscribe()
    }

    /// Route a command to its collection and wait for it to settle.
    ///
    /// Synchronous commands settle immediately as fulfilled.
    pub async fn dispatch(&self, command: impl Into<Command>) -> Settlement<()> {
        match command.into() {
            Command::Users(command) => self.dispatch_users(command).await,
            Command::Students(command) => self.dispatch_students(command).await,
            Command::Posts(command) => self.dispatch_posts(command).await,
        }
    }

    async fn dispatch_users(&self, command: UsersCommand) -> Settlement<()> {
        match command {
            UsersCommand::Fetch => self.users.fetch().await.map(drop),
            UsersCommand::Add(user) => self.users.add(user).await.map(drop),
            UsersCommand::Update(user) => self.users.update(user).await.map(drop),
            UsersCommand::Delete(id) => self.users.delete(id).await.map(drop),
            UsersCommand::ClearError => {
                self.users.clear_error();
                Settlement::Fulfilled(())
            }
        }
    }

    async fn dispatch_students(&self, command: StudentsCommand) -> Settlement<()> {
        match command {
            StudentsCommand::Fetch => self.students.fetch().await.map(drop),
            StudentsCommand::UpdateAttend { id, attend } => {
                self.students.update_attend(id, attend).await.map(drop)
            }
            StudentsCommand::UpdateGrade { id, grade } => {
                self.students.update_grade(id, grade).await.map(drop)
            }
            StudentsCommand::UpdateOnline { id, online } => {
                self.students.update_online(id, online).await.map(drop)
            }
            StudentsCommand::ClearError => {
                self.students.clear_error();
                Settlement::Fulfilled(())
            }
        }
    }

    async fn dispatch_posts(&self, command: PostsCommand) -> Settlement<()> {
        match command {
            PostsCommand::Fetch => self.posts.fetch().await.map(drop),
            PostsCommand::Add { post, image } => self.posts.add(post, image).await.map(drop),
            PostsCommand::Update { id, patch, image } => {
                self.posts.update(id, patch, image).await.map(drop)
            }
            PostsCommand::Delete(id) => self.posts.delete(id).await.map(drop),
            PostsCommand::ClearError => {
                self.posts.clear_error();
                Settlement::Fulfilled(())
            }
            PostsCommand::SetEditing(id) => {
                self.posts.set_editing_id(id);
                Settlement::Fulfilled(())
            }
        }
    }
}
