//! Users table.
//!
//! Emails are unique. Checking and writing happen under one lock so two
//! concurrent registrations cannot both claim an address.

use std::collections::BTreeMap;

use classboard_engine::{NewUser, User, UserId};
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::error::{AppError, Result};

const DUPLICATE_EMAIL: &str = "a user with this email already exists";

/// Accounts created by `POST /api/demo-users`.
const DEMO_USERS: [(&str, &str); 3] = [
    ("Ivan Ivanov", "ivan@example.com"),
    ("Maria Petrova", "maria@example.com"),
    ("Alexey Sidorov", "alexey@example.com"),
];

/// Partial user update. Absent fields are kept.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Default)]
struct Rows {
    /// Last id handed out; ids are never reused
    counter: UserId,
    by_id: BTreeMap<UserId, User>,
}

impl Rows {
    fn email_taken(&self, email: &str, except: Option<UserId>) -> bool {
        self.by_id
            .values()
            .any(|u| u.email == email && Some(u.id) != except)
    }

    fn push(&mut self, name: String, email: String) -> User {
        self.counter += 1;
        let user = User {
            id: self.counter,
            name,
            email,
        };
        self.by_id.insert(user.id, user.clone());
        user
    }
}

#[derive(Default)]
pub struct UsersTable {
    rows: Mutex<Rows>,
}

impl UsersTable {
    /// All users in id order.
    pub async fn list(&self) -> Vec<User> {
        self.rows.lock().await.by_id.values().cloned().collect()
    }

    pub async fn get(&self, id: UserId) -> Result<User> {
        self.rows
            .lock()
            .await
            .by_id
            .get(&id)
            .cloned()
            .ok_or(AppError::NotFound("user"))
    }

    pub async fn insert(&self, new: NewUser) -> Result<User> {
        let mut rows = self.rows.lock().await;
        if rows.email_taken(&new.email, None) {
            return Err(AppError::BadRequest(DUPLICATE_EMAIL.to_string()));
        }
        Ok(rows.push(new.name, new.email))
    }

    pub async fn update(&self, id: UserId, patch: UserPatch) -> Result<User> {
        let mut rows = self.rows.lock().await;
        if !rows.by_id.contains_key(&id) {
            return Err(AppError::NotFound("user"));
        }
        if let Some(email) = &patch.email {
            if rows.email_taken(email, Some(id)) {
                return Err(AppError::BadRequest(DUPLICATE_EMAIL.to_string()));
            }
        }

        let user = rows.by_id.get_mut(&id).ok_or(AppError::NotFound("user"))?;
        if let Some(name) = patch.name {
            user.name = name;
        }
        if let Some(email) = patch.email {
            user.email = email;
        }
        Ok(user.clone())
    }

    pub async fn remove(&self, id: UserId) -> Result<User> {
        self.rows
            .lock()
            .await
            .by_id
            .remove(&id)
            .ok_or(AppError::NotFound("user"))
    }

    /// Add the demo accounts whose emails are still free.
    pub async fn create_demo(&self) -> Vec<User> {
        let mut rows = self.rows.lock().await;
        let mut created = Vec::new();
        for (name, email) in DEMO_USERS {
            if !rows.email_taken(email, None) {
                created.push(rows.push(name.to_string(), email.to_string()));
            }
        }
        created
    }
}
