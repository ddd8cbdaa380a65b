//! In-process user store backing the demo server and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::AppError;
use crate::repos::users::{User, UserId, UserStore};

#[derive(Debug, Default)]
struct Inner {
    users: HashMap<UserId, User>,
    ids_by_email: HashMap<String, UserId>,
    next_id: UserId,
}

/// `UserStore` over two hash maps guarded by a single lock.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    inner: RwLock<Inner>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user; ids are assigned sequentially from 1.
    pub fn create(&self, email: &str, password: &str) -> Result<User, AppError> {
        let mut inner = self.inner.write();
        if inner.ids_by_email.contains_key(email) {
            return Err(AppError::conflict(format!(
                "a user with email {email} already exists"
            )));
        }

        inner.next_id += 1;
        let user = User::new(inner.next_id, email, password);
        inner.ids_by_email.insert(email.to_string(), user.id);
        inner.users.insert(user.id, user.clone());
        Ok(user)
    }

    /// Remove a user; tokens already minted for it stop resolving.
    pub fn remove(&self, id: UserId) -> Option<User> {
        let mut inner = self.inner.write();
        let user = inner.users.remove(&id)?;
        inner.ids_by_email.remove(&user.email);
        Some(user)
    }

    pub fn len(&self) -> usize {
        self.inner.read().users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let inner = self.inner.read();
        Ok(inner
            .ids_by_email
            .get(email)
            .and_then(|id| inner.users.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AppError> {
        Ok(self.inner.read().users.get(&id).cloned())
    }
}
