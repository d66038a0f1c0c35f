//! In-process user store for development and tests.

use crate::{StoreError, UserStore};
use async_trait::async_trait;
use directory_core::{RequestContext, User};
use shaku::Component;
use tokio::sync::RwLock;
use tracing::debug;

/// Append-only user store.
///
/// Records are kept in insertion order; a lookup returns the first record
/// stored under the email, as the MySQL store does.
#[derive(Component, Default)]
#[shaku(interface = UserStore)]
pub struct InMemoryUserStore {
    #[shaku(default)]
    users: RwLock<Vec<User>>,
}

impl InMemoryUserStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `users`.
    #[must_use]
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            users: RwLock::new(users.into_iter().collect()),
        }
    }

    /// Returns the number of stored records.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// Returns true if nothing has been stored.
    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn put(&self, ctx: &RequestContext, user: &User) -> Result<(), StoreError> {
        ctx.check()?;
        debug!("Storing user in memory: {}", user.email);
        self.users.write().await.push(user.clone());
        Ok(())
    }

    async fn get_by_email(&self, ctx: &RequestContext, email: &str) -> Result<User, StoreError> {
        ctx.check()?;
        self.users
            .read()
            .await
            .iter()
            .find(|user| user.email == email)
            .cloned()
            .ok_or(StoreError::NotFound)
    }
}
