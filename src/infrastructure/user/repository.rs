//! In-memory user repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::user::{
    FindUserByEmailRepository, FindUserByIdRepository, UpdateUserRepository, User, UserId,
    UserUpdate,
};
use crate::domain::DomainError;

/// In-memory implementation of the user repository ports
#[derive(Debug)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
    /// Index for email -> user ID lookup
    email_index: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            email_index: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a repository with initial users
    ///
    /// Later entries win when two users share an id or an e-mail; the
    /// earlier user is dropped so every stored e-mail stays unique.
    pub fn with_users(users: Vec<User>) -> Self {
        let mut users_map: HashMap<String, User> = HashMap::new();
        let mut email_map: HashMap<String, String> = HashMap::new();

        for user in users {
            let id = user.id().as_str().to_string();

            if let Some(previous) = users_map.remove(&id) {
                email_map.remove(previous.email());
            }
            if let Some(holder) = email_map.remove(user.email()) {
                users_map.remove(&holder);
            }

            email_map.insert(user.email().to_string(), id.clone());
            users_map.insert(id, user);
        }

        Self {
            users: Arc::new(RwLock::new(users_map)),
            email_index: Arc::new(RwLock::new(email_map)),
        }
    }

    #[cfg(test)]
    pub(crate) async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    #[cfg(test)]
    pub(crate) async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FindUserByIdRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(id.as_str()).cloned())
    }
}

#[async_trait]
impl FindUserByEmailRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let email_index = self.email_index.read().await;

        if let Some(user_id) = email_index.get(email) {
            let users = self.users.read().await;
            return Ok(users.get(user_id).cloned());
        }

        Ok(None)
    }
}

#[async_trait]
impl UpdateUserRepository for InMemoryUserRepository {
    async fn update(&self, id: &UserId, update: &UserUpdate) -> Result<u64, DomainError> {
        let mut users = self.users.write().await;
        let mut email_index = self.email_index.write().await;

        let Some(user) = users.get_mut(id.as_str()) else {
            return Ok(0);
        };

        // Uniqueness is enforced here as well, under the write lock
        if let Some(new_email) = update.email() {
            if new_email != user.email() {
                if email_index.contains_key(new_email) {
                    return Err(DomainError::email_in_use("E-mail already in use."));
                }

                if email_index.get(user.email()).map(String::as_str) == Some(id.as_str()) {
                    email_index.remove(user.email());
                }
                email_index.insert(new_email.to_string(), id.as_str().to_string());
            }
        }

        user.apply(update);

        Ok(1)
    }
}
