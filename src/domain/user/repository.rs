//! User repository ports
//!
//! Each port is a single capability so the update use case depends only on
//! what it calls. Storage adapters usually implement all three.

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::entity::{User, UserId};
use super::update::UserUpdate;
use crate::domain::DomainError;

/// Look up a user by identifier
#[cfg_attr(test, automock)]
#[async_trait]
pub trait FindUserByIdRepository: Send + Sync {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;
}

/// Look up a user by e-mail address
#[cfg_attr(test, automock)]
#[async_trait]
pub trait FindUserByEmailRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;
}

/// Persist a staged update
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UpdateUserRepository: Send + Sync {
    /// Write the present fields of `update` to the user with `id`
    ///
    /// Returns the number of rows affected; zero means nothing was written.
    async fn update(&self, id: &UserId, update: &UserUpdate) -> Result<u64, DomainError>;
}
