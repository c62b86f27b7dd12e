//! Password hashing port

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::domain::DomainError;

/// One-way password hashing
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PasswordHashing: Send + Sync {
    /// Hash a plaintext password into a self-describing hash string
    async fn hash(&self, password: &str) -> Result<String, DomainError>;
}
