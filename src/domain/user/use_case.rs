//! Use case ports exposed to the API layer

use async_trait::async_trait;

use super::entity::User;
use super::update::UpdateUserRequest;
use crate::domain::DomainError;

/// Update an existing user from a partial request
#[async_trait]
pub trait UpdateUserUseCase: Send + Sync {
    /// Returns the stored user overlaid with the applied fields
    ///
    /// Fails with `NotFound` for an unknown id, `EmailInUse` when the
    /// requested e-mail is already taken, and `Repository` when the write did
    /// not affect any row.
    async fn update(&self, id: &str, request: UpdateUserRequest) -> Result<User, DomainError>;
}
