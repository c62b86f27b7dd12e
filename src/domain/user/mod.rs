//! User domain
//!
//! This module provides the user entity, the update request types, input
//! validation, and the ports the update use case is written against.

mod entity;
mod hashing;
mod repository;
mod update;
mod use_case;
mod validation;

pub use entity::{User, UserId};
pub use hashing::PasswordHashing;
pub use repository::{FindUserByEmailRepository, FindUserByIdRepository, UpdateUserRepository};
pub use update::{UpdateUserRequest, UserUpdate};
pub use use_case::UpdateUserUseCase;
pub use validation::{
    validate_email, validate_name, validate_password, validate_password_confirmation,
    validate_user_id, UserValidationError,
};

#[cfg(test)]
pub use hashing::MockPasswordHashing;
#[cfg(test)]
pub use repository::{
    MockFindUserByEmailRepository, MockFindUserByIdRepository, MockUpdateUserRepository,
};
