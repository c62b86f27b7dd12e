//! Domain layer - core entities and ports

pub mod error;
pub mod user;

pub use error::DomainError;
pub use user::{User, UserId};
