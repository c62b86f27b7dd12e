//! User infrastructure module
//!
//! Adapters for the user ports (in-memory and PostgreSQL repositories, Argon2
//! hashing), the update-user use case, and seed loading.

mod password;
mod postgres_repository;
mod repository;
mod seed;
mod service;

pub use password::Argon2Hasher;
pub use postgres_repository::{PostgresConfig, PostgresUserRepository};
pub use repository::InMemoryUserRepository;
pub use seed::{load_seed_users, seed_users, SeedUser};
pub use service::UpdateUser;
