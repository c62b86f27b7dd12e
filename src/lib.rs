//! Accounts API
//!
//! User record management written as ports and adapters:
//! - `domain` holds the user entity, update types and ports
//! - `infrastructure` holds storage adapters, password hashing and the
//!   update-user use case
//! - `api` exposes the use case over HTTP

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use crate::config::AppConfig;

use std::sync::Arc;

use tracing::info;

use api::state::AppState;
use domain::user::{FindUserByIdRepository, PasswordHashing};
use infrastructure::storage::StorageType;
use infrastructure::user::{
    load_seed_users, Argon2Hasher, InMemoryUserRepository, PostgresConfig,
    PostgresUserRepository, UpdateUser,
};

/// Create the application state with default configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Wire the update-user use case to the configured storage backend
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let storage_backend: StorageType = config.storage.backend.parse()?;

    info!("Storage backend: {:?}", storage_backend);

    let hasher = Arc::new(Argon2Hasher::new());

    let state = match storage_backend {
        StorageType::Postgres => {
            let repository = Arc::new(connect_postgres(config).await?);
            build_state(repository, hasher)
        }
        StorageType::InMemory => {
            let users = match &config.storage.seed_file {
                Some(path) => load_seed_users(path, &*hasher).await?,
                None => Vec::new(),
            };

            let repository = Arc::new(InMemoryUserRepository::with_users(users));
            build_state(repository, hasher)
        }
    };

    Ok(state)
}

/// Open the PostgreSQL user repository described by `config`
pub async fn connect_postgres(config: &AppConfig) -> anyhow::Result<PostgresUserRepository> {
    let database_url = config.storage.resolve_database_url().ok_or_else(|| {
        anyhow::anyhow!("storage.database_url or DATABASE_URL is required for postgres")
    })?;

    info!("Connecting to PostgreSQL...");
    let pg_config =
        PostgresConfig::new(database_url).with_max_connections(config.storage.max_connections);
    let repository = PostgresUserRepository::connect(&pg_config).await?;
    info!("PostgreSQL connection established");

    Ok(repository)
}

fn build_state<R>(repository: Arc<R>, hasher: Arc<dyn PasswordHashing>) -> AppState
where
    R: FindUserByIdRepository
        + domain::user::FindUserByEmailRepository
        + domain::user::UpdateUserRepository
        + 'static,
{
    let update_user = UpdateUser::new(
        repository.clone(),
        repository.clone(),
        repository.clone(),
        hasher,
    );

    AppState::new(Arc::new(update_user), repository)
}
