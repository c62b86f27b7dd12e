//! Migrate command - creates the PostgreSQL schema

use tracing::info;

/// Apply the users schema to the configured database
pub async fn run() -> anyhow::Result<()> {
    let config = super::bootstrap();

    let repository = crate::connect_postgres(&config).await?;
    repository.migrate().await?;

    info!("Migration complete");
    Ok(())
}
