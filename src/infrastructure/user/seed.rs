//! Seed users for the in-memory backend

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::domain::user::{validate_email, PasswordHashing, User, UserId};
use crate::domain::DomainError;

/// One entry of a seed file
#[derive(Debug, Clone, Deserialize)]
pub struct SeedUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Read a JSON array of [`SeedUser`] and hash each password
pub async fn load_seed_users(
    path: impl AsRef<Path>,
    hasher: &dyn PasswordHashing,
) -> Result<Vec<User>, DomainError> {
    let path = path.as_ref();
    let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
        DomainError::configuration(format!(
            "Failed to read seed file '{}': {}",
            path.display(),
            e
        ))
    })?;

    let entries: Vec<SeedUser> = serde_json::from_str(&raw).map_err(|e| {
        DomainError::configuration(format!(
            "Failed to parse seed file '{}': {}",
            path.display(),
            e
        ))
    })?;

    let users = seed_users(entries, hasher).await?;
    info!(count = users.len(), path = %path.display(), "Loaded seed users");

    Ok(users)
}

/// Turn seed entries into users, rejecting bad ids, bad e-mails and duplicates
pub async fn seed_users(
    entries: Vec<SeedUser>,
    hasher: &dyn PasswordHashing,
) -> Result<Vec<User>, DomainError> {
    let mut users = Vec::with_capacity(entries.len());
    let mut seen_ids = HashSet::new();
    let mut seen_emails = HashSet::new();

    for entry in entries {
        let id = UserId::new(&entry.id).map_err(|e| DomainError::invalid_id(e.to_string()))?;
        validate_email(&entry.email).map_err(|e| DomainError::validation(e.to_string()))?;

        if !seen_ids.insert(entry.id.clone()) {
            return Err(DomainError::validation(format!(
                "Duplicate seed user id '{}'",
                entry.id
            )));
        }
        if !seen_emails.insert(entry.email.clone()) {
            return Err(DomainError::email_in_use(format!(
                "E-mail '{}' is seeded more than once",
                entry.email
            )));
        }

        let password_hash = hasher.hash(&entry.password).await?;
        users.push(User::new(id, entry.name, entry.email, password_hash));
    }

    Ok(users)
}
