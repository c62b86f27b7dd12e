//! User entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::update::UserUpdate;
use super::validation::{validate_user_id, UserValidationError};

/// User identifier - alphanumeric + hyphens, max 50 characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Create a new UserId after validation
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        let id = id.into();
        validate_user_id(&id)?;
        Ok(Self(id))
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stored user record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    /// Unique identifier for the user
    id: UserId,
    /// Display name
    name: String,
    /// Contact e-mail, unique across all users
    email: String,
    /// Argon2 password hash - never exposed in serialization
    #[serde(skip_serializing)]
    password_hash: String,
    /// Creation timestamp
    created_at: DateTime<Utc>,
    /// Last update timestamp
    updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        let now = Utc::now();

        Self {
            id,
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild a user from stored columns, keeping its timestamps
    pub fn restore(
        id: UserId,
        name: String,
        email: String,
        password_hash: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            password_hash,
            created_at,
            updated_at,
        }
    }

    // Getters

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Overlay the staged fields on a copy of this user
    ///
    /// Fields absent from the update keep their current value. Timestamps are
    /// left as they were read.
    pub fn merged_with(&self, update: &UserUpdate) -> User {
        let mut merged = self.clone();

        if let Some(name) = update.name() {
            merged.name = name.to_string();
        }

        if let Some(email) = update.email() {
            merged.email = email.to_string();
        }

        if let Some(hash) = update.password_hash() {
            merged.password_hash = hash.to_string();
        }

        merged
    }

    /// Apply the staged fields in place and bump `updated_at`
    pub fn apply(&mut self, update: &UserUpdate) {
        *self = self.merged_with(update);
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
