//! Update request and staged update types

use serde::{Deserialize, Serialize};

/// Partial update of a user as received from a caller
///
/// `password` is plaintext and `confirm_password` only exists for input
/// validation; neither has a counterpart in [`UserUpdate`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default, rename = "confirmPassword")]
    pub confirm_password: Option<String>,
}

impl UpdateUserRequest {
    /// Requested e-mail, if one was given and is not empty
    pub fn new_email(&self) -> Option<&str> {
        self.email.as_deref().filter(|e| !e.is_empty())
    }

    /// Requested plaintext password, if one was given and is not empty
    pub fn new_password(&self) -> Option<&str> {
        self.password.as_deref().filter(|p| !p.is_empty())
    }
}

/// Fields that will be written to storage for one update
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    password_hash: Option<String>,
}

impl UserUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the directly persistable fields of a request
    ///
    /// The password hash is not derived here; callers stage it with
    /// [`UserUpdate::with_password_hash`] once it has been computed.
    pub fn from_request(request: &UpdateUserRequest) -> Self {
        Self {
            name: request.name.clone(),
            email: request.new_email().map(str::to_string),
            password_hash: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_password_hash(mut self, hash: impl Into<String>) -> Self {
        self.password_hash = Some(hash.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn password_hash(&self) -> Option<&str> {
        self.password_hash.as_deref()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.password_hash.is_none()
    }
}
