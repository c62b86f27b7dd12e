//! User validation utilities

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("User ID cannot be empty")]
    EmptyId,

    #[error("User ID exceeds maximum length of {0} characters")]
    IdTooLong(usize),

    #[error("User ID must start with a letter or number")]
    InvalidIdStart,

    #[error("User ID must end with a letter or number")]
    InvalidIdEnd,

    #[error("User ID contains invalid character: '{0}'. Only alphanumeric characters and hyphens are allowed")]
    InvalidIdCharacter(char),

    #[error("User ID cannot contain consecutive hyphens")]
    ConsecutiveHyphens,

    #[error("Name cannot be empty")]
    EmptyName,

    #[error("Name exceeds maximum length of {0} characters")]
    NameTooLong(usize),

    #[error("E-mail exceeds maximum length of {0} characters")]
    EmailTooLong(usize),

    #[error("Invalid e-mail address: '{0}'")]
    InvalidEmail(String),

    #[error("Password is too short. Minimum length is {0} characters")]
    PasswordTooShort(usize),

    #[error("Password exceeds maximum length of {0} characters")]
    PasswordTooLong(usize),

    #[error("Password confirmation is required")]
    MissingConfirmation,

    #[error("Password confirmation does not match")]
    ConfirmationMismatch,

    #[error("At least one of name, email or password must be provided")]
    EmptyUpdate,
}

const MAX_USER_ID_LENGTH: usize = 50;
const MAX_NAME_LENGTH: usize = 100;
const MAX_EMAIL_LENGTH: usize = 254;
const MIN_PASSWORD_LENGTH: usize = 8;
const MAX_PASSWORD_LENGTH: usize = 128;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Validate a user ID
///
/// Rules:
/// - Cannot be empty
/// - Maximum 50 characters
/// - Only alphanumeric characters and hyphens
/// - Must start and end with alphanumeric
/// - No consecutive hyphens
pub fn validate_user_id(id: &str) -> Result<(), UserValidationError> {
    if id.is_empty() {
        return Err(UserValidationError::EmptyId);
    }

    if id.len() > MAX_USER_ID_LENGTH {
        return Err(UserValidationError::IdTooLong(MAX_USER_ID_LENGTH));
    }

    let chars: Vec<char> = id.chars().collect();

    if !chars[0].is_ascii_alphanumeric() {
        return Err(UserValidationError::InvalidIdStart);
    }

    if !chars[chars.len() - 1].is_ascii_alphanumeric() {
        return Err(UserValidationError::InvalidIdEnd);
    }

    let mut prev_hyphen = false;

    for c in &chars {
        if *c == '-' {
            if prev_hyphen {
                return Err(UserValidationError::ConsecutiveHyphens);
            }
            prev_hyphen = true;
        } else if c.is_ascii_alphanumeric() {
            prev_hyphen = false;
        } else {
            return Err(UserValidationError::InvalidIdCharacter(*c));
        }
    }

    Ok(())
}

/// Validate a display name (1-100 characters once trimmed)
pub fn validate_name(name: &str) -> Result<(), UserValidationError> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(UserValidationError::EmptyName);
    }

    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(UserValidationError::NameTooLong(MAX_NAME_LENGTH));
    }

    Ok(())
}

/// Validate an e-mail address
///
/// Only the shape `local@domain.tld` is checked; deliverability is not.
pub fn validate_email(email: &str) -> Result<(), UserValidationError> {
    if email.len() > MAX_EMAIL_LENGTH {
        return Err(UserValidationError::EmailTooLong(MAX_EMAIL_LENGTH));
    }

    if !EMAIL_PATTERN.is_match(email) {
        return Err(UserValidationError::InvalidEmail(email.to_string()));
    }

    Ok(())
}

/// Validate a password
pub fn validate_password(password: &str) -> Result<(), UserValidationError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(UserValidationError::PasswordTooShort(MIN_PASSWORD_LENGTH));
    }

    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(UserValidationError::PasswordTooLong(MAX_PASSWORD_LENGTH));
    }

    Ok(())
}

/// Validate that a confirmation was supplied and matches the password
pub fn validate_password_confirmation(
    password: &str,
    confirmation: Option<&str>,
) -> Result<(), UserValidationError> {
    match confirmation {
        None => Err(UserValidationError::MissingConfirmation),
        Some(c) if c != password => Err(UserValidationError::ConfirmationMismatch),
        Some(_) => Ok(()),
    }
}
