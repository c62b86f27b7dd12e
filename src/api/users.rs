//! User endpoints

use axum::extract::{Path, State};
use serde::Serialize;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::user::{
    validate_email, validate_name, validate_password, validate_password_confirmation,
    UpdateUserRequest, User, UserId, UserValidationError,
};

/// User representation returned by the API
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().as_str().to_string(),
            name: user.name().to_string(),
            email: user.email().to_string(),
            created_at: user.created_at().to_rfc3339(),
            updated_at: user.updated_at().to_rfc3339(),
        }
    }
}

/// Reject malformed update bodies before they reach the use case
pub fn validate_update_request(request: &UpdateUserRequest) -> Result<(), UserValidationError> {
    if request.name.is_none() && request.new_email().is_none() && request.new_password().is_none()
    {
        return Err(UserValidationError::EmptyUpdate);
    }

    if let Some(name) = &request.name {
        validate_name(name)?;
    }

    if let Some(email) = request.new_email() {
        validate_email(email)?;
    }

    if let Some(password) = request.new_password() {
        validate_password(password)?;
        validate_password_confirmation(password, request.confirm_password.as_deref())?;
    }

    Ok(())
}

/// GET /users/:user_id
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    debug!(user_id = %user_id, "Getting user");

    let id = UserId::new(&user_id)
        .map_err(|e| ApiError::bad_request(e.to_string()).with_param("id"))?;

    let user = state
        .users
        .find_by_id(&id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("User does not exist"))?;

    Ok(Json(UserResponse::from(&user)))
}

/// PATCH /users/:user_id
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    debug!(user_id = %user_id, "Updating user");

    validate_update_request(&request)?;

    let user = state
        .update_user
        .update(&user_id, request)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(UserResponse::from(&user)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> UpdateUserRequest {
        UpdateUserRequest::default()
    }

    #[test]
    fn test_empty_request_is_rejected() {
        assert_eq!(
            validate_update_request(&request()),
            Err(UserValidationError::EmptyUpdate)
        );

        let blank = UpdateUserRequest {
            email: Some(String::new()),
            ..request()
        };
        assert_eq!(
            validate_update_request(&blank),
            Err(UserValidationError::EmptyUpdate)
        );
    }

    #[test]
    fn test_name_only_is_valid() {
        let req = UpdateUserRequest {
            name: Some("B".to_string()),
            ..request()
        };
        assert!(validate_update_request(&req).is_ok());
    }

    #[test]
    fn test_bad_email_is_rejected() {
        let req = UpdateUserRequest {
            email: Some("nope".to_string()),
            ..request()
        };
        assert!(matches!(
            validate_update_request(&req),
            Err(UserValidationError::InvalidEmail(_))
        ));
    }

    #[test]
    fn test_password_requires_matching_confirmation() {
        let missing = UpdateUserRequest {
            password: Some("password123".to_string()),
            ..request()
        };
        assert_eq!(
            validate_update_request(&missing),
            Err(UserValidationError::MissingConfirmation)
        );

        let mismatch = UpdateUserRequest {
            password: Some("password123".to_string()),
            confirm_password: Some("password124".to_string()),
            ..request()
        };
        assert_eq!(
            validate_update_request(&mismatch),
            Err(UserValidationError::ConfirmationMismatch)
        );

        let ok = UpdateUserRequest {
            password: Some("password123".to_string()),
            confirm_password: Some("password123".to_string()),
            ..request()
        };
        assert!(validate_update_request(&ok).is_ok());
    }

    #[test]
    fn test_user_response_has_no_password_hash() {
        let user = User::new(UserId::new("1").unwrap(), "A", "a@x.com", "secret_hash");
        let json = serde_json::to_string(&UserResponse::from(&user)).unwrap();

        assert!(json.contains("\"id\":\"1\""));
        assert!(!json.contains("secret_hash"));
    }
}
