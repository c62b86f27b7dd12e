//! Update-user use case

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::user::{
    FindUserByEmailRepository, FindUserByIdRepository, PasswordHashing, UpdateUserRepository,
    UpdateUserRequest, UpdateUserUseCase, User, UserId, UserUpdate,
};
use crate::domain::DomainError;

/// Loads a user, checks the requested e-mail, rehashes a new password and
/// persists the staged fields
///
/// Collaborators are called strictly in sequence and any failure aborts the
/// remaining steps. The e-mail check and the write are not atomic; storage
/// adapters enforce uniqueness again when writing.
pub struct UpdateUser {
    update_user_repository: Arc<dyn UpdateUserRepository>,
    find_user_by_id_repository: Arc<dyn FindUserByIdRepository>,
    find_user_by_email_repository: Arc<dyn FindUserByEmailRepository>,
    password_hashing: Arc<dyn PasswordHashing>,
}

impl std::fmt::Debug for UpdateUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateUser").finish_non_exhaustive()
    }
}

impl UpdateUser {
    pub fn new(
        update_user_repository: Arc<dyn UpdateUserRepository>,
        find_user_by_id_repository: Arc<dyn FindUserByIdRepository>,
        find_user_by_email_repository: Arc<dyn FindUserByEmailRepository>,
        password_hashing: Arc<dyn PasswordHashing>,
    ) -> Self {
        Self {
            update_user_repository,
            find_user_by_id_repository,
            find_user_by_email_repository,
            password_hashing,
        }
    }
}

#[async_trait]
impl UpdateUserUseCase for UpdateUser {
    async fn update(&self, id: &str, request: UpdateUserRequest) -> Result<User, DomainError> {
        let user_id = UserId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))?;

        debug!(user_id = %user_id, "Updating user");

        let found_user = self
            .find_user_by_id_repository
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user_id, "Update rejected: user does not exist");
                DomainError::not_found("User does not exist")
            })?;

        // No self-exclusion: resubmitting the current address is a conflict too
        if let Some(new_email) = request.new_email() {
            let existing = self
                .find_user_by_email_repository
                .find_by_email(new_email)
                .await?;

            if existing.is_some() {
                warn!(user_id = %user_id, "Update rejected: e-mail already in use");
                return Err(DomainError::email_in_use("E-mail already in use."));
            }
        }

        let mut staged = UserUpdate::from_request(&request);

        if let Some(new_password) = request.new_password() {
            let hash = self.password_hashing.hash(new_password).await?;
            staged = staged.with_password_hash(hash);
        }

        let updated_rows = self
            .update_user_repository
            .update(&user_id, &staged)
            .await?;

        if updated_rows == 0 {
            warn!(user_id = %user_id, "Update affected no rows");
            return Err(DomainError::repository("Could not update user"));
        }

        info!(
            user_id = %user_id,
            email_changed = staged.email().is_some(),
            password_changed = staged.password_hash().is_some(),
            "User updated"
        );

        Ok(found_user.merged_with(&staged))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::{
        MockFindUserByEmailRepository, MockFindUserByIdRepository, MockPasswordHashing,
        MockUpdateUserRepository,
    };
    use crate::infrastructure::user::password::Argon2Hasher;
    use crate::infrastructure::user::repository::InMemoryUserRepository;
    use mockall::predicate::eq;

    fn found_user() -> User {
        User::new(UserId::new("1").unwrap(), "A", "a@x.com", "old_hash")
    }

    struct Mocks {
        update: MockUpdateUserRepository,
        by_id: MockFindUserByIdRepository,
        by_email: MockFindUserByEmailRepository,
        hashing: MockPasswordHashing,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                update: MockUpdateUserRepository::new(),
                by_id: MockFindUserByIdRepository::new(),
                by_email: MockFindUserByEmailRepository::new(),
                hashing: MockPasswordHashing::new(),
            }
        }

        fn with_existing_user(mut self) -> Self {
            self.by_id
                .expect_find_by_id()
                .times(1)
                .returning(|_| Ok(Some(found_user())));
            self
        }

        fn into_use_case(self) -> UpdateUser {
            UpdateUser::new(
                Arc::new(self.update),
                Arc::new(self.by_id),
                Arc::new(self.by_email),
                Arc::new(self.hashing),
            )
        }
    }

    fn request() -> UpdateUserRequest {
        UpdateUserRequest::default()
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found_without_side_effects() {
        let mut mocks = Mocks::new();
        mocks.by_id.expect_find_by_id().times(1).returning(|_| Ok(None));
        mocks.by_email.expect_find_by_email().never();
        mocks.hashing.expect_hash().never();
        mocks.update.expect_update().never();

        let use_case = mocks.into_use_case();
        let result = use_case
            .update(
                "1",
                UpdateUserRequest {
                    email: Some("b@x.com".to_string()),
                    password: Some("secret123".to_string()),
                    ..request()
                },
            )
            .await;

        match result {
            Err(DomainError::NotFound { message }) => assert_eq!(message, "User does not exist"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_id_is_rejected_before_lookup() {
        let mut mocks = Mocks::new();
        mocks.by_id.expect_find_by_id().never();

        let use_case = mocks.into_use_case();
        let result = use_case.update("not valid", request()).await;

        assert!(matches!(result, Err(DomainError::InvalidId { .. })));
    }

    #[tokio::test]
    async fn test_taken_email_fails_without_persisting() {
        let mut mocks = Mocks::new().with_existing_user();
        mocks
            .by_email
            .expect_find_by_email()
            .with(eq("b@x.com"))
            .times(1)
            .returning(|_| {
                Ok(Some(User::new(
                    UserId::new("2").unwrap(),
                    "Other",
                    "b@x.com",
                    "hash",
                )))
            });
        mocks.hashing.expect_hash().never();
        mocks.update.expect_update().never();

        let use_case = mocks.into_use_case();
        let result = use_case
            .update(
                "1",
                UpdateUserRequest {
                    email: Some("b@x.com".to_string()),
                    ..request()
                },
            )
            .await;

        match result {
            Err(DomainError::EmailInUse { message }) => {
                assert_eq!(message, "E-mail already in use.")
            }
            other => panic!("expected EmailInUse, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_own_email_is_also_a_conflict() {
        let mut mocks = Mocks::new().with_existing_user();
        mocks
            .by_email
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(Some(found_user())));
        mocks.update.expect_update().never();

        let use_case = mocks.into_use_case();
        let result = use_case
            .update(
                "1",
                UpdateUserRequest {
                    email: Some("a@x.com".to_string()),
                    ..request()
                },
            )
            .await;

        assert!(matches!(result, Err(DomainError::EmailInUse { .. })));
    }

    #[tokio::test]
    async fn test_password_is_hashed_once_and_only_hash_is_persisted() {
        let mut mocks = Mocks::new().with_existing_user();
        mocks.by_email.expect_find_by_email().never();
        mocks
            .hashing
            .expect_hash()
            .with(eq("secret123"))
            .times(1)
            .returning(|_| Ok("$argon2id$hashed".to_string()));
        mocks
            .update
            .expect_update()
            .withf(|id, update| {
                id.as_str() == "1"
                    && update.password_hash() == Some("$argon2id$hashed")
                    && update.name().is_none()
                    && update.email().is_none()
            })
            .times(1)
            .returning(|_, _| Ok(1));

        let use_case = mocks.into_use_case();
        let user = use_case
            .update(
                "1",
                UpdateUserRequest {
                    password: Some("secret123".to_string()),
                    confirm_password: Some("secret123".to_string()),
                    ..request()
                },
            )
            .await
            .unwrap();

        assert_eq!(user.password_hash(), "$argon2id$hashed");
        assert_eq!(user.email(), "a@x.com");
    }

    #[tokio::test]
    async fn test_no_password_means_no_hashing() {
        let mut mocks = Mocks::new().with_existing_user();
        mocks.hashing.expect_hash().never();
        mocks
            .update
            .expect_update()
            .withf(|_, update| update.password_hash().is_none())
            .times(1)
            .returning(|_, _| Ok(1));

        let use_case = mocks.into_use_case();
        let user = use_case
            .update(
                "1",
                UpdateUserRequest {
                    name: Some("B".to_string()),
                    ..request()
                },
            )
            .await
            .unwrap();

        assert_eq!(user.password_hash(), "old_hash");
    }

    #[tokio::test]
    async fn test_zero_rows_is_repository_failure() {
        let mut mocks = Mocks::new().with_existing_user();
        mocks.update.expect_update().times(1).returning(|_, _| Ok(0));

        let use_case = mocks.into_use_case();
        let result = use_case
            .update(
                "1",
                UpdateUserRequest {
                    name: Some("B".to_string()),
                    ..request()
                },
            )
            .await;

        match result {
            Err(DomainError::Repository { message }) => {
                assert_eq!(message, "Could not update user")
            }
            other => panic!("expected Repository, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_result_is_found_user_with_fields_overlaid() {
        let mut mocks = Mocks::new().with_existing_user();
        mocks.update.expect_update().times(1).returning(|_, _| Ok(1));

        let use_case = mocks.into_use_case();
        let user = use_case
            .update(
                "1",
                UpdateUserRequest {
                    name: Some("B".to_string()),
                    ..request()
                },
            )
            .await
            .unwrap();

        let expected = found_user();
        assert_eq!(user.id().as_str(), "1");
        assert_eq!(user.email(), "a@x.com");
        assert_eq!(user.name(), "B");
        assert_eq!(user.created_at(), expected.created_at());
    }

    #[tokio::test]
    async fn test_collaborator_failure_propagates() {
        let mut mocks = Mocks::new().with_existing_user();
        mocks
            .by_email
            .expect_find_by_email()
            .returning(|_| Err(DomainError::storage("connection reset")));
        mocks.update.expect_update().never();

        let use_case = mocks.into_use_case();
        let result = use_case
            .update(
                "1",
                UpdateUserRequest {
                    email: Some("b@x.com".to_string()),
                    ..request()
                },
            )
            .await;

        assert!(matches!(result, Err(DomainError::Storage { .. })));
    }

    #[tokio::test]
    async fn test_end_to_end_with_in_memory_adapters() {
        let repository = Arc::new(InMemoryUserRepository::with_users(vec![found_user()]));
        let hasher = Arc::new(Argon2Hasher::new());
        let use_case = UpdateUser::new(
            repository.clone(),
            repository.clone(),
            repository.clone(),
            hasher.clone(),
        );

        let user = use_case
            .update(
                "1",
                UpdateUserRequest {
                    email: Some("b@x.com".to_string()),
                    password: Some("new_password456".to_string()),
                    confirm_password: Some("new_password456".to_string()),
                    ..request()
                },
            )
            .await
            .unwrap();

        assert_eq!(user.email(), "b@x.com");

        let stored = repository
            .find_by_id(&UserId::new("1").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.email(), "b@x.com");
        assert_ne!(stored.password_hash(), "new_password456");
        assert!(hasher.verify("new_password456", stored.password_hash()));
    }
}
