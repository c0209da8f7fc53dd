//! User service for user CRUD operations, listing, and password management.

use log::{debug, info, warn};
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;

use crate::constants::{
    CODE_EMAIL_EXISTS, CODE_INTERNAL_ERROR, CODE_TOO_MANY_ATTEMPTS, CODE_USER_NOT_FOUND,
    CODE_WRONG_PASSWORD, ERR_EMAIL_EXISTS, ERR_FAILED_FETCH_USER, ERR_INVALID_CREDENTIALS,
    ERR_USER_NOT_FOUND, ERR_WRONG_EMAIL_OR_PASSWORD, ERR_WRONG_PASSWORD, MSG_LOGIN_SUCCESS,
};
use crate::errors::ApiError;
use crate::models::{
    ChangePasswordRequest, CreateUserRequest, ListOptions, PageResponse, PasswordCheck,
    UpdateUserRequest, User, UserResponse,
};
use crate::repositories::UserRepository;
use crate::services::auth_service::hash_password;
use crate::services::{CredentialCheck, CredentialGuard};
use crate::utils::mask_email;
use crate::validators::{parse_object_id, validate_password_match};

/// Columns a user listing may be sorted by. The first is the default.
pub const USER_SORT_FIELDS: &[&str] = &["email", "name"];

pub struct UserService {
    repository: Arc<UserRepository>,
    guard: CredentialGuard,
}

impl UserService {
    pub fn new(repository: Arc<UserRepository>, guard: CredentialGuard) -> Self {
        Self { repository, guard }
    }

    pub async fn get_filtered_users(
        &self,
        options: &ListOptions,
    ) -> Result<PageResponse<UserResponse>, ApiError> {
        let (users, total) = self.repository.find_page(options).await?;
        let data = users.into_iter().map(UserResponse::from).collect();
        Ok(PageResponse::new(options, total, data))
    }

    pub async fn get_user(&self, id: &str) -> Result<User, ApiError> {
        debug!("Fetching user by ID: {}", id);
        let object_id = parse_object_id(id)?;
        self.find_existing(object_id).await
    }

    pub async fn create_user(&self, req: CreateUserRequest) -> Result<User, ApiError> {
        validate_password_match(&req.password, &req.password_confirm)?;

        let email = req.email.trim().to_lowercase();
        if self.email_is_registered(&email).await? {
            warn!("Create failed: email {} already registered", mask_email(&email));
            return Err(ApiError::Conflict {
                code: CODE_EMAIL_EXISTS.to_string(),
                message: ERR_EMAIL_EXISTS.to_string(),
            });
        }

        let now = mongodb::bson::DateTime::now();
        let user = User {
            id: None,
            name: req.name.trim().to_string(),
            email,
            password_hash: hash_password(&req.password)?,
            created_at: now,
            updated_at: now,
        };

        let id = self.repository.insert(&user).await?;
        info!("Created user {}", id);

        Ok(User {
            id: Some(id),
            ..user
        })
    }

    pub async fn update_user(&self, id: &str, req: UpdateUserRequest) -> Result<User, ApiError> {
        info!("Updating user: {}", id);
        let object_id = parse_object_id(id)?;
        let existing_user = self.find_existing(object_id).await?;

        let email = req.email.trim().to_lowercase();
        if email != existing_user.email {
            if let Some(other_user) = self.repository.find_by_email(&email).await? {
                if other_user.id != existing_user.id {
                    warn!(
                        "Update failed: email {} already taken by another user",
                        mask_email(&email)
                    );
                    return Err(ApiError::Conflict {
                        code: CODE_EMAIL_EXISTS.to_string(),
                        message: ERR_EMAIL_EXISTS.to_string(),
                    });
                }
            }
        }

        self.repository
            .update_profile(object_id, req.name.trim(), &email)
            .await?;

        info!("Successfully updated user: {}", id);

        self.repository
            .find_by_id(object_id)
            .await?
            .ok_or_else(|| ApiError::InternalServerError {
                code: CODE_INTERNAL_ERROR.to_string(),
                message: ERR_FAILED_FETCH_USER.to_string(),
            })
    }

    pub async fn delete_user(&self, id: &str) -> Result<(), ApiError> {
        info!("Deleting user with id: {}", id);
        let object_id = parse_object_id(id)?;

        let result = self.repository.delete(object_id).await?;
        if result.deleted_count == 0 {
            warn!("Delete failed: User not found with id: {}", id);
            return Err(user_not_found());
        }

        info!("Successfully deleted user: {}", id);
        Ok(())
    }

    /// Whether an account already uses `email`.
    pub async fn email_is_registered(&self, email: &str) -> Result<bool, ApiError> {
        Ok(self.repository.find_by_email(email).await?.is_some())
    }

    /// Check a user's password through the login throttle, keyed by their email.
    pub async fn check_password(
        &self,
        user_id: &str,
        password: &str,
    ) -> Result<PasswordCheck, ApiError> {
        let object_id = parse_object_id(user_id)?;

        let Some(user) = self.repository.find_by_id(object_id).await? else {
            self.guard.burn_dummy(password)?;
            return Ok(unknown_user_check());
        };

        let email = user.email.clone();
        let check = self
            .guard
            .verify(&email, password, || async move { Ok(Some(user)) })
            .await?;

        Ok(password_check(&self.guard, check))
    }

    /// Change a password after confirming the current one.
    pub async fn change_password(
        &self,
        user_id: &str,
        req: ChangePasswordRequest,
    ) -> Result<(), ApiError> {
        info!("Changing password for user_id: {}", user_id);
        validate_password_match(&req.password_new, &req.password_confirm)?;

        let check = self.check_password(user_id, &req.password_old).await?;
        current_password_outcome(&self.guard, check).map_err(|err| {
            warn!("Password change failed for user {}: {}", user_id, err);
            err
        })?;

        let object_id = parse_object_id(user_id)?;
        let new_password_hash = hash_password(&req.password_new)?;
        let result = self
            .repository
            .update_password(object_id, &new_password_hash)
            .await?;
        if result.matched_count == 0 {
            return Err(user_not_found());
        }

        info!("Successfully changed password for user: {}", user_id);
        Ok(())
    }

    async fn find_existing(&self, id: ObjectId) -> Result<User, ApiError> {
        self.repository.find_by_id(id).await?.ok_or_else(|| {
            warn!("User not found with id: {}", id);
            user_not_found()
        })
    }
}

fn user_not_found() -> ApiError {
    ApiError::NotFound {
        code: CODE_USER_NOT_FOUND.to_string(),
        message: ERR_USER_NOT_FOUND.to_string(),
    }
}

/// Result of a password check for a user id with no account.
fn unknown_user_check() -> PasswordCheck {
    PasswordCheck {
        success: false,
        message: ERR_INVALID_CREDENTIALS.to_string(),
        attempt_count: 0,
    }
}

/// Shape a credential check as the password-check result.
fn password_check(guard: &CredentialGuard, check: CredentialCheck) -> PasswordCheck {
    match check {
        CredentialCheck::Verified { .. } => PasswordCheck {
            success: true,
            message: MSG_LOGIN_SUCCESS.to_string(),
            attempt_count: 0,
        },
        CredentialCheck::Rejected { failed_count, .. } => PasswordCheck {
            success: false,
            message: ERR_WRONG_EMAIL_OR_PASSWORD.to_string(),
            attempt_count: failed_count,
        },
        CredentialCheck::Locked => PasswordCheck {
            success: false,
            message: guard.throttle().lockout_message(),
            attempt_count: guard.throttle().max_attempts(),
        },
    }
}

/// Map the current-password check of a password change to its error, if any.
fn current_password_outcome(
    guard: &CredentialGuard,
    check: PasswordCheck,
) -> Result<(), ApiError> {
    if check.success {
        return Ok(());
    }
    if check == unknown_user_check() {
        return Err(user_not_found());
    }
    if check.attempt_count >= guard.throttle().max_attempts() {
        return Err(ApiError::Forbidden {
            code: CODE_TOO_MANY_ATTEMPTS.to_string(),
            message: guard.throttle().lockout_message(),
        });
    }
    Err(ApiError::Unauthorized {
        code: CODE_WRONG_PASSWORD.to_string(),
        message: ERR_WRONG_PASSWORD.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::LoginThrottle;
    use std::time::Duration;

    fn guard() -> CredentialGuard {
        CredentialGuard::new(LoginThrottle::new(5, Duration::from_secs(1800)), 4).unwrap()
    }

    async fn check(guard: &CredentialGuard, user: &User, password: &str) -> PasswordCheck {
        let user = user.clone();
        let result = guard
            .verify(&user.email.clone(), password, || async move { Ok(Some(user)) })
            .await
            .unwrap();
        password_check(guard, result)
    }

    #[actix_web::test]
    async fn test_password_check_counts_failures() {
        let guard = guard();
        let user = User::for_test("Ana", "a@x.com", "secret123");

        let first = check(&guard, &user, "nope").await;
        assert_eq!(
            first,
            PasswordCheck {
                success: false,
                message: "Wrong email or password".to_string(),
                attempt_count: 1,
            }
        );

        let second = check(&guard, &user, "nope").await;
        assert_eq!(second.attempt_count, 2);

        let ok = check(&guard, &user, "secret123").await;
        assert!(ok.success);
        assert_eq!(ok.message, "Login successful");
        assert_eq!(ok.attempt_count, 0);
    }

    #[actix_web::test]
    async fn test_password_check_shares_lockout_with_login() {
        let guard = guard();
        let user = User::for_test("Ana", "a@x.com", "secret123");

        // Failures recorded by the login flow under a differently cased email.
        for _ in 0..5 {
            guard.throttle().record_failure("A@X.com");
        }

        let locked = check(&guard, &user, "secret123").await;
        assert!(!locked.success);
        assert_eq!(locked.attempt_count, 5);
        assert!(locked.message.starts_with("Too many failed login attempts"));
    }

    #[test]
    fn test_password_check_serializes_attempt_count() {
        let json = serde_json::to_value(PasswordCheck {
            success: false,
            message: "Wrong email or password".to_string(),
            attempt_count: 3,
        })
        .unwrap();
        assert_eq!(json["attemptCount"], 3);
        assert_eq!(json["success"], false);
    }

    fn failed(attempt_count: u32) -> PasswordCheck {
        PasswordCheck {
            success: false,
            message: "Wrong email or password".to_string(),
            attempt_count,
        }
    }

    #[test]
    fn test_password_change_for_missing_user_is_404() {
        use actix_web::ResponseError;
        let err = current_password_outcome(&guard(), unknown_user_check()).unwrap_err();
        assert!(matches!(err, ApiError::NotFound { .. }));
        assert_eq!(err.status_code(), actix_web::http::StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_password_change_outcomes() {
        let guard = guard();

        let ok = PasswordCheck {
            success: true,
            message: "Login successful".to_string(),
            attempt_count: 0,
        };
        assert!(current_password_outcome(&guard, ok).is_ok());

        assert!(matches!(
            current_password_outcome(&guard, failed(4)),
            Err(ApiError::Unauthorized { ref code, .. }) if code == CODE_WRONG_PASSWORD
        ));
        assert!(matches!(
            current_password_outcome(&guard, failed(5)),
            Err(ApiError::Forbidden { ref code, .. }) if code == CODE_TOO_MANY_ATTEMPTS
        ));
    }

    #[actix_web::test]
    async fn test_locked_check_with_zero_threshold_is_not_404() {
        let guard =
            CredentialGuard::new(LoginThrottle::new(0, Duration::from_secs(1800)), 4).unwrap();
        let user = User::for_test("Ana", "a@x.com", "secret123");

        let locked = check(&guard, &user, "secret123").await;
        assert_eq!(locked.attempt_count, 0);
        assert!(matches!(
            current_password_outcome(&guard, locked),
            Err(ApiError::Forbidden { .. })
        ));
    }
}
