//! User-related request models.

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

/// Request payload for creating a user
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    /// Display name (1-100 characters)
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    #[schema(example = "Jane Doe")]
    pub name: String,
    /// Email address, must not be registered yet
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "jane@example.com")]
    pub email: String,
    /// Password (6-72 characters)
    #[validate(length(min = 6, max = 72, message = "Password must be between 6 and 72 characters"))]
    #[schema(example = "secret123")]
    pub password: String,
    /// Must equal `password`
    #[schema(example = "secret123")]
    pub password_confirm: String,
}

/// Request payload for updating a user
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    /// New display name
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    #[schema(example = "Jane Smith")]
    pub name: String,
    /// New email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "jane.smith@example.com")]
    pub email: String,
}

/// Request payload for changing password
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ChangePasswordRequest {
    /// Current password for verification
    #[validate(length(min = 1, message = "Current password is required"))]
    #[schema(example = "secret123")]
    pub password_old: String,
    /// New password (6-72 characters)
    #[validate(length(min = 6, max = 72, message = "New password must be between 6 and 72 characters"))]
    #[schema(example = "n3wSecret")]
    pub password_new: String,
    /// Must equal `password_new`
    #[schema(example = "n3wSecret")]
    pub password_confirm: String,
}
