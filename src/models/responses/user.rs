//! User-related response models.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::User;

/// User data returned in API responses (without sensitive fields)
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct UserResponse {
    /// User's unique identifier
    #[schema(example = "507f1f77bcf86cd799439011")]
    pub id: String,
    /// User's display name
    #[schema(example = "Jane Doe")]
    pub name: String,
    /// User's email address
    #[schema(example = "jane@example.com")]
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id_hex(),
            name: user.name,
            email: user.email,
        }
    }
}

/// Result of checking a user's current password
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasswordCheck {
    pub success: bool,
    pub message: String,
    /// Consecutive failures recorded for the account's email
    #[serde(rename = "attemptCount")]
    pub attempt_count: u32,
}
