//! Login response models.
//!
//! These keep the field names existing clients rely on (`user_id`,
//! `remainingAttempts`) rather than the generic response envelope.

use serde::Serialize;
use utoipa::ToSchema;

/// Response for successful authentication
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    #[schema(example = "jane@example.com")]
    pub email: String,
    #[schema(example = "Jane Doe")]
    pub name: String,
    #[schema(example = "507f1f77bcf86cd799439011")]
    pub user_id: String,
    /// JWT token for authentication
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    /// Always the full allowance after a successful login
    #[serde(rename = "remainingAttempts")]
    #[schema(example = 5)]
    pub remaining_attempts: u32,
}

/// Response for a refused login
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginFailureResponse {
    #[schema(example = "Wrong email or password")]
    pub error: String,
    /// Attempts left before the email is locked out
    #[serde(rename = "remainingAttempts")]
    #[schema(example = 3)]
    pub remaining_attempts: u32,
}
