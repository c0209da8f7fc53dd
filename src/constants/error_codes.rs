//! Error code constants for API responses.
//!
//! These codes provide a machine-readable identifier for each error type,
//! making it easier for API clients to handle errors programmatically.

// Validation errors
pub const CODE_VALIDATION_FAILED: &str = "VALIDATION_FAILED";
pub const CODE_INVALID_SORT: &str = "INVALID_SORT";

// Authentication errors
pub const CODE_INVALID_TOKEN: &str = "INVALID_TOKEN";
pub const CODE_TOO_MANY_ATTEMPTS: &str = "TOO_MANY_ATTEMPTS";

// User errors
pub const CODE_USER_NOT_FOUND: &str = "USER_NOT_FOUND";
pub const CODE_EMAIL_EXISTS: &str = "EMAIL_EXISTS";
pub const CODE_INVALID_ID: &str = "INVALID_ID";

// Product errors
pub const CODE_PRODUCT_NOT_FOUND: &str = "PRODUCT_NOT_FOUND";

// Authorization errors
pub const CODE_FORBIDDEN: &str = "FORBIDDEN";

// Password errors
pub const CODE_WRONG_PASSWORD: &str = "WRONG_PASSWORD";
pub const CODE_PASSWORD_MISMATCH: &str = "PASSWORD_MISMATCH";

// Generic errors
pub const CODE_BAD_REQUEST: &str = "BAD_REQUEST";
pub const CODE_INTERNAL_ERROR: &str = "INTERNAL_ERROR";
