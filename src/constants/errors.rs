//! Error message constants used throughout the application.

// Authentication errors
pub const ERR_AUTH_REQUIRED: &str = "Authentication required";
pub const ERR_INVALID_AUTH_HEADER: &str = "Missing or invalid authorization header";
pub const ERR_INVALID_TOKEN: &str = "Invalid or expired token";
pub const ERR_WRONG_EMAIL_OR_PASSWORD: &str = "Wrong email or password";
pub const ERR_INVALID_CREDENTIALS: &str = "Invalid credentials";

// User errors
pub const ERR_USER_NOT_FOUND: &str = "User not found";
pub const ERR_EMAIL_EXISTS: &str = "Email already registered";
pub const ERR_FAILED_FETCH_USER: &str = "Failed to fetch updated user";
pub const ERR_CHANGE_OWN_PASSWORD_ONLY: &str = "You can only change your own password";
pub const ERR_UPDATE_OWN_ACCOUNT_ONLY: &str = "You can only update your own account";
pub const ERR_DELETE_OWN_ACCOUNT_ONLY: &str = "You can only delete your own account";

// Product errors
pub const ERR_PRODUCT_NOT_FOUND: &str = "Product not found";
pub const ERR_EMPTY_PRODUCT_UPDATE: &str = "At least one product field must be provided";

// Generic errors
pub const ERR_INVALID_ID: &str = "Invalid ID format";
pub const ERR_MISSING_INSERTED_ID: &str = "Database did not return an inserted ID";

// Password errors
pub const ERR_PASSWORD_MISMATCH: &str = "Password confirmation does not match";
pub const ERR_WRONG_PASSWORD: &str = "Current password is incorrect";

// Listing errors
pub const ERR_INVALID_SORT_ORDER: &str = "sort_order must be either 'asc' or 'desc'";
