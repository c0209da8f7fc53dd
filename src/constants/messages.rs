//! Success message constants used throughout the application.

// Authentication messages
pub const MSG_LOGIN_SUCCESS: &str = "Login successful";

// User management messages
pub const MSG_USER_DELETED: &str = "User deleted successfully";
pub const MSG_PASSWORD_CHANGED: &str = "Password changed successfully";
