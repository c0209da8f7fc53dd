//! Services organized by domain concern.

pub mod auth_service;
pub mod credential_guard;
pub mod login_throttle;
pub mod product_service;
pub mod user_service;

pub use auth_service::{AuthService, LoginOutcome};
pub use credential_guard::{CredentialCheck, CredentialGuard};
pub use login_throttle::{AttemptDecision, LoginThrottle};
pub use product_service::ProductService;
pub use user_service::UserService;
