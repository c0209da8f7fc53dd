//! Application constants module.
//!
//! This module centralizes all constant strings used throughout the application,
//! including error messages, success messages, error codes, collection names and
//! login throttling defaults.

pub mod collections;
pub mod error_codes;
pub mod errors;
pub mod login;
pub mod messages;
pub mod pagination;

pub use collections::*;
pub use error_codes::*;
pub use errors::*;
pub use login::*;
pub use messages::*;
pub use pagination::*;
