//! Request models for API endpoints.

pub mod auth;
pub mod list;
pub mod product;
pub mod user;

pub use auth::*;
pub use list::*;
pub use product::*;
pub use user::*;
