//! Response models for API endpoints.

pub mod api;
pub mod auth;
pub mod pagination;
pub mod product;
pub mod user;

pub use api::*;
pub use auth::*;
pub use pagination::*;
pub use product::*;
pub use user::*;
