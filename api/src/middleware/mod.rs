//! HTTP middleware

pub mod auth;
pub mod cors;

pub use auth::{AuthContext, SessionAuth};
pub use cors::create_cors;
