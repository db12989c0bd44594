//! Request and response data transfer objects

pub mod auth;
pub mod error;
pub mod todo;

pub use auth::*;
pub use error::ErrorBody;
pub use todo::*;
