//! Todo service module

mod service;

pub use service::{TodoService, TodoUpdate};
