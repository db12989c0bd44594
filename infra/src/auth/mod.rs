//! Authentication provider implementation

mod session_provider;

pub use session_provider::SessionAuthProvider;
