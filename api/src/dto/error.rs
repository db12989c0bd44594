//! Error envelope
//!
//! Every failure response uses this one shape.

use serde::{Deserialize, Serialize};

/// JSON error envelope `{"error": "..."}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
