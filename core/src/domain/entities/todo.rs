//! Todo entity owned by a single user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A todo item, visible only to its owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Unique identifier for the todo
    pub id: Uuid,

    /// Owner of the todo
    pub user_id: Uuid,

    /// Short title
    pub title: String,

    /// Optional longer description
    pub description: Option<String>,

    /// Whether the todo has been completed
    pub completed: bool,

    /// Timestamp when the todo was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the todo was last updated
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// Creates a new open todo for a user
    pub fn new(user_id: Uuid, title: impl Into<String>, description: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            title: title.into(),
            description,
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies a partial update, touching `updated_at`
    pub fn apply_update(
        &mut self,
        title: Option<String>,
        description: Option<Option<String>>,
        completed: Option<bool>,
    ) {
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(completed) = completed {
            self.completed = completed;
        }
        self.updated_at = Utc::now();
    }
}
