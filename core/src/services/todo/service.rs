//! Per-user todo CRUD service

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::todo::Todo;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::TodoRepository;

/// Maximum accepted title length
const MAX_TITLE_LENGTH: usize = 255;

/// Partial update for a todo
///
/// `description: Some(None)` clears the field; `None` leaves it alone.
#[derive(Debug, Clone, Default)]
pub struct TodoUpdate {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub completed: Option<bool>,
}

/// Todo service scoping every operation to its owner
///
/// A todo owned by another user is reported as `NotFound`, never as a
/// permission error, so the endpoint does not leak row existence.
pub struct TodoService<D: TodoRepository> {
    repository: Arc<D>,
}

impl<D: TodoRepository> TodoService<D> {
    /// Create a new todo service
    pub fn new(repository: Arc<D>) -> Self {
        Self { repository }
    }

    /// Create a todo for a user
    pub async fn create(
        &self,
        user_id: Uuid,
        title: String,
        description: Option<String>,
    ) -> DomainResult<Todo> {
        validate_title(&title)?;
        let todo = Todo::new(user_id, title, description);
        self.repository.insert(todo).await
    }

    /// List all todos owned by a user, newest first
    pub async fn list(&self, user_id: Uuid) -> DomainResult<Vec<Todo>> {
        self.repository.list_by_user(user_id).await
    }

    /// Fetch one todo owned by a user
    pub async fn get(&self, user_id: Uuid, id: Uuid) -> DomainResult<Todo> {
        self.find_owned(user_id, id).await
    }

    /// Apply a partial update to a todo owned by a user
    pub async fn update(&self, user_id: Uuid, id: Uuid, update: TodoUpdate) -> DomainResult<Todo> {
        if let Some(title) = &update.title {
            validate_title(title)?;
        }

        let mut todo = self.find_owned(user_id, id).await?;
        todo.apply_update(update.title, update.description, update.completed);
        self.repository.update(todo).await
    }

    /// Delete a todo owned by a user
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> DomainResult<()> {
        let todo = self.find_owned(user_id, id).await?;
        self.repository.delete(todo.id).await?;
        Ok(())
    }

    async fn find_owned(&self, user_id: Uuid, id: Uuid) -> DomainResult<Todo> {
        match self.repository.find_by_id(id).await? {
            Some(todo) if todo.user_id == user_id => Ok(todo),
            // Someone else's todo is indistinguishable from a missing one
            _ => Err(DomainError::not_found("Todo")),
        }
    }
}

fn validate_title(title: &str) -> DomainResult<()> {
    if title.trim().is_empty() {
        return Err(DomainError::validation("Title must not be empty"));
    }
    if title.len() > MAX_TITLE_LENGTH {
        return Err(DomainError::validation(format!(
            "Title must be at most {} characters",
            MAX_TITLE_LENGTH
        )));
    }
    Ok(())
}
