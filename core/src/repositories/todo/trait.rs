//! Todo repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::todo::Todo;
use crate::errors::DomainError;

/// Repository trait for todo persistence
///
/// Ownership checks live in the service layer; the repository exposes
/// plain row operations.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Insert a new todo row
    async fn insert(&self, todo: Todo) -> Result<Todo, DomainError>;

    /// Find a todo by id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Todo>, DomainError>;

    /// List all todos owned by a user, newest first
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Todo>, DomainError>;

    /// Replace an existing todo row
    async fn update(&self, todo: Todo) -> Result<Todo, DomainError>;

    /// Delete a todo row
    ///
    /// # Returns
    /// `Ok(true)` if a row was deleted, `Ok(false)` if none existed
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
