//! Mock implementation of TodoRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::todo::Todo;
use crate::errors::DomainError;

use super::trait_::TodoRepository;

/// In-memory todo repository for tests
#[derive(Clone, Default)]
pub struct MockTodoRepository {
    todos: Arc<RwLock<HashMap<Uuid, Todo>>>,
}

impl MockTodoRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoRepository for MockTodoRepository {
    async fn insert(&self, todo: Todo) -> Result<Todo, DomainError> {
        self.todos.write().await.insert(todo.id, todo.clone());
        Ok(todo)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Todo>, DomainError> {
        Ok(self.todos.read().await.get(&id).cloned())
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Todo>, DomainError> {
        let todos = self.todos.read().await;
        let mut owned: Vec<Todo> = todos
            .values()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    async fn update(&self, todo: Todo) -> Result<Todo, DomainError> {
        let mut todos = self.todos.write().await;
        if !todos.contains_key(&todo.id) {
            return Err(DomainError::not_found("Todo"));
        }
        todos.insert(todo.id, todo.clone());
        Ok(todo)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.todos.write().await.remove(&id).is_some())
    }
}
