//! MySQL implementation of the TodoRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use tb_core::domain::entities::todo::Todo;
use tb_core::errors::DomainError;
use tb_core::repositories::TodoRepository;

/// MySQL implementation of TodoRepository
pub struct MySqlTodoRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlTodoRepository {
    /// Create a new MySQL todo repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_todo(row: &sqlx::mysql::MySqlRow) -> Result<Todo, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::internal(format!("Failed to get id: {}", e)))?;
        let user_id: String = row
            .try_get("user_id")
            .map_err(|e| DomainError::internal(format!("Failed to get user_id: {}", e)))?;

        Ok(Todo {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::internal(format!("Invalid todo UUID: {}", e)))?,
            user_id: Uuid::parse_str(&user_id)
                .map_err(|e| DomainError::internal(format!("Invalid user UUID: {}", e)))?,
            title: row
                .try_get("title")
                .map_err(|e| DomainError::internal(format!("Failed to get title: {}", e)))?,
            description: row
                .try_get("description")
                .map_err(|e| DomainError::internal(format!("Failed to get description: {}", e)))?,
            completed: row
                .try_get("completed")
                .map_err(|e| DomainError::internal(format!("Failed to get completed: {}", e)))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::internal(format!("Failed to get created_at: {}", e)))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::internal(format!("Failed to get updated_at: {}", e)))?,
        })
    }
}

#[async_trait]
impl TodoRepository for MySqlTodoRepository {
    async fn insert(&self, todo: Todo) -> Result<Todo, DomainError> {
        let query = r#"
            INSERT INTO todos (id, user_id, title, description, completed, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(todo.id.to_string())
            .bind(todo.user_id.to_string())
            .bind(&todo.title)
            .bind(&todo.description)
            .bind(todo.completed)
            .bind(todo.created_at)
            .bind(todo.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to insert todo: {}", e)))?;

        Ok(todo)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Todo>, DomainError> {
        let query = r#"
            SELECT id, user_id, title, description, completed, created_at, updated_at
            FROM todos
            WHERE id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to find todo: {}", e)))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_todo(&row)?)),
            None => Ok(None),
        }
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Todo>, DomainError> {
        let query = r#"
            SELECT id, user_id, title, description, completed, created_at, updated_at
            FROM todos
            WHERE user_id = ?
            ORDER BY created_at DESC
        "#;

        let rows = sqlx::query(query)
            .bind(user_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to list todos: {}", e)))?;

        rows.iter().map(Self::row_to_todo).collect()
    }

    async fn update(&self, todo: Todo) -> Result<Todo, DomainError> {
        let query = r#"
            UPDATE todos
            SET title = ?, description = ?, completed = ?, updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&todo.title)
            .bind(&todo.description)
            .bind(todo.completed)
            .bind(todo.updated_at)
            .bind(todo.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to update todo: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Todo"));
        }

        Ok(todo)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to delete todo: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}
