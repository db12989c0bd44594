//! Per-user todo routes, bearer-token authenticated
//!
//! Every handler runs behind [`crate::middleware::SessionAuth`], which
//! injects the authenticated user; ownership scoping happens in the
//! todo service.

use actix_web::{web, HttpRequest, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use crate::dto::{CreateTodoRequest, DeleteTodoResponse, UpdateTodoRequest};
use crate::handlers::{error_response, validation_error_response};
use crate::middleware::auth::authenticated_user;
use crate::state::AppState;

use tb_core::errors::DomainError;
use tb_core::repositories::{TodoRepository, UserRepository, VerificationCodeRepository};
use tb_core::services::auth::AuthProvider;
use tb_core::services::todo::TodoUpdate;
use tb_core::services::verification::EmailServiceTrait;

/// GET /api/todos - list the caller's todos, newest first
pub async fn list_todos<P, V, U, M, D>(
    req: HttpRequest,
    state: web::Data<AppState<P, V, U, M, D>>,
) -> HttpResponse
where
    P: AuthProvider + 'static,
    V: VerificationCodeRepository + 'static,
    U: UserRepository + 'static,
    M: EmailServiceTrait + 'static,
    D: TodoRepository + 'static,
{
    let Some(user) = authenticated_user(&req) else {
        return error_response(&DomainError::Unauthorized);
    };

    match state.todo_service.list(user.id).await {
        Ok(todos) => HttpResponse::Ok().json(todos),
        Err(error) => error_response(&error),
    }
}

/// POST /api/todos - create a todo
pub async fn create_todo<P, V, U, M, D>(
    req: HttpRequest,
    state: web::Data<AppState<P, V, U, M, D>>,
    request: web::Json<CreateTodoRequest>,
) -> HttpResponse
where
    P: AuthProvider + 'static,
    V: VerificationCodeRepository + 'static,
    U: UserRepository + 'static,
    M: EmailServiceTrait + 'static,
    D: TodoRepository + 'static,
{
    let Some(user) = authenticated_user(&req) else {
        return error_response(&DomainError::Unauthorized);
    };

    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    let body = request.into_inner();
    match state
        .todo_service
        .create(user.id, body.title, body.description)
        .await
    {
        Ok(todo) => HttpResponse::Ok().json(todo),
        Err(error) => error_response(&error),
    }
}

/// GET /api/todos/{id} - fetch one todo
pub async fn get_todo<P, V, U, M, D>(
    req: HttpRequest,
    state: web::Data<AppState<P, V, U, M, D>>,
    path: web::Path<Uuid>,
) -> HttpResponse
where
    P: AuthProvider + 'static,
    V: VerificationCodeRepository + 'static,
    U: UserRepository + 'static,
    M: EmailServiceTrait + 'static,
    D: TodoRepository + 'static,
{
    let Some(user) = authenticated_user(&req) else {
        return error_response(&DomainError::Unauthorized);
    };

    match state.todo_service.get(user.id, path.into_inner()).await {
        Ok(todo) => HttpResponse::Ok().json(todo),
        Err(error) => error_response(&error),
    }
}

/// PUT /api/todos/{id} - partially update a todo
pub async fn update_todo<P, V, U, M, D>(
    req: HttpRequest,
    state: web::Data<AppState<P, V, U, M, D>>,
    path: web::Path<Uuid>,
    request: web::Json<UpdateTodoRequest>,
) -> HttpResponse
where
    P: AuthProvider + 'static,
    V: VerificationCodeRepository + 'static,
    U: UserRepository + 'static,
    M: EmailServiceTrait + 'static,
    D: TodoRepository + 'static,
{
    let Some(user) = authenticated_user(&req) else {
        return error_response(&DomainError::Unauthorized);
    };

    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    let body = request.into_inner();
    let update = TodoUpdate {
        title: body.title,
        description: body.description,
        completed: body.completed,
    };

    match state
        .todo_service
        .update(user.id, path.into_inner(), update)
        .await
    {
        Ok(todo) => HttpResponse::Ok().json(todo),
        Err(error) => error_response(&error),
    }
}

/// DELETE /api/todos/{id} - delete a todo
pub async fn delete_todo<P, V, U, M, D>(
    req: HttpRequest,
    state: web::Data<AppState<P, V, U, M, D>>,
    path: web::Path<Uuid>,
) -> HttpResponse
where
    P: AuthProvider + 'static,
    V: VerificationCodeRepository + 'static,
    U: UserRepository + 'static,
    M: EmailServiceTrait + 'static,
    D: TodoRepository + 'static,
{
    let Some(user) = authenticated_user(&req) else {
        return error_response(&DomainError::Unauthorized);
    };

    match state.todo_service.delete(user.id, path.into_inner()).await {
        Ok(()) => HttpResponse::Ok().json(DeleteTodoResponse {
            message: "Todo deleted".to_string(),
        }),
        Err(error) => error_response(&error),
    }
}
