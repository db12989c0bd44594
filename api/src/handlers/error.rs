//! Mapping from domain errors to HTTP responses
//!
//! The single place where the error taxonomy meets status codes. Every
//! handler catches collaborator failures at its own boundary and routes
//! them through here; nothing propagates unhandled to the transport
//! layer.

use actix_web::HttpResponse;
use validator::ValidationErrors;

use crate::dto::ErrorBody;
use tb_core::errors::{AuthError, DomainError};

/// Convert a domain error into its JSON error response
pub fn error_response(error: &DomainError) -> HttpResponse {
    match error {
        DomainError::Validation { .. } => HttpResponse::BadRequest().json(ErrorBody::new(error.to_string())),

        DomainError::Auth(auth) => match auth {
            AuthError::InvalidOrExpiredCode
            | AuthError::AlreadyVerified
            | AuthError::UserAlreadyExists => {
                HttpResponse::BadRequest().json(ErrorBody::new(auth.to_string()))
            }
            AuthError::InvalidCredentials | AuthError::SessionExpired => {
                HttpResponse::Unauthorized().json(ErrorBody::new(auth.to_string()))
            }
            AuthError::UserNotFound => {
                HttpResponse::NotFound().json(ErrorBody::new(auth.to_string()))
            }
            AuthError::RateLimitExceeded { .. } => {
                HttpResponse::TooManyRequests().json(ErrorBody::new(auth.to_string()))
            }
            AuthError::EmailServiceFailure => internal_error(error),
        },

        DomainError::NotFound { .. } => {
            HttpResponse::NotFound().json(ErrorBody::new(error.to_string()))
        }

        DomainError::Unauthorized => {
            HttpResponse::Unauthorized().json(ErrorBody::new("Unauthorized"))
        }

        DomainError::Internal { .. } => internal_error(error),
    }
}

/// Convert validator failures into the 400 envelope
pub fn validation_error_response(errors: &ValidationErrors) -> HttpResponse {
    let fields: Vec<&str> = errors.field_errors().keys().copied().collect();
    let message = if fields.is_empty() {
        "Invalid request data".to_string()
    } else {
        format!("Invalid request data: {}", fields.join(", "))
    };
    HttpResponse::BadRequest().json(ErrorBody::new(message))
}

fn internal_error(error: &DomainError) -> HttpResponse {
    // Log the detail, return a generic body
    tracing::error!(error = %error, "Internal server error");
    HttpResponse::InternalServerError().json(ErrorBody::new("An internal error occurred"))
}
