//! Unified error handling for HTTP and gRPC.
//!
//! Provides a single error type that can be converted to:
//! - Axum HTTP responses (for API gateway)
//! - Tonic gRPC status codes (for microservices)
//!
//! Field-level details survive the gRPC hop: they are encoded as
//! `FieldViolations` in the status details.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::{DomainError, FieldError, VALIDATION_ERROR_MESSAGE};
use prost::Message;
use proto::{FieldViolation, FieldViolations};
use serde::Serialize;
use thiserror::Error;
use tonic::Status;

/// Application error types with support for both HTTP and gRPC.
#[derive(Error, Debug)]
pub enum AppError {
    // Client input
    #[error("{message}")]
    Validation {
        message: String,
        fields: Vec<FieldError>,
    },

    #[error("Invalid input: {0}")]
    BadRequest(String),

    // Business rules
    #[error("{message}")]
    Conflict {
        message: String,
        fields: Vec<FieldError>,
    },

    // External service errors
    #[cfg(feature = "database")]
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    #[cfg(feature = "events")]
    #[error("Event bus error")]
    EventBus(#[from] redis::RedisError),

    // gRPC specific
    #[error("Service unavailable")]
    ServiceUnavailable(String),

    #[error("gRPC error: {0}")]
    Grpc(String),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body for HTTP; `message` sits at the top level
#[derive(Debug, Serialize)]
struct ErrorResponse {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fields: Vec<FieldError>,
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "VALIDATION_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Conflict { .. } => "CONFLICT",
            #[cfg(feature = "database")]
            AppError::Database(_) => "DATABASE_ERROR",
            #[cfg(feature = "events")]
            AppError::EventBus(_) => "EVENT_BUS_ERROR",
            AppError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            AppError::Grpc(_) => "GRPC_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Offending fields for client errors
    pub fn fields(&self) -> &[FieldError] {
        match self {
            AppError::Validation { fields, .. } | AppError::Conflict { fields, .. } => fields,
            _ => &[],
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            // Show full message for client errors
            AppError::Validation { message, .. } | AppError::Conflict { message, .. } => {
                message.clone()
            }
            AppError::BadRequest(msg) => msg.clone(),

            // Hide details for internal errors
            #[cfg(feature = "database")]
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            #[cfg(feature = "events")]
            AppError::EventBus(e) => {
                tracing::error!("Event bus error: {:?}", e);
                "An event bus error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
            AppError::ServiceUnavailable(service) => {
                tracing::error!("Service unavailable: {}", service);
                format!("Service {} is unavailable", service)
            }
            AppError::Grpc(msg) => {
                tracing::error!("gRPC error: {}", msg);
                "A service communication error occurred".to_string()
            }
        }
    }
}

// =============================================================================
// HTTP Response (Axum)
// =============================================================================

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            code: self.code().to_string(),
            message: self.user_message(),
            fields: self.fields().to_vec(),
        };

        (status, Json(body)).into_response()
    }
}

// =============================================================================
// gRPC Status (Tonic)
// =============================================================================

impl From<AppError> for Status {
    fn from(err: AppError) -> Self {
        let code = match &err {
            AppError::Validation { .. } | AppError::BadRequest(_) => tonic::Code::InvalidArgument,
            AppError::Conflict { .. } => tonic::Code::AlreadyExists,
            AppError::ServiceUnavailable(_) => tonic::Code::Unavailable,
            _ => tonic::Code::Internal,
        };

        if err.fields().is_empty() {
            return Status::new(code, err.user_message());
        }

        let details = FieldViolations {
            violations: err
                .fields()
                .iter()
                .map(|f| FieldViolation {
                    field: f.field.clone(),
                    message: f.message.clone(),
                })
                .collect(),
        };
        Status::with_details(code, err.user_message(), details.encode_to_vec().into())
    }
}

impl From<Status> for AppError {
    fn from(status: Status) -> Self {
        let message = status.message().to_string();
        match status.code() {
            tonic::Code::InvalidArgument => {
                let fields = decode_fields(&status);
                if fields.is_empty() {
                    AppError::BadRequest(message)
                } else {
                    AppError::Validation { message, fields }
                }
            }
            tonic::Code::AlreadyExists => AppError::Conflict {
                message,
                fields: decode_fields(&status),
            },
            tonic::Code::Unavailable => AppError::ServiceUnavailable(message),
            _ => AppError::Grpc(message),
        }
    }
}

/// Decode field violations from status details; malformed details yield none.
fn decode_fields(status: &Status) -> Vec<FieldError> {
    match FieldViolations::decode(status.details()) {
        Ok(details) => details
            .violations
            .into_iter()
            .map(|v| FieldError::new(v.field, v.message))
            .collect(),
        Err(e) => {
            tracing::warn!("Malformed status details: {}", e);
            Vec::new()
        }
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(fields) => AppError::Validation {
                message: VALIDATION_ERROR_MESSAGE.to_string(),
                fields,
            },
            DomainError::Conflict { message, fields } => AppError::Conflict { message, fields },
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn validation(fields: Vec<FieldError>) -> Self {
        AppError::from(DomainError::Validation(fields))
    }

    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::validation(vec![FieldError::new(field, message)])
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    pub fn service_unavailable(service: impl Into<String>) -> Self {
        AppError::ServiceUnavailable(service.into())
    }
}
