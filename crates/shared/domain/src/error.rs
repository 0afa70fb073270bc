//! Domain-level errors.
//!
//! These errors represent business rule violations and domain logic failures.
//! They are independent of infrastructure concerns (HTTP, gRPC, database).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    EMAIL_EXISTS_FIELD_MESSAGE, EMAIL_EXISTS_MESSAGE, VALIDATION_ERROR_MESSAGE,
};

/// A single offending field and the reason it was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FieldError {
    /// Name of the rejected field
    pub field: String,
    /// Human-readable reason
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone)]
pub enum DomainError {
    /// One or more input fields failed shape validation
    #[error("{}", VALIDATION_ERROR_MESSAGE)]
    Validation(Vec<FieldError>),

    /// Business-rule conflict with existing data
    #[error("{message}")]
    Conflict {
        message: String,
        fields: Vec<FieldError>,
    },

    /// Internal domain error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Create a validation error for a single field
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        DomainError::Validation(vec![FieldError::new(field, message)])
    }

    /// The conflict raised when an email is already registered
    pub fn email_exists() -> Self {
        DomainError::Conflict {
            message: EMAIL_EXISTS_MESSAGE.to_string(),
            fields: vec![FieldError::new("email", EMAIL_EXISTS_FIELD_MESSAGE)],
        }
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        DomainError::Internal(msg.into())
    }

    /// Offending fields, if any
    pub fn fields(&self) -> &[FieldError] {
        match self {
            DomainError::Validation(fields) | DomainError::Conflict { fields, .. } => fields,
            DomainError::Internal(_) => &[],
        }
    }
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    let message = error
                        .message
                        .as_ref()
                        .map(|msg| msg.to_string())
                        .unwrap_or_else(|| format!("The '{}' field is invalid", field));
                    FieldError::new(field.to_string(), message)
                })
            })
            .collect();

        // HashMap order is unstable
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        DomainError::Validation(fields)
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
