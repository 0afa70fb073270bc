//! User domain entity and related types.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::error::{DomainError, DomainResult};
use crate::password::Password;

/// Candidate user submitted for registration.
///
/// Absent strings deserialize as empty so they surface as field
/// violations rather than a malformed body.
#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NewUser {
    #[serde(default)]
    #[validate(length(min = 1, message = "The 'firstname' field is required"))]
    #[cfg_attr(feature = "openapi", schema(example = "Ada"))]
    pub firstname: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "The 'lastname' field is required"))]
    #[cfg_attr(feature = "openapi", schema(example = "Lovelace"))]
    pub lastname: String,
    #[serde(default)]
    #[validate(email(message = "The 'email' field must be a valid e-mail"))]
    #[cfg_attr(feature = "openapi", schema(example = "ada@example.com"))]
    pub email: String,
    /// Minimum 6 characters
    #[serde(default)]
    #[validate(custom(function = "password_length"))]
    #[cfg_attr(feature = "openapi", schema(example = "secret1", min_length = 6))]
    pub password: String,
    #[cfg_attr(feature = "openapi", schema(example = "Analyst and writer"))]
    pub bio: Option<String>,
    /// Avatar URI or storage reference
    #[cfg_attr(feature = "openapi", schema(example = "https://example.com/ada.png"))]
    pub image: Option<String>,
}

/// Bridge the password rule into `validator` so every field is checked in one pass.
fn password_length(password: &str) -> Result<(), ValidationError> {
    let err = match Password::check_length(password) {
        Ok(()) => return Ok(()),
        Err(err) => err,
    };

    let mut error = ValidationError::new("length");
    if let Some(field) = err.fields().first() {
        error.message = Some(Cow::Owned(field.message.clone()));
    }
    Err(error)
}

impl NewUser {
    /// Check every field, collecting all violations.
    pub fn check(&self) -> DomainResult<()> {
        self.validate().map_err(DomainError::from)
    }

    /// Replace the plain-text password with its hash, apply field defaults
    /// and stamp the creation time.
    pub fn into_pending(self, password: Password) -> PendingUser {
        PendingUser {
            firstname: self.firstname,
            lastname: self.lastname,
            email: self.email,
            password_hash: password.into_string(),
            bio: self.bio.unwrap_or_default(),
            image: self.image.filter(|image| !image.is_empty()),
            created_at: Utc::now(),
        }
    }
}

/// Fully populated user awaiting insertion; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingUser {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub password_hash: String,
    pub bio: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Persisted user document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub bio: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Attach a store-assigned id to a pending user
    pub fn from_pending(id: Uuid, pending: PendingUser) -> Self {
        Self {
            id,
            firstname: pending.firstname,
            lastname: pending.lastname,
            email: pending.email,
            password_hash: pending.password_hash,
            bio: pending.bio,
            image: pending.image,
            created_at: pending.created_at,
        }
    }
}

/// User projection safe to return to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PublicUser {
    /// Unique user identifier
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub bio: String,
    pub image: Option<String>,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            firstname: user.firstname,
            lastname: user.lastname,
            email: user.email,
            bio: user.bio,
            image: user.image,
        }
    }
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            firstname: user.firstname.clone(),
            lastname: user.lastname.clone(),
            email: user.email.clone(),
            bio: user.bio.clone(),
            image: user.image.clone(),
        }
    }
}
