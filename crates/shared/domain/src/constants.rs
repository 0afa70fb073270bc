//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement (in characters)
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Top-level message for field validation failures
pub const VALIDATION_ERROR_MESSAGE: &str = "Parameters validation error!";

// =============================================================================
// Uniqueness
// =============================================================================

/// Top-level message returned when an email is already registered
pub const EMAIL_EXISTS_MESSAGE: &str = "Email exists!";

/// Field-level message attached to the `email` field on conflict
pub const EMAIL_EXISTS_FIELD_MESSAGE: &str = "Email exists";

// =============================================================================
// Password Hashing (Argon2id)
// =============================================================================

/// Memory cost in KiB
pub const PASSWORD_HASH_MEMORY_KIB: u32 = 19 * 1024;

/// Number of iterations
pub const PASSWORD_HASH_ITERATIONS: u32 = 2;

/// Degree of parallelism
pub const PASSWORD_HASH_PARALLELISM: u32 = 1;

// =============================================================================
// Greetings
// =============================================================================

/// Fixed greeting returned by the hello endpoint
pub const HELLO_GREETING: &str = "Hello Moleculer";
