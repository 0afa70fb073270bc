//! gRPC protocol buffer definitions.
//!
//! This crate contains the generated gRPC service definitions for the
//! UserService: user registration plus the hello/welcome greetings.

/// User service definitions.
pub mod user {
    tonic::include_proto!("user");
}

// Re-export commonly used items
pub use user::user_service_client::UserServiceClient;
pub use user::user_service_server::{UserService, UserServiceServer};
pub use user::{FieldViolation, FieldViolations};
