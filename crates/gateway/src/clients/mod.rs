//! Clients for calling microservices.

mod user_client;

use async_trait::async_trait;

use common::AppResult;
use domain::{NewUser, PublicUser};

pub use user_client::UserClient;

/// Operations the gateway forwards to the user service.
#[async_trait]
pub trait UsersApi: Send + Sync {
    /// Register a user
    async fn create_user(&self, candidate: NewUser) -> AppResult<PublicUser>;

    /// Fixed greeting
    async fn hello(&self) -> AppResult<String>;

    /// Personalized greeting
    async fn welcome(&self, name: &str) -> AppResult<String>;
}
