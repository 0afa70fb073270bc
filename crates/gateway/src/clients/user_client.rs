//! gRPC client for user-service.

use async_trait::async_trait;
use tonic::transport::{Channel, Endpoint};
use tracing::debug;

use common::{AppError, AppResult};
use domain::{NewUser, PublicUser};
use proto::user::{
    user_service_client::UserServiceClient as ProtoUserServiceClient, CreateUserRequest,
    HelloRequest, WelcomeRequest,
};

use super::UsersApi;
use crate::config::GatewayConfig;

/// gRPC client wrapper for user-service.
pub struct UserClient {
    client: ProtoUserServiceClient<Channel>,
}

impl UserClient {
    /// Build a lazily connected client; the channel dials on first use.
    pub fn connect_lazy(config: &GatewayConfig) -> Result<Self, tonic::transport::Error> {
        debug!("Configuring user-service client for {}", config.user_service_url);
        let channel = Endpoint::from_shared(config.user_service_url.clone())?
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .connect_lazy();
        Ok(Self {
            client: ProtoUserServiceClient::new(channel),
        })
    }
}

#[async_trait]
impl UsersApi for UserClient {
    async fn create_user(&self, candidate: NewUser) -> AppResult<PublicUser> {
        let request = tonic::Request::new(CreateUserRequest {
            firstname: candidate.firstname,
            lastname: candidate.lastname,
            email: candidate.email,
            password: candidate.password,
            bio: candidate.bio,
            image: candidate.image,
        });

        let mut client = self.client.clone();
        let response = client.create_user(request).await.map_err(AppError::from)?;
        proto_to_user(response.into_inner())
    }

    async fn hello(&self) -> AppResult<String> {
        let mut client = self.client.clone();
        let response = client
            .hello(tonic::Request::new(HelloRequest {}))
            .await
            .map_err(AppError::from)?;
        Ok(response.into_inner().message)
    }

    async fn welcome(&self, name: &str) -> AppResult<String> {
        let request = tonic::Request::new(WelcomeRequest {
            name: name.to_string(),
        });

        let mut client = self.client.clone();
        let response = client.welcome(request).await.map_err(AppError::from)?;
        Ok(response.into_inner().message)
    }
}

/// Convert proto UserResponse to the public projection.
fn proto_to_user(proto: proto::user::UserResponse) -> AppResult<PublicUser> {
    let id = proto
        .id
        .parse()
        .map_err(|_| AppError::internal("Invalid UUID from user-service"))?;

    Ok(PublicUser {
        id,
        firstname: proto.firstname,
        lastname: proto.lastname,
        email: proto.email,
        bio: proto.bio,
        image: proto.image,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(id: &str) -> proto::user::UserResponse {
        proto::user::UserResponse {
            id: id.to_string(),
            firstname: "Ada".to_string(),
            lastname: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            bio: String::new(),
            image: None,
        }
    }

    #[test]
    fn test_proto_to_user() {
        let id = uuid::Uuid::new_v4();
        let user = proto_to_user(response(&id.to_string())).unwrap();

        assert_eq!(user.id, id);
        assert_eq!(user.bio, "");
        assert!(user.image.is_none());
    }

    #[test]
    fn test_proto_to_user_rejects_bad_id() {
        let err = proto_to_user(response("not-a-uuid")).unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[tokio::test]
    async fn test_lazy_client_builds_without_server() {
        let config = GatewayConfig {
            user_service_url: "http://127.0.0.1:1".to_string(),
            ..GatewayConfig::default()
        };
        assert!(UserClient::connect_lazy(&config).is_ok());
    }
}
