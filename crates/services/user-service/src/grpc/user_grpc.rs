//! gRPC implementation for UserService.

use std::sync::Arc;

use tonic::{Request, Response, Status};

use crate::service::UserService;
use domain::{NewUser, PublicUser};
use proto::user::{
    user_service_server::UserService as UserServiceProto, CreateUserRequest, GreetingResponse,
    HelloRequest, UserResponse, WelcomeRequest,
};

/// gRPC service wrapper for UserService.
pub struct UserGrpcService {
    service: Arc<dyn UserService>,
}

impl UserGrpcService {
    /// Create a new gRPC service wrapper.
    pub fn new(service: Arc<dyn UserService>) -> Self {
        Self { service }
    }
}

#[tonic::async_trait]
impl UserServiceProto for UserGrpcService {
    async fn create_user(
        &self,
        request: Request<CreateUserRequest>,
    ) -> Result<Response<UserResponse>, Status> {
        let candidate = proto_to_new_user(request.into_inner());

        let user = self.service.register(candidate).await.map_err(Status::from)?;
        Ok(Response::new(user_to_proto(&user)))
    }

    async fn hello(
        &self,
        _request: Request<HelloRequest>,
    ) -> Result<Response<GreetingResponse>, Status> {
        Ok(Response::new(GreetingResponse {
            message: self.service.hello(),
        }))
    }

    async fn welcome(
        &self,
        request: Request<WelcomeRequest>,
    ) -> Result<Response<GreetingResponse>, Status> {
        let req = request.into_inner();

        let message = self.service.welcome(&req.name).map_err(Status::from)?;
        Ok(Response::new(GreetingResponse { message }))
    }
}

/// Convert proto request to the domain candidate.
fn proto_to_new_user(req: CreateUserRequest) -> NewUser {
    NewUser {
        firstname: req.firstname,
        lastname: req.lastname,
        email: req.email,
        password: req.password,
        bio: req.bio,
        image: req.image,
    }
}

/// Convert the public projection to proto (no password hash).
fn user_to_proto(user: &PublicUser) -> UserResponse {
    UserResponse {
        id: user.id.to_string(),
        firstname: user.firstname.clone(),
        lastname: user.lastname.clone(),
        email: user.email.clone(),
        bio: user.bio.clone(),
        image: user.image.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::AppError;
    use uuid::Uuid;

    use crate::events::LocalEventBus;
    use crate::repository::MockUserRepository;
    use crate::service::UserManager;
    use domain::User;

    fn grpc(repo: MockUserRepository) -> UserGrpcService {
        let manager = UserManager::new(Arc::new(repo), Arc::new(LocalEventBus::new(4)));
        UserGrpcService::new(Arc::new(manager))
    }

    fn request(password: &str) -> CreateUserRequest {
        CreateUserRequest {
            firstname: "Ada".to_string(),
            lastname: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password: password.to_string(),
            bio: None,
            image: None,
        }
    }

    #[tokio::test]
    async fn test_create_user_returns_public_projection() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_one_by_email().returning(|_| Ok(None));
        repo.expect_insert()
            .returning(|pending| Ok(User::from_pending(Uuid::new_v4(), pending)));

        let response = grpc(repo)
            .create_user(Request::new(request("secret1")))
            .await
            .unwrap()
            .into_inner();

        assert!(Uuid::parse_str(&response.id).is_ok());
        assert_eq!(response.email, "ada@example.com");
        assert_eq!(response.bio, "");
        assert_eq!(response.image, None);
    }

    #[tokio::test]
    async fn test_create_user_short_password_is_invalid_argument() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_one_by_email().times(0);
        repo.expect_insert().times(0);

        let status = grpc(repo)
            .create_user(Request::new(request("abc")))
            .await
            .unwrap_err();

        assert_eq!(status.code(), tonic::Code::InvalidArgument);
        let err = AppError::from(status);
        assert_eq!(err.fields()[0].field, "password");
    }

    #[tokio::test]
    async fn test_welcome_and_hello() {
        let service = grpc(MockUserRepository::new());

        let hello = service.hello(Request::new(HelloRequest {})).await.unwrap();
        assert_eq!(hello.into_inner().message, "Hello Moleculer");

        let welcome = service
            .welcome(Request::new(WelcomeRequest {
                name: "Ada".to_string(),
            }))
            .await
            .unwrap();
        assert_eq!(welcome.into_inner().message, "Welcome, Ada");

        let status = service
            .welcome(Request::new(WelcomeRequest { name: String::new() }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), tonic::Code::InvalidArgument);
    }
}
