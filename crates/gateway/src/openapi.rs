//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::handlers::health_handler::{HealthResponse, ServiceHealth, ServiceStatus};
use domain::{FieldError, NewUser, PublicUser};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::user_handler::create_user,
        crate::handlers::greeting_handler::hello,
        crate::handlers::greeting_handler::welcome,
        crate::handlers::health_handler::health_check,
    ),
    components(
        schemas(
            NewUser,
            PublicUser,
            FieldError,
            HealthResponse,
            ServiceStatus,
            ServiceHealth,
        )
    ),
    tags(
        (name = "Users", description = "User registration"),
        (name = "Greetings", description = "Liveness and demo greetings"),
        (name = "Health", description = "Service health"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_registration_path() {
        let doc = ApiDoc::openapi();

        assert!(doc.paths.paths.contains_key("/users"));
        assert!(doc.paths.paths.contains_key("/hello"));
        assert!(doc.paths.paths.contains_key("/welcome"));
    }
}
