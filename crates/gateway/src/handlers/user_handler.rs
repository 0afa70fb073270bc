//! User handlers.

use axum::{extract::State, http::StatusCode, response::Json, routing::post, Router};

use common::AppResult;
use domain::{NewUser, PublicUser};

use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new().route("/", post(create_user))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = NewUser,
    responses(
        (status = 201, description = "User registered", body = PublicUser),
        (status = 400, description = "Validation error"),
        (status = 422, description = "Email exists!")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(candidate): ValidatedJson<NewUser>,
) -> AppResult<(StatusCode, Json<PublicUser>)> {
    let user = state.users.create_user(candidate).await?;
    Ok((StatusCode::CREATED, Json(user)))
}
