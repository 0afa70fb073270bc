//! Greeting endpoints.

use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

use common::AppResult;

use crate::state::AppState;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WelcomeParams {
    /// Name to greet
    pub name: Option<String>,
}

/// Create greeting routes
pub fn greeting_routes() -> Router<AppState> {
    Router::new()
        .route("/hello", get(hello))
        .route("/welcome", get(welcome))
}

/// Fixed greeting
#[utoipa::path(
    get,
    path = "/hello",
    tag = "Greetings",
    responses((status = 200, description = "Greeting", body = String))
)]
pub async fn hello(State(state): State<AppState>) -> AppResult<Json<String>> {
    Ok(Json(state.users.hello().await?))
}

/// Greet a user by name
#[utoipa::path(
    get,
    path = "/welcome",
    tag = "Greetings",
    params(WelcomeParams),
    responses(
        (status = 200, description = "Greeting", body = String),
        (status = 400, description = "Missing name")
    )
)]
pub async fn welcome(
    State(state): State<AppState>,
    Query(params): Query<WelcomeParams>,
) -> AppResult<Json<String>> {
    let name = params.name.unwrap_or_default();
    Ok(Json(state.users.welcome(&name).await?))
}
