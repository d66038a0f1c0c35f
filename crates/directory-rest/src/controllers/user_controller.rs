//! User controller.

use crate::{
    responses::{ApiResult, AppError, Reply},
    state::AppState,
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Json, Router,
};
use directory_core::User;
use tracing::debug;

/// Creates the user router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create_user))
        .route("/read/:email", get(read_user_by_email))
}

/// Create a new user.
async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<User>, JsonRejection>,
) -> ApiResult<User> {
    let Json(user) = payload.map_err(AppError::from)?;
    debug!("Create user request: {}", user.email);

    let ctx = state.request_context();
    let user = state.user_service.create_user(&ctx, user).await?;
    Ok(Reply::created(user))
}

/// Look a user up by email.
async fn read_user_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> ApiResult<User> {
    debug!("Read user request: {}", email);

    let ctx = state.request_context();
    let user = state.user_service.read_by_email(&ctx, &email).await?;
    Ok(Reply::ok(user))
}
