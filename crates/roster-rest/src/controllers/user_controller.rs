//! User management controller.

use crate::{
    extractors::{AuthenticatedUser, ListQuery, ValidatedJson},
    responses::{created, no_content, ok, ApiResponse, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use roster_core::{RosterError, UserId};
use roster_service::{RegisterRequest, UpdateUserRequest, UserListResponse, UserResponse};
use tracing::debug;

/// Creates the user router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}

/// Creates the router for the caller's own account.
pub fn me_router() -> Router<AppState> {
    Router::new().route("/me", get(get_current_user))
}

/// Get the authenticated caller.
async fn get_current_user(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<UserResponse> {
    debug!("Get current user: {}", user.id());

    let response = state.user_service.get_user(user.id()).await?;
    ok(response)
}

/// List users, one page at a time.
async fn list_users(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Query(query): Query<ListQuery>,
) -> ApiResult<UserListResponse> {
    debug!("List users request: page={}, limit={}", query.page(), query.limit());

    let response = state
        .user_service
        .list_users(query.page(), query.limit())
        .await?;
    ok(response)
}

/// Create a new user.
async fn create_user(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), AppError> {
    debug!("Create user request: {}", request.email);

    let response = state.user_service.create_user(request).await?;
    Ok(created(response))
}

/// Get a user by ID.
async fn get_user(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<String>,
) -> ApiResult<UserResponse> {
    debug!("Get user request: {}", id);

    let user_id = parse_user_id(&id)?;
    let response = state.user_service.get_user(user_id).await?;
    ok(response)
}

/// Partially update a user.
async fn update_user(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<UserResponse> {
    debug!("Update user request: {}", id);

    let user_id = parse_user_id(&id)?;
    let response = state.user_service.update_user(user_id, request).await?;
    ok(response)
}

/// Delete a user.
async fn delete_user(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    debug!("Delete user request: {}", id);

    let user_id = parse_user_id(&id)?;
    state.user_service.delete_user(user_id).await?;

    Ok(no_content())
}

/// Parse a user ID from a path segment.
fn parse_user_id(id: &str) -> Result<UserId, AppError> {
    id.parse::<UserId>()
        .map_err(|_| AppError(RosterError::validation("invalid id")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_id() {
        assert_eq!(parse_user_id("12").unwrap(), UserId::new(12));
        assert!(parse_user_id("abc").is_err());
        assert!(parse_user_id("-1").is_err());
    }
}
