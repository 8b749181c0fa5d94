//! Authentication middleware.

use crate::{extractors::AuthenticatedUserId, responses::AppError, state::AppState};
use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::Response,
};
use roster_core::RosterError;
use tracing::debug;

const BEARER_PREFIX: &str = "Bearer ";

/// Middleware that requires a valid bearer token.
///
/// On success the verified `Claims` are added to the request extensions,
/// along with an [`AuthenticatedUserId`] when the token's subject parsed.
pub async fn require_bearer(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(bearer_token)
        .ok_or_else(|| AppError(RosterError::unauthorized("missing bearer token")))?;

    let claims = state.token_provider.verify(token).map_err(|e| {
        debug!("Token validation failed: {}", e);
        AppError(e)
    })?;

    match claims.user_id() {
        Some(user_id) => {
            debug!(user_id = %user_id, expires_at = ?claims.expires_at(), "Authenticated request");
            request.extensions_mut().insert(AuthenticatedUserId(user_id));
        }
        None => debug!("Token carries no usable subject"),
    }
    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}

/// Returns the token from an `Authorization` value of the form `Bearer <token>`.
fn bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix(BEARER_PREFIX)
        .filter(|token| !token.is_empty())
}
