//! Authenticated user extractor.

use crate::responses::AppError;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use roster_core::{RosterError, UserId};

/// The caller's user ID, placed in the request extensions by the auth
/// middleware once a token has been verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUserId(pub UserId);

/// Extractor for the authenticated caller.
///
/// Rejects with 401 when the request carried no token, or a token whose
/// subject is not a usable user ID.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser(pub UserId);

impl AuthenticatedUser {
    /// Returns the caller's user ID.
    pub const fn id(&self) -> UserId {
        self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUserId>()
            .map(|AuthenticatedUserId(id)| AuthenticatedUser(*id))
            .ok_or_else(|| AppError(RosterError::unauthorized("invalid token subject")))
    }
}
