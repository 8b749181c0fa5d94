//! Application state for Axum handlers.

use roster_security::TokenProvider;
use roster_service::UserService;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserService>,
    pub token_provider: Arc<TokenProvider>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(user_service: Arc<dyn UserService>, token_provider: Arc<TokenProvider>) -> Self {
        Self {
            user_service,
            token_provider,
        }
    }
}
