//! Main application router.

use crate::{
    controllers::{auth_controller, health_controller, user_controller},
    middleware::{logging_middleware, require_bearer},
    responses::AppError,
    state::AppState,
};
use axum::{
    http::HeaderValue,
    middleware,
    response::{IntoResponse, Response},
    Router,
};
use roster_config::ServerConfig;
use roster_core::RosterError;
use std::any::Any;
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    cors::{self, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info};

/// Creates the main application router.
///
/// `/api/v1/auth/*` is public; `/api/v1/me` and `/api/v1/users/*` require a
/// bearer token.
pub fn create_router(state: AppState, server_config: &ServerConfig) -> Router {
    let cors = create_cors_layer(server_config);

    let protected = Router::new()
        .merge(user_controller::me_router())
        .nest("/users", user_controller::router())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_bearer));

    let api_router = Router::new()
        .nest("/auth", auth_controller::router())
        .merge(protected)
        .with_state(state);

    let router = Router::new()
        // Health endpoints (no auth required)
        .merge(health_controller::router())
        .nest("/api/v1", api_router)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(logging_middleware));

    info!("Router created with REST endpoints under /api/v1");
    router
}

/// Creates a CORS layer based on server configuration.
fn create_cors_layer(server_config: &ServerConfig) -> CorsLayer {
    if !server_config.cors_enabled {
        return CorsLayer::new();
    }

    if server_config.cors_origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = server_config
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(cors::Any)
        .allow_headers(cors::Any)
}

/// Turns a handler panic into a 500 error envelope.
fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");

    error!(error = %detail, "Handler panicked");
    AppError(RosterError::internal("internal server error")).into_response()
}
