//! # Roster REST
//!
//! REST API layer using Axum for Roster.
//! Provides the `/api/v1` endpoints for registration, login and user
//! management, plus the health check.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
