//! # Roster Core
//!
//! Core types and error definitions for Roster.
//! This crate provides the foundational abstractions shared by the
//! repository, service, and HTTP layers: the `User` entity, typed ids,
//! list clamping, the display-name normalizer, and the unified error type.

pub mod domain;
pub mod error;
pub mod id;
pub mod normalize;
pub mod pagination;
pub mod result;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use normalize::*;
pub use pagination::*;
pub use result::*;
pub use validation::*;

// Re-export shaku for dependency injection
pub use shaku::Interface;
