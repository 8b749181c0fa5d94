//! # Roster Service
//!
//! Business logic service layer for Roster: registration, login and
//! account CRUD with cache-aside reads.

pub mod cache;
pub mod dto;
pub mod r#impl;
pub mod user_service;

pub use cache::*;
pub use dto::*;
pub use r#impl::UserServiceImpl;
pub use user_service::*;
