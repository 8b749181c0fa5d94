//! # Roster Security
//!
//! Security module for Roster providing JWT issuance and verification
//! and Argon2 password hashing.

pub mod jwt;
pub mod password;

pub use jwt::*;
pub use password::*;
