//! Result type aliases for Roster.

use crate::RosterError;

/// A specialized `Result` type for Roster operations.
pub type RosterResult<T> = Result<T, RosterError>;
