//! # Roster Server Library
//!
//! Dependency wiring and startup utilities for the Roster server binary.

pub mod di;
pub mod startup;
