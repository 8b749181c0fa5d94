//! Custom Axum extractors.

mod current_user;
mod pagination;
mod validated;

pub use current_user::*;
pub use pagination::*;
pub use validated::*;
