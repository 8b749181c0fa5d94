//! Cache key generators for consistent key naming.

use roster_core::UserId;

/// Cache key for a user snapshot, e.g. `user:42`.
#[must_use]
pub fn user_by_id(id: UserId) -> String {
    format!("user:{id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_by_id_key() {
        assert_eq!(user_by_id(UserId::new(42)), "user:42");
        assert_eq!(user_by_id(UserId::new(0)), "user:0");
    }
}
