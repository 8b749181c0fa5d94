//! Pagination types for list operations.

use serde::{Deserialize, Serialize};

/// A clamped request for a page of results.
///
/// Pages are 1-indexed. Out-of-range input is never rejected; it is clamped
/// to the first page and the default limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// The page number (1-indexed).
    pub page: u32,
    /// The number of items per page.
    pub limit: u32,
}

impl PageRequest {
    /// The default page size, also used when the requested size is out of range.
    pub const DEFAULT_LIMIT: u32 = 10;
    /// The maximum allowed page size.
    pub const MAX_LIMIT: u32 = 100;

    /// Creates a page request, clamping `page < 1` to 1 and
    /// `limit <= 0 || limit > 100` to the default.
    #[must_use]
    pub fn new(page: i64, limit: i64) -> Self {
        let page = u32::try_from(page.max(1)).unwrap_or(u32::MAX);
        let limit = match u32::try_from(limit) {
            Ok(limit) if (1..=Self::MAX_LIMIT).contains(&limit) => limit,
            _ => Self::DEFAULT_LIMIT,
        };
        Self { page, limit }
    }

    /// Returns the offset for database queries.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.limit as u64
    }

    /// Returns the limit for database queries.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.limit as u64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, i64::from(Self::DEFAULT_LIMIT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamps_page_and_limit() {
        let page = PageRequest::new(0, 1000);
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, 10);
        assert_eq!(page.offset(), 0);
        assert_eq!(page.limit(), 10);
    }

    #[test]
    fn test_negative_values_clamp() {
        let page = PageRequest::new(-5, -1);
        assert_eq!(page, PageRequest { page: 1, limit: 10 });
    }

    #[test]
    fn test_zero_limit_uses_default() {
        assert_eq!(PageRequest::new(2, 0).limit, 10);
    }

    #[test]
    fn test_limit_bounds_are_inclusive() {
        assert_eq!(PageRequest::new(1, 1).limit, 1);
        assert_eq!(PageRequest::new(1, 100).limit, 100);
        assert_eq!(PageRequest::new(1, 101).limit, 10);
    }

    #[test]
    fn test_offset() {
        assert_eq!(PageRequest::new(3, 20).offset(), 40);
    }

    #[test]
    fn test_default() {
        let page = PageRequest::default();
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, 10);
    }
}
