//! Pagination extractor.

use serde::Deserialize;

/// Query parameters for listing users.
///
/// Absent parameters take the defaults; unparsable ones become 0 and are
/// clamped by the service like any other out-of-range value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
}

impl ListQuery {
    pub const DEFAULT_PAGE: i64 = 1;
    pub const DEFAULT_LIMIT: i64 = 10;

    /// Requested page number.
    pub fn page(&self) -> i64 {
        parse_or(self.page.as_deref(), Self::DEFAULT_PAGE)
    }

    /// Requested page size.
    pub fn limit(&self) -> i64 {
        parse_or(self.limit.as_deref(), Self::DEFAULT_LIMIT)
    }
}

fn parse_or(value: Option<&str>, default: i64) -> i64 {
    value.map_or(default, |v| v.trim().parse().unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_absent() {
        let query = ListQuery::default();
        assert_eq!(query.page(), 1);
        assert_eq!(query.limit(), 10);
    }

    #[test]
    fn test_parses_values() {
        let query = ListQuery {
            page: Some("3".to_string()),
            limit: Some("25".to_string()),
        };
        assert_eq!(query.page(), 3);
        assert_eq!(query.limit(), 25);
    }

    #[test]
    fn test_garbage_becomes_zero() {
        let query = ListQuery {
            page: Some("abc".to_string()),
            limit: Some(String::new()),
        };
        assert_eq!(query.page(), 0);
        assert_eq!(query.limit(), 0);
    }
}
