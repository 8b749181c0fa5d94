//! JWT claims structure.

use chrono::{DateTime, Utc};
use roster_core::UserId;
use serde::{Deserialize, Deserializer, Serialize};
use std::time::Duration;

/// JWT claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID). Absent when the token's subject is not a valid ID.
    #[serde(
        default,
        deserialize_with = "deserialize_subject",
        skip_serializing_if = "Option::is_none"
    )]
    pub sub: Option<UserId>,

    /// Issued at timestamp.
    pub iat: i64,

    /// Expiration timestamp.
    pub exp: i64,

    /// User's email.
    #[serde(rename = "eml", default)]
    pub email: String,
}

impl Claims {
    /// Creates claims for a user issued at `issued_at` and valid for `ttl`.
    #[must_use]
    pub fn new(user_id: UserId, email: impl Into<String>, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        let iat = issued_at.timestamp();
        let ttl_secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);

        Self {
            sub: Some(user_id),
            iat,
            exp: iat.saturating_add(ttl_secs),
            email: email.into(),
        }
    }

    /// Returns the user ID when the subject parsed.
    #[must_use]
    pub const fn user_id(&self) -> Option<UserId> {
        self.sub
    }

    /// Returns the expiration time.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

/// Accepts the subject as a JSON number or a numeric string.
///
/// Anything else yields `None` so the signature and expiry still decide
/// whether the token is valid.
fn deserialize_subject<'de, D>(deserializer: D) -> Result<Option<UserId>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;

    let id = match value {
        serde_json::Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f < u64::MAX as f64)
                .map(|f| f as u64)
        }),
        serde_json::Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };

    Ok(id.map(UserId::new))
}
