//! JWT token issuance and verification.

use super::Claims;
use chrono::Utc;
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use roster_config::SecurityConfig;
use roster_core::{RosterError, RosterResult, UserId};
use std::time::Duration;
use tracing::{debug, warn};

/// Issues an HS256 token for a user, valid for `ttl` from now.
pub fn issue_token(user_id: UserId, email: &str, secret: &str, ttl: Duration) -> RosterResult<String> {
    let claims = Claims::new(user_id, email, Utc::now(), ttl);
    let token = sign_claims(&claims, secret)?;

    debug!("Issued access token for user {}", user_id);
    Ok(token)
}

/// Signs arbitrary claims with HS256.
pub fn sign_claims(claims: &Claims, secret: &str) -> RosterResult<String> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| RosterError::TokenSigningFailed(e.to_string()))
}

/// Verifies a token's signature and expiry and returns its claims.
///
/// Every failure is reported as `InvalidToken`.
pub fn verify_token(token: &str, secret: &str) -> RosterResult<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.validate_exp = true;

    let token_data = decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map_err(|e| {
            warn!("Token validation failed: {}", e);
            match e.kind() {
                ErrorKind::ExpiredSignature => RosterError::InvalidToken("token expired".to_string()),
                ErrorKind::InvalidSignature => {
                    RosterError::InvalidToken("invalid token signature".to_string())
                }
                _ => RosterError::InvalidToken(e.to_string()),
            }
        })?;

    Ok(token_data.claims)
}

/// JWT token provider bound to the configured secret and lifetime.
#[derive(Clone)]
pub struct TokenProvider {
    secret: String,
    ttl: Duration,
}

impl TokenProvider {
    /// Creates a new token provider.
    #[must_use]
    pub fn new(secret: impl Into<String>, ttl: Duration) -> Self {
        Self {
            secret: secret.into(),
            ttl,
        }
    }

    /// Creates a token provider from the security configuration.
    #[must_use]
    pub fn from_config(config: &SecurityConfig) -> Self {
        Self::new(config.jwt_secret.clone(), config.jwt_expiration())
    }

    /// Returns the signing secret.
    #[must_use]
    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// Returns the token lifetime.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issues a token for a user.
    pub fn issue(&self, user_id: UserId, email: &str) -> RosterResult<String> {
        issue_token(user_id, email, &self.secret, self.ttl)
    }

    /// Validates a token and returns the claims.
    pub fn verify(&self, token: &str) -> RosterResult<Claims> {
        verify_token(token, &self.secret)
    }
}

impl std::fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenProvider")
            .field("secret", &"<redacted>")
            .field("ttl", &self.ttl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_issue_and_verify() {
        let token = issue_token(UserId::new(42), "ann@x.io", SECRET, Duration::from_secs(3600)).unwrap();
        let claims = verify_token(&token, SECRET).unwrap();

        assert_eq!(claims.sub, Some(UserId::new(42)));
        assert_eq!(claims.email, "ann@x.io");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let issued_at = Utc::now() - ChronoDuration::hours(2);
        let claims = Claims::new(UserId::new(1), "a@b.c", issued_at, Duration::from_secs(3600));
        let token = sign_claims(&claims, SECRET).unwrap();

        match verify_token(&token, SECRET).unwrap_err() {
            RosterError::InvalidToken(msg) => assert_eq!(msg, "token expired"),
            other => panic!("Expected InvalidToken, got {other:?}"),
        }
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = issue_token(UserId::new(1), "a@b.c", SECRET, Duration::from_secs(60)).unwrap();
        let result = verify_token(&token, "other-secret");

        assert!(matches!(result, Err(RosterError::InvalidToken(_))));
    }

    #[test]
    fn test_malformed_token_is_rejected() {
        assert!(matches!(verify_token("abc.def", SECRET), Err(RosterError::InvalidToken(_))));
        assert!(matches!(verify_token("", SECRET), Err(RosterError::InvalidToken(_))));
    }

    #[test]
    fn test_string_subject_is_accepted() {
        let now = Utc::now().timestamp();
        let payload = serde_json::json!({ "sub": "9", "iat": now, "exp": now + 60, "eml": "s@x.io" });
        let token = encode(
            &Header::new(Algorithm::HS256),
            &payload,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let claims = verify_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, Some(UserId::new(9)));
    }

    #[test]
    fn test_non_numeric_subject_still_verifies() {
        let now = Utc::now().timestamp();
        let payload = serde_json::json!({ "sub": "bob", "iat": now, "exp": now + 60, "eml": "b@x.io" });
        let token = encode(
            &Header::new(Algorithm::HS256),
            &payload,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let claims = verify_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, None);
        assert_eq!(claims.email, "b@x.io");
    }

    #[test]
    fn test_provider_uses_configured_secret_and_ttl() {
        let config = SecurityConfig {
            jwt_secret: SECRET.to_string(),
            jwt_expiration_secs: 120,
            ..SecurityConfig::default()
        };
        let provider = TokenProvider::from_config(&config);

        let token = provider.issue(UserId::new(3), "c@x.io").unwrap();
        let claims = verify_token(&token, SECRET).unwrap();

        assert_eq!(provider.ttl(), Duration::from_secs(120));
        assert_eq!(claims.exp - claims.iat, 120);
        assert_eq!(provider.verify(&token).unwrap(), claims);
        assert!(!format!("{provider:?}").contains(SECRET));
    }
}
