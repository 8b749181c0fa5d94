//! Dependency wiring.
//!
//! Builds the concrete components and hands them to the layers above as
//! trait objects:
//!
//! ```text
//! DatabasePool ──► MySqlUserRepository ─┐
//! PasswordHasher ───────────────────────┼──► UserServiceImpl ──► AppState
//! RedisCacheService ────────────────────┘                          ▲
//! TokenProvider ───────────────────────────────────────────────────┘
//! ```

use deadpool_redis::{Pool, PoolConfig, Runtime};
use roster_config::{RedisConfig, SecurityConfig};
use roster_core::{RosterError, RosterResult};
use roster_repository::{DatabasePoolInterface, MySqlUserRepository, UserRepository};
use roster_rest::AppState;
use roster_security::{PasswordHasher, PasswordHasherInterface, TokenProvider};
use roster_service::{CacheInterface, RedisCacheService, UserService, UserServiceImpl};
use std::sync::Arc;
use tracing::info;

/// Creates the Redis connection pool, or `None` when Redis is disabled.
///
/// No connection is opened here; see [`RedisCacheService::ping`].
pub fn create_redis_pool(config: &RedisConfig) -> RosterResult<Option<Arc<Pool>>> {
    if !config.enabled {
        info!("Redis disabled, caching is off");
        return Ok(None);
    }

    let mut redis_cfg = deadpool_redis::Config::from_url(&config.url);
    redis_cfg.pool = Some(PoolConfig::new(config.pool_size.max(1)));

    let pool = redis_cfg
        .create_pool(Some(Runtime::Tokio1))
        .map_err(|e| RosterError::Cache(format!("Failed to create Redis pool: {e}")))?;

    Ok(Some(Arc::new(pool)))
}

/// Wraps an optional Redis pool in the cache adapter.
#[must_use]
pub fn build_cache(pool: Option<Arc<Pool>>) -> RedisCacheService {
    pool.map_or_else(RedisCacheService::disabled, RedisCacheService::new)
}

/// Wires the user service over its store, hasher and cache.
#[must_use]
pub fn build_user_service(
    db_pool: Arc<dyn DatabasePoolInterface>,
    cache: Arc<dyn CacheInterface>,
    security_config: &SecurityConfig,
) -> Arc<dyn UserService> {
    let user_repository: Arc<dyn UserRepository> = Arc::new(MySqlUserRepository::new(db_pool));
    let password_hasher: Arc<dyn PasswordHasherInterface> =
        Arc::new(PasswordHasher::with_cost(security_config.password_hash_cost));

    Arc::new(UserServiceImpl::new(user_repository, password_hasher, cache))
}

/// Builds the HTTP application state.
#[must_use]
pub fn build_app_state(
    db_pool: Arc<dyn DatabasePoolInterface>,
    cache: Arc<dyn CacheInterface>,
    security_config: &SecurityConfig,
) -> AppState {
    let user_service = build_user_service(db_pool, cache, security_config);
    let token_provider = Arc::new(TokenProvider::from_config(security_config));

    AppState::new(user_service, token_provider)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_redis_has_no_pool() {
        let config = RedisConfig {
            enabled: false,
            ..RedisConfig::default()
        };

        let pool = create_redis_pool(&config).unwrap();
        assert!(pool.is_none());
        assert!(!build_cache(pool).is_enabled());
    }

    #[tokio::test]
    async fn test_enabled_redis_creates_lazy_pool() {
        let config = RedisConfig {
            url: "redis://127.0.0.1:6399/0".to_string(),
            pool_size: 4,
            enabled: true,
        };

        let pool = create_redis_pool(&config).unwrap().unwrap();
        assert_eq!(pool.status().max_size, 4);
        assert!(build_cache(Some(pool)).is_enabled());
    }

    #[test]
    fn test_invalid_redis_url_is_cache_error() {
        let config = RedisConfig {
            url: "not a redis url".to_string(),
            pool_size: 4,
            enabled: true,
        };

        assert!(matches!(
            create_redis_pool(&config),
            Err(RosterError::Cache(_))
        ));
    }
}
