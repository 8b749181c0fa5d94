//! Caching infrastructure for the service layer.
//!
//! A cache abstraction with a Redis implementation. The cache is a
//! disposable shadow of the store: every failure is logged by the caller
//! and the flow falls through to the store.

mod cache_interface;
pub mod cache_keys;
mod redis_cache;

pub use cache_interface::{CacheExt, CacheInterface};
pub use redis_cache::{RedisCacheService, USER_CACHE_TTL};
