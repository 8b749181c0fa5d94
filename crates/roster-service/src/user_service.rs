//! User service trait definition.

use crate::dto::{LoginRequest, RegisterRequest, UpdateUserRequest, UserListResponse, UserResponse};
use async_trait::async_trait;
use roster_core::{Interface, RosterResult, UserId};
use std::time::Duration;

/// User service trait.
///
/// Requests are expected to be validated by the caller. Cache failures never
/// surface from any operation.
#[async_trait]
pub trait UserService: Interface + Send + Sync {
    /// Registers a new user and warms the cache with it.
    async fn register(&self, request: RegisterRequest) -> RosterResult<UserResponse>;

    /// Administrative create. Same behavior as [`register`](Self::register).
    async fn create_user(&self, request: RegisterRequest) -> RosterResult<UserResponse>;

    /// Checks credentials and issues a signed token.
    ///
    /// Unknown email, store failure and wrong password all yield the same
    /// `InvalidCredentials`.
    async fn login(&self, request: LoginRequest, secret: &str, ttl: Duration) -> RosterResult<String>;

    /// Gets a user by ID, preferring the cache.
    async fn get_by_id(&self, id: UserId) -> RosterResult<UserResponse>;

    /// Alias of [`get_by_id`](Self::get_by_id).
    async fn get_user(&self, id: UserId) -> RosterResult<UserResponse>;

    /// Applies a partial update and refreshes the cache entry.
    async fn update_user(&self, id: UserId, request: UpdateUserRequest) -> RosterResult<UserResponse>;

    /// Deletes a user and its cache entry.
    async fn delete_user(&self, id: UserId) -> RosterResult<()>;

    /// Lists users. `page < 1` becomes 1; `limit` outside `1..=100` becomes 10.
    async fn list_users(&self, page: i64, limit: i64) -> RosterResult<UserListResponse>;
}
