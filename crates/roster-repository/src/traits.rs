//! Repository trait definitions.

use roster_core::{Interface, NewUser, RosterResult, User, UserId};
use async_trait::async_trait;

/// User repository trait.
///
/// The store owns id assignment, timestamps and email uniqueness. A unique
/// violation on insert or update surfaces as `RosterError::EmailExists`.
#[async_trait]
pub trait UserRepository: Interface + Send + Sync {
    /// Inserts a new user and returns it with its assigned id and timestamps.
    async fn create(&self, user: &NewUser) -> RosterResult<User>;

    /// Finds a user by ID.
    async fn find_by_id(&self, id: UserId) -> RosterResult<Option<User>>;

    /// Finds a user by email.
    async fn find_by_email(&self, email: &str) -> RosterResult<Option<User>>;

    /// Overwrites name, email and password hash of an existing user.
    async fn update(&self, user: &User) -> RosterResult<User>;

    /// Deletes a user by ID. Returns `NotFound` when no row was removed.
    async fn delete(&self, id: UserId) -> RosterResult<()>;

    /// Returns one page of users ordered by id ascending, plus the total count.
    async fn list(&self, offset: u64, limit: u64) -> RosterResult<(Vec<User>, u64)>;
}
