//! User service implementation.

use crate::cache::{cache_keys, CacheExt, CacheInterface, USER_CACHE_TTL};
use crate::dto::{LoginRequest, RegisterRequest, UpdateUserRequest, UserListResponse, UserResponse};
use crate::user_service::UserService;
use async_trait::async_trait;
use roster_core::{normalize_name, NewUser, PageRequest, RosterError, RosterResult, UserId};
use roster_repository::UserRepository;
use roster_security::{issue_token, PasswordHasherInterface};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// User service backed by a repository, a password hasher and a cache.
pub struct UserServiceImpl {
    user_repository: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasherInterface>,
    cache: Arc<dyn CacheInterface>,
}

impl UserServiceImpl {
    /// Creates a new user service.
    #[must_use]
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasherInterface>,
        cache: Arc<dyn CacheInterface>,
    ) -> Self {
        Self {
            user_repository,
            password_hasher,
            cache,
        }
    }

    /// Best-effort write of a user snapshot.
    async fn cache_user(&self, user: &UserResponse, operation: &'static str) {
        if !self.cache.is_enabled() {
            return;
        }

        let key = cache_keys::user_by_id(user.id);
        match self.cache.set(&key, user, USER_CACHE_TTL).await {
            Ok(()) => debug!(operation, key = %key, user_id = %user.id, "Cache set"),
            Err(e) => error!(operation, key = %key, user_id = %user.id, error = %e, "Cache set failed"),
        }
    }

    /// Best-effort removal of a user snapshot.
    async fn evict_user(&self, id: UserId, operation: &'static str) {
        if !self.cache.is_enabled() {
            return;
        }

        let key = cache_keys::user_by_id(id);
        if let Err(e) = self.cache.delete(&key).await {
            error!(operation, key = %key, user_id = %id, error = %e, "Cache delete failed");
        }
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    async fn register(&self, request: RegisterRequest) -> RosterResult<UserResponse> {
        debug!("Registering user: {}", request.email);

        let existing = self
            .user_repository
            .find_by_email(&request.email)
            .await
            .map_err(|e| {
                error!(operation = "register", email = %request.email, error = %e, "Email lookup failed");
                e
            })?;

        if existing.is_some() {
            warn!(email = %request.email, "Registration rejected: email already exists");
            return Err(RosterError::EmailExists);
        }

        let password_hash = self.password_hasher.hash(&request.password).map_err(|e| {
            error!(operation = "register", email = %request.email, error = %e, "Password hashing failed");
            e
        })?;

        let new_user = NewUser::new(normalize_name(&request.name), request.email, password_hash);

        let user = self.user_repository.create(&new_user).await.map_err(|e| {
            error!(operation = "register", email = %new_user.email, error = %e, "User insert failed");
            e
        })?;

        let response = UserResponse::from(user);
        self.cache_user(&response, "register").await;

        info!(user_id = %response.id, "User registered");
        Ok(response)
    }

    async fn create_user(&self, request: RegisterRequest) -> RosterResult<UserResponse> {
        info!(email = %request.email, "Administrative user create");
        self.register(request).await
    }

    async fn login(&self, request: LoginRequest, secret: &str, ttl: Duration) -> RosterResult<String> {
        debug!("Login attempt: {}", request.email);

        let user = match self.user_repository.find_by_email(&request.email).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                warn!(email = %request.email, "Login rejected: unknown email");
                return Err(RosterError::InvalidCredentials);
            }
            Err(e) => {
                warn!(email = %request.email, error = %e, "Login rejected: user lookup failed");
                return Err(RosterError::InvalidCredentials);
            }
        };

        if !self.password_hasher.verify(&request.password, &user.password_hash) {
            warn!(email = %request.email, "Login rejected: wrong password");
            return Err(RosterError::InvalidCredentials);
        }

        let token = issue_token(user.id, &user.email, secret, ttl).map_err(|e| {
            error!(operation = "login", user_id = %user.id, error = %e, "Token signing failed");
            e
        })?;

        info!(user_id = %user.id, "Login succeeded");
        Ok(token)
    }

    async fn get_by_id(&self, id: UserId) -> RosterResult<UserResponse> {
        debug!("Getting user: {}", id);

        if self.cache.is_enabled() {
            let key = cache_keys::user_by_id(id);
            match self.cache.get::<UserResponse>(&key).await {
                Ok(Some(cached)) => {
                    debug!(key = %key, user_id = %id, "Cache hit");
                    return Ok(cached);
                }
                Ok(None) => warn!(key = %key, user_id = %id, "Cache miss"),
                Err(RosterError::Serialization(e)) => {
                    warn!(key = %key, user_id = %id, error = %e, "Cached user undecodable, treating as miss");
                }
                Err(e) => {
                    error!(operation = "get_by_id", key = %key, user_id = %id, error = %e, "Cache get failed");
                }
            }
        }

        let user = self
            .user_repository
            .find_by_id(id)
            .await
            .map_err(|e| {
                error!(operation = "get_by_id", user_id = %id, error = %e, "User fetch failed");
                e
            })?
            .ok_or_else(|| RosterError::not_found("User", id))?;

        let response = UserResponse::from(user);
        self.cache_user(&response, "get_by_id").await;

        Ok(response)
    }

    async fn get_user(&self, id: UserId) -> RosterResult<UserResponse> {
        self.get_by_id(id).await
    }

    async fn update_user(&self, id: UserId, request: UpdateUserRequest) -> RosterResult<UserResponse> {
        debug!("Updating user: {}", id);

        let mut user = self
            .user_repository
            .find_by_id(id)
            .await
            .map_err(|e| {
                error!(operation = "update_user", user_id = %id, error = %e, "User fetch failed");
                e
            })?
            .ok_or_else(|| RosterError::not_found("User", id))?;

        if let Some(name) = request.name {
            user.name = normalize_name(&name);
        }

        if let Some(email) = request.email {
            if email != user.email {
                let existing = self
                    .user_repository
                    .find_by_email(&email)
                    .await
                    .map_err(|e| {
                        error!(operation = "update_user", user_id = %id, email = %email, error = %e, "Email lookup failed");
                        e
                    })?;
                if existing.is_some() {
                    warn!(user_id = %id, email = %email, "Update rejected: email already exists");
                    return Err(RosterError::EmailExists);
                }
                user.email = email;
            }
        }

        if let Some(password) = request.password {
            user.password_hash = self.password_hasher.hash(&password).map_err(|e| {
                error!(operation = "update_user", user_id = %id, error = %e, "Password hashing failed");
                e
            })?;
        }

        let updated = self.user_repository.update(&user).await.map_err(|e| {
            error!(operation = "update_user", user_id = %id, error = %e, "User update failed");
            e
        })?;

        let response = UserResponse::from(updated);
        self.evict_user(id, "update_user").await;
        self.cache_user(&response, "update_user").await;

        info!(user_id = %id, "User updated");
        Ok(response)
    }

    async fn delete_user(&self, id: UserId) -> RosterResult<()> {
        debug!("Deleting user: {}", id);

        self.user_repository.delete(id).await.map_err(|e| {
            if !matches!(e, RosterError::NotFound { .. }) {
                error!(operation = "delete_user", user_id = %id, error = %e, "User delete failed");
            }
            e
        })?;

        self.evict_user(id, "delete_user").await;

        info!(user_id = %id, "User deleted");
        Ok(())
    }

    async fn list_users(&self, page: i64, limit: i64) -> RosterResult<UserListResponse> {
        let page = PageRequest::new(page, limit);
        debug!("Listing users, page: {}, limit: {}", page.page, page.limit);

        let (users, total) = self
            .user_repository
            .list(page.offset(), page.limit())
            .await
            .map_err(|e| {
                error!(operation = "list_users", error = %e, "User list failed");
                e
            })?;

        Ok(UserListResponse {
            items: users.into_iter().map(UserResponse::from).collect(),
            total,
            page: page.page,
            limit: page.limit,
        })
    }
}

impl std::fmt::Debug for UserServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserServiceImpl").finish_non_exhaustive()
    }
}
