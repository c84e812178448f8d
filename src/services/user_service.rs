//! User service - validation, uniqueness, password handling and account gating.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;
use validator::Validate;

use crate::domain::{NewUser, Password, User, UserChanges, UserDraft};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UserRepository;

/// User service trait for dependency injection.
///
/// Every operation ignores soft-deleted users.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Validate, check username uniqueness, hash the password and persist
    async fn create_user(&self, input: NewUser) -> AppResult<User>;

    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    async fn get_user_by_username(&self, username: &str) -> AppResult<User>;

    /// Replace the mutable fields of a live user
    async fn update_user(&self, id: Uuid, changes: UserChanges) -> AppResult<User>;

    /// Soft delete user (sets deleted_at timestamp)
    async fn delete_user(&self, id: Uuid) -> AppResult<()>;

    /// Page of users plus the total number of live users
    async fn list_users(&self, offset: u64, limit: u64) -> AppResult<(Vec<User>, u64)>;

    /// Check credentials of an active account.
    ///
    /// Unknown usernames and wrong passwords fail identically.
    async fn authenticate(&self, username: &str, password: &str) -> AppResult<User>;
}

/// Concrete implementation of UserService over a repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
    /// Verified against when the username is unknown so both paths cost one hash check
    dummy_hash: Arc<str>,
}

impl UserManager {
    /// Build the service; hashes the dummy password up front.
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        let dummy_hash = match Password::new(DUMMY_PASSWORD) {
            Ok(password) => password.into_string(),
            Err(e) => {
                tracing::error!("Failed to hash dummy password: {}", e);
                String::new()
            }
        };

        Self {
            repo,
            dummy_hash: Arc::from(dummy_hash),
        }
    }

    async fn ensure_username_free(&self, username: &str, owner: Option<Uuid>) -> AppResult<()> {
        match self.repo.find_by_username(username).await? {
            Some(existing) if Some(existing.id) != owner => Err(AppError::conflict("username")),
            _ => Ok(()),
        }
    }
}

const DUMMY_PASSWORD: &str = "dummy-password-for-timing";

/// Hash on the blocking pool; Argon2 is CPU bound.
async fn hash_password(plain: String) -> AppResult<String> {
    tokio::task::spawn_blocking(move || Password::new(&plain).map(Password::into_string))
        .await
        .map_err(|e| AppError::internal(format!("Password hashing task failed: {}", e)))?
}

async fn verify_password(hash: String, plain: String) -> AppResult<bool> {
    tokio::task::spawn_blocking(move || Password::from_hash(hash).verify(&plain))
        .await
        .map_err(|e| AppError::internal(format!("Password verification task failed: {}", e)))
}

#[async_trait]
impl UserService for UserManager {
    async fn create_user(&self, input: NewUser) -> AppResult<User> {
        input.validate()?;
        self.ensure_username_free(&input.username, None).await?;

        let password_hash = hash_password(input.password).await?;
        let user = self
            .repo
            .create(UserDraft {
                username: input.username,
                password_hash,
                first_name: input.first_name,
                last_name: input.last_name,
                is_active: input.is_active.unwrap_or(true),
            })
            .await?;

        tracing::info!(user_id = %user.id, "User created");
        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.repo.find_by_id(id).await?.ok_or_not_found("User")
    }

    async fn get_user_by_username(&self, username: &str) -> AppResult<User> {
        self.repo
            .find_by_username(username)
            .await?
            .ok_or_not_found("User")
    }

    async fn update_user(&self, id: Uuid, changes: UserChanges) -> AppResult<User> {
        changes.validate()?;

        let mut user = self.repo.find_by_id(id).await?.ok_or_not_found("User")?;

        if changes.username != user.username {
            self.ensure_username_free(&changes.username, Some(id)).await?;
        }

        // Absent, empty or the stored hash echoed back keeps the current hash
        match changes.password {
            Some(plain) if !plain.is_empty() && plain != user.password_hash => {
                user.password_hash = hash_password(plain).await?;
            }
            _ => {}
        }

        user.username = changes.username;
        user.first_name = changes.first_name;
        user.last_name = changes.last_name;
        if let Some(is_active) = changes.is_active {
            user.is_active = is_active;
        }

        let user = self.repo.update(user).await?;
        tracing::info!(user_id = %user.id, "User updated");
        Ok(user)
    }

    async fn delete_user(&self, id: Uuid) -> AppResult<()> {
        self.repo.delete(id).await?;
        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }

    async fn list_users(&self, offset: u64, limit: u64) -> AppResult<(Vec<User>, u64)> {
        self.repo.list(offset, limit).await
    }

    async fn authenticate(&self, username: &str, password: &str) -> AppResult<User> {
        let Some(user) = self.repo.find_by_username(username).await? else {
            verify_password(self.dummy_hash.to_string(), password.to_string()).await?;

            return Err(AppError::InvalidCredentials);
        };

        if !user.is_active {
            return Err(AppError::AccountDeactivated);
        }

        if !verify_password(user.password_hash.clone(), password.to_string()).await? {
            tracing::debug!(user_id = %user.id, "Password mismatch");
            return Err(AppError::InvalidCredentials);
        }

        Ok(user)
    }
}
