//! User service - registration, login, profile and lifecycle.
//!
//! Email and vanity slug uniqueness is checked against every user,
//! deleted ones included. The checks run before any write; the unique
//! indexes in the store catch whatever slips between check and insert.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use validator::ValidateEmail;

use super::slug_resolver::SlugResolver;
use crate::config::{FOLDER_USERS, MSG_EMAIL_TAKEN, MSG_NO_FIELDS, MSG_SLUG_TAKEN};
use crate::domain::{
    id::ensure_valid_id, password, rules::ensure_birth_year, slug, ImageUpload, LoginUser,
    NewUser, PasswordHashed, RegisterUser, UpdateUser, User, UserChanges,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::{BlobStore, UnitOfWork};

/// User service trait for dependency injection.
///
/// Every operation except registration works on active users only.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Create a user with a hashed password and a resolved vanity slug
    async fn register(&self, req: RegisterUser) -> AppResult<User>;

    /// Verify credentials and stamp `last_login`
    async fn login(&self, req: LoginUser) -> AppResult<User>;

    async fn get_user(&self, id: &str) -> AppResult<User>;

    /// Map an email or vanity slug to the user's ID
    async fn resolve_user_id(&self, identifier: &str) -> AppResult<String>;

    async fn update_user(&self, id: &str, req: UpdateUser) -> AppResult<User>;

    /// Store a new profile picture and point the user at it
    async fn update_profile_picture(&self, id: &str, upload: ImageUpload) -> AppResult<User>;

    /// Soft delete user (sets deleted_at timestamp)
    async fn delete_user(&self, id: &str) -> AppResult<()>;

    async fn restore_user(&self, id: &str) -> AppResult<User>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
    blobs: Arc<dyn BlobStore>,
}

impl<U: UnitOfWork> UserManager<U> {
    pub fn new(uow: Arc<U>, blobs: Arc<dyn BlobStore>) -> Self {
        Self { uow, blobs }
    }

    /// Conflict if `email` belongs to a user other than `except`
    async fn ensure_email_free(&self, email: &str, except: Option<&str>) -> AppResult<()> {
        match self.uow.users().email_owner(email).await? {
            Some(owner) if Some(owner.as_str()) != except => {
                Err(AppError::conflict(MSG_EMAIL_TAKEN))
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn register(&self, req: RegisterUser) -> AppResult<User> {
        ensure_birth_year(req.birth_year)?;
        self.ensure_email_free(&req.email, None).await?;

        let base = SlugResolver::base(
            req.vanity_slug.as_deref(),
            req.first_name.as_deref(),
            req.last_name.as_deref(),
            &req.email,
        )?;
        let vanity_slug = SlugResolver::new(self.uow.users()).resolve(&base).await?;

        let password_hash = PasswordHashed::new(&req.password)?.into_string();
        let user = self
            .uow
            .users()
            .create(NewUser::from_registration(req, vanity_slug, password_hash))
            .await?;

        tracing::info!(user_id = %user.id, vanity_slug = %user.vanity_slug, "User registered");
        Ok(user)
    }

    async fn login(&self, req: LoginUser) -> AppResult<User> {
        let Some(user) = self.uow.users().find_by_email(&req.email).await? else {
            password::verify_dummy(&req.password);
            return Err(AppError::InvalidCredentials);
        };

        if !PasswordHashed::from_hash(user.password_hash.clone()).verify(&req.password) {
            return Err(AppError::InvalidCredentials);
        }

        let changes = UserChanges {
            last_login: Some(Utc::now()),
            ..UserChanges::default()
        };
        let user = self.uow.users().update(&user.id, changes).await?;

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(user)
    }

    async fn get_user(&self, id: &str) -> AppResult<User> {
        ensure_valid_id("id", id)?;
        self.uow.users().find_by_id(id).await?.ok_or_not_found("User")
    }

    async fn resolve_user_id(&self, identifier: &str) -> AppResult<String> {
        if identifier.trim().is_empty() {
            return Err(AppError::validation("\"identifier\" is not allowed to be empty"));
        }
        if identifier.contains('@') && !identifier.validate_email() {
            return Err(AppError::validation("\"email\" must be a valid email"));
        }

        self.uow
            .users()
            .find_by_identifier(identifier)
            .await?
            .map(|user| user.id)
            .ok_or_not_found("User")
    }

    async fn update_user(&self, id: &str, req: UpdateUser) -> AppResult<User> {
        ensure_valid_id("id", id)?;
        if req.is_empty() {
            return Err(AppError::validation(MSG_NO_FIELDS));
        }
        ensure_birth_year(req.birth_year)?;

        let users = self.uow.users();
        users.find_by_id(id).await?.ok_or_not_found("User")?;

        if let Some(email) = req.email.as_deref() {
            self.ensure_email_free(email, Some(id)).await?;
        }

        let vanity_slug = match req.vanity_slug.as_deref() {
            Some(requested) => {
                let normalized = slug::normalize(requested);
                if normalized.is_empty() {
                    return Err(AppError::validation(
                        "\"vanitySlug\" must contain at least one letter or digit",
                    ));
                }
                match users.slug_owner(&normalized).await? {
                    Some(owner) if owner != id => return Err(AppError::conflict(MSG_SLUG_TAKEN)),
                    _ => Some(normalized),
                }
            }
            None => None,
        };

        let password_hash = match req.password.as_deref() {
            Some(plain) => Some(PasswordHashed::new(plain)?.into_string()),
            None => None,
        };

        let user = users
            .update(id, UserChanges::from_update(req, vanity_slug, password_hash))
            .await?;

        tracing::info!(user_id = %user.id, "User updated");
        Ok(user)
    }

    async fn update_profile_picture(&self, id: &str, upload: ImageUpload) -> AppResult<User> {
        ensure_valid_id("id", id)?;
        let users = self.uow.users();
        users.find_by_id(id).await?.ok_or_not_found("User")?;

        let image = self.blobs.put(FOLDER_USERS, upload).await?;
        let changes = UserChanges {
            profile_pic: Some(image),
            ..UserChanges::default()
        };

        users.update(id, changes).await
    }

    async fn delete_user(&self, id: &str) -> AppResult<()> {
        ensure_valid_id("id", id)?;
        self.uow.users().delete(id).await?;

        tracing::info!(user_id = %id, "User soft-deleted");
        Ok(())
    }

    async fn restore_user(&self, id: &str) -> AppResult<User> {
        ensure_valid_id("id", id)?;
        let user = self.uow.users().restore(id).await?;

        tracing::info!(user_id = %id, "User restored");
        Ok(user)
    }
}
