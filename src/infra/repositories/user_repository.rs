//! User repository implementation with soft delete support.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, Unchanged,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use super::soft_delete::{
    active, missing_as_not_found, whole_collection, SoftDeleteRepository,
};
use crate::domain::{id::new_id, NewUser, User, UserChanges};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Lookups exclude soft-deleted users unless the method says otherwise.
/// The `*_owner` checks span the whole collection: a deleted user still
/// holds its email and vanity slug.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find active user by ID
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>>;

    /// Find users by ID regardless of delete state (relation population)
    async fn find_many_with_deleted(&self, ids: Vec<String>) -> AppResult<Vec<User>>;

    /// Find active user by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find active user whose email or vanity slug equals `identifier`
    async fn find_by_identifier(&self, identifier: &str) -> AppResult<Option<User>>;

    /// ID of any user (deleted or not) holding `email`
    async fn email_owner(&self, email: &str) -> AppResult<Option<String>>;

    /// ID of any user (deleted or not) holding `slug`
    async fn slug_owner(&self, slug: &str) -> AppResult<Option<String>>;

    /// Insert a new user with a freshly issued ID
    async fn create(&self, user: NewUser) -> AppResult<User>;

    /// Apply changes to an active user
    async fn update(&self, id: &str, changes: UserChanges) -> AppResult<User>;

    /// Soft delete user by ID (sets deleted_at timestamp)
    async fn delete(&self, id: &str) -> AppResult<()>;

    /// Restore a soft-deleted user
    async fn restore(&self, id: &str) -> AppResult<User>;

    /// Active users referencing `organization_id`
    async fn list_by_organization(&self, organization_id: &str) -> AppResult<Vec<User>>;
}

/// Concrete implementation of UserRepository with soft delete
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl SoftDeleteRepository<UserEntity> for UserStore {
    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        let result = active::<UserEntity>()
            .filter(user::Column::Id.eq(id))
            .one(&self.db)
            .await?;

        Ok(result.map(User::from))
    }

    async fn find_many_with_deleted(&self, ids: Vec<String>) -> AppResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = whole_collection::<UserEntity>()
            .filter(user::Column::Id.is_in(ids))
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = active::<UserEntity>()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;

        Ok(result.map(User::from))
    }

    async fn find_by_identifier(&self, identifier: &str) -> AppResult<Option<User>> {
        let result = active::<UserEntity>()
            .filter(
                Condition::any()
                    .add(user::Column::Email.eq(identifier))
                    .add(user::Column::VanitySlug.eq(identifier)),
            )
            .one(&self.db)
            .await?;

        Ok(result.map(User::from))
    }

    async fn email_owner(&self, email: &str) -> AppResult<Option<String>> {
        let owner: Option<String> = whole_collection::<UserEntity>()
            .select_only()
            .column(user::Column::Id)
            .filter(user::Column::Email.eq(email))
            .into_tuple()
            .one(&self.db)
            .await?;

        Ok(owner)
    }

    async fn slug_owner(&self, slug: &str) -> AppResult<Option<String>> {
        let owner: Option<String> = whole_collection::<UserEntity>()
            .select_only()
            .column(user::Column::Id)
            .filter(user::Column::VanitySlug.eq(slug))
            .into_tuple()
            .one(&self.db)
            .await?;

        Ok(owner)
    }

    async fn create(&self, user: NewUser) -> AppResult<User> {
        let now = Utc::now();
        let active_model = ActiveModel {
            id: Set(new_id()),
            first_name: Set(user.first_name),
            middle_name: Set(user.middle_name),
            last_name: Set(user.last_name),
            email: Set(user.email),
            password_hash: Set(user.password_hash),
            current_employer: Set(user.current_employer),
            current_position: Set(user.current_position),
            birth_year: Set(user.birth_year),
            country: Set(user.country),
            city: Set(user.city),
            zip_code: Set(user.zip_code),
            bio: Set(user.bio),
            website_url: Set(user.website_url),
            fb_url: Set(user.fb_url),
            linkedin_url: Set(user.linkedin_url),
            x_url: Set(user.x_url),
            profile_pic_path: Set(None),
            profile_pic_filename: Set(None),
            organization_id: Set(None),
            last_login: Set(None),
            vanity_slug: Set(user.vanity_slug),
            role: Set(user.role.as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        };

        let model = active_model.insert(&self.db).await?;
        Ok(User::from(model))
    }

    async fn update(&self, id: &str, changes: UserChanges) -> AppResult<User> {
        // One UPDATE ... WHERE id = ? AND deleted_at IS NULL
        let mut record = ActiveModel {
            id: Unchanged(id.to_string()),
            ..Default::default()
        };

        if let Some(v) = changes.first_name {
            record.first_name = Set(Some(v));
        }
        if let Some(v) = changes.middle_name {
            record.middle_name = Set(v);
        }
        if let Some(v) = changes.last_name {
            record.last_name = Set(Some(v));
        }
        if let Some(v) = changes.email {
            record.email = Set(v);
        }
        if let Some(v) = changes.password_hash {
            record.password_hash = Set(v);
        }
        if let Some(v) = changes.vanity_slug {
            record.vanity_slug = Set(v);
        }
        if let Some(v) = changes.current_employer {
            record.current_employer = Set(v);
        }
        if let Some(v) = changes.current_position {
            record.current_position = Set(v);
        }
        if let Some(v) = changes.birth_year {
            record.birth_year = Set(Some(v));
        }
        if let Some(v) = changes.country {
            record.country = Set(Some(v));
        }
        if let Some(v) = changes.city {
            record.city = Set(Some(v));
        }
        if let Some(v) = changes.zip_code {
            record.zip_code = Set(Some(v));
        }
        if let Some(v) = changes.bio {
            record.bio = Set(Some(v));
        }
        if let Some(v) = changes.website_url {
            record.website_url = Set(v);
        }
        if let Some(v) = changes.fb_url {
            record.fb_url = Set(v);
        }
        if let Some(v) = changes.linkedin_url {
            record.linkedin_url = Set(v);
        }
        if let Some(v) = changes.x_url {
            record.x_url = Set(v);
        }
        if let Some(image) = changes.profile_pic {
            record.profile_pic_path = Set(Some(image.path));
            record.profile_pic_filename = Set(Some(image.filename));
        }
        if let Some(v) = changes.organization_id {
            record.organization_id = Set(Some(v));
        }
        if let Some(v) = changes.last_login {
            record.last_login = Set(Some(v));
        }
        record.updated_at = Set(Utc::now());

        let model = UserEntity::update(record)
            .filter(user::Column::DeletedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(missing_as_not_found("User"))?;
        Ok(User::from(model))
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        if self.mark_deleted(id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound("User"))
        }
    }

    async fn restore(&self, id: &str) -> AppResult<User> {
        if !self.mark_restored(id).await? {
            return Err(AppError::NotFound("User"));
        }

        self.find_by_id(id).await?.ok_or(AppError::NotFound("User"))
    }

    async fn list_by_organization(&self, organization_id: &str) -> AppResult<Vec<User>> {
        let models = active::<UserEntity>()
            .filter(user::Column::OrganizationId.eq(organization_id))
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(User::from).collect())
    }
}
