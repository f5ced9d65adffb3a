//! Organization repository implementation with soft delete support.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, Unchanged,
};

use super::entities::organization::{self, ActiveModel, Entity as OrganizationEntity};
use super::soft_delete::{
    active, missing_as_not_found, whole_collection, SoftDeleteRepository,
};
use crate::domain::{id::new_id, NewOrganization, Organization, OrganizationChanges};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait OrganizationRepository: Send + Sync {
    /// Find active organization by ID
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Organization>>;

    /// True if any organization, deleted or not, uses `email`
    async fn email_exists(&self, email: &str) -> AppResult<bool>;

    async fn create(&self, organization: NewOrganization) -> AppResult<Organization>;

    /// List active organizations, oldest first
    async fn list(&self) -> AppResult<Vec<Organization>>;

    async fn update(&self, id: &str, changes: OrganizationChanges) -> AppResult<Organization>;

    async fn delete(&self, id: &str) -> AppResult<()>;

    async fn restore(&self, id: &str) -> AppResult<Organization>;
}

pub struct OrganizationStore {
    db: DatabaseConnection,
}

impl OrganizationStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl SoftDeleteRepository<OrganizationEntity> for OrganizationStore {
    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl OrganizationRepository for OrganizationStore {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Organization>> {
        let result = active::<OrganizationEntity>()
            .filter(organization::Column::Id.eq(id))
            .one(&self.db)
            .await?;

        Ok(result.map(Organization::from))
    }

    async fn email_exists(&self, email: &str) -> AppResult<bool> {
        let count = whole_collection::<OrganizationEntity>()
            .filter(organization::Column::Email.eq(email))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    async fn create(&self, organization: NewOrganization) -> AppResult<Organization> {
        let now = Utc::now();
        let active_model = ActiveModel {
            id: Set(new_id()),
            name: Set(organization.name),
            description: Set(organization.description),
            email: Set(organization.email),
            logo_path: Set(None),
            logo_filename: Set(None),
            website: Set(organization.website),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        };

        let model = active_model.insert(&self.db).await?;
        Ok(Organization::from(model))
    }

    async fn list(&self) -> AppResult<Vec<Organization>> {
        let models = active::<OrganizationEntity>()
            .order_by_asc(organization::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Organization::from).collect())
    }

    async fn update(&self, id: &str, changes: OrganizationChanges) -> AppResult<Organization> {
        // One UPDATE ... WHERE id = ? AND deleted_at IS NULL
        let mut record = ActiveModel {
            id: Unchanged(id.to_string()),
            ..Default::default()
        };

        if let Some(name) = changes.name {
            record.name = Set(name);
        }
        if let Some(description) = changes.description {
            record.description = Set(Some(description));
        }
        if let Some(email) = changes.email {
            record.email = Set(email);
        }
        if let Some(website) = changes.website {
            record.website = Set(website);
        }
        if let Some(logo) = changes.logo {
            record.logo_path = Set(Some(logo.path));
            record.logo_filename = Set(Some(logo.filename));
        }
        record.updated_at = Set(Utc::now());

        let model = OrganizationEntity::update(record)
            .filter(organization::Column::DeletedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(missing_as_not_found("Organization"))?;
        Ok(Organization::from(model))
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        if self.mark_deleted(id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound("Organization"))
        }
    }

    async fn restore(&self, id: &str) -> AppResult<Organization> {
        if !self.mark_restored(id).await? {
            return Err(AppError::NotFound("Organization"));
        }

        self.find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Organization"))
    }
}
