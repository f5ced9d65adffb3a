//! Certificate repository implementation with soft delete support.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, Unchanged,
};

use super::entities::certificate::{self, ActiveModel, Entity as CertificateEntity};
use super::entities::StringList;
use super::soft_delete::{
    active, missing_as_not_found, whole_collection, SoftDeleteRepository,
};
use crate::domain::{id::new_id, Certificate, CertificateChanges, CreateCertificate};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CertificateRepository: Send + Sync {
    /// Find active certificate by ID
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Certificate>>;

    /// Find certificates by ID regardless of delete state (relation population)
    async fn find_many_with_deleted(&self, ids: Vec<String>) -> AppResult<Vec<Certificate>>;

    async fn create(&self, certificate: CreateCertificate) -> AppResult<Certificate>;

    async fn update(&self, id: &str, changes: CertificateChanges) -> AppResult<Certificate>;

    async fn delete(&self, id: &str) -> AppResult<()>;

    async fn restore(&self, id: &str) -> AppResult<Certificate>;
}

pub struct CertificateStore {
    db: DatabaseConnection,
}

impl CertificateStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl SoftDeleteRepository<CertificateEntity> for CertificateStore {
    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl CertificateRepository for CertificateStore {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Certificate>> {
        let result = active::<CertificateEntity>()
            .filter(certificate::Column::Id.eq(id))
            .one(&self.db)
            .await?;

        Ok(result.map(Certificate::from))
    }

    async fn find_many_with_deleted(&self, ids: Vec<String>) -> AppResult<Vec<Certificate>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = whole_collection::<CertificateEntity>()
            .filter(certificate::Column::Id.is_in(ids))
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Certificate::from).collect())
    }

    async fn create(&self, certificate: CreateCertificate) -> AppResult<Certificate> {
        let now = Utc::now();
        let (image_path, image_filename) = match certificate.image {
            Some(image) => (Some(image.path), Some(image.filename)),
            None => (None, None),
        };

        let active_model = ActiveModel {
            id: Set(new_id()),
            name: Set(certificate.name),
            description: Set(certificate.description),
            criteria: Set(StringList(certificate.criteria)),
            skills: Set(StringList(certificate.skills)),
            image_path: Set(image_path),
            image_filename: Set(image_filename),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        };

        let model = active_model.insert(&self.db).await?;
        Ok(Certificate::from(model))
    }

    async fn update(&self, id: &str, changes: CertificateChanges) -> AppResult<Certificate> {
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
        if let Some(criteria) = changes.criteria {
            record.criteria = Set(StringList(criteria));
        }
        if let Some(skills) = changes.skills {
            record.skills = Set(StringList(skills));
        }
        if let Some(image) = changes.image {
            record.image_path = Set(Some(image.path));
            record.image_filename = Set(Some(image.filename));
        }
        record.updated_at = Set(Utc::now());

        let model = CertificateEntity::update(record)
            .filter(certificate::Column::DeletedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(missing_as_not_found("Certificate"))?;
        Ok(Certificate::from(model))
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        if self.mark_deleted(id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound("Certificate"))
        }
    }

    async fn restore(&self, id: &str) -> AppResult<Certificate> {
        if !self.mark_restored(id).await? {
            return Err(AppError::NotFound("Certificate"));
        }

        self.find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Certificate"))
    }
}
