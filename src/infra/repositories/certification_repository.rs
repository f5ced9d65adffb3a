//! Certification repository implementation with soft delete support.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, Unchanged,
};

use super::entities::certification::{self, ActiveModel, Entity as CertificationEntity};
use super::soft_delete::{
    active, missing_as_not_found, whole_collection, SoftDeleteRepository,
};
use crate::domain::{id::new_id, Certification, CertificationChanges, NewCertification};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Certification repository.
///
/// Queries are restricted to active certifications unless the method
/// says otherwise.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CertificationRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Certification>>;

    /// Find certification by ID including soft-deleted
    async fn find_by_id_with_deleted(&self, id: &str) -> AppResult<Option<Certification>>;

    /// ID of the active certification for this (user, certificate) pair
    async fn active_pair_owner(
        &self,
        user_id: &str,
        certificate_id: &str,
    ) -> AppResult<Option<String>>;

    async fn create(&self, certification: NewCertification) -> AppResult<Certification>;

    async fn list(&self) -> AppResult<Vec<Certification>>;

    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<Certification>>;

    async fn list_by_certificate(&self, certificate_id: &str) -> AppResult<Vec<Certification>>;

    async fn update(&self, id: &str, changes: CertificationChanges) -> AppResult<Certification>;

    async fn delete(&self, id: &str) -> AppResult<()>;

    async fn restore(&self, id: &str) -> AppResult<Certification>;
}

pub struct CertificationStore {
    db: DatabaseConnection,
}

impl CertificationStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn list_where(&self, column: certification::Column, value: &str) -> AppResult<Vec<Certification>> {
        let models = active::<CertificationEntity>()
            .filter(column.eq(value))
            .order_by_asc(certification::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Certification::from).collect())
    }
}

impl SoftDeleteRepository<CertificationEntity> for CertificationStore {
    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl CertificationRepository for CertificationStore {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Certification>> {
        let result = active::<CertificationEntity>()
            .filter(certification::Column::Id.eq(id))
            .one(&self.db)
            .await?;

        Ok(result.map(Certification::from))
    }

    async fn find_by_id_with_deleted(&self, id: &str) -> AppResult<Option<Certification>> {
        let result = whole_collection::<CertificationEntity>()
            .filter(certification::Column::Id.eq(id))
            .one(&self.db)
            .await?;

        Ok(result.map(Certification::from))
    }

    async fn active_pair_owner(
        &self,
        user_id: &str,
        certificate_id: &str,
    ) -> AppResult<Option<String>> {
        let owner: Option<String> = active::<CertificationEntity>()
            .select_only()
            .column(certification::Column::Id)
            .filter(certification::Column::UserId.eq(user_id))
            .filter(certification::Column::CertificateId.eq(certificate_id))
            .into_tuple()
            .one(&self.db)
            .await?;

        Ok(owner)
    }

    async fn create(&self, certification: NewCertification) -> AppResult<Certification> {
        let now = Utc::now();
        let active_model = ActiveModel {
            id: Set(new_id()),
            user_id: Set(certification.user_id),
            certificate_id: Set(certification.certificate_id),
            grade: Set(certification.grade),
            is_public: Set(certification.is_public),
            issued_at: Set(certification.issued_at),
            accepted_at: Set(certification.accepted_at),
            rejected_at: Set(certification.rejected_at),
            expired_at: Set(certification.expired_at),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        };

        let model = active_model.insert(&self.db).await?;
        Ok(Certification::from(model))
    }

    async fn list(&self) -> AppResult<Vec<Certification>> {
        let models = active::<CertificationEntity>()
            .order_by_asc(certification::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Certification::from).collect())
    }

    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<Certification>> {
        self.list_where(certification::Column::UserId, user_id).await
    }

    async fn list_by_certificate(&self, certificate_id: &str) -> AppResult<Vec<Certification>> {
        self.list_where(certification::Column::CertificateId, certificate_id)
            .await
    }

    async fn update(&self, id: &str, changes: CertificationChanges) -> AppResult<Certification> {
        // One UPDATE ... WHERE id = ? AND deleted_at IS NULL
        let mut record = ActiveModel {
            id: Unchanged(id.to_string()),
            ..Default::default()
        };

        if let Some(user_id) = changes.user_id {
            record.user_id = Set(user_id);
        }
        if let Some(certificate_id) = changes.certificate_id {
            record.certificate_id = Set(certificate_id);
        }
        if let Some(grade) = changes.grade {
            record.grade = Set(grade);
        }
        if let Some(is_public) = changes.is_public {
            record.is_public = Set(is_public);
        }
        if let Some(issued_at) = changes.issued_at {
            record.issued_at = Set(issued_at);
        }
        if let Some(accepted_at) = changes.accepted_at {
            record.accepted_at = Set(accepted_at);
        }
        if let Some(rejected_at) = changes.rejected_at {
            record.rejected_at = Set(rejected_at);
        }
        if let Some(expired_at) = changes.expired_at {
            record.expired_at = Set(expired_at);
        }
        record.updated_at = Set(Utc::now());

        let model = CertificationEntity::update(record)
            .filter(certification::Column::DeletedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(missing_as_not_found("Certification"))?;
        Ok(Certification::from(model))
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        if self.mark_deleted(id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound("Certification"))
        }
    }

    async fn restore(&self, id: &str) -> AppResult<Certification> {
        if !self.mark_restored(id).await? {
            return Err(AppError::NotFound("Certification"));
        }

        self.find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Certification"))
    }
}
