//! Certification service - awarding certificates to users.
//!
//! Checks run in a fixed order before any write: the user must be
//! active, then the certificate, then no other active certification may
//! hold the same (user, certificate) pair. There is no storage-level
//! backstop for the pair, so two concurrent creates can both pass.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;

use super::container::parallel;
use crate::config::MSG_CERTIFICATION_EXISTS;
use crate::domain::{
    id::ensure_valid_id, Certificate, Certification, CertificationResponse, CreateCertification,
    NewCertification, UpdateCertification, User,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

#[async_trait]
pub trait CertificationService: Send + Sync {
    async fn create_certification(&self, req: CreateCertification) -> AppResult<Certification>;

    /// Active certification with user and certificate populated
    async fn get_certification(&self, id: &str) -> AppResult<CertificationResponse>;

    /// All active certifications, user and certificate populated
    async fn list_certifications(&self) -> AppResult<Vec<CertificationResponse>>;

    /// Active certifications of an active user, certificate populated
    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<CertificationResponse>>;

    /// Active certifications of an active certificate, user populated
    async fn list_by_certificate(&self, certificate_id: &str) -> AppResult<Vec<CertificationResponse>>;

    async fn update_certification(&self, id: &str, req: UpdateCertification) -> AppResult<Certification>;

    async fn delete_certification(&self, id: &str) -> AppResult<()>;

    async fn restore_certification(&self, id: &str) -> AppResult<Certification>;
}

pub struct CertificationManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CertificationManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn ensure_user_active(&self, user_id: &str) -> AppResult<()> {
        self.uow
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or_not_found("User")
            .map(drop)
    }

    async fn ensure_certificate_active(&self, certificate_id: &str) -> AppResult<()> {
        self.uow
            .certificates()
            .find_by_id(certificate_id)
            .await?
            .ok_or_not_found("Certificate")
            .map(drop)
    }

    /// Conflict if another active certification holds the pair
    async fn ensure_pair_free(
        &self,
        user_id: &str,
        certificate_id: &str,
        except: Option<&str>,
    ) -> AppResult<()> {
        let owner = self
            .uow
            .certifications()
            .active_pair_owner(user_id, certificate_id)
            .await?;

        match owner {
            Some(owner) if Some(owner.as_str()) != except => {
                Err(AppError::conflict(MSG_CERTIFICATION_EXISTS))
            }
            _ => Ok(()),
        }
    }

    /// Replace ids with related documents, whatever their delete state.
    async fn populate(
        &self,
        certifications: Vec<Certification>,
        with_users: bool,
        with_certificates: bool,
    ) -> AppResult<Vec<CertificationResponse>> {
        let user_ids = if with_users {
            unique_ids(certifications.iter().map(|c| &c.user_id))
        } else {
            Vec::new()
        };
        let certificate_ids = if with_certificates {
            unique_ids(certifications.iter().map(|c| &c.certificate_id))
        } else {
            Vec::new()
        };

        let users_repo = self.uow.users();
        let certificates_repo = self.uow.certificates();
        let (users, certificates) = parallel::join2(
            users_repo.find_many_with_deleted(user_ids),
            certificates_repo.find_many_with_deleted(certificate_ids),
        )
        .await?;

        let users: HashMap<String, User> =
            users.into_iter().map(|u| (u.id.clone(), u)).collect();
        let certificates: HashMap<String, Certificate> =
            certificates.into_iter().map(|c| (c.id.clone(), c)).collect();

        Ok(certifications
            .into_iter()
            .map(|certification| {
                let user = users.get(&certification.user_id).cloned();
                let certificate = certificates.get(&certification.certificate_id).cloned();
                CertificationResponse::from(certification)
                    .with_user(user)
                    .with_certificate(certificate)
            })
            .collect())
    }
}

fn unique_ids<'a>(ids: impl Iterator<Item = &'a String>) -> Vec<String> {
    let mut ids: Vec<String> = ids.cloned().collect();
    ids.sort();
    ids.dedup();
    ids
}

#[async_trait]
impl<U: UnitOfWork> CertificationService for CertificationManager<U> {
    async fn create_certification(&self, req: CreateCertification) -> AppResult<Certification> {
        self.ensure_user_active(&req.user_id).await?;
        self.ensure_certificate_active(&req.certificate_id).await?;
        self.ensure_pair_free(&req.user_id, &req.certificate_id, None)
            .await?;

        let certification = self
            .uow
            .certifications()
            .create(NewCertification::from_request(req, Utc::now()))
            .await?;

        tracing::info!(
            certification_id = %certification.id,
            user_id = %certification.user_id,
            certificate_id = %certification.certificate_id,
            "Certification awarded"
        );
        Ok(certification)
    }

    async fn get_certification(&self, id: &str) -> AppResult<CertificationResponse> {
        ensure_valid_id("id", id)?;
        let certification = self
            .uow
            .certifications()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Certification")?;

        let mut populated = self.populate(vec![certification], true, true).await?;
        populated.pop().ok_or_not_found("Certification")
    }

    async fn list_certifications(&self) -> AppResult<Vec<CertificationResponse>> {
        let certifications = self.uow.certifications().list().await?;
        self.populate(certifications, true, true).await
    }

    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<CertificationResponse>> {
        ensure_valid_id("userId", user_id)?;
        self.ensure_user_active(user_id).await?;

        let certifications = self.uow.certifications().list_by_user(user_id).await?;
        self.populate(certifications, false, true).await
    }

    async fn list_by_certificate(&self, certificate_id: &str) -> AppResult<Vec<CertificationResponse>> {
        ensure_valid_id("certificateId", certificate_id)?;
        self.ensure_certificate_active(certificate_id).await?;

        let certifications = self
            .uow
            .certifications()
            .list_by_certificate(certificate_id)
            .await?;
        self.populate(certifications, true, false).await
    }

    async fn update_certification(&self, id: &str, req: UpdateCertification) -> AppResult<Certification> {
        ensure_valid_id("id", id)?;
        let certifications = self.uow.certifications();
        let current = certifications
            .find_by_id(id)
            .await?
            .ok_or_not_found("Certification")?;

        let user_changed = req
            .user_id
            .as_deref()
            .is_some_and(|user_id| user_id != current.user_id);
        let certificate_changed = req
            .certificate_id
            .as_deref()
            .is_some_and(|certificate_id| certificate_id != current.certificate_id);

        if user_changed || certificate_changed {
            let user_id = req.user_id.as_deref().unwrap_or(&current.user_id);
            let certificate_id = req
                .certificate_id
                .as_deref()
                .unwrap_or(&current.certificate_id);

            if user_changed {
                self.ensure_user_active(user_id).await?;
            }
            if certificate_changed {
                self.ensure_certificate_active(certificate_id).await?;
            }
            self.ensure_pair_free(user_id, certificate_id, Some(id)).await?;
        }

        let certification = certifications.update(id, req).await?;
        tracing::info!(certification_id = %id, "Certification updated");
        Ok(certification)
    }

    async fn delete_certification(&self, id: &str) -> AppResult<()> {
        ensure_valid_id("id", id)?;
        self.uow.certifications().delete(id).await?;

        tracing::info!(certification_id = %id, "Certification soft-deleted");
        Ok(())
    }

    async fn restore_certification(&self, id: &str) -> AppResult<Certification> {
        ensure_valid_id("id", id)?;
        let certifications = self.uow.certifications();
        let deleted = certifications
            .find_by_id_with_deleted(id)
            .await?
            .filter(|c| c.deleted_at.is_some())
            .ok_or_not_found("Certification")?;

        // Restoring must not yield a second active row for the pair
        self.ensure_pair_free(&deleted.user_id, &deleted.certificate_id, Some(id))
            .await?;
        let certification = certifications.restore(id).await?;

        tracing::info!(certification_id = %id, "Certification restored");
        Ok(certification)
    }
}
