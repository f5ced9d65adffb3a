//! Certificate service. Certificates are shared templates with no owner.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::FOLDER_CERTIFICATES;
use crate::domain::{
    id::ensure_valid_id, Certificate, CertificateChanges, CreateCertificate, ImageUpload,
    UpdateCertificate,
};
use crate::errors::{AppResult, OptionExt};
use crate::infra::{BlobStore, UnitOfWork};

#[async_trait]
pub trait CertificateService: Send + Sync {
    async fn create_certificate(&self, req: CreateCertificate) -> AppResult<Certificate>;

    async fn get_certificate(&self, id: &str) -> AppResult<Certificate>;

    async fn update_certificate(&self, id: &str, req: UpdateCertificate) -> AppResult<Certificate>;

    async fn update_image(&self, id: &str, upload: ImageUpload) -> AppResult<Certificate>;

    async fn delete_certificate(&self, id: &str) -> AppResult<()>;

    async fn restore_certificate(&self, id: &str) -> AppResult<Certificate>;
}

pub struct CertificateManager<U: UnitOfWork> {
    uow: Arc<U>,
    blobs: Arc<dyn BlobStore>,
}

impl<U: UnitOfWork> CertificateManager<U> {
    pub fn new(uow: Arc<U>, blobs: Arc<dyn BlobStore>) -> Self {
        Self { uow, blobs }
    }
}

#[async_trait]
impl<U: UnitOfWork> CertificateService for CertificateManager<U> {
    async fn create_certificate(&self, req: CreateCertificate) -> AppResult<Certificate> {
        if let Some(image) = &req.image {
            image.ensure_valid()?;
        }

        let certificate = self.uow.certificates().create(req).await?;
        tracing::info!(certificate_id = %certificate.id, "Certificate created");
        Ok(certificate)
    }

    async fn get_certificate(&self, id: &str) -> AppResult<Certificate> {
        ensure_valid_id("id", id)?;
        self.uow
            .certificates()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Certificate")
    }

    async fn update_certificate(&self, id: &str, req: UpdateCertificate) -> AppResult<Certificate> {
        ensure_valid_id("id", id)?;
        if let Some(image) = &req.image {
            image.ensure_valid()?;
        }

        self.uow.certificates().update(id, req).await
    }

    async fn update_image(&self, id: &str, upload: ImageUpload) -> AppResult<Certificate> {
        let certificates = self.uow.certificates();
        self.get_certificate(id).await?;

        let image = self.blobs.put(FOLDER_CERTIFICATES, upload).await?;
        let changes = CertificateChanges {
            image: Some(image),
            ..CertificateChanges::default()
        };

        certificates.update(id, changes).await
    }

    async fn delete_certificate(&self, id: &str) -> AppResult<()> {
        ensure_valid_id("id", id)?;
        self.uow.certificates().delete(id).await?;

        tracing::info!(certificate_id = %id, "Certificate soft-deleted");
        Ok(())
    }

    async fn restore_certificate(&self, id: &str) -> AppResult<Certificate> {
        ensure_valid_id("id", id)?;
        let certificate = self.uow.certificates().restore(id).await?;

        tracing::info!(certificate_id = %id, "Certificate restored");
        Ok(certificate)
    }
}
