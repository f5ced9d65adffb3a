//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{BlobStore, Database, LocalBlobStore};
use crate::services::{
    CertificateService, CertificationService, OrganizationService, ServiceContainer, Services,
    UserService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserService>,
    pub organization_service: Arc<dyn OrganizationService>,
    pub certificate_service: Arc<dyn CertificateService>,
    pub certification_service: Arc<dyn CertificationService>,
    /// Database connection, used by the health check
    pub database: Arc<Database>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Create application state from database connection and config.
    ///
    /// Images are written to the local blob store under `config.upload_dir`.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let blobs: Arc<dyn BlobStore> = Arc::new(LocalBlobStore::from_config(&config));
        let container = Services::from_connection(database.get_connection(), blobs);

        Self::new(&container, database, config)
    }

    /// Create application state over an already wired container.
    pub fn new(container: &impl ServiceContainer, database: Arc<Database>, config: Config) -> Self {
        Self {
            user_service: container.users(),
            organization_service: container.organizations(),
            certificate_service: container.certificates(),
            certification_service: container.certifications(),
            database,
            config: Arc::new(config),
        }
    }
}
