//! Unit of Work: single access point to every repository.
//!
//! Services depend on this trait rather than on concrete stores, so
//! tests can swap in mocks per repository. There is no cross-collection
//! transaction; each repository call is its own atomic statement.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::repositories::{
    CertificateRepository, CertificateStore, CertificationRepository, CertificationStore,
    OrganizationRepository, OrganizationStore, UserRepository, UserStore,
};

/// Unit of Work trait for dependency injection.
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;

    fn organizations(&self) -> Arc<dyn OrganizationRepository>;

    fn certificates(&self) -> Arc<dyn CertificateRepository>;

    fn certifications(&self) -> Arc<dyn CertificationRepository>;
}

/// SeaORM-backed implementation of UnitOfWork
pub struct Persistence {
    users: Arc<UserStore>,
    organizations: Arc<OrganizationStore>,
    certificates: Arc<CertificateStore>,
    certifications: Arc<CertificationStore>,
}

impl Persistence {
    /// Build every store over a shared connection pool
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: Arc::new(UserStore::new(db.clone())),
            organizations: Arc::new(OrganizationStore::new(db.clone())),
            certificates: Arc::new(CertificateStore::new(db.clone())),
            certifications: Arc::new(CertificationStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn organizations(&self) -> Arc<dyn OrganizationRepository> {
        self.organizations.clone()
    }

    fn certificates(&self) -> Arc<dyn CertificateRepository> {
        self.certificates.clone()
    }

    fn certifications(&self) -> Arc<dyn CertificationRepository> {
        self.certifications.clone()
    }
}
