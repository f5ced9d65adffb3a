//! Infrastructure layer - External systems integration
//!
//! - Database connection, migrations and repositories
//! - Blob storage for uploaded images
//! - Unit of Work giving services access to every repository

pub mod db;
pub mod repositories;
pub mod storage;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use repositories::{
    CertificateRepository, CertificateStore, CertificationRepository, CertificationStore,
    OrganizationRepository, OrganizationStore, UserRepository, UserStore,
};
pub use storage::{BlobStore, LocalBlobStore};
pub use unit_of_work::{Persistence, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{
    MockCertificateRepository, MockCertificationRepository, MockOrganizationRepository,
    MockUserRepository,
};
#[cfg(any(test, feature = "test-utils"))]
pub use storage::MockBlobStore;
