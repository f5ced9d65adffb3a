//! Repository layer - Data access abstraction
//!
//! One trait per collection over a SeaORM-backed `*Store`, sharing the
//! soft-delete lifecycle from `soft_delete`.

mod certificate_repository;
mod certification_repository;
pub(crate) mod entities;
mod organization_repository;
mod soft_delete;
mod user_repository;

pub use certificate_repository::{CertificateRepository, CertificateStore};
pub use certification_repository::{CertificationRepository, CertificationStore};
pub use organization_repository::{OrganizationRepository, OrganizationStore};
pub use soft_delete::{SoftDeletable, SoftDeleteRepository};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use certificate_repository::MockCertificateRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use certification_repository::MockCertificationRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use organization_repository::MockOrganizationRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
