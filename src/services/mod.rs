//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain rules and repositories to fulfil each
//! operation. They depend on traits (`UnitOfWork`, `BlobStore`) so tests
//! can substitute mocks.

mod certificate_service;
mod certification_service;
pub mod container;
mod organization_service;
pub mod slug_resolver;
mod user_service;

// Service Container
pub use container::{parallel, ServiceContainer, Services};

// Service traits and implementations
pub use certificate_service::{CertificateManager, CertificateService};
pub use certification_service::{CertificationManager, CertificationService};
pub use organization_service::{OrganizationManager, OrganizationService};
pub use slug_resolver::SlugResolver;
pub use user_service::{UserManager, UserService};
