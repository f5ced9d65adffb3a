//! Service Container - Centralized service access.
//!
//! Handlers reach every service through [`ServiceContainer`]; the
//! concrete [`Services`] wires managers over a shared Unit of Work and
//! blob store.

use std::future::Future;
use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::{
    CertificateManager, CertificateService, CertificationManager, CertificationService,
    OrganizationManager, OrganizationService, UserManager, UserService,
};
use crate::errors::AppResult;
use crate::infra::{BlobStore, Persistence};

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    fn users(&self) -> Arc<dyn UserService>;

    fn organizations(&self) -> Arc<dyn OrganizationService>;

    fn certificates(&self) -> Arc<dyn CertificateService>;

    fn certifications(&self) -> Arc<dyn CertificationService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    user_service: Arc<dyn UserService>,
    organization_service: Arc<dyn OrganizationService>,
    certificate_service: Arc<dyn CertificateService>,
    certification_service: Arc<dyn CertificationService>,
}

impl Services {
    pub fn new(
        user_service: Arc<dyn UserService>,
        organization_service: Arc<dyn OrganizationService>,
        certificate_service: Arc<dyn CertificateService>,
        certification_service: Arc<dyn CertificationService>,
    ) -> Self {
        Self {
            user_service,
            organization_service,
            certificate_service,
            certification_service,
        }
    }

    /// Build every service over one connection pool and blob store
    pub fn from_connection(db: DatabaseConnection, blobs: Arc<dyn BlobStore>) -> Self {
        let uow = Arc::new(Persistence::new(db));

        Self::new(
            Arc::new(UserManager::new(uow.clone(), blobs.clone())),
            Arc::new(OrganizationManager::new(uow.clone(), blobs.clone())),
            Arc::new(CertificateManager::new(uow.clone(), blobs)),
            Arc::new(CertificationManager::new(uow)),
        )
    }
}

impl ServiceContainer for Services {
    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn organizations(&self) -> Arc<dyn OrganizationService> {
        self.organization_service.clone()
    }

    fn certificates(&self) -> Arc<dyn CertificateService> {
        self.certificate_service.clone()
    }

    fn certifications(&self) -> Arc<dyn CertificationService> {
        self.certification_service.clone()
    }
}

/// Run independent store reads concurrently.
pub mod parallel {
    use super::*;
    use tokio::try_join;

    /// Await both operations; the first error wins.
    pub async fn join2<F1, F2, T1, T2>(f1: F1, f2: F2) -> AppResult<(T1, T2)>
    where
        F1: Future<Output = AppResult<T1>>,
        F2: Future<Output = AppResult<T2>>,
    {
        try_join!(f1, f2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;

    #[tokio::test]
    async fn test_parallel_join2() {
        async fn op1() -> AppResult<i32> {
            Ok(1)
        }
        async fn op2() -> AppResult<&'static str> {
            Ok("two")
        }

        let (a, b) = parallel::join2(op1(), op2()).await.unwrap();
        assert_eq!(a, 1);
        assert_eq!(b, "two");
    }

    #[tokio::test]
    async fn test_parallel_join2_propagates_error() {
        async fn ok() -> AppResult<i32> {
            Ok(1)
        }
        async fn missing() -> AppResult<i32> {
            Err(AppError::NotFound("User"))
        }

        let result = parallel::join2(ok(), missing()).await;
        assert!(matches!(result, Err(AppError::NotFound("User"))));
    }
}
