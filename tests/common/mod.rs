//! Shared fixtures for the service tests.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::Utc;

use credence::domain::{Certificate, Certification, User, UserRole};
use credence::infra::{
    CertificateRepository, CertificationRepository, MockCertificateRepository,
    MockCertificationRepository, MockOrganizationRepository, MockUserRepository,
    OrganizationRepository, UnitOfWork, UserRepository,
};

pub const USER_ID: &str = "01HV4Z2WQXKJNM8GPQY6VBKC3D";
pub const OTHER_USER_ID: &str = "01HV4Z2WQXKJNM8GPQY6VBKC3E";
pub const CERTIFICATE_ID: &str = "01HV4Z3A7TZ1R6Q9M2B5C8D0EF";
pub const CERTIFICATION_ID: &str = "01HV4Z5B0K8W3M1N7P2Q4R6S9T";
pub const OTHER_CERTIFICATION_ID: &str = "01HV4Z5B0K8W3M1N7P2Q4R6S9V";

/// Test double for UnitOfWork; each repository is its own mock
#[derive(Default)]
pub struct TestUnitOfWork {
    pub users: MockUserRepository,
    pub organizations: MockOrganizationRepository,
    pub certificates: MockCertificateRepository,
    pub certifications: MockCertificationRepository,
}

impl TestUnitOfWork {
    pub fn build(self) -> Arc<FrozenUnitOfWork> {
        Arc::new(FrozenUnitOfWork {
            users: Arc::new(self.users),
            organizations: Arc::new(self.organizations),
            certificates: Arc::new(self.certificates),
            certifications: Arc::new(self.certifications),
        })
    }
}

/// Mocks with their expectations set, shared behind `Arc`s
pub struct FrozenUnitOfWork {
    users: Arc<MockUserRepository>,
    organizations: Arc<MockOrganizationRepository>,
    certificates: Arc<MockCertificateRepository>,
    certifications: Arc<MockCertificationRepository>,
}

impl UnitOfWork for FrozenUnitOfWork {
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

pub fn user(id: &str) -> User {
    let now = Utc::now();
    User {
        id: id.to_string(),
        first_name: Some("Ada".to_string()),
        middle_name: None,
        last_name: Some("Lovelace".to_string()),
        email: "ada@example.com".to_string(),
        password_hash: "hashed".to_string(),
        current_employer: None,
        current_position: None,
        birth_year: None,
        country: None,
        city: None,
        zip_code: None,
        bio: None,
        website_url: None,
        fb_url: None,
        linkedin_url: None,
        x_url: None,
        profile_pic: None,
        organization_id: None,
        last_login: None,
        vanity_slug: "ada-lovelace".to_string(),
        role: UserRole::Professional,
        created_at: now,
        updated_at: now,
        deleted_at: None,
    }
}

pub fn certificate(id: &str) -> Certificate {
    let now = Utc::now();
    Certificate {
        id: id.to_string(),
        name: "Data Analyst".to_string(),
        description: None,
        criteria: vec!["Pass the exam".to_string()],
        skills: vec!["sql".to_string()],
        image: None,
        created_at: now,
        updated_at: now,
        deleted_at: None,
    }
}

pub fn certification(id: &str) -> Certification {
    let now = Utc::now();
    Certification {
        id: id.to_string(),
        user_id: USER_ID.to_string(),
        certificate_id: CERTIFICATE_ID.to_string(),
        grade: Some(90),
        is_public: true,
        issued_at: now,
        accepted_at: None,
        rejected_at: None,
        expired_at: None,
        created_at: now,
        updated_at: now,
        deleted_at: None,
    }
}
