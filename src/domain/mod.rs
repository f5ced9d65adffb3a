//! Domain layer - Core business entities and logic
//!
//! Entities, request bodies and typed response views for users,
//! organizations, certificates and certifications, plus the pure rules
//! (identifiers, slugs, passwords, images) the services compose.

pub mod certificate;
pub mod certification;
pub mod id;
pub mod image;
pub mod organization;
pub mod password;
pub mod rules;
pub mod slug;
pub mod user;

pub use certificate::{
    Certificate, CertificateChanges, CertificateResponse, CreateCertificate, UpdateCertificate,
};
pub use certification::{
    Certification, CertificationChanges, CertificationResponse, CreateCertification,
    NewCertification, UpdateCertification,
};
pub use image::{ImageRef, ImageUpload};
pub use organization::{
    CreateOrganization, MemberSummary, NewOrganization, Organization, OrganizationChanges,
    OrganizationMembers, OrganizationResponse, UpdateOrganization,
};
pub use password::PasswordHashed;
pub use user::{
    LoginUser, NewUser, RegisterUser, UpdateUser, User, UserChanges, UserIdResponse,
    UserResponse, UserRole, UserSummary,
};
