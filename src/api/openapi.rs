//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::{
    certificate_handler, certification_handler, organization_handler, user_handler,
};
use crate::domain::certification::{AwardRef, HolderRef};
use crate::domain::{
    CertificateResponse, CertificationResponse, CreateCertificate, CreateCertification,
    CreateOrganization, ImageRef, LoginUser, MemberSummary, OrganizationMembers,
    OrganizationResponse, RegisterUser, UpdateCertificate, UpdateCertification,
    UpdateOrganization, UpdateUser, UserIdResponse, UserResponse, UserRole, UserSummary,
};

/// OpenAPI documentation for the Credence API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Credence API",
        version = "0.1.0",
        description = "Credentialing registry: users, organizations, certificates and certifications",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // User endpoints
        user_handler::register,
        user_handler::login,
        user_handler::get_user,
        user_handler::resolve_user_id,
        user_handler::update_user,
        user_handler::update_profile_picture,
        user_handler::delete_user,
        user_handler::restore_user,
        // Organization endpoints
        organization_handler::create_organization,
        organization_handler::list_organizations,
        organization_handler::get_organization,
        organization_handler::update_organization,
        organization_handler::update_logo,
        organization_handler::delete_organization,
        organization_handler::restore_organization,
        organization_handler::get_members,
        organization_handler::assign_member,
        // Certificate endpoints
        certificate_handler::create_certificate,
        certificate_handler::get_certificate,
        certificate_handler::update_certificate,
        certificate_handler::update_image,
        certificate_handler::delete_certificate,
        certificate_handler::restore_certificate,
        // Certification endpoints
        certification_handler::create_certification,
        certification_handler::list_certifications,
        certification_handler::get_certification,
        certification_handler::list_by_user,
        certification_handler::list_by_certificate,
        certification_handler::update_certification,
        certification_handler::delete_certification,
        certification_handler::restore_certification,
    ),
    components(
        schemas(
            ImageRef,
            // Users
            UserRole,
            UserResponse,
            UserSummary,
            UserIdResponse,
            RegisterUser,
            LoginUser,
            UpdateUser,
            // Organizations
            OrganizationResponse,
            OrganizationMembers,
            MemberSummary,
            CreateOrganization,
            UpdateOrganization,
            // Certificates
            CertificateResponse,
            CreateCertificate,
            UpdateCertificate,
            // Certifications
            CertificationResponse,
            HolderRef,
            AwardRef,
            CreateCertification,
            UpdateCertification,
        )
    ),
    tags(
        (name = "Users", description = "Registration, login and profiles"),
        (name = "Organizations", description = "Organizations and their members"),
        (name = "Certificates", description = "Certificate templates"),
        (name = "Certifications", description = "Certificates awarded to users")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_nested_paths() {
        let doc = ApiDoc::openapi();

        assert!(doc.paths.paths.contains_key("/api/v1/users/register"));
        assert!(doc
            .paths
            .paths
            .contains_key("/api/v1/certifications/certificates/{certificateId}"));
    }
}
