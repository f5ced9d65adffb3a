//! Certification handlers.
//!
//! Reads return populated relations; writes return the bare ids.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, patch},
    Router,
};

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{CertificationResponse, CreateCertification, UpdateCertification};
use crate::errors::AppResult;
use crate::types::{Created, NoContent};

/// Create certification routes
pub fn certification_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_certifications).post(create_certification))
        .route("/users/:user_id", get(list_by_user))
        .route("/certificates/:certificate_id", get(list_by_certificate))
        .route(
            "/:id",
            get(get_certification)
                .patch(update_certification)
                .delete(delete_certification),
        )
        .route("/:id/restore", patch(restore_certification))
}

/// Award a certificate to a user
#[utoipa::path(
    post,
    path = "/api/v1/certifications",
    tag = "Certifications",
    request_body = CreateCertification,
    responses(
        (status = 201, description = "Certification created", body = CertificationResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "User or certificate not found"),
        (status = 409, description = "User already holds this certificate")
    )
)]
pub async fn create_certification(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateCertification>,
) -> AppResult<Created<CertificationResponse>> {
    let certification = state
        .certification_service
        .create_certification(payload)
        .await?;
    Ok(Created(CertificationResponse::from(certification)))
}

#[utoipa::path(
    get,
    path = "/api/v1/certifications",
    tag = "Certifications",
    responses(
        (status = 200, description = "Active certifications", body = Vec<CertificationResponse>)
    )
)]
pub async fn list_certifications(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<CertificationResponse>>> {
    let certifications = state.certification_service.list_certifications().await?;
    Ok(Json(certifications))
}

#[utoipa::path(
    get,
    path = "/api/v1/certifications/{id}",
    tag = "Certifications",
    params(("id" = String, Path, description = "Certification ID")),
    responses(
        (status = 200, description = "Certification", body = CertificationResponse),
        (status = 400, description = "Malformed ID"),
        (status = 404, description = "Certification not found")
    )
)]
pub async fn get_certification(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<CertificationResponse>> {
    let certification = state.certification_service.get_certification(&id).await?;
    Ok(Json(certification))
}

/// Certifications held by one user
#[utoipa::path(
    get,
    path = "/api/v1/certifications/users/{userId}",
    tag = "Certifications",
    params(("userId" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "The user's certifications", body = Vec<CertificationResponse>),
        (status = 400, description = "Malformed ID"),
        (status = 404, description = "User not found")
    )
)]
pub async fn list_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<Vec<CertificationResponse>>> {
    let certifications = state.certification_service.list_by_user(&user_id).await?;
    Ok(Json(certifications))
}

/// Holders of one certificate
#[utoipa::path(
    get,
    path = "/api/v1/certifications/certificates/{certificateId}",
    tag = "Certifications",
    params(("certificateId" = String, Path, description = "Certificate ID")),
    responses(
        (status = 200, description = "Certifications of the certificate", body = Vec<CertificationResponse>),
        (status = 400, description = "Malformed ID"),
        (status = 404, description = "Certificate not found")
    )
)]
pub async fn list_by_certificate(
    State(state): State<AppState>,
    Path(certificate_id): Path<String>,
) -> AppResult<Json<Vec<CertificationResponse>>> {
    let certifications = state
        .certification_service
        .list_by_certificate(&certificate_id)
        .await?;
    Ok(Json(certifications))
}

#[utoipa::path(
    patch,
    path = "/api/v1/certifications/{id}",
    tag = "Certifications",
    params(("id" = String, Path, description = "Certification ID")),
    request_body = UpdateCertification,
    responses(
        (status = 200, description = "Certification updated", body = CertificationResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Certification, user or certificate not found"),
        (status = 409, description = "User already holds this certificate")
    )
)]
pub async fn update_certification(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateCertification>,
) -> AppResult<Json<CertificationResponse>> {
    let certification = state
        .certification_service
        .update_certification(&id, payload)
        .await?;
    Ok(Json(CertificationResponse::from(certification)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/certifications/{id}",
    tag = "Certifications",
    params(("id" = String, Path, description = "Certification ID")),
    responses(
        (status = 204, description = "Certification deleted"),
        (status = 400, description = "Malformed ID"),
        (status = 404, description = "Certification not found or already deleted")
    )
)]
pub async fn delete_certification(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<NoContent> {
    state.certification_service.delete_certification(&id).await?;
    Ok(NoContent)
}

#[utoipa::path(
    patch,
    path = "/api/v1/certifications/{id}/restore",
    tag = "Certifications",
    params(("id" = String, Path, description = "Certification ID")),
    responses(
        (status = 200, description = "Certification restored", body = CertificationResponse),
        (status = 400, description = "Malformed ID"),
        (status = 404, description = "No deleted certification with this ID"),
        (status = 409, description = "Another active certification holds the pair")
    )
)]
pub async fn restore_certification(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<CertificationResponse>> {
    let certification = state
        .certification_service
        .restore_certification(&id)
        .await?;
    Ok(Json(CertificationResponse::from(certification)))
}
