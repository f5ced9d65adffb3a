//! Certificate handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, patch, post},
    Router,
};

use crate::api::extractors::{CertificateImageField, ImageForm, ValidatedJson};
use crate::api::AppState;
use crate::domain::{CertificateResponse, CreateCertificate, UpdateCertificate};
use crate::errors::AppResult;
use crate::types::{Created, NoContent};

/// Create certificate routes
pub fn certificate_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_certificate))
        .route(
            "/:id",
            get(get_certificate)
                .patch(update_certificate)
                .delete(delete_certificate),
        )
        .route("/:id/image", patch(update_image))
        .route("/:id/restore", patch(restore_certificate))
}

#[utoipa::path(
    post,
    path = "/api/v1/certificates",
    tag = "Certificates",
    request_body = CreateCertificate,
    responses(
        (status = 201, description = "Certificate created", body = CertificateResponse),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_certificate(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateCertificate>,
) -> AppResult<Created<CertificateResponse>> {
    let certificate = state.certificate_service.create_certificate(payload).await?;
    Ok(Created(CertificateResponse::from(certificate)))
}

#[utoipa::path(
    get,
    path = "/api/v1/certificates/{id}",
    tag = "Certificates",
    params(("id" = String, Path, description = "Certificate ID")),
    responses(
        (status = 200, description = "Certificate", body = CertificateResponse),
        (status = 400, description = "Malformed ID"),
        (status = 404, description = "Certificate not found")
    )
)]
pub async fn get_certificate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<CertificateResponse>> {
    let certificate = state.certificate_service.get_certificate(&id).await?;
    Ok(Json(CertificateResponse::from(certificate)))
}

#[utoipa::path(
    patch,
    path = "/api/v1/certificates/{id}",
    tag = "Certificates",
    params(("id" = String, Path, description = "Certificate ID")),
    request_body = UpdateCertificate,
    responses(
        (status = 200, description = "Certificate updated", body = CertificateResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Certificate not found")
    )
)]
pub async fn update_certificate(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateCertificate>,
) -> AppResult<Json<CertificateResponse>> {
    let certificate = state
        .certificate_service
        .update_certificate(&id, payload)
        .await?;
    Ok(Json(CertificateResponse::from(certificate)))
}

/// Replace the certificate image (multipart field `certificate-image`)
#[utoipa::path(
    patch,
    path = "/api/v1/certificates/{id}/image",
    tag = "Certificates",
    params(("id" = String, Path, description = "Certificate ID")),
    request_body(content_type = "multipart/form-data", description = "Image in field `certificate-image`"),
    responses(
        (status = 200, description = "Image stored", body = CertificateResponse),
        (status = 400, description = "Missing or unsupported image"),
        (status = 404, description = "Certificate not found")
    )
)]
pub async fn update_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
    form: ImageForm<CertificateImageField>,
) -> AppResult<Json<CertificateResponse>> {
    let certificate = state
        .certificate_service
        .update_image(&id, form.upload)
        .await?;
    Ok(Json(CertificateResponse::from(certificate)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/certificates/{id}",
    tag = "Certificates",
    params(("id" = String, Path, description = "Certificate ID")),
    responses(
        (status = 204, description = "Certificate deleted"),
        (status = 400, description = "Malformed ID"),
        (status = 404, description = "Certificate not found or already deleted")
    )
)]
pub async fn delete_certificate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<NoContent> {
    state.certificate_service.delete_certificate(&id).await?;
    Ok(NoContent)
}

#[utoipa::path(
    patch,
    path = "/api/v1/certificates/{id}/restore",
    tag = "Certificates",
    params(("id" = String, Path, description = "Certificate ID")),
    responses(
        (status = 200, description = "Certificate restored", body = CertificateResponse),
        (status = 400, description = "Malformed ID"),
        (status = 404, description = "No deleted certificate with this ID")
    )
)]
pub async fn restore_certificate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<CertificateResponse>> {
    let certificate = state.certificate_service.restore_certificate(&id).await?;
    Ok(Json(CertificateResponse::from(certificate)))
}
