//! Organization handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, patch, post},
    Router,
};

use crate::api::extractors::{ImageForm, LogoField, ValidatedJson};
use crate::api::AppState;
use crate::domain::{
    CreateOrganization, OrganizationMembers, OrganizationResponse, UpdateOrganization,
    UserResponse,
};
use crate::errors::AppResult;
use crate::types::{Created, NoContent};

/// Create organization routes
pub fn organization_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_organization).get(list_organizations))
        .route(
            "/:id",
            get(get_organization)
                .patch(update_organization)
                .delete(delete_organization),
        )
        .route("/:id/logo", patch(update_logo))
        .route("/:id/restore", patch(restore_organization))
        .route("/:id/members", get(get_members))
        .route("/:id/members/:user_id", post(assign_member))
}

#[utoipa::path(
    post,
    path = "/api/v1/organizations",
    tag = "Organizations",
    request_body = CreateOrganization,
    responses(
        (status = 201, description = "Organization created", body = OrganizationResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Organization email already registered")
    )
)]
pub async fn create_organization(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateOrganization>,
) -> AppResult<Created<OrganizationResponse>> {
    let organization = state
        .organization_service
        .create_organization(payload)
        .await?;
    Ok(Created(OrganizationResponse::from(organization)))
}

#[utoipa::path(
    get,
    path = "/api/v1/organizations",
    tag = "Organizations",
    responses(
        (status = 200, description = "Active organizations", body = Vec<OrganizationResponse>)
    )
)]
pub async fn list_organizations(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<OrganizationResponse>>> {
    let organizations = state.organization_service.list_organizations().await?;
    Ok(Json(
        organizations
            .into_iter()
            .map(OrganizationResponse::from)
            .collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/organizations/{id}",
    tag = "Organizations",
    params(("id" = String, Path, description = "Organization ID")),
    responses(
        (status = 200, description = "Organization", body = OrganizationResponse),
        (status = 400, description = "Malformed ID"),
        (status = 404, description = "Organization not found")
    )
)]
pub async fn get_organization(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<OrganizationResponse>> {
    let organization = state.organization_service.get_organization(&id).await?;
    Ok(Json(OrganizationResponse::from(organization)))
}

#[utoipa::path(
    patch,
    path = "/api/v1/organizations/{id}",
    tag = "Organizations",
    params(("id" = String, Path, description = "Organization ID")),
    request_body = UpdateOrganization,
    responses(
        (status = 200, description = "Organization updated", body = OrganizationResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Organization not found")
    )
)]
pub async fn update_organization(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateOrganization>,
) -> AppResult<Json<OrganizationResponse>> {
    let organization = state
        .organization_service
        .update_organization(&id, payload)
        .await?;
    Ok(Json(OrganizationResponse::from(organization)))
}

/// Replace the logo (multipart field `logo`)
#[utoipa::path(
    patch,
    path = "/api/v1/organizations/{id}/logo",
    tag = "Organizations",
    params(("id" = String, Path, description = "Organization ID")),
    request_body(content_type = "multipart/form-data", description = "Image in field `logo`"),
    responses(
        (status = 200, description = "Logo stored", body = OrganizationResponse),
        (status = 400, description = "Missing or unsupported image"),
        (status = 404, description = "Organization not found")
    )
)]
pub async fn update_logo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    form: ImageForm<LogoField>,
) -> AppResult<Json<OrganizationResponse>> {
    let organization = state
        .organization_service
        .update_logo(&id, form.upload)
        .await?;
    Ok(Json(OrganizationResponse::from(organization)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/organizations/{id}",
    tag = "Organizations",
    params(("id" = String, Path, description = "Organization ID")),
    responses(
        (status = 204, description = "Organization deleted"),
        (status = 400, description = "Malformed ID"),
        (status = 404, description = "Organization not found or already deleted")
    )
)]
pub async fn delete_organization(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<NoContent> {
    state.organization_service.delete_organization(&id).await?;
    Ok(NoContent)
}

#[utoipa::path(
    patch,
    path = "/api/v1/organizations/{id}/restore",
    tag = "Organizations",
    params(("id" = String, Path, description = "Organization ID")),
    responses(
        (status = 200, description = "Organization restored", body = OrganizationResponse),
        (status = 400, description = "Malformed ID"),
        (status = 404, description = "No deleted organization with this ID")
    )
)]
pub async fn restore_organization(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<OrganizationResponse>> {
    let organization = state.organization_service.restore_organization(&id).await?;
    Ok(Json(OrganizationResponse::from(organization)))
}

/// List the active members of an active organization
#[utoipa::path(
    get,
    path = "/api/v1/organizations/{id}/members",
    tag = "Organizations",
    params(("id" = String, Path, description = "Organization ID")),
    responses(
        (status = 200, description = "Organization with its members", body = OrganizationMembers),
        (status = 400, description = "Malformed ID"),
        (status = 404, description = "Organization not found")
    )
)]
pub async fn get_members(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<OrganizationMembers>> {
    let members = state.organization_service.get_members(&id).await?;
    Ok(Json(members))
}

/// Make a user a member of the organization
#[utoipa::path(
    post,
    path = "/api/v1/organizations/{id}/members/{userId}",
    tag = "Organizations",
    params(
        ("id" = String, Path, description = "Organization ID"),
        ("userId" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Member assigned", body = UserResponse),
        (status = 400, description = "Malformed ID or already a member"),
        (status = 404, description = "Organization or user not found")
    )
)]
pub async fn assign_member(
    State(state): State<AppState>,
    Path((id, user_id)): Path<(String, String)>,
) -> AppResult<Json<UserResponse>> {
    let user = state
        .organization_service
        .assign_member(&id, &user_id)
        .await?;
    Ok(Json(UserResponse::from(user)))
}
