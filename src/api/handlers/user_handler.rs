//! User handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, patch, post},
    Router,
};

use crate::api::extractors::{ImageForm, ProfilePictureField, ValidatedJson};
use crate::api::AppState;
use crate::domain::{LoginUser, RegisterUser, UpdateUser, UserIdResponse, UserResponse};
use crate::errors::AppResult;
use crate::types::{Created, NoContent};

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/restore/:id", patch(restore_user))
        .route("/:id", get(get_user).patch(update_user).delete(delete_user))
        .route("/:id/id", get(resolve_user_id))
        .route("/:id/profile-picture", patch(update_profile_picture))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/v1/users/register",
    tag = "Users",
    request_body = RegisterUser,
    responses(
        (status = 201, description = "User registered", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email taken or no free vanity slug")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterUser>,
) -> AppResult<Created<UserResponse>> {
    let user = state.user_service.register(payload).await?;
    Ok(Created(UserResponse::from(user)))
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/api/v1/users/login",
    tag = "Users",
    request_body = LoginUser,
    responses(
        (status = 200, description = "Login successful", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Incorrect email or password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginUser>,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_service.login(payload).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Get an active user's profile
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User profile", body = UserResponse),
        (status = 400, description = "Malformed ID"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_service.get_user(&id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Resolve an email or vanity slug to a user ID
#[utoipa::path(
    get,
    path = "/api/v1/users/{identifier}/id",
    tag = "Users",
    params(("identifier" = String, Path, description = "Email or vanity slug")),
    responses(
        (status = 200, description = "Matching user ID", body = UserIdResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn resolve_user_id(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> AppResult<Json<UserIdResponse>> {
    let user_id = state.user_service.resolve_user_id(&identifier).await?;
    Ok(Json(UserIdResponse { user_id }))
}

/// Update profile fields
#[utoipa::path(
    patch,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ID")),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email or vanity slug taken")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateUser>,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_service.update_user(&id, payload).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Replace the profile picture (multipart field `profile-picture`)
#[utoipa::path(
    patch,
    path = "/api/v1/users/{id}/profile-picture",
    tag = "Users",
    params(("id" = String, Path, description = "User ID")),
    request_body(content_type = "multipart/form-data", description = "Image in field `profile-picture`"),
    responses(
        (status = 200, description = "Profile picture stored", body = UserResponse),
        (status = 400, description = "Missing or unsupported image"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_profile_picture(
    State(state): State<AppState>,
    Path(id): Path<String>,
    form: ImageForm<ProfilePictureField>,
) -> AppResult<Json<UserResponse>> {
    let user = state
        .user_service
        .update_profile_picture(&id, form.upload)
        .await?;
    Ok(Json(UserResponse::from(user)))
}

/// Soft delete a user
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Malformed ID"),
        (status = 404, description = "User not found or already deleted")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<NoContent> {
    state.user_service.delete_user(&id).await?;
    Ok(NoContent)
}

/// Restore a soft-deleted user
#[utoipa::path(
    patch,
    path = "/api/v1/users/restore/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User restored", body = UserResponse),
        (status = 400, description = "Malformed ID"),
        (status = 404, description = "No deleted user with this ID")
    )
)]
pub async fn restore_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_service.restore_user(&id).await?;
    Ok(Json(UserResponse::from(user)))
}
