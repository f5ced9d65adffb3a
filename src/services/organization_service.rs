//! Organization service - registry of organizations and their members.
//!
//! Membership is a weak reference held on the user (`organization_id`);
//! an organization owns nothing.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{FOLDER_ORGANIZATIONS, MSG_ALREADY_MEMBER, MSG_ORGANIZATION_EXISTS};
use crate::domain::{
    id::ensure_valid_id, CreateOrganization, ImageUpload, Organization, OrganizationChanges,
    OrganizationMembers, UpdateOrganization, User, UserChanges,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::{BlobStore, UnitOfWork};

#[async_trait]
pub trait OrganizationService: Send + Sync {
    /// Create an organization; the email must be unused by every
    /// organization, deleted ones included
    async fn create_organization(&self, req: CreateOrganization) -> AppResult<Organization>;

    async fn list_organizations(&self) -> AppResult<Vec<Organization>>;

    async fn get_organization(&self, id: &str) -> AppResult<Organization>;

    async fn update_organization(&self, id: &str, req: UpdateOrganization) -> AppResult<Organization>;

    async fn update_logo(&self, id: &str, upload: ImageUpload) -> AppResult<Organization>;

    async fn delete_organization(&self, id: &str) -> AppResult<()>;

    async fn restore_organization(&self, id: &str) -> AppResult<Organization>;

    /// Active organization with its active members
    async fn get_members(&self, id: &str) -> AppResult<OrganizationMembers>;

    /// Point an active user at an active organization
    async fn assign_member(&self, id: &str, user_id: &str) -> AppResult<User>;
}

pub struct OrganizationManager<U: UnitOfWork> {
    uow: Arc<U>,
    blobs: Arc<dyn BlobStore>,
}

impl<U: UnitOfWork> OrganizationManager<U> {
    pub fn new(uow: Arc<U>, blobs: Arc<dyn BlobStore>) -> Self {
        Self { uow, blobs }
    }

    async fn find_active(&self, id: &str) -> AppResult<Organization> {
        ensure_valid_id("id", id)?;
        self.uow
            .organizations()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Organization")
    }
}

#[async_trait]
impl<U: UnitOfWork> OrganizationService for OrganizationManager<U> {
    async fn create_organization(&self, req: CreateOrganization) -> AppResult<Organization> {
        let organizations = self.uow.organizations();
        if organizations.email_exists(&req.email).await? {
            return Err(AppError::conflict(MSG_ORGANIZATION_EXISTS));
        }

        let organization = organizations.create(req.into()).await?;
        tracing::info!(organization_id = %organization.id, "Organization created");
        Ok(organization)
    }

    async fn list_organizations(&self) -> AppResult<Vec<Organization>> {
        self.uow.organizations().list().await
    }

    async fn get_organization(&self, id: &str) -> AppResult<Organization> {
        self.find_active(id).await
    }

    async fn update_organization(&self, id: &str, req: UpdateOrganization) -> AppResult<Organization> {
        ensure_valid_id("id", id)?;
        self.uow
            .organizations()
            .update(id, OrganizationChanges::from(req))
            .await
    }

    async fn update_logo(&self, id: &str, upload: ImageUpload) -> AppResult<Organization> {
        self.find_active(id).await?;

        let logo = self.blobs.put(FOLDER_ORGANIZATIONS, upload).await?;
        let changes = OrganizationChanges {
            logo: Some(logo),
            ..OrganizationChanges::default()
        };

        self.uow.organizations().update(id, changes).await
    }

    async fn delete_organization(&self, id: &str) -> AppResult<()> {
        ensure_valid_id("id", id)?;
        self.uow.organizations().delete(id).await?;

        tracing::info!(organization_id = %id, "Organization soft-deleted");
        Ok(())
    }

    async fn restore_organization(&self, id: &str) -> AppResult<Organization> {
        ensure_valid_id("id", id)?;
        let organization = self.uow.organizations().restore(id).await?;

        tracing::info!(organization_id = %id, "Organization restored");
        Ok(organization)
    }

    async fn get_members(&self, id: &str) -> AppResult<OrganizationMembers> {
        let organization = self.find_active(id).await?;
        let members = self.uow.users().list_by_organization(id).await?;

        Ok(OrganizationMembers::new(organization, members))
    }

    async fn assign_member(&self, id: &str, user_id: &str) -> AppResult<User> {
        ensure_valid_id("id", id)?;
        ensure_valid_id("userId", user_id)?;

        self.find_active(id).await?;
        let users = self.uow.users();
        let user = users.find_by_id(user_id).await?.ok_or_not_found("User")?;

        if user.is_member_of(id) {
            return Err(AppError::validation(MSG_ALREADY_MEMBER));
        }

        let changes = UserChanges {
            organization_id: Some(id.to_string()),
            ..UserChanges::default()
        };
        let user = users.update(user_id, changes).await?;

        tracing::info!(organization_id = %id, user_id = %user_id, "Member assigned");
        Ok(user)
    }
}
