//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use super::image_from_columns;
use crate::domain::{User, UserRole};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub current_employer: Option<String>,
    pub current_position: Option<String>,
    pub birth_year: Option<i32>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub zip_code: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub bio: Option<String>,
    pub website_url: Option<String>,
    pub fb_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub x_url: Option<String>,
    pub profile_pic_path: Option<String>,
    pub profile_pic_filename: Option<String>,
    pub organization_id: Option<String>,
    pub last_login: Option<DateTimeUtc>,
    #[sea_orm(unique)]
    pub vanity_slug: String,
    pub role: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    /// Soft delete timestamp (NULL = active, set = deleted)
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for User {
    fn from(model: Model) -> Self {
        User {
            id: model.id,
            first_name: model.first_name,
            middle_name: model.middle_name,
            last_name: model.last_name,
            email: model.email,
            password_hash: model.password_hash,
            current_employer: model.current_employer,
            current_position: model.current_position,
            birth_year: model.birth_year,
            country: model.country,
            city: model.city,
            zip_code: model.zip_code,
            bio: model.bio,
            website_url: model.website_url,
            fb_url: model.fb_url,
            linkedin_url: model.linkedin_url,
            x_url: model.x_url,
            profile_pic: image_from_columns(model.profile_pic_path, model.profile_pic_filename),
            organization_id: model.organization_id,
            last_login: model.last_login,
            vanity_slug: model.vanity_slug,
            role: UserRole::from(model.role.as_str()),
            created_at: model.created_at,
            updated_at: model.updated_at,
            deleted_at: model.deleted_at,
        }
    }
}
