//! Certification database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Certification;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "certifications")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub certificate_id: String,
    pub grade: Option<i32>,
    pub is_public: bool,
    pub issued_at: DateTimeUtc,
    pub accepted_at: Option<DateTimeUtc>,
    pub rejected_at: Option<DateTimeUtc>,
    pub expired_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Certification {
    fn from(model: Model) -> Self {
        Certification {
            id: model.id,
            user_id: model.user_id,
            certificate_id: model.certificate_id,
            grade: model.grade,
            is_public: model.is_public,
            issued_at: model.issued_at,
            accepted_at: model.accepted_at,
            rejected_at: model.rejected_at,
            expired_at: model.expired_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
            deleted_at: model.deleted_at,
        }
    }
}
