//! Certificate database entity for SeaORM.

use sea_orm::entity::prelude::*;

use super::{image_from_columns, StringList};
use crate::domain::Certificate;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "certificates")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Json")]
    pub criteria: StringList,
    #[sea_orm(column_type = "Json")]
    pub skills: StringList,
    pub image_path: Option<String>,
    pub image_filename: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Certificate {
    fn from(model: Model) -> Self {
        Certificate {
            id: model.id,
            name: model.name,
            description: model.description,
            criteria: model.criteria.0,
            skills: model.skills.0,
            image: image_from_columns(model.image_path, model.image_filename),
            created_at: model.created_at,
            updated_at: model.updated_at,
            deleted_at: model.deleted_at,
        }
    }
}
