//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

use crate::domain::ImageRef;

pub mod certificate;
pub mod certification;
pub mod organization;
pub mod user;

#[allow(unused_imports)]
pub use certificate::{ActiveModel as CertificateActiveModel, Entity as CertificateEntity};
#[allow(unused_imports)]
pub use certification::{ActiveModel as CertificationActiveModel, Entity as CertificationEntity};
#[allow(unused_imports)]
pub use organization::{ActiveModel as OrganizationActiveModel, Entity as OrganizationEntity};
#[allow(unused_imports)]
pub use user::{ActiveModel as UserActiveModel, Entity as UserEntity};

/// Ordered list of strings stored in a JSON column.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct StringList(pub Vec<String>);

/// Image handles live in a path/filename column pair; both or neither.
pub(crate) fn image_from_columns(path: Option<String>, filename: Option<String>) -> Option<ImageRef> {
    match (path, filename) {
        (Some(path), Some(filename)) => Some(ImageRef { path, filename }),
        _ => None,
    }
}
