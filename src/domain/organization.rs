use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::image::ImageRef;
use super::rules::{blank_to_null, validate_url_or_blank};
use super::user::User;

/// Organization domain entity
#[derive(Debug, Clone, PartialEq)]
pub struct Organization {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub email: String,
    pub logo: Option<ImageRef>,
    pub website: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateOrganization {
    #[validate(length(min = 1, message = "\"name\" is not allowed to be empty"))]
    #[schema(example = "Analytical Engines Ltd")]
    pub name: String,
    pub description: Option<String>,
    /// Uniqueness key at creation
    #[validate(email(message = "\"email\" must be a valid email"))]
    #[schema(example = "hello@engines.example")]
    pub email: String,
    #[validate(custom(function = "validate_url_or_blank", message = "\"website\" must be a valid uri"))]
    pub website: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateOrganization {
    #[validate(length(min = 1, message = "\"name\" is not allowed to be empty"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(email(message = "\"email\" must be a valid email"))]
    pub email: Option<String>,
    #[validate(custom(function = "validate_url_or_blank", message = "\"website\" must be a valid uri"))]
    pub website: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewOrganization {
    pub name: String,
    pub description: Option<String>,
    pub email: String,
    pub website: Option<String>,
}

impl From<CreateOrganization> for NewOrganization {
    fn from(req: CreateOrganization) -> Self {
        Self {
            name: req.name,
            description: req.description,
            email: req.email,
            website: blank_to_null(req.website).flatten(),
        }
    }
}

/// Column-level changes; `website: Some(None)` clears the column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrganizationChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub email: Option<String>,
    pub website: Option<Option<String>>,
    pub logo: Option<ImageRef>,
}

impl From<UpdateOrganization> for OrganizationChanges {
    fn from(req: UpdateOrganization) -> Self {
        Self {
            name: req.name,
            description: req.description,
            email: req.email,
            website: blank_to_null(req.website),
            logo: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationResponse {
    #[schema(example = "01HV4Z2WQXKJNM8GPQY6VBKC3D")]
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub email: String,
    pub logo: Option<ImageRef>,
    pub website: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Organization> for OrganizationResponse {
    fn from(org: Organization) -> Self {
        Self {
            id: org.id,
            name: org.name,
            description: org.description,
            email: org.email,
            logo: org.logo,
            website: org.website,
            created_at: org.created_at,
            updated_at: org.updated_at,
        }
    }
}

/// Member entry in an organization roster
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberSummary {
    pub id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
}

impl From<User> for MemberSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrganizationMembers {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub members: Vec<MemberSummary>,
}

impl OrganizationMembers {
    pub fn new(org: Organization, members: Vec<User>) -> Self {
        Self {
            id: org.id,
            name: org.name,
            description: org.description,
            members: members.into_iter().map(MemberSummary::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_requires_name_and_email() {
        let ok = CreateOrganization {
            name: "Engines".to_string(),
            email: "hello@engines.example".to_string(),
            website: Some(String::new()),
            ..CreateOrganization::default()
        };
        assert!(ok.validate().is_ok());

        let no_name = CreateOrganization {
            name: String::new(),
            ..ok.clone()
        };
        assert!(no_name.validate().is_err());

        let bad_email = CreateOrganization {
            email: "engines".to_string(),
            ..ok
        };
        assert!(bad_email.validate().is_err());
    }

    #[test]
    fn test_blank_website_is_stored_as_null() {
        let new_org = NewOrganization::from(CreateOrganization {
            name: "Engines".to_string(),
            email: "hello@engines.example".to_string(),
            website: Some(String::new()),
            ..CreateOrganization::default()
        });
        assert_eq!(new_org.website, None);

        let changes = OrganizationChanges::from(UpdateOrganization {
            website: Some(String::new()),
            ..UpdateOrganization::default()
        });
        assert_eq!(changes.website, Some(None));
    }
}
