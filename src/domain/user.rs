//! User domain entity, commands and response views.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::image::ImageRef;
use super::rules::{blank_to_null, validate_url_or_blank};
use crate::config::{ROLE_ADMIN, ROLE_PROFESSIONAL};

/// User roles enumeration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    #[default]
    Professional,
}

impl UserRole {
    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => ROLE_ADMIN,
            UserRole::Professional => ROLE_PROFESSIONAL,
        }
    }
}

impl From<&str> for UserRole {
    fn from(s: &str) -> Self {
        match s {
            ROLE_ADMIN => UserRole::Admin,
            _ => UserRole::Professional,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User domain entity
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub password_hash: String,
    pub current_employer: Option<String>,
    pub current_position: Option<String>,
    pub birth_year: Option<i32>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub zip_code: Option<String>,
    pub bio: Option<String>,
    pub website_url: Option<String>,
    pub fb_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub x_url: Option<String>,
    pub profile_pic: Option<ImageRef>,
    /// Weak reference to an organization; no ownership implied
    pub organization_id: Option<String>,
    pub last_login: Option<DateTime<Utc>>,
    pub vanity_slug: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Soft delete timestamp (None = active, Some = deleted)
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// Check if user is active (not deleted)
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }

    pub fn is_member_of(&self, organization_id: &str) -> bool {
        self.organization_id.as_deref() == Some(organization_id)
    }
}

/// Registration request body
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUser {
    #[schema(example = "Ada")]
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    #[schema(example = "Lovelace")]
    pub last_name: Option<String>,
    #[validate(email(message = "\"email\" must be a valid email"))]
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[validate(length(min = 5, message = "\"password\" length must be at least 5 characters long"))]
    #[schema(example = "secret1", min_length = 5)]
    pub password: String,
    /// Preferred vanity slug; derived from the name or email when omitted
    #[schema(example = "ada-lovelace")]
    pub vanity_slug: Option<String>,
    /// Defaults to `professional`
    pub role: Option<UserRole>,
    pub current_employer: Option<String>,
    pub current_position: Option<String>,
    #[schema(example = 1990)]
    pub birth_year: Option<i32>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub zip_code: Option<String>,
    pub bio: Option<String>,
    #[validate(custom(function = "validate_url_or_blank", message = "\"websiteUrl\" must be a valid uri"))]
    pub website_url: Option<String>,
    #[validate(custom(function = "validate_url_or_blank", message = "\"fbUrl\" must be a valid uri"))]
    pub fb_url: Option<String>,
    #[validate(custom(function = "validate_url_or_blank", message = "\"linkedinUrl\" must be a valid uri"))]
    pub linkedin_url: Option<String>,
    #[validate(custom(function = "validate_url_or_blank", message = "\"xUrl\" must be a valid uri"))]
    pub x_url: Option<String>,
}

/// Login request body
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginUser {
    #[validate(email(message = "\"email\" must be a valid email"))]
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[validate(length(min = 5, message = "\"password\" length must be at least 5 characters long"))]
    #[schema(example = "secret1")]
    pub password: String,
}

/// Partial update request body; empty strings clear nullable fields
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    #[validate(email(message = "\"email\" must be a valid email"))]
    pub email: Option<String>,
    #[validate(length(min = 5, message = "\"password\" length must be at least 5 characters long"))]
    pub password: Option<String>,
    pub vanity_slug: Option<String>,
    pub current_employer: Option<String>,
    pub current_position: Option<String>,
    pub birth_year: Option<i32>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub zip_code: Option<String>,
    pub bio: Option<String>,
    #[validate(custom(function = "validate_url_or_blank", message = "\"websiteUrl\" must be a valid uri"))]
    pub website_url: Option<String>,
    #[validate(custom(function = "validate_url_or_blank", message = "\"fbUrl\" must be a valid uri"))]
    pub fb_url: Option<String>,
    #[validate(custom(function = "validate_url_or_blank", message = "\"linkedinUrl\" must be a valid uri"))]
    pub linkedin_url: Option<String>,
    #[validate(custom(function = "validate_url_or_blank", message = "\"xUrl\" must be a valid uri"))]
    pub x_url: Option<String>,
}

impl UpdateUser {
    /// True when the body carried no recognised field at all
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.middle_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.vanity_slug.is_none()
            && self.current_employer.is_none()
            && self.current_position.is_none()
            && self.birth_year.is_none()
            && self.country.is_none()
            && self.city.is_none()
            && self.zip_code.is_none()
            && self.bio.is_none()
            && self.website_url.is_none()
            && self.fb_url.is_none()
            && self.linkedin_url.is_none()
            && self.x_url.is_none()
    }
}

/// Fully-resolved insert for the user store
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub password_hash: String,
    pub vanity_slug: String,
    pub role: UserRole,
    pub current_employer: Option<String>,
    pub current_position: Option<String>,
    pub birth_year: Option<i32>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub zip_code: Option<String>,
    pub bio: Option<String>,
    pub website_url: Option<String>,
    pub fb_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub x_url: Option<String>,
}

impl NewUser {
    /// Combine a validated registration with its resolved slug and hash
    pub fn from_registration(req: RegisterUser, vanity_slug: String, password_hash: String) -> Self {
        let clean = |v: Option<String>| blank_to_null(v).flatten();
        Self {
            first_name: req.first_name,
            middle_name: clean(req.middle_name),
            last_name: req.last_name,
            email: req.email,
            password_hash,
            vanity_slug,
            role: req.role.unwrap_or_default(),
            current_employer: clean(req.current_employer),
            current_position: clean(req.current_position),
            birth_year: req.birth_year,
            country: req.country,
            city: req.city,
            zip_code: req.zip_code,
            bio: req.bio,
            website_url: clean(req.website_url),
            fb_url: clean(req.fb_url),
            linkedin_url: clean(req.linkedin_url),
            x_url: clean(req.x_url),
        }
    }
}

/// Column-level changes for the user store.
///
/// `None` leaves a column untouched; for nullable columns `Some(None)`
/// writes NULL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserChanges {
    pub first_name: Option<String>,
    pub middle_name: Option<Option<String>>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub vanity_slug: Option<String>,
    pub current_employer: Option<Option<String>>,
    pub current_position: Option<Option<String>>,
    pub birth_year: Option<i32>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub zip_code: Option<String>,
    pub bio: Option<String>,
    pub website_url: Option<Option<String>>,
    pub fb_url: Option<Option<String>>,
    pub linkedin_url: Option<Option<String>>,
    pub x_url: Option<Option<String>>,
    pub profile_pic: Option<ImageRef>,
    pub organization_id: Option<String>,
    pub last_login: Option<DateTime<Utc>>,
}

impl UserChanges {
    /// Translate an update body; slug and password are resolved by the caller
    pub fn from_update(req: UpdateUser, vanity_slug: Option<String>, password_hash: Option<String>) -> Self {
        Self {
            first_name: req.first_name,
            middle_name: blank_to_null(req.middle_name),
            last_name: req.last_name,
            email: req.email,
            password_hash,
            vanity_slug,
            current_employer: blank_to_null(req.current_employer),
            current_position: blank_to_null(req.current_position),
            birth_year: req.birth_year,
            country: req.country,
            city: req.city,
            zip_code: req.zip_code,
            bio: req.bio,
            website_url: blank_to_null(req.website_url),
            fb_url: blank_to_null(req.fb_url),
            linkedin_url: blank_to_null(req.linkedin_url),
            x_url: blank_to_null(req.x_url),
            ..Self::default()
        }
    }
}

/// User view safe to return to clients (no password hash)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[schema(example = "01HV4Z2WQXKJNM8GPQY6VBKC3D")]
    pub id: String,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub current_employer: Option<String>,
    pub current_position: Option<String>,
    pub birth_year: Option<i32>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub zip_code: Option<String>,
    pub bio: Option<String>,
    pub website_url: Option<String>,
    pub fb_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub x_url: Option<String>,
    pub profile_pic: Option<ImageRef>,
    pub organization_id: Option<String>,
    pub last_login: Option<DateTime<Utc>>,
    #[schema(example = "ada-lovelace")]
    pub vanity_slug: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            middle_name: user.middle_name,
            last_name: user.last_name,
            email: user.email,
            current_employer: user.current_employer,
            current_position: user.current_position,
            birth_year: user.birth_year,
            country: user.country,
            city: user.city,
            zip_code: user.zip_code,
            bio: user.bio,
            website_url: user.website_url,
            fb_url: user.fb_url,
            linkedin_url: user.linkedin_url,
            x_url: user.x_url,
            profile_pic: user.profile_pic,
            organization_id: user.organization_id,
            last_login: user.last_login,
            vanity_slug: user.vanity_slug,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Compact user view embedded in member lists and certifications
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub profile_pic: Option<ImageRef>,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            middle_name: user.middle_name,
            last_name: user.last_name,
            email: user.email,
            profile_pic: user.profile_pic,
        }
    }
}

/// Result of resolving an email or vanity slug to a user id
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserIdResponse {
    pub user_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing_defaults_to_professional() {
        assert_eq!(UserRole::from("admin"), UserRole::Admin);
        assert_eq!(UserRole::from("professional"), UserRole::Professional);
        assert_eq!(UserRole::from("superuser"), UserRole::Professional);
        assert_eq!(UserRole::default(), UserRole::Professional);
        assert!(UserRole::Admin.is_admin());
    }

    #[test]
    fn test_role_serde_is_lowercase() {
        assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), "\"admin\"");
        let parsed: UserRole = serde_json::from_str("\"professional\"").unwrap();
        assert_eq!(parsed, UserRole::Professional);
        assert!(serde_json::from_str::<UserRole>("\"guest\"").is_err());
    }

    #[test]
    fn test_register_validation() {
        let ok = RegisterUser {
            email: "ada@x.com".to_string(),
            password: "secret1".to_string(),
            linkedin_url: Some(String::new()),
            ..RegisterUser::default()
        };
        assert!(ok.validate().is_ok());

        let bad_email = RegisterUser {
            email: "ada-at-x".to_string(),
            ..ok.clone()
        };
        assert!(bad_email.validate().is_err());

        let short_password = RegisterUser {
            password: "abc".to_string(),
            ..ok.clone()
        };
        assert!(short_password.validate().is_err());

        let bad_url = RegisterUser {
            x_url: Some("twitter".to_string()),
            ..ok
        };
        assert!(bad_url.validate().is_err());
    }

    #[test]
    fn test_update_is_empty() {
        assert!(UpdateUser::default().is_empty());
        let update = UpdateUser {
            bio: Some("Analyst".to_string()),
            ..UpdateUser::default()
        };
        assert!(!update.is_empty());
    }

    #[test]
    fn test_changes_clear_blank_nullable_fields() {
        let changes = UserChanges::from_update(
            UpdateUser {
                middle_name: Some(String::new()),
                city: Some("London".to_string()),
                ..UpdateUser::default()
            },
            None,
            None,
        );

        assert_eq!(changes.middle_name, Some(None));
        assert_eq!(changes.city, Some("London".to_string()));
        assert_eq!(changes.vanity_slug, None);
    }

    #[test]
    fn test_response_omits_password() {
        let now = Utc::now();
        let user = User {
            id: "01HV4Z2WQXKJNM8GPQY6VBKC3D".to_string(),
            first_name: Some("Ada".to_string()),
            middle_name: None,
            last_name: Some("Lovelace".to_string()),
            email: "ada@x.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            current_employer: None,
            current_position: None,
            birth_year: None,
            country: None,
            city: None,
            zip_code: None,
            bio: None,
            website_url: None,
            fb_url: None,
            linkedin_url: None,
            x_url: None,
            profile_pic: None,
            organization_id: None,
            last_login: None,
            vanity_slug: "ada-lovelace".to_string(),
            role: UserRole::Professional,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        let json = serde_json::to_value(UserResponse::from(user)).unwrap();
        assert_eq!(json["vanitySlug"], "ada-lovelace");
        assert!(json.get("password").is_none());
        assert!(json.get("passwordHash").is_none());
        assert!(!json.to_string().contains("argon2"));
    }
}
