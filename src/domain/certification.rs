//! Certifications: a certificate awarded to a user.
//!
//! The `(user_id, certificate_id)` pair is unique among active rows.
//! `accepted_at`, `rejected_at` and `expired_at` are plain settable
//! timestamps; nothing in the service layer moves a certification
//! between those states on its own.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::certificate::{Certificate, CertificateResponse};
use super::id::validate_ulid;
use super::user::{User, UserSummary};

#[derive(Debug, Clone, PartialEq)]
pub struct Certification {
    pub id: String,
    pub user_id: String,
    pub certificate_id: String,
    pub grade: Option<i32>,
    pub is_public: bool,
    pub issued_at: DateTime<Utc>,
    pub accepted_at: Option<DateTime<Utc>>,
    pub rejected_at: Option<DateTime<Utc>>,
    pub expired_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCertification {
    #[validate(custom(function = "validate_ulid", message = "\"userId\" must be a valid ULID"))]
    #[schema(example = "01HV4Z2WQXKJNM8GPQY6VBKC3D")]
    pub user_id: String,
    #[validate(custom(function = "validate_ulid", message = "\"certificateId\" must be a valid ULID"))]
    #[schema(example = "01HV4Z3A7TZ1R6Q9M2B5C8D0EF")]
    pub certificate_id: String,
    #[schema(example = 92)]
    pub grade: Option<i32>,
    /// Defaults to `true`
    pub is_public: Option<bool>,
    /// Defaults to the creation time
    pub issued_at: Option<DateTime<Utc>>,
    pub accepted_at: Option<DateTime<Utc>>,
    pub rejected_at: Option<DateTime<Utc>>,
    pub expired_at: Option<DateTime<Utc>>,
}

/// Partial update; explicit `null` clears a nullable column
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCertification {
    #[validate(custom(function = "validate_ulid", message = "\"userId\" must be a valid ULID"))]
    pub user_id: Option<String>,
    #[validate(custom(function = "validate_ulid", message = "\"certificateId\" must be a valid ULID"))]
    pub certificate_id: Option<String>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<i32>)]
    pub grade: Option<Option<i32>>,
    pub is_public: Option<bool>,
    pub issued_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub accepted_at: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub rejected_at: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub expired_at: Option<Option<DateTime<Utc>>>,
}

/// Column-level changes for the certification store
pub type CertificationChanges = UpdateCertification;

/// Distinguish an absent key (`None`) from an explicit `null` (`Some(None)`).
fn present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCertification {
    pub user_id: String,
    pub certificate_id: String,
    pub grade: Option<i32>,
    pub is_public: bool,
    pub issued_at: DateTime<Utc>,
    pub accepted_at: Option<DateTime<Utc>>,
    pub rejected_at: Option<DateTime<Utc>>,
    pub expired_at: Option<DateTime<Utc>>,
}

impl NewCertification {
    pub fn from_request(req: CreateCertification, now: DateTime<Utc>) -> Self {
        Self {
            user_id: req.user_id,
            certificate_id: req.certificate_id,
            grade: req.grade,
            is_public: req.is_public.unwrap_or(true),
            issued_at: req.issued_at.unwrap_or(now),
            accepted_at: req.accepted_at,
            rejected_at: req.rejected_at,
            expired_at: req.expired_at,
        }
    }
}

/// Holder of a certification: bare id, or the populated user.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub enum HolderRef {
    #[serde(rename = "userId")]
    Id(String),
    #[serde(rename = "user")]
    Populated(UserSummary),
}

/// Awarded certificate: bare id, or the populated certificate.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub enum AwardRef {
    #[serde(rename = "certificateId")]
    Id(String),
    #[serde(rename = "certificate")]
    Populated(CertificateResponse),
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CertificationResponse {
    #[schema(example = "01HV4Z5B0K8W3M1N7P2Q4R6S9T")]
    pub id: String,
    #[serde(flatten)]
    pub holder: HolderRef,
    #[serde(flatten)]
    pub award: AwardRef,
    pub grade: Option<i32>,
    pub is_public: bool,
    pub issued_at: DateTime<Utc>,
    pub accepted_at: Option<DateTime<Utc>>,
    pub rejected_at: Option<DateTime<Utc>>,
    pub expired_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CertificationResponse {
    /// Replace the holder id with the user's summary.
    pub fn with_user(mut self, user: Option<User>) -> Self {
        if let Some(user) = user {
            self.holder = HolderRef::Populated(user.into());
        }
        self
    }

    /// Replace the certificate id with the certificate itself.
    pub fn with_certificate(mut self, certificate: Option<Certificate>) -> Self {
        if let Some(certificate) = certificate {
            self.award = AwardRef::Populated(certificate.into());
        }
        self
    }
}

impl From<Certification> for CertificationResponse {
    fn from(c: Certification) -> Self {
        Self {
            id: c.id,
            holder: HolderRef::Id(c.user_id),
            award: AwardRef::Id(c.certificate_id),
            grade: c.grade,
            is_public: c.is_public,
            issued_at: c.issued_at,
            accepted_at: c.accepted_at,
            rejected_at: c.rejected_at,
            expired_at: c.expired_at,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const USER_ID: &str = "01HV4Z2WQXKJNM8GPQY6VBKC3D";
    const CERT_ID: &str = "01HV4Z3A7TZ1R6Q9M2B5C8D0EF";

    fn certification() -> Certification {
        let now = Utc::now();
        Certification {
            id: "01HV4Z5B0K8W3M1N7P2Q4R6S9T".to_string(),
            user_id: USER_ID.to_string(),
            certificate_id: CERT_ID.to_string(),
            grade: Some(90),
            is_public: true,
            issued_at: now,
            accepted_at: None,
            rejected_at: None,
            expired_at: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    #[test]
    fn test_create_defaults() {
        let now = Utc::now();
        let req = CreateCertification {
            user_id: USER_ID.to_string(),
            certificate_id: CERT_ID.to_string(),
            ..CreateCertification::default()
        };
        let new_cert = NewCertification::from_request(req, now);

        assert!(new_cert.is_public);
        assert_eq!(new_cert.issued_at, now);
    }

    #[test]
    fn test_create_honours_is_public() {
        let req = CreateCertification {
            user_id: USER_ID.to_string(),
            certificate_id: CERT_ID.to_string(),
            is_public: Some(false),
            ..CreateCertification::default()
        };
        assert!(!NewCertification::from_request(req, Utc::now()).is_public);
    }

    #[test]
    fn test_ids_must_be_ulids() {
        let req = CreateCertification {
            user_id: "not-a-ulid".to_string(),
            certificate_id: CERT_ID.to_string(),
            ..CreateCertification::default()
        };
        assert!(req.validate().is_err());

        let update = UpdateCertification {
            certificate_id: Some("01hv4z3a7tz1r6q9m2b5c8d0ef".to_string()),
            ..UpdateCertification::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_update_distinguishes_null_from_absent() {
        let update: UpdateCertification =
            serde_json::from_str(r#"{"acceptedAt":null,"grade":75}"#).unwrap();

        assert_eq!(update.accepted_at, Some(None));
        assert_eq!(update.rejected_at, None);
        assert_eq!(update.grade, Some(Some(75)));
    }

    #[test]
    fn test_response_keeps_ids_when_not_populated() {
        let json = serde_json::to_value(CertificationResponse::from(certification())).unwrap();

        assert_eq!(json["userId"], USER_ID);
        assert_eq!(json["certificateId"], CERT_ID);
        assert!(json.get("user").is_none());
        assert!(json.get("certificate").is_none());
    }

    #[test]
    fn test_populated_relation_replaces_id_key() {
        let now = Utc::now();
        let certificate = Certificate {
            id: CERT_ID.to_string(),
            name: "Analyst".to_string(),
            description: None,
            criteria: vec![],
            skills: vec!["sql".to_string()],
            image: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        let json = serde_json::to_value(
            CertificationResponse::from(certification()).with_certificate(Some(certificate)),
        )
        .unwrap();

        assert_eq!(json["certificate"]["name"], "Analyst");
        assert!(json.get("certificateId").is_none());
        assert_eq!(json["userId"], USER_ID);
    }
}
