//! Certificates are global credential templates; any organization may
//! award them and none owns them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::image::ImageRef;

#[derive(Debug, Clone, PartialEq)]
pub struct Certificate {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub criteria: Vec<String>,
    pub skills: Vec<String>,
    pub image: Option<ImageRef>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateCertificate {
    #[validate(length(min = 1, message = "\"name\" is not allowed to be empty"))]
    #[schema(example = "Certified Analyst")]
    pub name: String,
    pub description: Option<String>,
    /// Ordered award criteria
    #[serde(default)]
    #[schema(example = json!(["Pass the written exam"]))]
    pub criteria: Vec<String>,
    #[serde(default)]
    #[schema(example = json!(["statistics", "sql"]))]
    pub skills: Vec<String>,
    #[validate(nested)]
    pub image: Option<ImageRef>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCertificate {
    #[validate(length(min = 1, message = "\"name\" is not allowed to be empty"))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub criteria: Option<Vec<String>>,
    pub skills: Option<Vec<String>>,
    #[validate(nested)]
    pub image: Option<ImageRef>,
}

/// Column-level changes for the certificate store
pub type CertificateChanges = UpdateCertificate;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CertificateResponse {
    #[schema(example = "01HV4Z2WQXKJNM8GPQY6VBKC3D")]
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub criteria: Vec<String>,
    pub skills: Vec<String>,
    pub image: Option<ImageRef>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Certificate> for CertificateResponse {
    fn from(cert: Certificate) -> Self {
        Self {
            id: cert.id,
            name: cert.name,
            description: cert.description,
            criteria: cert.criteria,
            skills: cert.skills,
            image: cert.image,
            created_at: cert.created_at,
            updated_at: cert.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_default_to_empty() {
        let req: CreateCertificate = serde_json::from_str(r#"{"name":"Analyst"}"#).unwrap();
        assert!(req.criteria.is_empty());
        assert!(req.skills.is_empty());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_image_path_must_be_url() {
        let req: CreateCertificate = serde_json::from_str(
            r#"{"name":"Analyst","image":{"path":"nope","filename":"a.png"}}"#,
        )
        .unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_list_order_is_preserved() {
        let req: UpdateCertificate =
            serde_json::from_str(r#"{"criteria":["b","a","c"]}"#).unwrap();
        assert_eq!(
            req.criteria,
            Some(vec!["b".to_string(), "a".to_string(), "c".to_string()])
        );
    }
}
