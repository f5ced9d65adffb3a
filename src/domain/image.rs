//! Image handles and uploads.
//!
//! Documents never hold image bytes, only the `{path, filename}` handle
//! the blob store returned.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidateUrl};

use crate::config::ALLOWED_IMAGE_FORMATS;
use crate::errors::{AppError, AppResult};

/// Stored location of an uploaded image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct ImageRef {
    /// Publicly reachable URL of the image
    #[validate(url(message = "\"path\" must be a valid uri"))]
    #[schema(example = "http://localhost:3000/uploads/credence/users/01HV4Z2WQXKJNM8GPQY6VBKC3D.png")]
    pub path: String,
    /// Name of the stored object inside its folder
    #[validate(length(min = 1, message = "\"filename\" is not allowed to be empty"))]
    #[schema(example = "01HV4Z2WQXKJNM8GPQY6VBKC3D.png")]
    pub filename: String,
}

impl ImageRef {
    /// Reject handles whose path is not URL-shaped.
    pub fn ensure_valid(&self) -> AppResult<()> {
        if self.path.validate_url() {
            Ok(())
        } else {
            Err(AppError::validation(format!(
                "{} is not a valid URL.",
                self.path
            )))
        }
    }
}

/// A single image file received from a multipart request.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub original_name: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Lowercase file extension, restricted to the accepted formats.
    pub fn extension(&self) -> AppResult<String> {
        let ext = self
            .original_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        if ALLOWED_IMAGE_FORMATS.contains(&ext.as_str()) {
            Ok(ext)
        } else {
            Err(AppError::validation(format!(
                "Image must be one of: {}",
                ALLOWED_IMAGE_FORMATS.join(", ")
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(name: &str) -> ImageUpload {
        ImageUpload {
            original_name: name.to_string(),
            bytes: vec![0x89, b'P', b'N', b'G'],
        }
    }

    #[test]
    fn test_accepts_allowed_extensions_case_insensitive() {
        assert_eq!(upload("me.PNG").extension().unwrap(), "png");
        assert_eq!(upload("badge.final.jpeg").extension().unwrap(), "jpeg");
    }

    #[test]
    fn test_rejects_other_formats() {
        assert!(upload("script.svg").extension().is_err());
        assert!(upload("noextension").extension().is_err());
    }

    #[test]
    fn test_image_ref_path_must_be_url() {
        let good = ImageRef {
            path: "https://cdn.example.com/credence/users/a.png".to_string(),
            filename: "a.png".to_string(),
        };
        let bad = ImageRef {
            path: "not a url".to_string(),
            filename: "a.png".to_string(),
        };

        assert!(good.ensure_valid().is_ok());
        assert!(bad.ensure_valid().is_err());
    }
}
