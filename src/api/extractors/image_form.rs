//! Single-image multipart extractor.
//!
//! Each upload route names its own form field; the field is carried as
//! a type parameter so handlers stay declarative.

use std::marker::PhantomData;

use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
};

use crate::config::{FIELD_CERTIFICATE_IMAGE, FIELD_LOGO, FIELD_PROFILE_PICTURE};
use crate::domain::ImageUpload;
use crate::errors::AppError;

/// Names the multipart field an [`ImageForm`] reads.
pub trait ImageField: Send + Sync {
    const NAME: &'static str;
}

pub struct ProfilePictureField;
pub struct CertificateImageField;
pub struct LogoField;

impl ImageField for ProfilePictureField {
    const NAME: &'static str = FIELD_PROFILE_PICTURE;
}

impl ImageField for CertificateImageField {
    const NAME: &'static str = FIELD_CERTIFICATE_IMAGE;
}

impl ImageField for LogoField {
    const NAME: &'static str = FIELD_LOGO;
}

/// The file sent in field `F::NAME`; other fields are ignored.
pub struct ImageForm<F: ImageField> {
    pub upload: ImageUpload,
    _field: PhantomData<F>,
}

#[async_trait]
impl<S, F> FromRequest<S> for ImageForm<F>
where
    S: Send + Sync,
    F: ImageField,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::validation(e.body_text()))?
        {
            if field.name() != Some(F::NAME) {
                continue;
            }

            let original_name = field.file_name().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::validation(e.body_text()))?;

            let upload = ImageUpload {
                original_name,
                bytes: bytes.to_vec(),
            };
            // Reject the format before anything reaches the blob store
            upload.extension()?;

            return Ok(Self {
                upload,
                _field: PhantomData,
            });
        }

        Err(AppError::validation(format!(
            "\"{}\" file is required",
            F::NAME
        )))
    }
}
