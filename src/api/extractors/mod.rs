//! Custom request extractors.

mod image_form;
mod validated_json;

pub use image_form::{CertificateImageField, ImageField, ImageForm, LogoField, ProfilePictureField};
pub use validated_json::ValidatedJson;
