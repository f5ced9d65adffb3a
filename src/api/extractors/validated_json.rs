//! Validated JSON extractor - Combines deserialization with validation.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::errors::AppError;

/// Validated JSON extractor that automatically validates requests.
///
/// Malformed bodies and rule violations both become a 400 with the
/// first offending field's message.
///
/// # Example
///
/// ```rust,ignore
/// use credence::api::extractors::ValidatedJson;
/// use credence::domain::CreateOrganization;
///
/// async fn create(ValidatedJson(payload): ValidatedJson<CreateOrganization>) {
///     // payload is already validated
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        value
            .validate()
            .map_err(|e| AppError::validation(first_message(&e)))?;

        Ok(ValidatedJson(value))
    }
}

/// Message of the first failing rule, fields visited in name order.
pub(crate) fn first_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.errors().iter().collect();
    fields.sort_by_key(|(field, _)| *field);

    for (field, kind) in fields {
        let message = match kind {
            ValidationErrorsKind::Field(errs) => errs.first().map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("\"{}\" is invalid", field))
            }),
            ValidationErrorsKind::Struct(nested) => Some(first_message(nested)),
            ValidationErrorsKind::List(items) => {
                items.values().next().map(|nested| first_message(nested))
            }
        };

        if let Some(message) = message {
            return message;
        }
    }

    "Invalid request body".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CreateCertificate, ImageRef, LoginUser};

    #[test]
    fn test_first_message_uses_rule_message() {
        let login = LoginUser {
            email: "ada@x.com".to_string(),
            password: "abc".to_string(),
        };
        let errors = login.validate().unwrap_err();

        assert_eq!(
            first_message(&errors),
            "\"password\" length must be at least 5 characters long"
        );
    }

    #[test]
    fn test_first_message_descends_into_nested() {
        let cert = CreateCertificate {
            name: "Analyst".to_string(),
            image: Some(ImageRef {
                path: "nope".to_string(),
                filename: "a.png".to_string(),
            }),
            ..CreateCertificate::default()
        };
        let errors = cert.validate().unwrap_err();

        assert_eq!(first_message(&errors), "\"path\" must be a valid uri");
    }
}
