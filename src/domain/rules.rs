//! Field rules shared by several request bodies.

use std::borrow::Cow;

use chrono::{Datelike, Utc};
use validator::{ValidateUrl, ValidationError};

use crate::config::MIN_BIRTH_YEAR;
use crate::errors::{AppError, AppResult};

/// Optional link fields accept a URL or an empty string (which clears them).
pub fn validate_url_or_blank(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || value.validate_url() {
        Ok(())
    } else {
        let mut err = ValidationError::new("url");
        err.message = Some(Cow::Borrowed("must be a valid uri"));
        Err(err)
    }
}

/// Birth year must lie between 1900 and the current year.
pub fn ensure_birth_year(year: Option<i32>) -> AppResult<()> {
    let Some(year) = year else {
        return Ok(());
    };

    let current = Utc::now().year();
    if (MIN_BIRTH_YEAR..=current).contains(&year) {
        Ok(())
    } else {
        Err(AppError::validation(format!(
            "\"birthYear\" must be between {} and {}",
            MIN_BIRTH_YEAR, current
        )))
    }
}

/// Empty strings on nullable fields mean "clear".
///
/// `None` leaves the field untouched, `Some(None)` clears it.
pub fn blank_to_null(value: Option<String>) -> Option<Option<String>> {
    value.map(|v| if v.trim().is_empty() { None } else { Some(v) })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_or_blank() {
        assert!(validate_url_or_blank("").is_ok());
        assert!(validate_url_or_blank("https://linkedin.com/in/ada").is_ok());
        assert!(validate_url_or_blank("linkedin").is_err());
    }

    #[test]
    fn test_birth_year_bounds() {
        assert!(ensure_birth_year(None).is_ok());
        assert!(ensure_birth_year(Some(1900)).is_ok());
        assert!(ensure_birth_year(Some(1899)).is_err());
        assert!(ensure_birth_year(Some(Utc::now().year() + 1)).is_err());
    }

    #[test]
    fn test_blank_to_null() {
        assert_eq!(blank_to_null(None), None);
        assert_eq!(blank_to_null(Some(String::new())), Some(None));
        assert_eq!(
            blank_to_null(Some("Acme".to_string())),
            Some(Some("Acme".to_string()))
        );
    }
}
