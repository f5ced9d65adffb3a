//! Generator-issued identifiers.
//!
//! Every entity is keyed by a ULID rendered as 26 Crockford base32
//! characters, which sorts lexicographically by creation time.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use ulid::Ulid;
use validator::ValidationError;

use crate::config::ID_PATTERN;
use crate::errors::{AppError, AppResult};

static ID_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(ID_PATTERN).expect("identifier pattern is a valid regex"));

/// Issue a fresh identifier.
pub fn new_id() -> String {
    Ulid::new().to_string()
}

/// Check that `value` has the shape of a generator-issued identifier.
pub fn is_valid_id(value: &str) -> bool {
    ID_REGEX.is_match(value)
}

/// Validate a path or body identifier, naming `field` in the error.
pub fn ensure_valid_id(field: &str, value: &str) -> AppResult<()> {
    if is_valid_id(value) {
        Ok(())
    } else {
        Err(AppError::validation(format!(
            "\"{}\" must be a valid ULID",
            field
        )))
    }
}

/// `validator` custom rule for identifier fields.
pub fn validate_ulid(value: &str) -> Result<(), ValidationError> {
    if is_valid_id(value) {
        Ok(())
    } else {
        let mut err = ValidationError::new("ulid");
        err.message = Some(Cow::Borrowed("must be a valid ULID"));
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ID_LENGTH;

    #[test]
    fn test_new_id_matches_pattern() {
        let id = new_id();
        assert_eq!(id.len(), ID_LENGTH);
        assert!(is_valid_id(&id));
    }

    #[test]
    fn test_ids_sort_by_creation() {
        let first = new_id();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = new_id();
        assert!(first < second);
    }

    #[test]
    fn test_rejects_excluded_letters_and_lowercase() {
        // I, L, O and U are not part of the Crockford alphabet
        assert!(!is_valid_id("01HV4Z2WQXKJNM8GPQY6VBKC3I"));
        assert!(!is_valid_id("01HV4Z2WQXKJNM8GPQY6VBKC3U"));
        assert!(!is_valid_id("01hv4z2wqxkjnm8gpqy6vbkc3d"));
        assert!(!is_valid_id("01HV4Z2WQXKJNM8GPQY6VBKC3"));
        assert!(is_valid_id("01HV4Z2WQXKJNM8GPQY6VBKC3D"));
    }

    #[test]
    fn test_ensure_valid_id_names_field() {
        let err = ensure_valid_id("userId", "nope").unwrap_err();
        assert_eq!(err.to_string(), "\"userId\" must be a valid ULID");
    }
}
