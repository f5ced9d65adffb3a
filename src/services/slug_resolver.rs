//! Vanity slug resolution against the user store.
//!
//! Runs once per registration. Existence is checked across every user,
//! deleted ones included, and every retry is built from the original
//! base rather than from the previous candidate.

use std::sync::Arc;

use crate::config::{MSG_SLUG_EXHAUSTED, SLUG_MAX_ATTEMPTS};
use crate::domain::{id::new_id, slug};
use crate::errors::{AppError, AppResult};
use crate::infra::UserRepository;

pub struct SlugResolver {
    users: Arc<dyn UserRepository>,
}

impl SlugResolver {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Normalized base slug for a registration.
    ///
    /// Falls back to the email local part when the preferred source
    /// normalizes to nothing.
    pub fn base(
        explicit: Option<&str>,
        first_name: Option<&str>,
        last_name: Option<&str>,
        email: &str,
    ) -> AppResult<String> {
        let base = slug::normalize(&slug::base_source(explicit, first_name, last_name, email));
        if !base.is_empty() {
            return Ok(base);
        }

        let fallback = slug::normalize(slug::email_local_part(email));
        if fallback.is_empty() {
            return Err(AppError::validation(
                "\"vanitySlug\" could not be derived from the name or email",
            ));
        }
        Ok(fallback)
    }

    /// Find a free slug, trying `base` first and then suffixed variants.
    pub async fn resolve(&self, base: &str) -> AppResult<String> {
        for attempt in 0..SLUG_MAX_ATTEMPTS {
            let candidate = if attempt == 0 {
                base.to_string()
            } else {
                slug::with_suffix(base, &new_id())
            };

            if self.users.slug_owner(&candidate).await?.is_none() {
                return Ok(candidate);
            }

            tracing::debug!(attempt, candidate = %candidate, "Vanity slug taken");
        }

        tracing::warn!(base, "Vanity slug attempts exhausted");
        Err(AppError::conflict(MSG_SLUG_EXHAUSTED))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::MockUserRepository;

    #[test]
    fn test_base_prefers_name() {
        let base = SlugResolver::base(None, Some("Ada"), Some("Lovelace"), "ada@x.com").unwrap();
        assert_eq!(base, "ada-lovelace");
    }

    #[test]
    fn test_base_falls_back_to_email_when_name_normalizes_empty() {
        let base = SlugResolver::base(Some("!!!"), None, None, "grace.hopper@x.com").unwrap();
        assert_eq!(base, "gracehopper");
    }

    #[test]
    fn test_base_rejects_when_nothing_usable() {
        assert!(SlugResolver::base(Some("..."), None, None, "...@x.com").is_err());
    }

    #[tokio::test]
    async fn test_free_base_is_used_as_is() {
        let mut users = MockUserRepository::new();
        users
            .expect_slug_owner()
            .withf(|slug| slug == "john-doe")
            .times(1)
            .returning(|_| Ok(None));

        let resolver = SlugResolver::new(Arc::new(users));
        assert_eq!(resolver.resolve("john-doe").await.unwrap(), "john-doe");
    }

    #[tokio::test]
    async fn test_collision_appends_suffix_to_original_base() {
        let mut users = MockUserRepository::new();
        users
            .expect_slug_owner()
            .withf(|slug| slug == "john-doe")
            .times(1)
            .returning(|_| Ok(Some("01HV4Z2WQXKJNM8GPQY6VBKC3D".to_string())));
        users
            .expect_slug_owner()
            .withf(|slug| slug.starts_with("john-doe-"))
            .times(1)
            .returning(|_| Ok(None));

        let resolver = SlugResolver::new(Arc::new(users));
        let slug = resolver.resolve("john-doe").await.unwrap();

        let suffix = slug.strip_prefix("john-doe-").unwrap();
        assert_eq!(suffix.len(), 12);
        assert_eq!(suffix, suffix.to_ascii_lowercase());
    }

    #[tokio::test]
    async fn test_gives_up_after_ten_checks() {
        let mut users = MockUserRepository::new();
        users
            .expect_slug_owner()
            .times(SLUG_MAX_ATTEMPTS)
            .returning(|_| Ok(Some("01HV4Z2WQXKJNM8GPQY6VBKC3D".to_string())));

        let resolver = SlugResolver::new(Arc::new(users));
        let err = resolver.resolve("john-doe").await.unwrap_err();

        assert!(matches!(err, AppError::Conflict(ref msg) if msg == MSG_SLUG_EXHAUSTED));
    }
}
