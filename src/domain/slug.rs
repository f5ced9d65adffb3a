//! Vanity slug derivation and normalization.
//!
//! Pure functions only; collision resolution against the user store
//! lives in `services::slug_resolver`.

use deunicode::deunicode_char;

use crate::config::{SLUG_REMOVED_CHARS, SLUG_SEPARATOR, SLUG_SUFFIX_LENGTH};

/// Pick the raw text a slug is built from.
///
/// An explicit slug wins; otherwise "first last" when both names are
/// present, else the local part of the email address.
pub fn base_source(
    explicit: Option<&str>,
    first_name: Option<&str>,
    last_name: Option<&str>,
    email: &str,
) -> String {
    if let Some(slug) = explicit.filter(|s| !s.trim().is_empty()) {
        return slug.to_string();
    }

    match (non_blank(first_name), non_blank(last_name)) {
        (Some(first), Some(last)) => format!("{} {}", first, last),
        _ => email_local_part(email).to_string(),
    }
}

/// Substring of `email` before the first `@`.
pub fn email_local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or_default()
}

/// Normalize arbitrary text into a lowercase, URL-safe slug.
///
/// Drops the fixed punctuation set, spells out a handful of symbols,
/// transliterates every other non-ASCII character, turns whitespace and
/// any other unsafe character into a single separator, and trims
/// separators from both ends.
pub fn normalize(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_separator = false;

    for ch in transliterate(input).chars() {
        let safe = ch.is_ascii_alphanumeric() || ch == '_';
        if !safe {
            pending_separator = true;
            continue;
        }

        if pending_separator && !slug.is_empty() {
            slug.push(SLUG_SEPARATOR);
        }
        pending_separator = false;
        slug.push(ch.to_ascii_lowercase());
    }

    slug
}
/// Build a collision candidate from the original base and a fresh identifier.
pub fn with_suffix(base: &str, id: &str) -> String {
    let start = id.len().saturating_sub(SLUG_SUFFIX_LENGTH);
    format!(
        "{}{}{}",
        base,
        SLUG_SEPARATOR,
        id[start..].to_ascii_lowercase()
    )
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// ASCII rendition of `input` with the removed punctuation already gone.
fn transliterate(input: &str) -> String {
    let mut ascii = String::with_capacity(input.len());

    for ch in input.chars() {
        if SLUG_REMOVED_CHARS.contains(&ch) {
            continue;
        }
        if let Some(word) = symbol_word(ch) {
            ascii.push(' ');
            ascii.push_str(word);
            ascii.push(' ');
        } else if ch.is_ascii() {
            ascii.push(ch);
        } else {
            // Unknown code points become a separator
            ascii.push_str(deunicode_char(ch).unwrap_or(" "));
        }
    }

    ascii
}

/// Symbols that read as a word inside a slug.
fn symbol_word(ch: char) -> Option<&'static str> {
    let word = match ch {
        '&' => "and",
        '|' => "or",
        '<' => "less",
        '>' => "greater",
        '$' => "dollar",
        '%' => "percent",
        '¢' => "cent",
        '£' => "pound",
        '€' => "euro",
        '¥' => "yen",
        '∞' => "infinity",
        '♥' => "love",
        _ => return None,
    };
    Some(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize("Ada Lovelace"), "ada-lovelace");
        assert_eq!(normalize("  John   Doe "), "john-doe");
    }

    #[test]
    fn test_normalize_drops_punctuation_set() {
        assert_eq!(normalize("O'Brien"), "obrien");
        assert_eq!(normalize("j.r.r. tolkien!"), "jrr-tolkien");
        assert_eq!(normalize("(dr) *who*: ~x+y~"), "dr-who-xy");
    }

    #[test]
    fn test_normalize_unsafe_chars_become_separator() {
        assert_eq!(normalize("anne/marie#smith"), "anne-marie-smith");
        assert_eq!(normalize("--already-slugged--"), "already-slugged");
        assert_eq!(normalize("snake_case ok"), "snake_case-ok");
    }

    #[test]
    fn test_normalize_folds_diacritics() {
        assert_eq!(normalize("Zoë Ångström"), "zoe-angstrom");
        assert_eq!(normalize("Łukasz Żółć"), "lukasz-zolc");
    }

    #[test]
    fn test_normalize_transliterates_other_scripts() {
        assert_eq!(normalize("Иван Петров"), "ivan-petrov");
        assert_eq!(normalize("Straße Ærø"), "strasse-aero");
    }

    #[test]
    fn test_normalize_spells_out_symbols() {
        assert_eq!(normalize("Tom & Jerry"), "tom-and-jerry");
        assert_eq!(normalize("R&D 100%"), "r-and-d-100-percent");
    }

    #[test]
    fn test_normalize_can_be_empty() {
        assert_eq!(normalize("!!! ..."), "");
    }

    #[test]
    fn test_base_source_priority() {
        assert_eq!(
            base_source(Some("Custom"), Some("Ada"), Some("Lovelace"), "a@x.com"),
            "Custom"
        );
        assert_eq!(
            base_source(None, Some("Ada"), Some("Lovelace"), "a@x.com"),
            "Ada Lovelace"
        );
        assert_eq!(base_source(None, Some("Ada"), None, "ada.l@x.com"), "ada.l");
        assert_eq!(base_source(Some("  "), None, Some(""), "bob@x.com"), "bob");
    }

    #[test]
    fn test_with_suffix_uses_last_twelve_chars() {
        let slug = with_suffix("john-doe", "01HV4Z2WQXKJNM8GPQY6VBKC3D");
        assert_eq!(slug, "john-doe-8gpqy6vbkc3d");
    }
}
