//! Shortcode generation and validation utilities.
//!
//! Provides random code generation over a 62-symbol alphabet, the
//! time-derived fallback code, and validation for user-provided codes.

use crate::error::AppError;
use crate::utils::base36;
use chrono::{DateTime, Utc};
use rand::Rng;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Symbols used for generated codes.
pub const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Length of generated codes unless configured otherwise.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Length of the random suffix appended to fallback codes.
pub const FALLBACK_SUFFIX_LENGTH: usize = 3;

pub const MIN_CUSTOM_LENGTH: usize = 3;
pub const MAX_CUSTOM_LENGTH: usize = 20;

/// Characters allowed in custom shortcodes.
pub static SHORTCODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("shortcode pattern is valid"));

/// Generates a random code of `length` symbols drawn from [`CHARSET`].
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(6);
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code(length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// Builds a code from the Unix time in milliseconds (base36) followed by a
/// short random suffix.
///
/// Used once random generation has exhausted its attempts. The result is not
/// checked against existing records here.
pub fn fallback_code(now: DateTime<Utc>) -> String {
    let millis = u64::try_from(now.timestamp_millis()).unwrap_or_default();
    format!(
        "{}{}",
        base36::encode_u64(millis),
        generate_code(FALLBACK_SUFFIX_LENGTH)
    )
}

/// Validates a user-provided custom shortcode.
///
/// # Rules
///
/// - Length: 3-20 characters
/// - Allowed characters: letters, digits, hyphens, underscores
///
/// Uniqueness is checked by the allocator, not here.
///
/// # Errors
///
/// Returns [`AppError::InvalidFormat`] if any rule is violated.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_custom_code("my-link_2024").is_ok());
/// assert!(validate_custom_code("ab").is_err());       // Too short
/// assert!(validate_custom_code("my code").is_err());  // Space
/// ```
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    let length = code.chars().count();
    if !(MIN_CUSTOM_LENGTH..=MAX_CUSTOM_LENGTH).contains(&length) {
        return Err(AppError::invalid_format(
            "Shortcode must be between 3 and 20 characters",
            json!({ "shortcode": code, "provided_length": length }),
        ));
    }

    if !SHORTCODE_PATTERN.is_match(code) {
        return Err(AppError::invalid_format(
            "Shortcode can only contain letters, numbers, hyphens, and underscores",
            json!({ "shortcode": code }),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashSet;

    #[test]
    fn test_charset_has_62_symbols() {
        let unique: HashSet<_> = CHARSET.iter().collect();
        assert_eq!(CHARSET.len(), 62);
        assert_eq!(unique.len(), 62);
    }

    #[test]
    fn test_generate_code_has_requested_length() {
        assert_eq!(generate_code(DEFAULT_CODE_LENGTH).len(), 6);
        assert_eq!(generate_code(10).len(), 10);
        assert!(generate_code(0).is_empty());
    }

    #[test]
    fn test_generate_code_alphanumeric_only() {
        for _ in 0..200 {
            let code = generate_code(DEFAULT_CODE_LENGTH);
            assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_generate_code_produces_varied_codes() {
        let codes: HashSet<_> = (0..1000).map(|_| generate_code(DEFAULT_CODE_LENGTH)).collect();
        assert!(codes.len() > 990);
    }

    #[test]
    fn test_fallback_code_shape() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let code = fallback_code(now);

        assert!(code.starts_with("loyw3v28"));
        assert_eq!(code.len(), "loyw3v28".len() + FALLBACK_SUFFIX_LENGTH);
        assert!(code[8..].chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_validate_boundaries() {
        assert!(validate_custom_code("abc").is_ok());
        assert!(validate_custom_code("a".repeat(20).as_str()).is_ok());
        assert!(validate_custom_code("ab").is_err());
        assert!(validate_custom_code("a".repeat(21).as_str()).is_err());
    }

    #[test]
    fn test_validate_allowed_characters() {
        assert!(validate_custom_code("My-Code_42").is_ok());
        assert!(validate_custom_code("UPPER").is_ok());
        assert!(validate_custom_code("-lead").is_ok());
    }

    #[test]
    fn test_validate_too_short_message() {
        let err = validate_custom_code("ab").unwrap_err();
        assert!(matches!(err, AppError::InvalidFormat { .. }));
        assert!(err.to_string().contains("between 3 and 20"));
    }

    #[test]
    fn test_validate_rejects_special_characters() {
        for code in ["my code", "my.code", "slash/code", "emoji😀x", "at@sign"] {
            let err = validate_custom_code(code).unwrap_err();
            assert!(
                err.to_string().contains("letters, numbers"),
                "'{}' should be rejected for its characters",
                code
            );
        }
    }

    #[test]
    fn test_validate_empty_string() {
        assert!(validate_custom_code("").is_err());
    }
}
