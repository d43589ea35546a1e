//! Request validation helpers

use crate::{ServiceError, ServiceResult};

/// Reject empty or whitespace-only values.
pub fn require_non_empty(field: &str, value: &str) -> ServiceResult<()> {
    if value.trim().is_empty() {
        return Err(ServiceError::InvalidRequest(format!("{} cannot be empty", field)));
    }
    Ok(())
}

/// Minimal shape check; the address becomes part of a partition key.
pub fn validate_email(email: &str) -> ServiceResult<()> {
    require_non_empty("email", email)?;
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {},
        _ => {
            return Err(ServiceError::InvalidRequest(format!("Invalid email address: '{}'", email)));
        },
    }
    if email.chars().any(char::is_whitespace) {
        return Err(ServiceError::InvalidRequest(format!(
            "Email cannot contain whitespace: '{}'",
            email
        )));
    }
    Ok(())
}

/// Progress is a percentage in `0..=100`.
pub fn validate_percentage(value: u32) -> ServiceResult<()> {
    if value > 100 {
        return Err(ServiceError::InvalidRequest(format!(
            "Progress must be between 0 and 100, got {}",
            value
        )));
    }
    Ok(())
}

/// Ratings must be finite and non-negative.
pub fn validate_rating(value: f64) -> ServiceResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ServiceError::InvalidRequest(format!("Invalid rating: {}", value)));
    }
    Ok(())
}

/// Pick the update when it carries a non-empty value, otherwise keep the current one.
pub(crate) fn merge_text(current: String, update: Option<String>) -> String {
    match update {
        Some(value) if !value.trim().is_empty() => value,
        _ => current,
    }
}

pub(crate) fn merge_optional_text(
    current: Option<String>,
    update: Option<String>,
) -> Option<String> {
    match update {
        Some(value) if !value.trim().is_empty() => Some(value),
        _ => current,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("team@x.com").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@x.com").is_err());
        assert!(validate_email("a@").is_err());
        assert!(validate_email("a b@x.com").is_err());
    }

    #[test]
    fn test_percentage_and_rating_bounds() {
        assert!(validate_percentage(0).is_ok());
        assert!(validate_percentage(100).is_ok());
        assert!(validate_percentage(101).is_err());

        assert!(validate_rating(0.0).is_ok());
        assert!(validate_rating(9.5).is_ok());
        assert!(validate_rating(-1.0).is_err());
        assert!(validate_rating(f64::NAN).is_err());
    }

    #[test]
    fn test_merge_keeps_current_on_empty() {
        assert_eq!(merge_text("old".into(), None), "old");
        assert_eq!(merge_text("old".into(), Some("  ".into())), "old");
        assert_eq!(merge_text("old".into(), Some("new".into())), "new");
        assert_eq!(merge_optional_text(None, Some("x".into())), Some("x".into()));
        assert_eq!(merge_optional_text(Some("a".into()), Some(String::new())), Some("a".into()));
    }

    #[test]
    fn test_require_non_empty_names_field() {
        let err = require_non_empty("title", " ").unwrap_err();
        assert!(err.to_string().contains("title cannot be empty"));
    }
}
