use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::errors::ValidationError;

/// Constraint checks run over an already-deserialized value.
///
/// `check` walks the shape's fields and returns the first violation, with
/// the field path built up relative to the shape's own root.
pub trait Validate {
    fn check(&self) -> Result<(), ValidationError>;
}

// Deliberately loose: one `@`, a dot in the domain part, no whitespace.
// Mailbox-grade parsing belongs to the mail service, not the contract layer.
static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));

pub(crate) fn non_empty(path: &str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::constraint(
            path,
            "must be a non-empty string",
            value,
        ));
    }
    Ok(())
}

pub(crate) fn at_least(path: &str, value: f64, min: f64) -> Result<(), ValidationError> {
    if value < min {
        return Err(ValidationError::constraint(
            path,
            format!("must be >= {min}"),
            value,
        ));
    }
    Ok(())
}

pub(crate) fn int_at_least(path: &str, value: i64, min: i64) -> Result<(), ValidationError> {
    if value < min {
        return Err(ValidationError::constraint(
            path,
            format!("must be >= {min}"),
            value,
        ));
    }
    Ok(())
}

pub(crate) fn within(path: &str, value: f64, min: f64, max: f64) -> Result<(), ValidationError> {
    at_least(path, value, min)?;
    if value > max {
        return Err(ValidationError::constraint(
            path,
            format!("must be <= {max}"),
            value,
        ));
    }
    Ok(())
}

pub(crate) fn email(path: &str, value: &str) -> Result<(), ValidationError> {
    if !EMAIL.is_match(value) {
        return Err(ValidationError::constraint(
            path,
            "must be a valid email address",
            value,
        ));
    }
    Ok(())
}

pub(crate) fn absolute_uri(path: &str, value: &str) -> Result<(), ValidationError> {
    if Url::parse(value).is_err() {
        return Err(ValidationError::constraint(
            path,
            "must be a valid absolute URI",
            value,
        ));
    }
    Ok(())
}

/// URI check that also accepts scheme-less relative references.
pub(crate) fn uri(path: &str, value: &str) -> Result<(), ValidationError> {
    match Url::parse(value) {
        Ok(_) | Err(url::ParseError::RelativeUrlWithoutBase) => Ok(()),
        Err(_) => Err(ValidationError::constraint(
            path,
            "must be a valid URI",
            value,
        )),
    }
}

/// Runs a nested shape's checks, reporting paths relative to the parent.
pub(crate) fn nested<T: Validate>(path: &str, value: &T) -> Result<(), ValidationError> {
    value.check().map_err(|e| e.at(path))
}

pub(crate) fn each<T: Validate>(path: &str, items: &[T]) -> Result<(), ValidationError> {
    for (i, item) in items.iter().enumerate() {
        item.check().map_err(|e| e.at(&format!("{path}[{i}]")))?;
    }
    Ok(())
}

pub(crate) fn each_non_empty(path: &str, items: &[String]) -> Result<(), ValidationError> {
    for (i, item) in items.iter().enumerate() {
        non_empty(&format!("{path}[{i}]"), item)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_rejects_empty_string() {
        assert!(non_empty("accountId", "").is_err());
        assert!(non_empty("accountId", "abc").is_ok());
    }

    #[test]
    fn test_within_bounds() {
        assert!(within("score", 0.0, -1.0, 1.0).is_ok());
        assert!(within("score", -1.0, -1.0, 1.0).is_ok());
        assert!(within("score", 1.0, -1.0, 1.0).is_ok());
        assert!(within("score", 1.5, -1.0, 1.0).is_err());
        assert!(within("score", -1.5, -1.0, 1.0).is_err());
    }

    #[test]
    fn test_within_reports_violated_bound() {
        let err = within("score", 1.5, -1.0, 1.0).unwrap_err();
        assert!(err.to_string().contains("must be <= 1"));
        let err = within("score", -2.0, -1.0, 1.0).unwrap_err();
        assert!(err.to_string().contains("must be >= -1"));
    }

    #[test]
    fn test_email_format() {
        assert!(email("from", "user@example.com").is_ok());
        assert!(email("from", "user@sub.example.co.uk").is_ok());
        assert!(email("from", "not-an-email").is_err());
        assert!(email("from", "two@@example.com").is_err());
        assert!(email("from", "spaces in@example.com").is_err());
    }

    #[test]
    fn test_uri_accepts_relative_references() {
        assert!(uri("url", "https://example.com/x").is_ok());
        assert!(uri("url", "v1/classifiers/abc").is_ok());
        assert!(absolute_uri("avatarUrl", "https://example.com/a.png").is_ok());
        assert!(absolute_uri("avatarUrl", "pbs/profile.png").is_err());
    }

    #[test]
    fn test_int_at_least() {
        assert!(int_at_least("beginOffset", -1, -1).is_ok());
        assert!(int_at_least("beginOffset", -2, -1).is_err());
    }
}
