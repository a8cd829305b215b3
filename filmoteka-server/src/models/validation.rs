//! Validation error types

use chrono::NaiveDate;
use thiserror::Error;

/// Client input that failed a presence or shape check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// Path identifier is not a single base-10 integer
    #[error("invalid id: '{token}'")]
    InvalidId { token: String },

    /// Date is not a zero-padded `YYYY-MM-DD` calendar date
    #[error("{field} must be a YYYY-MM-DD date, got '{value}'")]
    InvalidDate { field: &'static str, value: String },

    /// Value was rejected by the store as malformed (e.g. a bad date)
    #[error("{reason}")]
    Rejected { reason: String },
}

/// Fail with [`ValidationError::Empty`] when `value` is the empty string.
pub(crate) fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(())
}

/// Fail with [`ValidationError::InvalidDate`] unless `value` is exactly
/// `YYYY-MM-DD` and names a real day. Dates are stored as sent, so anything
/// a store could rewrite (`1990-1-1`, `January 8, 1999`) is refused here.
pub(crate) fn require_date(field: &'static str, value: &str) -> Result<(), ValidationError> {
    require(field, value)?;

    let bytes = value.as_bytes();
    let shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });

    if !shaped || NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
        return Err(ValidationError::InvalidDate {
            field,
            value: value.to_owned(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::Empty { field: "birth_date" };
        assert_eq!(err.to_string(), "birth_date cannot be empty");

        let err = ValidationError::InvalidId { token: "12-7".into() };
        assert_eq!(err.to_string(), "invalid id: '12-7'");
    }

    #[test]
    fn require_rejects_only_empty() {
        assert!(require("name", "Bob").is_ok());
        assert!(require("name", " ").is_ok());
        assert_eq!(
            require("name", "").unwrap_err(),
            ValidationError::Empty { field: "name" }
        );
    }

    #[test]
    fn dates_must_be_padded_calendar_days() {
        assert!(require_date("birth_date", "1990-01-01").is_ok());
        assert!(require_date("birth_date", "2024-02-29").is_ok());

        for bad in [
            "1990-1-1",
            "January 8, 1999",
            "1990/01/01",
            "2023-02-30",
            "1990-13-01",
            "01-01-1990",
        ] {
            assert_eq!(
                require_date("birth_date", bad).unwrap_err(),
                ValidationError::InvalidDate {
                    field: "birth_date",
                    value: bad.to_owned()
                },
                "{bad}"
            );
        }
    }

    #[test]
    fn empty_date_is_reported_as_empty() {
        assert_eq!(
            require_date("release", "").unwrap_err(),
            ValidationError::Empty { field: "release" }
        );
    }
}
