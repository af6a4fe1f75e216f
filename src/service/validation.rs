//! Field-level request validation shared by every entity module.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ValidationError(pub String);

/// Required text must be present and not blank.
pub fn require_text(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError(format!("{} is required", field)));
    }
    Ok(())
}

/// Ids and numeric business keys start at 1.
pub fn require_positive(field: &str, value: i64) -> Result<(), ValidationError> {
    if value <= 0 {
        return Err(ValidationError(format!("{} must be greater than zero", field)));
    }
    Ok(())
}

pub fn require_non_negative(field: &str, value: i32) -> Result<(), ValidationError> {
    if value < 0 {
        return Err(ValidationError(format!("{} must not be negative", field)));
    }
    Ok(())
}

/// Validate an update field only when the payload carries it.
pub fn optional<T, F>(value: Option<&T>, check: F) -> Result<(), ValidationError>
where
    T: ?Sized,
    F: FnOnce(&T) -> Result<(), ValidationError>,
{
    match value {
        Some(v) => check(v),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_rejected() {
        assert!(require_text("first_name", "Ana").is_ok());
        assert_eq!(
            require_text("first_name", "   ").unwrap_err().to_string(),
            "first_name is required"
        );
    }

    #[test]
    fn ids_must_be_positive() {
        assert!(require_positive("warehouse_id", 1).is_ok());
        assert!(require_positive("warehouse_id", 0).is_err());
        assert!(require_non_negative("current_quantity", 0).is_ok());
        assert!(require_non_negative("current_quantity", -3).is_err());
    }

    #[test]
    fn optional_skips_absent_fields() {
        let absent: Option<&str> = None;
        assert!(optional(absent, |v| require_text("cid", v)).is_ok());
        assert!(optional(Some(""), |v| require_text("cid", v)).is_err());
    }
}
