//! Validation logic for operator input.

use crate::encode::{parse_calendar_date, parse_ndc};
use crate::error::{Result, RxError};
use crate::model::FieldSet;

/// Validation result with warnings.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Whether validation passed.
    pub passed: bool,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Error messages.
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Create a passing result.
    pub fn ok() -> Self {
        Self {
            passed: true,
            ..Default::default()
        }
    }

    /// Add a warning.
    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Add an error.
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.passed = false;
    }
}

/// Validate a field set.
///
/// Missing Rx/NDC are errors. A malformed NDC or expiration date only warns:
/// generation still succeeds with the fallback GTIN or without `(17)`.
pub fn validate_fields(fields: &FieldSet) -> ValidationResult {
    let mut result = ValidationResult::ok();

    for field in fields.missing_required() {
        result.add_error(format!("Missing required field '{}'", field));
    }

    if !fields.ndc.is_empty() && parse_ndc(&fields.ndc).is_none() {
        result.add_warning(format!(
            "NDC '{}' is not 10 digits; the fallback GTIN will be used",
            fields.ndc
        ));
    }

    if !fields.expiration_date.trim().is_empty()
        && parse_calendar_date(&fields.expiration_date).is_none()
    {
        result.add_warning(format!(
            "Expiration date '{}' is not a valid date; (17) will be omitted",
            fields.expiration_date
        ));
    }

    result
}

/// Fail with [`RxError::MissingFields`] unless Rx and NDC are both present.
pub fn require_fields(fields: &FieldSet) -> Result<()> {
    let missing = fields.missing_required();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(RxError::MissingFields { fields: missing })
    }
}
