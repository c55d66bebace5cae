//! Input validation helpers.
//!
//! Every helper returns [`CoreError::Validation`] naming the offending
//! field, which adapters surface as a client error.

use crate::domain::ExecStatus;
use crate::ports::CoreError;

/// Require a value to be present.
///
/// # Examples
///
/// ```rust
/// use devmon_core::utils::validation::not_null;
///
/// assert_eq!(not_null(Some(7), "id").unwrap(), 7);
/// assert!(not_null::<i64>(None, "id").is_err());
/// ```
pub fn not_null<T>(value: Option<T>, field: &str) -> Result<T, CoreError> {
    value.ok_or_else(|| CoreError::Validation(format!("{field} must not be null")))
}

/// Require a string to be present and contain a non-whitespace character.
///
/// The value is returned untouched (not trimmed).
///
/// # Examples
///
/// ```rust
/// use devmon_core::utils::validation::not_blank;
///
/// assert_eq!(not_blank(Some(" a ".to_string()), "url").unwrap(), " a ");
/// assert!(not_blank(Some("   ".to_string()), "url").is_err());
/// ```
pub fn not_blank(value: Option<String>, field: &str) -> Result<String, CoreError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(CoreError::Validation(format!("{field} must not be blank"))),
    }
}

/// Require a present, strictly positive identifier.
pub fn positive_id(value: Option<i64>, field: &str) -> Result<i64, CoreError> {
    match not_null(value, field)? {
        id if id > 0 => Ok(id),
        _ => Err(CoreError::Validation(format!("{field} must be positive"))),
    }
}

/// Require an execution status code in `1..=5`.
pub fn validate_exec_status(code: i32) -> Result<ExecStatus, CoreError> {
    ExecStatus::try_from(code)
        .map_err(|e| CoreError::Validation(format!("execStatus is invalid: {e}")))
}

/// Require a CPU usage percentage in `[0, 100]`.
pub fn validate_cpu_range(value: f32) -> Result<f32, CoreError> {
    if value.is_finite() && (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(CoreError::Validation(format!(
            "cpuRange must be between 0 and 100, got {value}"
        )))
    }
}
