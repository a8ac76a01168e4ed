//! Configuration validation errors and semantic validation.

use crate::scan::ScanConfig;
use thiserror::Error;

/// Validation result type.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Configuration validation errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl ValidationError {
    /// Error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            ValidationError::MissingField(_) => 64,
            ValidationError::InvalidValue { .. } => 65,
        }
    }
}

fn require_positive(field: &str, value: usize) -> ValidationResult<()> {
    if value == 0 {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            message: "must be at least 1".to_string(),
        });
    }
    Ok(())
}

/// Validate a scan configuration semantically.
pub fn validate_config(config: &ScanConfig) -> ValidationResult<()> {
    if config.log_file.as_os_str().is_empty() {
        return Err(ValidationError::MissingField("log_file".to_string()));
    }

    require_positive("max_log_lines", config.max_log_lines)?;
    require_positive("suid_limit", config.suid_limit)?;
    require_positive("display_limit", config.display_limit)?;

    // The console may only show lines the scan log holds. One logged line
    // per command can be a column header that is never displayed.
    if config.display_limit >= config.max_log_lines {
        return Err(ValidationError::InvalidValue {
            field: "display_limit".to_string(),
            message: format!(
                "must be less than max_log_lines ({})",
                config.max_log_lines
            ),
        });
    }

    Ok(())
}
