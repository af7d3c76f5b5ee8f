//! Validation error types

use crate::schema::MAX_NAME_LEN;

/// Validation error for domain models
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// Required field absent from the request
    #[error("{field} is required")]
    Missing { field: &'static str },

    /// Field is empty when it shouldn't be
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// Field exceeds maximum length
    #[error("{field} exceeds maximum length of {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// Numeric field below zero
    #[error("{field} cannot be negative")]
    Negative { field: &'static str },

    /// Value doesn't have the expected shape (e.g. a non-integer id)
    #[error("{field}: {reason}")]
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },

    /// Request body could not be decoded
    #[error("malformed request body: {reason}")]
    Malformed { reason: String },
}

/// Trim and bound a name column.
pub(crate) fn validated_name(field: &'static str, raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }

    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field,
            max: MAX_NAME_LEN,
        });
    }

    Ok(trimmed.to_owned())
}
