//! Tag name validation

use super::validation::{validated_name, ValidationError};

/// Validated tag name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagName(String);

impl TagName {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        validated_name("tag_name", s).map(Self)
    }

    pub fn required(s: Option<&str>) -> Result<Self, ValidationError> {
        let s = s.ok_or(ValidationError::Missing { field: "tag_name" })?;
        Self::new(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
