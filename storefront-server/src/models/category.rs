//! Category name validation

use super::validation::{validated_name, ValidationError};

/// Validated category name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name.
    ///
    /// # Rules
    /// - Non-empty after trimming whitespace
    /// - Max 255 characters
    ///
    /// # Example
    /// ```
    /// use storefront_server::models::CategoryName;
    ///
    /// assert_eq!(CategoryName::new(" Shirts ").unwrap().as_str(), "Shirts");
    /// assert!(CategoryName::new("").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        validated_name("category_name", s).map(Self)
    }

    /// Validate an optional request field, treating absence as an error.
    pub fn required(s: Option<&str>) -> Result<Self, ValidationError> {
        let s = s.ok_or(ValidationError::Missing {
            field: "category_name",
        })?;
        Self::new(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_name() {
        let err = CategoryName::required(None).unwrap_err();
        assert_eq!(
            err,
            ValidationError::Missing {
                field: "category_name"
            }
        );
    }

    #[test]
    fn empty_name() {
        let err = CategoryName::required(Some("")).unwrap_err();
        assert!(matches!(err, ValidationError::Empty { .. }));
    }
}
