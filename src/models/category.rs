//! Category model
//!
//! A category is a user-defined label used to classify transactions. The
//! backend calls the label `content`.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;

/// A spending category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Backend-assigned identifier
    pub id: CategoryId,

    /// Display text
    #[serde(rename = "content", alias = "label")]
    pub label: String,
}

impl Category {
    /// Create a category snapshot
    pub fn new(id: impl Into<CategoryId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }

    /// Check whether a user query names this category
    ///
    /// Matches the label case-insensitively, or the id in either `12` or
    /// `cat-12` form.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim();
        if self.label.to_lowercase() == query.to_lowercase() {
            return true;
        }
        query.parse::<CategoryId>().map(|id| id == self.id).unwrap_or(false)
    }

    /// Normalize and validate a label for a new category
    pub fn validate_label(label: &str) -> Result<String, CategoryValidationError> {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return Err(CategoryValidationError::EmptyLabel);
        }
        Ok(trimmed.to_string())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// Request body for creating a category
#[derive(Debug, Clone, Serialize)]
pub struct NewCategory {
    pub content: String,
}

impl NewCategory {
    /// Build a validated request from raw user input
    pub fn new(label: &str) -> Result<Self, CategoryValidationError> {
        Ok(Self {
            content: Category::validate_label(label)?,
        })
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyLabel,
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyLabel => write!(f, "Category name cannot be empty"),
        }
    }
}

impl std::error::Error for CategoryValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_backend_shape() {
        let json = r#"{"id": 3, "content": "식비", "createdAt": "2024-11-02T10:00:00"}"#;
        let category: Category = serde_json::from_str(json).unwrap();
        assert_eq!(category.id, CategoryId::new(3));
        assert_eq!(category.label, "식비");
    }

    #[test]
    fn test_matches_label_and_id() {
        let category = Category::new(5, "Transport");
        assert!(category.matches("transport"));
        assert!(category.matches(" Transport "));
        assert!(category.matches("5"));
        assert!(category.matches("cat-5"));
        assert!(!category.matches("6"));
        assert!(!category.matches("Food"));
    }

    #[test]
    fn test_validate_label() {
        assert_eq!(Category::validate_label("  Food ").unwrap(), "Food");
        assert_eq!(
            Category::validate_label("   "),
            Err(CategoryValidationError::EmptyLabel)
        );
    }

    #[test]
    fn test_new_category_body() {
        let body = NewCategory::new(" Rent ").unwrap();
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"content": "Rent"})
        );
    }
}
