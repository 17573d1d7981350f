//! Custom error types for the meal planner
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for meal planner operations
#[derive(Error, Debug)]
pub enum MealPlanError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Unit string that the registry cannot resolve
    #[error("Unknown unit: {0}")]
    UnknownUnit(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl MealPlanError {
    /// Create a "not found" error for dishes
    pub fn dish_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Dish",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for pantry items
    pub fn pantry_item_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Pantry item",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for grocery items
    pub fn grocery_item_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Grocery item",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::UnknownUnit(_))
    }
}

impl From<std::io::Error> for MealPlanError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for MealPlanError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for meal planner operations
pub type MealPlanResult<T> = Result<T, MealPlanError>;
