//! Ingredient model
//!
//! An ingredient is a named quantity. Names are compared case-insensitively
//! everywhere they are used as identity.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::quantity::Quantity;

/// A named quantity used by a dish or a shopping list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,

    #[serde(flatten)]
    pub quantity: Quantity,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, amount: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity: Quantity::new(amount, unit),
        }
    }

    /// Identity key used for matching against pantry rows
    pub fn normalized_name(&self) -> String {
        normalize_name(&self.name)
    }

    /// Validate the ingredient
    pub fn validate(&self) -> Result<(), IngredientValidationError> {
        if self.name.trim().is_empty() {
            return Err(IngredientValidationError::EmptyName);
        }
        if self.quantity.unit.trim().is_empty() {
            return Err(IngredientValidationError::EmptyUnit);
        }
        if !(self.quantity.amount.is_finite() && self.quantity.amount > 0.0) {
            return Err(IngredientValidationError::InvalidAmount(self.quantity.amount));
        }
        Ok(())
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.quantity, self.name)
    }
}

/// Normalize a name for case-insensitive matching
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Validation errors for ingredients
#[derive(Debug, Clone, PartialEq)]
pub enum IngredientValidationError {
    EmptyName,
    EmptyUnit,
    InvalidAmount(f64),
}

impl fmt::Display for IngredientValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Ingredient name cannot be empty"),
            Self::EmptyUnit => write!(f, "Ingredient unit cannot be empty"),
            Self::InvalidAmount(amount) => {
                write!(f, "Ingredient amount must be positive, got {}", amount)
            }
        }
    }
}

impl std::error::Error for IngredientValidationError {}
