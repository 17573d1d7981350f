//! Pantry item model
//!
//! A pantry item is one stored row of on-hand stock. The same ingredient can
//! have several rows, possibly in different units.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::PantryItemId;
use super::ingredient::normalize_name;
use super::quantity::Quantity;

/// A stored row of on-hand stock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PantryItem {
    /// Unique identifier
    pub id: PantryItemId,

    /// Item name
    pub name: String,

    #[serde(flatten)]
    pub quantity: Quantity,

    /// When the row was created
    pub created_at: DateTime<Utc>,

    /// When the row was last modified
    pub updated_at: DateTime<Utc>,
}

impl PantryItem {
    /// Create a new pantry row
    pub fn new(name: impl Into<String>, quantity: Quantity) -> Self {
        let now = Utc::now();
        Self {
            id: PantryItemId::new(),
            name: name.into(),
            quantity,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn normalized_name(&self) -> String {
        normalize_name(&self.name)
    }

    /// Replace the stored quantity
    pub fn set_quantity(&mut self, quantity: Quantity) {
        self.quantity = quantity;
        self.updated_at = Utc::now();
    }

    pub fn is_empty(&self) -> bool {
        self.quantity.amount <= 0.0
    }

    /// Validate the row
    pub fn validate(&self) -> Result<(), PantryValidationError> {
        if self.name.trim().is_empty() {
            return Err(PantryValidationError::EmptyName);
        }
        if !(self.quantity.amount.is_finite() && self.quantity.amount >= 0.0) {
            return Err(PantryValidationError::InvalidAmount(self.quantity.amount));
        }
        Ok(())
    }
}

impl fmt::Display for PantryItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.quantity)
    }
}

/// Validation errors for pantry rows
#[derive(Debug, Clone, PartialEq)]
pub enum PantryValidationError {
    EmptyName,
    InvalidAmount(f64),
}

impl fmt::Display for PantryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Pantry item name cannot be empty"),
            Self::InvalidAmount(amount) => {
                write!(f, "Pantry amount cannot be negative, got {}", amount)
            }
        }
    }
}

impl std::error::Error for PantryValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_item() {
        let item = PantryItem::new("Rice", Quantity::new(2.0, "kilogram"));
        assert_eq!(item.normalized_name(), "rice");
        assert!(!item.is_empty());
        assert_eq!(item.to_string(), "Rice (2 kilogram)");
    }

    #[test]
    fn test_validation() {
        let mut item = PantryItem::new("Rice", Quantity::new(0.0, "gram"));
        assert!(item.validate().is_ok());
        assert!(item.is_empty());

        item.set_quantity(Quantity::new(-1.0, "gram"));
        assert_eq!(
            item.validate(),
            Err(PantryValidationError::InvalidAmount(-1.0))
        );
    }

    #[test]
    fn test_serde_round_trip() {
        let item = PantryItem::new("Oil", Quantity::new(1.5, "liter (l)"));
        let json = serde_json::to_string(&item).unwrap();
        let back: PantryItem = serde_json::from_str(&json).unwrap();
        assert_eq!(item, back);
    }
}
