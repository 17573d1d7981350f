//! Dish model
//!
//! A dish is a named recipe with an ingredient list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::DishId;
use super::ingredient::{normalize_name, Ingredient};

/// A dish that can be placed on the meal plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dish {
    /// Unique identifier
    pub id: DishId,

    /// Dish name
    pub name: String,

    /// Ingredients needed to cook the dish once
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,

    /// When the dish was created
    pub created_at: DateTime<Utc>,

    /// When the dish was last modified
    pub updated_at: DateTime<Utc>,
}

impl Dish {
    /// Create a new dish with no ingredients
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: DishId::new(),
            name: name.into(),
            ingredients: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a dish with ingredients
    pub fn with_ingredients(name: impl Into<String>, ingredients: Vec<Ingredient>) -> Self {
        let mut dish = Self::new(name);
        dish.ingredients = ingredients;
        dish
    }

    pub fn add_ingredient(&mut self, ingredient: Ingredient) {
        self.ingredients.push(ingredient);
        self.updated_at = Utc::now();
    }

    /// Remove every ingredient with the given name; returns how many were removed
    pub fn remove_ingredient(&mut self, name: &str) -> usize {
        let target = normalize_name(name);
        let before = self.ingredients.len();
        self.ingredients.retain(|i| i.normalized_name() != target);
        let removed = before - self.ingredients.len();
        if removed > 0 {
            self.updated_at = Utc::now();
        }
        removed
    }

    /// Validate the dish
    pub fn validate(&self) -> Result<(), DishValidationError> {
        if self.name.trim().is_empty() {
            return Err(DishValidationError::EmptyName);
        }

        if self.name.len() > 100 {
            return Err(DishValidationError::NameTooLong(self.name.len()));
        }

        Ok(())
    }
}

impl fmt::Display for Dish {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for dishes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DishValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for DishValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Dish name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Dish name too long ({} chars, max 100)", len)
            }
        }
    }
}

impl std::error::Error for DishValidationError {}
