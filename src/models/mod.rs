//! Core data models for the meal planner
//!
//! This module contains the plain data the planner works on: dishes and
//! their ingredients, pantry rows, grocery lists and weekly meal plans.

pub mod dish;
pub mod grocery;
pub mod ids;
pub mod ingredient;
pub mod pantry;
pub mod plan;
pub mod quantity;

pub use dish::Dish;
pub use grocery::{GroceryItem, GroceryList, SavedGroceryList};
pub use ids::{DishId, GroceryItemId, PantryItemId};
pub use ingredient::{normalize_name, Ingredient};
pub use pantry::PantryItem;
pub use plan::{DayOfWeek, DayPlan, MealSlot, PlannedMeal, WeekKey, WeeklyPlan};
pub use quantity::{format_amount, round_to_hundredths, Quantity};
