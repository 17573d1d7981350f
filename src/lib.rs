//! mealplan-cli - household meal planning with pantry tracking
//!
//! This library provides the core of the `mealplan` application: a weekly
//! meal plan, a pantry of on-hand stock and a grocery list derived from the
//! two, all with unit-aware quantities.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `units`: Unit registry, conversion and display unit selection
//! - `models`: Core data models (dishes, pantry rows, plans, grocery lists)
//! - `services`: Demand aggregation, grocery list generation, pantry
//!   reconciliation and the storage-backed services around them
//! - `storage`: JSON file storage layer
//! - `audit`: Audit logging system
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `cli`, `display`, `export`: Command handlers, terminal output, export
//!
//! # Example
//!
//! ```rust,ignore
//! use mealplan_cli::services::{GroceryListGenerator, IngredientDemand};
//! use mealplan_cli::units::UnitRegistry;
//!
//! let registry = UnitRegistry::standard();
//! let list = GroceryListGenerator::new(&registry).generate(&demand, &pantry);
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;
pub mod units;

pub use error::{MealPlanError, MealPlanResult};
