//! Configuration module for the meal planner
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::MealPlanPaths;
pub use settings::Settings;
