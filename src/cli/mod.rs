//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod dish;
pub mod grocery;
pub mod history;
pub mod pantry;
pub mod plan;
pub mod units;

pub use dish::{handle_dish_command, DishCommands};
pub use grocery::{handle_grocery_command, GroceryCommands};
pub use history::handle_history_command;
pub use pantry::{handle_pantry_command, PantryCommands};
pub use plan::{handle_plan_command, PlanCommands};
pub use units::{handle_units_command, UnitsCommands};

use chrono::{NaiveDate, Utc};

use crate::config::settings::Settings;
use crate::error::{MealPlanError, MealPlanResult};
use crate::models::plan::utc_calendar_date;
use crate::units::parse_amount;

/// Parse a date argument, defaulting to today (UTC)
///
/// ISO dates are always accepted; the configured format is tried first.
pub(crate) fn parse_date(input: Option<&str>, settings: &Settings) -> MealPlanResult<NaiveDate> {
    let Some(text) = input else {
        return Ok(utc_calendar_date(&Utc::now()));
    };
    let text = text.trim();

    NaiveDate::parse_from_str(text, &settings.date_format)
        .or_else(|_| NaiveDate::parse_from_str(text, "%Y-%m-%d"))
        .map_err(|_| {
            MealPlanError::Validation(format!(
                "Invalid date: '{}'. Use format {}",
                text, settings.date_format
            ))
        })
}

/// Parse an amount argument such as "2", "1.5" or "2cups"
pub(crate) fn parse_amount_arg(text: &str) -> MealPlanResult<f64> {
    parse_amount(text).ok_or_else(|| {
        MealPlanError::Validation(format!(
            "Invalid amount: '{}'. Use a number like '2' or '1.5'",
            text
        ))
    })
}
