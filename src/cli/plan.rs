//! Meal plan CLI commands

use std::collections::HashMap;

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_pantry_report, format_week};
use crate::error::MealPlanResult;
use crate::models::MealSlot;
use crate::services::{DishService, PlanService};
use crate::storage::Storage;
use crate::units::UnitRegistry;

use super::parse_date;

/// Meal plan subcommands
#[derive(Subcommand)]
pub enum PlanCommands {
    /// Show the week containing a date
    Show {
        /// Any date in the week (default: today)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Put a dish on the plan
    Assign {
        /// Dish name or ID
        dish: String,
        /// Date (default: today)
        #[arg(short, long)]
        date: Option<String>,
        /// Meal slot: breakfast, lunch, dinner or snacks
        #[arg(short, long, default_value = "dinner")]
        slot: MealSlot,
    },
    /// Take a dish off the plan
    Unassign {
        /// Dish name or ID
        dish: String,
        /// Date (default: today)
        #[arg(short, long)]
        date: Option<String>,
        /// Meal slot: breakfast, lunch, dinner or snacks
        #[arg(short, long, default_value = "dinner")]
        slot: MealSlot,
    },
    /// Mark a planned meal as eaten, consuming its ingredients
    Complete {
        /// Dish name or ID
        dish: String,
        /// Date (default: today)
        #[arg(short, long)]
        date: Option<String>,
        /// Meal slot: breakfast, lunch, dinner or snacks
        #[arg(short, long, default_value = "dinner")]
        slot: MealSlot,
        /// Undo the completion and put the ingredients back
        #[arg(long)]
        undo: bool,
    },
}

/// Handle a meal plan command
pub fn handle_plan_command(
    storage: &Storage,
    registry: &UnitRegistry,
    settings: &Settings,
    cmd: PlanCommands,
) -> MealPlanResult<()> {
    let service = PlanService::new(storage, registry);

    match cmd {
        PlanCommands::Show { date } => {
            let date = parse_date(date.as_deref(), settings)?;
            let plan = service.week(date)?;

            let dish_names: HashMap<_, _> = DishService::new(storage, registry)
                .list()?
                .into_iter()
                .map(|d| (d.id, d.name))
                .collect();

            print!("{}", format_week(&plan, &dish_names));
        }

        PlanCommands::Assign { dish, date, slot } => {
            let date = parse_date(date.as_deref(), settings)?;
            let assigned = service.assign(date, slot, &dish)?;
            println!("Planned {} for {} {}", assigned.name, date, slot);
        }

        PlanCommands::Unassign { dish, date, slot } => {
            let date = parse_date(date.as_deref(), settings)?;
            service.unassign(date, slot, &dish)?;
            println!("Removed {} from {} {}", dish.trim(), date, slot);
        }

        PlanCommands::Complete {
            dish,
            date,
            slot,
            undo,
        } => {
            let date = parse_date(date.as_deref(), settings)?;
            let outcome = service.set_completed(date, slot, &dish, !undo)?;

            let state = if undo { "not completed" } else { "completed" };
            if !outcome.changed {
                println!("{} on {} {} is already {}", outcome.dish.name, date, slot, state);
                return Ok(());
            }

            println!("Marked {} on {} {} as {}", outcome.dish.name, date, slot, state);
            if let Some(report) = &outcome.report {
                print!("{}", format_pantry_report(report));
            }
        }
    }

    Ok(())
}
