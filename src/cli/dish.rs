//! Dish CLI commands

use clap::Subcommand;

use crate::display::{format_dish_details, format_dish_list};
use crate::error::MealPlanResult;
use crate::services::DishService;
use crate::storage::Storage;
use crate::units::UnitRegistry;

use super::parse_amount_arg;

/// Dish subcommands
#[derive(Subcommand)]
pub enum DishCommands {
    /// Create a new dish
    Add {
        /// Dish name
        name: String,
    },
    /// List all dishes
    List,
    /// Show a dish and its ingredients
    Show {
        /// Dish name or ID
        dish: String,
    },
    /// Delete a dish
    Delete {
        /// Dish name or ID
        dish: String,
        /// Delete even if the dish is on the meal plan
        #[arg(short, long)]
        force: bool,
    },
    /// Add an ingredient to a dish
    AddIngredient {
        /// Dish name or ID
        dish: String,
        /// Ingredient name
        name: String,
        /// Amount per serving of the dish
        amount: String,
        /// Unit (e.g. cup, g, piece)
        unit: String,
    },
    /// Remove an ingredient from a dish
    RemoveIngredient {
        /// Dish name or ID
        dish: String,
        /// Ingredient name
        name: String,
    },
}

/// Handle a dish command
pub fn handle_dish_command(
    storage: &Storage,
    registry: &UnitRegistry,
    cmd: DishCommands,
) -> MealPlanResult<()> {
    let service = DishService::new(storage, registry);

    match cmd {
        DishCommands::Add { name } => {
            let dish = service.create(&name)?;
            println!("Created dish: {}", dish.name);
            println!("  ID: {}", dish.id);
        }

        DishCommands::List => {
            let dishes = service.list()?;
            print!("{}", format_dish_list(&dishes));
        }

        DishCommands::Show { dish } => {
            let found = service.get(&dish)?;
            print!("{}", format_dish_details(&found));
        }

        DishCommands::Delete { dish, force } => {
            let deleted = service.delete(&dish, force)?;
            println!("Deleted dish: {}", deleted.name);
        }

        DishCommands::AddIngredient {
            dish,
            name,
            amount,
            unit,
        } => {
            let updated =
                service.add_ingredient(&dish, &name, parse_amount_arg(&amount)?, &unit)?;
            println!(
                "Added to {}: {} {} {}",
                updated.name,
                amount.trim(),
                unit.trim(),
                name.trim()
            );
        }

        DishCommands::RemoveIngredient { dish, name } => {
            let updated = service.remove_ingredient(&dish, &name)?;
            println!("Removed {} from {}", name.trim(), updated.name);
        }
    }

    Ok(())
}
