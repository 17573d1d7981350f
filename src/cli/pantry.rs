//! Pantry CLI commands

use clap::Subcommand;

use crate::display::format_pantry_list;
use crate::error::MealPlanResult;
use crate::services::PantryService;
use crate::storage::Storage;
use crate::units::UnitRegistry;

use super::parse_amount_arg;

/// Pantry subcommands
#[derive(Subcommand)]
pub enum PantryCommands {
    /// List pantry rows
    List,
    /// Add a pantry row
    Add {
        /// Item name
        name: String,
        /// Amount on hand
        amount: String,
        /// Unit (e.g. cup, g, piece)
        unit: String,
    },
    /// Correct the amount of a row
    Set {
        /// Item name or row ID
        item: String,
        /// New amount
        amount: String,
        /// New unit; keeps the current one if omitted
        #[arg(short, long)]
        unit: Option<String>,
    },
    /// Remove a row
    Remove {
        /// Item name or row ID
        item: String,
    },
    /// Remove every row with nothing left
    Prune,
}

/// Handle a pantry command
pub fn handle_pantry_command(
    storage: &Storage,
    registry: &UnitRegistry,
    cmd: PantryCommands,
) -> MealPlanResult<()> {
    let service = PantryService::new(storage, registry);

    match cmd {
        PantryCommands::List => {
            let items = service.list()?;
            print!("{}", format_pantry_list(&items));
        }

        PantryCommands::Add { name, amount, unit } => {
            let item = service.add(&name, parse_amount_arg(&amount)?, &unit)?;
            println!("Added to pantry: {} {}", item.quantity, item.name);
            println!("  ID: {}", item.id);
        }

        PantryCommands::Set { item, amount, unit } => {
            let updated = service.set(&item, parse_amount_arg(&amount)?, unit.as_deref())?;
            println!("Updated {}: {}", updated.name, updated.quantity);
        }

        PantryCommands::Remove { item } => {
            let removed = service.remove(&item)?;
            println!("Removed from pantry: {}", removed);
        }

        PantryCommands::Prune => {
            let removed = service.prune()?;
            if removed.is_empty() {
                println!("No empty rows to remove.");
            } else {
                println!("Removed {} empty row(s):", removed.len());
                for item in removed {
                    println!("  {}", item.name);
                }
            }
        }
    }

    Ok(())
}
