//! Unit CLI commands

use clap::Subcommand;

use crate::display::format_unit_table;
use crate::error::{MealPlanError, MealPlanResult};
use crate::models::format_amount;
use crate::units::UnitRegistry;

use super::parse_amount_arg;

/// Unit subcommands
#[derive(Subcommand)]
pub enum UnitsCommands {
    /// List every known unit
    List,
    /// Convert an amount between units of the same family
    Convert {
        /// Amount to convert
        amount: String,
        /// Unit to convert from
        from: String,
        /// Unit to convert to
        to: String,
    },
}

/// Handle a units command
pub fn handle_units_command(registry: &UnitRegistry, cmd: UnitsCommands) -> MealPlanResult<()> {
    match cmd {
        UnitsCommands::List => {
            print!("{}", format_unit_table(registry));
        }

        UnitsCommands::Convert { amount, from, to } => {
            let amount = parse_amount_arg(&amount)?;
            for unit in [&from, &to] {
                if registry.lookup(unit).is_none() {
                    return Err(MealPlanError::UnknownUnit(unit.trim().to_string()));
                }
            }
            if !registry.units_comparable(&from, &to) {
                return Err(MealPlanError::Validation(format!(
                    "Cannot convert {} to {}: different measurement families",
                    from, to
                )));
            }

            let converted = registry
                .to_base_amount(amount, &from)
                .and_then(|base| registry.from_base_amount(base, &to))
                .ok_or_else(|| MealPlanError::UnknownUnit(to.clone()))?;

            println!(
                "{} {} = {} {}",
                format_amount(amount),
                from.trim(),
                format_amount(converted),
                to.trim()
            );
        }
    }

    Ok(())
}
