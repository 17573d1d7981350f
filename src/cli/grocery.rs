//! Grocery list CLI commands

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use chrono::Duration;
use clap::{Subcommand, ValueEnum};

use crate::config::settings::Settings;
use crate::display::{format_commit_outcome, format_grocery_list};
use crate::error::{MealPlanError, MealPlanResult};
use crate::export::{export_grocery_csv, export_grocery_json, export_grocery_yaml};
use crate::services::GroceryService;
use crate::storage::Storage;
use crate::units::UnitRegistry;

use super::{parse_amount_arg, parse_date};

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// One row per item
    Csv,
    /// Full list with metadata
    Json,
    /// Full list with metadata, human-readable
    Yaml,
}

/// Grocery list subcommands
#[derive(Subcommand)]
pub enum GroceryCommands {
    /// Build the list from the meal plan and pantry
    Generate {
        /// First day (default: today)
        #[arg(short, long)]
        from: Option<String>,
        /// Last day, inclusive (default: from the configured range length)
        #[arg(short, long)]
        to: Option<String>,
    },
    /// Show the saved list
    Show,
    /// Add an item by hand
    Add {
        /// Item name
        name: String,
        /// Amount to buy
        amount: String,
        /// Unit (e.g. cup, g, piece)
        unit: String,
    },
    /// Remove a hand-added item
    Remove {
        /// Item name or ID
        item: String,
    },
    /// Check off an item as bought
    Check {
        /// Item name or ID
        item: String,
    },
    /// Uncheck an item
    Uncheck {
        /// Item name or ID
        item: String,
    },
    /// Move checked items into the pantry
    Commit {
        /// Remove empty pantry rows afterwards
        #[arg(long)]
        prune: bool,
    },
    /// Clear the generated items (manual items stay)
    Clear,
    /// Export the saved list
    Export {
        /// Output file (default: standard output)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Export format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: ExportFormat,
        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
}

/// Handle a grocery list command
pub fn handle_grocery_command(
    storage: &Storage,
    registry: &UnitRegistry,
    settings: &Settings,
    cmd: GroceryCommands,
) -> MealPlanResult<()> {
    let service = GroceryService::new(storage, registry);

    match cmd {
        GroceryCommands::Generate { from, to } => {
            let start = parse_date(from.as_deref(), settings)?;
            let end = match to {
                Some(to) => parse_date(Some(&to), settings)?,
                None => {
                    let days = i64::from(settings.default_range_days.max(1));
                    start + Duration::days(days - 1)
                }
            };

            let outcome = service.generate(start, end)?;
            for week in &outcome.failed_weeks {
                eprintln!("Warning: could not read the plan for the week of {}", week);
            }
            if outcome.missing_dishes > 0 {
                eprintln!(
                    "Warning: {} planned meal(s) refer to deleted dishes and were skipped",
                    outcome.missing_dishes
                );
            }

            print!("{}", format_grocery_list(&outcome.list));
        }

        GroceryCommands::Show => {
            print!("{}", format_grocery_list(&service.show()?));
        }

        GroceryCommands::Add { name, amount, unit } => {
            let item = service.add_manual(&name, parse_amount_arg(&amount)?, &unit)?;
            println!("Added to grocery list: {}", item);
        }

        GroceryCommands::Remove { item } => {
            let removed = service.remove_manual(&item)?;
            println!("Removed from grocery list: {}", removed);
        }

        GroceryCommands::Check { item } => {
            let checked = service.set_checked(&item, true)?;
            println!("Checked: {}", checked);
        }

        GroceryCommands::Uncheck { item } => {
            let unchecked = service.set_checked(&item, false)?;
            println!("Unchecked: {}", unchecked);
        }

        GroceryCommands::Commit { prune } => {
            let outcome = service.commit(prune || settings.prune_after_commit)?;
            print!("{}", format_commit_outcome(&outcome));
        }

        GroceryCommands::Clear => {
            let list = service.clear()?;
            println!(
                "Cleared generated items; {} manual item(s) kept.",
                list.manual_items.len()
            );
        }

        GroceryCommands::Export {
            output,
            format,
            pretty,
        } => {
            let list = service.show()?;

            match output {
                Some(path) => {
                    let file = File::create(&path).map_err(|e| {
                        MealPlanError::Export(format!(
                            "Failed to create file {}: {}",
                            path.display(),
                            e
                        ))
                    })?;
                    let mut writer = BufWriter::new(file);
                    write_export(&list, &mut writer, format, pretty)?;
                    writer
                        .flush()
                        .map_err(|e| MealPlanError::Export(e.to_string()))?;
                    eprintln!("Grocery list exported to: {}", path.display());
                }
                None => {
                    let stdout = io::stdout();
                    let mut writer = stdout.lock();
                    write_export(&list, &mut writer, format, pretty)?;
                }
            }
        }
    }

    Ok(())
}

fn write_export<W: Write>(
    list: &crate::models::SavedGroceryList,
    writer: &mut W,
    format: ExportFormat,
    pretty: bool,
) -> MealPlanResult<()> {
    match format {
        ExportFormat::Csv => export_grocery_csv(list, writer),
        ExportFormat::Json => export_grocery_json(list, writer, pretty),
        ExportFormat::Yaml => export_grocery_yaml(list, writer),
    }
}
