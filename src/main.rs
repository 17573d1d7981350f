use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mealplan_cli::cli::{
    handle_dish_command, handle_grocery_command, handle_history_command, handle_pantry_command,
    handle_plan_command, handle_units_command, DishCommands, GroceryCommands, PantryCommands,
    PlanCommands, UnitsCommands,
};
use mealplan_cli::config::{paths::MealPlanPaths, settings::Settings};
use mealplan_cli::storage::{initialize_storage, Storage};
use mealplan_cli::units::UnitRegistry;

/// Environment variable holding a tracing filter, e.g. `debug` or `mealplan_cli=trace`
const LOG_ENV: &str = "MEALPLAN_LOG";

#[derive(Parser)]
#[command(
    name = "mealplan",
    author = "Kaylee Beyene",
    version,
    about = "Terminal meal planner with pantry tracking",
    long_about = "mealplan keeps a weekly meal plan, a pantry and a grocery list in sync. \
                  Completing a meal consumes its ingredients, and the grocery list \
                  is worked out from the plan minus what is already in the pantry."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory
    Init,

    /// Show current configuration and paths
    Config,

    /// Unit table and conversions
    #[command(subcommand)]
    Units(UnitsCommands),

    /// Pantry management commands
    #[command(subcommand)]
    Pantry(PantryCommands),

    /// Dish management commands
    #[command(subcommand)]
    Dish(DishCommands),

    /// Weekly meal plan commands
    #[command(subcommand)]
    Plan(PlanCommands),

    /// Grocery list commands
    #[command(subcommand, alias = "groceries")]
    Grocery(GroceryCommands),

    /// Show recent changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

fn init_logging(settings: &Settings) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&settings.log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = MealPlanPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    init_logging(&settings);

    let registry = UnitRegistry::standard();

    // Initialize storage
    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing mealplan at: {}", paths.base_dir().display());
            initialize_storage(&paths)?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Next steps:");
            println!("  mealplan pantry add flour 5 cup");
            println!("  mealplan dish add Pancakes");
            println!("  mealplan dish add-ingredient Pancakes flour 2 cup");
            println!("  mealplan plan assign Pancakes --slot breakfast");
            println!("  mealplan grocery generate");
        }
        Some(Commands::Config) => {
            println!("mealplan Configuration");
            println!("======================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!("Initialized:    {}", if storage.is_initialized() { "yes" } else { "no" });
            println!();
            println!("Settings:");
            println!("  Date format:        {}", settings.date_format);
            println!("  Default range days: {}", settings.default_range_days);
            println!("  Log level:          {}", settings.log_level);
            println!("  Prune after commit: {}", settings.prune_after_commit);
        }
        Some(Commands::Units(cmd)) => {
            handle_units_command(&registry, cmd)?;
        }
        Some(Commands::Pantry(cmd)) => {
            handle_pantry_command(&storage, &registry, cmd)?;
        }
        Some(Commands::Dish(cmd)) => {
            handle_dish_command(&storage, &registry, cmd)?;
        }
        Some(Commands::Plan(cmd)) => {
            handle_plan_command(&storage, &registry, &settings, cmd)?;
        }
        Some(Commands::Grocery(cmd)) => {
            handle_grocery_command(&storage, &registry, &settings, cmd)?;
        }
        Some(Commands::History { limit }) => {
            handle_history_command(&storage, limit)?;
        }
        None => {
            println!("mealplan - meal planning with pantry tracking");
            println!();
            println!("Run 'mealplan --help' for usage information.");
            println!("Run 'mealplan init' to set up the data directory.");
        }
    }

    Ok(())
}
