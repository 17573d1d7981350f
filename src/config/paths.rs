//! Path management for the meal planner
//!
//! Provides XDG-compliant path resolution for configuration and data files.
//!
//! ## Path Resolution Order
//!
//! 1. `MEALPLAN_CLI_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/mealplan-cli` or `~/.config/mealplan-cli`
//! 3. Windows: `%APPDATA%\mealplan-cli`

use std::path::PathBuf;

use crate::error::MealPlanError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "MEALPLAN_CLI_DATA_DIR";

/// Manages all paths used by the meal planner
#[derive(Debug, Clone)]
pub struct MealPlanPaths {
    base_dir: PathBuf,
}

impl MealPlanPaths {
    /// Create a new MealPlanPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, MealPlanError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create MealPlanPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/mealplan-cli/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (~/.config/mealplan-cli/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to pantry.json
    pub fn pantry_file(&self) -> PathBuf {
        self.data_dir().join("pantry.json")
    }

    /// Get the path to dishes.json
    pub fn dishes_file(&self) -> PathBuf {
        self.data_dir().join("dishes.json")
    }

    /// Get the path to plans.json (weekly meal plans)
    pub fn plans_file(&self) -> PathBuf {
        self.data_dir().join("plans.json")
    }

    /// Get the path to grocery.json (generated list and manual items)
    pub fn grocery_file(&self) -> PathBuf {
        self.data_dir().join("grocery.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), MealPlanError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| MealPlanError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| MealPlanError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if the planner has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, MealPlanError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) => PathBuf::from(xdg),
        Err(_) => {
            let home = std::env::var("HOME")
                .map_err(|_| MealPlanError::Config("HOME environment variable not set".into()))?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("mealplan-cli"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, MealPlanError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| MealPlanError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("mealplan-cli"))
}
