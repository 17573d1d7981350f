//! User settings for the meal planner
//!
//! Manages preferences such as the default grocery range, log verbosity and
//! pantry housekeeping.

use serde::{Deserialize, Serialize};

use super::paths::MealPlanPaths;
use crate::error::MealPlanError;

/// User settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Days covered by `grocery generate` when no end date is given
    #[serde(default = "default_range_days")]
    pub default_range_days: u32,

    /// Log filter used when `MEALPLAN_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Remove zero-amount pantry rows after committing grocery items
    #[serde(default)]
    pub prune_after_commit: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_range_days() -> u32 {
    7
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            date_format: default_date_format(),
            default_range_days: default_range_days(),
            log_level: default_log_level(),
            prune_after_commit: false,
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &MealPlanPaths) -> Result<Self, MealPlanError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                MealPlanError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                MealPlanError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &MealPlanPaths) -> Result<(), MealPlanError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            MealPlanError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            MealPlanError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}
