//! Storage initialization
//!
//! Handles first-run setup: directories and empty data files.

use serde::Serialize;
use serde_json::json;

use crate::config::paths::MealPlanPaths;
use crate::error::MealPlanError;
use crate::models::SavedGroceryList;

use super::file_io::write_json_atomic;

/// Initialize storage for a fresh installation
///
/// Existing data files are left as they are.
pub fn initialize_storage(paths: &MealPlanPaths) -> Result<(), MealPlanError> {
    paths.ensure_directories()?;

    write_if_missing(paths.pantry_file(), &json!({ "items": [] }))?;
    write_if_missing(paths.dishes_file(), &json!({ "dishes": [] }))?;
    write_if_missing(paths.plans_file(), &json!({ "plans": [] }))?;
    write_if_missing(paths.grocery_file(), &SavedGroceryList::default())?;

    Ok(())
}

fn write_if_missing<T: Serialize>(
    path: std::path::PathBuf,
    data: &T,
) -> Result<(), MealPlanError> {
    if path.exists() {
        return Ok(());
    }
    write_json_atomic(path, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PantryItem, Quantity};
    use crate::storage::PantryRepository;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_storage() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MealPlanPaths::with_base_dir(temp_dir.path().to_path_buf());

        initialize_storage(&paths).unwrap();

        assert!(paths.data_dir().exists());
        assert!(paths.pantry_file().exists());
        assert!(paths.dishes_file().exists());
        assert!(paths.plans_file().exists());
        assert!(paths.grocery_file().exists());
    }

    #[test]
    fn test_doesnt_overwrite_existing() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MealPlanPaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths).unwrap();

        let repo = PantryRepository::new(paths.pantry_file());
        repo.upsert(PantryItem::new("salt", Quantity::new(1.0, "box")))
            .unwrap();
        repo.save().unwrap();

        initialize_storage(&paths).unwrap();

        let reloaded = PantryRepository::new(paths.pantry_file());
        reloaded.load().unwrap();
        assert_eq!(reloaded.get_all().unwrap().len(), 1);
    }
}
