//! Grocery list repository
//!
//! There is one current grocery list, stored in grocery.json.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::MealPlanError;
use crate::models::SavedGroceryList;

use super::file_io::{read_json, write_json_atomic};

/// Repository for the saved grocery list
pub struct GroceryRepository {
    path: PathBuf,
    data: RwLock<SavedGroceryList>,
}

impl GroceryRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(SavedGroceryList::default()),
        }
    }

    pub fn load(&self) -> Result<(), MealPlanError> {
        let file_data: SavedGroceryList = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| MealPlanError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *data = file_data;

        Ok(())
    }

    pub fn save(&self) -> Result<(), MealPlanError> {
        let data = self
            .data
            .read()
            .map_err(|e| MealPlanError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        write_json_atomic(&self.path, &*data)
    }

    pub fn get(&self) -> Result<SavedGroceryList, MealPlanError> {
        let data = self
            .data
            .read()
            .map_err(|e| MealPlanError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.clone())
    }

    pub fn set(&self, list: SavedGroceryList) -> Result<(), MealPlanError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| MealPlanError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        *data = list;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GroceryItem, Quantity};
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty_list() {
        let temp_dir = TempDir::new().unwrap();
        let repo = GroceryRepository::new(temp_dir.path().join("grocery.json"));
        repo.load().unwrap();

        let list = repo.get().unwrap();
        assert!(list.generated.is_empty());
        assert!(list.manual_items.is_empty());
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("grocery.json");
        let repo = GroceryRepository::new(path.clone());

        let mut list = SavedGroceryList::default();
        list.manual_items
            .push(GroceryItem::manual("paper towels", Quantity::new(2.0, "pack")));
        repo.set(list.clone()).unwrap();
        repo.save().unwrap();

        let repo2 = GroceryRepository::new(path);
        repo2.load().unwrap();
        assert_eq!(repo2.get().unwrap(), list);
    }
}
