//! Dish repository for JSON storage
//!
//! Manages loading and saving dishes to dishes.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::MealPlanError;
use crate::models::{normalize_name, Dish, DishId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct DishData {
    dishes: Vec<Dish>,
}

/// Repository for dish persistence
pub struct DishRepository {
    path: PathBuf,
    data: RwLock<HashMap<DishId, Dish>>,
    /// Index: normalized name -> dish_id
    by_name: RwLock<HashMap<String, DishId>>,
}

impl DishRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_name: RwLock::new(HashMap::new()),
        }
    }

    /// Load dishes from disk
    pub fn load(&self) -> Result<(), MealPlanError> {
        let file_data: DishData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            MealPlanError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_name = self.by_name.write().map_err(|e| {
            MealPlanError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        by_name.clear();

        for dish in file_data.dishes {
            by_name.insert(normalize_name(&dish.name), dish.id);
            data.insert(dish.id, dish);
        }

        Ok(())
    }

    /// Save dishes to disk, sorted by name
    pub fn save(&self) -> Result<(), MealPlanError> {
        let file_data = DishData {
            dishes: self.get_all()?,
        };
        write_json_atomic(&self.path, &file_data)
    }

    pub fn get(&self, id: DishId) -> Result<Option<Dish>, MealPlanError> {
        let data = self.data.read().map_err(|e| {
            MealPlanError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(&id).cloned())
    }

    pub fn get_all(&self) -> Result<Vec<Dish>, MealPlanError> {
        let data = self.data.read().map_err(|e| {
            MealPlanError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut dishes: Vec<_> = data.values().cloned().collect();
        dishes.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(dishes)
    }

    /// Get a dish by exact name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Dish>, MealPlanError> {
        let data = self.data.read().map_err(|e| {
            MealPlanError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        let by_name = self.by_name.read().map_err(|e| {
            MealPlanError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(by_name
            .get(&normalize_name(name))
            .and_then(|id| data.get(id).cloned()))
    }

    /// Insert or update a dish
    pub fn upsert(&self, dish: Dish) -> Result<(), MealPlanError> {
        let mut data = self.data.write().map_err(|e| {
            MealPlanError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_name = self.by_name.write().map_err(|e| {
            MealPlanError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        if let Some(old) = data.get(&dish.id) {
            by_name.remove(&normalize_name(&old.name));
        }
        by_name.insert(normalize_name(&dish.name), dish.id);

        data.insert(dish.id, dish);
        Ok(())
    }

    /// Delete a dish, returning it if it existed
    pub fn delete(&self, id: DishId) -> Result<Option<Dish>, MealPlanError> {
        let mut data = self.data.write().map_err(|e| {
            MealPlanError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_name = self.by_name.write().map_err(|e| {
            MealPlanError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let removed = data.remove(&id);
        if let Some(dish) = &removed {
            by_name.remove(&normalize_name(&dish.name));
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Ingredient;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, DishRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = DishRepository::new(temp_dir.path().join("dishes.json"));
        (temp_dir, repo)
    }

    #[test]
    fn test_get_by_name_case_insensitive() {
        let (_temp_dir, repo) = create_test_repo();
        repo.upsert(Dish::new("Pancakes")).unwrap();

        assert!(repo.get_by_name("pancakes").unwrap().is_some());
        assert!(repo.get_by_name("waffles").unwrap().is_none());
    }

    #[test]
    fn test_rename_updates_index() {
        let (_temp_dir, repo) = create_test_repo();
        let mut dish = Dish::new("Pancakes");
        repo.upsert(dish.clone()).unwrap();

        dish.name = "Crepes".into();
        repo.upsert(dish).unwrap();

        assert!(repo.get_by_name("Pancakes").unwrap().is_none());
        assert!(repo.get_by_name("crepes").unwrap().is_some());
        assert_eq!(repo.get_all().unwrap().len(), 1);
    }

    #[test]
    fn test_save_and_reload_keeps_ingredients() {
        let (temp_dir, repo) = create_test_repo();
        let dish = Dish::with_ingredients(
            "Omelette",
            vec![Ingredient::new("eggs", 3.0, "piece")],
        );
        let id = dish.id;
        repo.upsert(dish).unwrap();
        repo.save().unwrap();

        let repo2 = DishRepository::new(temp_dir.path().join("dishes.json"));
        repo2.load().unwrap();
        let loaded = repo2.get(id).unwrap().unwrap();
        assert_eq!(loaded.ingredients, vec![Ingredient::new("eggs", 3.0, "piece")]);
    }

    #[test]
    fn test_delete_clears_index() {
        let (_temp_dir, repo) = create_test_repo();
        let dish = Dish::new("Soup");
        let id = dish.id;
        repo.upsert(dish).unwrap();

        assert!(repo.delete(id).unwrap().is_some());
        assert!(repo.get_by_name("Soup").unwrap().is_none());
    }
}
