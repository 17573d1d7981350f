//! Pantry repository for JSON storage
//!
//! Manages loading and saving pantry rows to pantry.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::MealPlanError;
use crate::models::{normalize_name, PantryItem, PantryItemId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct PantryData {
    items: Vec<PantryItem>,
}

/// Repository for pantry row persistence
pub struct PantryRepository {
    path: PathBuf,
    data: RwLock<HashMap<PantryItemId, PantryItem>>,
}

impl PantryRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load rows from disk, replacing what is held in memory
    pub fn load(&self) -> Result<(), MealPlanError> {
        let file_data: PantryData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| MealPlanError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for item in file_data.items {
            data.insert(item.id, item);
        }

        Ok(())
    }

    /// Save rows to disk
    pub fn save(&self) -> Result<(), MealPlanError> {
        let file_data = PantryData {
            items: self.get_all()?,
        };
        write_json_atomic(&self.path, &file_data)
    }

    pub fn get(&self, id: PantryItemId) -> Result<Option<PantryItem>, MealPlanError> {
        let data = self
            .data
            .read()
            .map_err(|e| MealPlanError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// All rows, by name and then age
    pub fn get_all(&self) -> Result<Vec<PantryItem>, MealPlanError> {
        let data = self
            .data
            .read()
            .map_err(|e| MealPlanError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut items: Vec<_> = data.values().cloned().collect();
        items.sort_by(|a, b| {
            a.normalized_name()
                .cmp(&b.normalized_name())
                .then(a.created_at.cmp(&b.created_at))
        });
        Ok(items)
    }

    /// Rows with the given name (case-insensitive), oldest first
    pub fn find_by_name(&self, name: &str) -> Result<Vec<PantryItem>, MealPlanError> {
        let target = normalize_name(name);
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|item| item.normalized_name() == target)
            .collect())
    }

    /// Insert or update a row
    pub fn upsert(&self, item: PantryItem) -> Result<(), MealPlanError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| MealPlanError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(item.id, item);
        Ok(())
    }

    /// Remove a row, returning it if it existed
    pub fn delete(&self, id: PantryItemId) -> Result<Option<PantryItem>, MealPlanError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| MealPlanError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(&id))
    }

    /// Remove every row holding nothing, returning the removed rows
    pub fn remove_empty(&self) -> Result<Vec<PantryItem>, MealPlanError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| MealPlanError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let empty: Vec<PantryItemId> = data
            .values()
            .filter(|item| item.is_empty())
            .map(|item| item.id)
            .collect();

        Ok(empty.iter().filter_map(|id| data.remove(id)).collect())
    }
}
