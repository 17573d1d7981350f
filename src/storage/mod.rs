//! Storage layer for the meal planner
//!
//! JSON file repositories with atomic writes, plus the audit helpers every
//! service uses. `Storage` is also the concrete pantry store and meal plan
//! source handed to the reconciliation and demand engines.

pub mod dishes;
pub mod file_io;
pub mod grocery;
pub mod init;
pub mod pantry;
pub mod plans;

pub use dishes::DishRepository;
pub use file_io::{read_json, write_json_atomic};
pub use grocery::GroceryRepository;
pub use init::initialize_storage;
pub use pantry::PantryRepository;
pub use plans::PlanRepository;

use serde::Serialize;

use crate::audit::{generate_diff, AuditEntry, AuditLogger, EntityType};
use crate::config::paths::MealPlanPaths;
use crate::error::{MealPlanError, MealPlanResult};
use crate::models::{PantryItem, Quantity, WeekKey, WeeklyPlan};
use crate::services::{MealPlanSource, PantryStore};

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: MealPlanPaths,
    pub pantry: PantryRepository,
    pub dishes: DishRepository,
    pub plans: PlanRepository,
    pub grocery: GroceryRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: MealPlanPaths) -> Result<Self, MealPlanError> {
        paths.ensure_directories()?;

        Ok(Self {
            pantry: PantryRepository::new(paths.pantry_file()),
            dishes: DishRepository::new(paths.dishes_file()),
            plans: PlanRepository::new(paths.plans_file()),
            grocery: GroceryRepository::new(paths.grocery_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    pub fn paths(&self) -> &MealPlanPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&self) -> Result<(), MealPlanError> {
        self.pantry.load()?;
        self.dishes.load()?;
        self.plans.load()?;
        self.grocery.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), MealPlanError> {
        self.pantry.save()?;
        self.dishes.save()?;
        self.plans.save()?;
        self.grocery.save()?;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    /// Record a created entity in the audit log
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> MealPlanResult<()> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    /// Record a modified entity; the diff is computed when not supplied
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> MealPlanResult<()> {
        let diff_summary = diff_summary.or_else(|| {
            match (serde_json::to_value(before), serde_json::to_value(after)) {
                (Ok(b), Ok(a)) => generate_diff(&b, &a),
                _ => None,
            }
        });
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff_summary,
        ))
    }

    /// Record a removed entity
    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> MealPlanResult<()> {
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }
}

impl PantryStore for Storage {
    fn load_pantry(&self) -> MealPlanResult<Vec<PantryItem>> {
        self.pantry.load()?;
        self.pantry.get_all()
    }

    fn update_pantry_item(&self, item: PantryItem) -> MealPlanResult<PantryItem> {
        let before = self
            .pantry
            .get(item.id)?
            .ok_or_else(|| MealPlanError::pantry_item_not_found(item.id.to_string()))?;

        self.pantry.upsert(item.clone())?;
        self.pantry.save()?;

        self.log_update(
            EntityType::PantryItem,
            item.id.to_string(),
            Some(item.name.clone()),
            &before,
            &item,
            Some(format!("{} -> {}", before.quantity, item.quantity)),
        )?;

        Ok(item)
    }

    fn create_pantry_item(&self, name: &str, quantity: Quantity) -> MealPlanResult<PantryItem> {
        let item = PantryItem::new(name.trim(), quantity);
        item.validate()
            .map_err(|e| MealPlanError::Validation(e.to_string()))?;

        self.pantry.upsert(item.clone())?;
        self.pantry.save()?;

        self.log_create(
            EntityType::PantryItem,
            item.id.to_string(),
            Some(item.name.clone()),
            &item,
        )?;

        Ok(item)
    }
}

impl MealPlanSource for Storage {
    fn load_weekly_plan(&self, week: WeekKey) -> MealPlanResult<Option<WeeklyPlan>> {
        self.plans.get(week)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use tempfile::TempDir;

    fn create_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = MealPlanPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_storage_creation() {
        let (temp_dir, storage) = create_storage();
        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.is_initialized());
    }

    #[test]
    fn test_pantry_store_round_trip() {
        let (_temp_dir, storage) = create_storage();

        let created = storage
            .create_pantry_item(" flour ", Quantity::new(5.0, "cup"))
            .unwrap();
        assert_eq!(created.name, "flour");

        let mut changed = created.clone();
        changed.set_quantity(Quantity::new(3.0, "cup"));
        storage.update_pantry_item(changed).unwrap();

        let rows = storage.load_pantry().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].quantity, Quantity::new(3.0, "cup"));

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].operation, Operation::Update);
        assert_eq!(entries[1].diff_summary.as_deref(), Some("5 cup -> 3 cup"));
    }

    #[test]
    fn test_update_unknown_row_fails() {
        let (_temp_dir, storage) = create_storage();
        let stray = PantryItem::new("ghost", Quantity::new(1.0, "piece"));
        let err = storage.update_pantry_item(stray).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_log_update_computes_diff() {
        let (_temp_dir, storage) = create_storage();
        let before = Quantity::new(1.0, "cup");
        let after = Quantity::new(2.0, "cup");
        storage
            .log_update(EntityType::PantryItem, "pan-1", None, &before, &after, None)
            .unwrap();

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries[0].diff_summary.as_deref(), Some("amount: 1.0 -> 2.0"));
    }
}
