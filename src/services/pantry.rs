//! Pantry service
//!
//! Hand edits to pantry stock: adding rows, correcting amounts, removing
//! rows and pruning empty ones. Automatic changes from meals and groceries go
//! through the reconciliation engine instead.

use crate::audit::EntityType;
use crate::error::{MealPlanError, MealPlanResult};
use crate::models::{PantryItem, Quantity};
use crate::storage::Storage;
use crate::units::UnitRegistry;

/// Service for pantry management
pub struct PantryService<'a> {
    storage: &'a Storage,
    registry: &'a UnitRegistry,
}

impl<'a> PantryService<'a> {
    pub fn new(storage: &'a Storage, registry: &'a UnitRegistry) -> Self {
        Self { storage, registry }
    }

    /// All rows, by name
    pub fn list(&self) -> MealPlanResult<Vec<PantryItem>> {
        self.storage.pantry.get_all()
    }

    /// Find a row by ID or by name
    ///
    /// A name only resolves when exactly one row carries it.
    pub fn find(&self, identifier: &str) -> MealPlanResult<PantryItem> {
        let items = self.storage.pantry.get_all()?;

        if let Some(item) = items.into_iter().find(|i| i.id.matches(identifier)) {
            return Ok(item);
        }

        let mut named = self.storage.pantry.find_by_name(identifier)?.into_iter();
        match (named.next(), named.next()) {
            (Some(item), None) => Ok(item),
            (Some(_), Some(_)) => Err(MealPlanError::Validation(format!(
                "Several pantry rows are named '{}'; use the row ID instead",
                identifier.trim()
            ))),
            _ => Err(MealPlanError::pantry_item_not_found(identifier.trim())),
        }
    }

    /// Add a new row
    ///
    /// Rows are never merged on entry, so the same item can be stocked in
    /// several units.
    pub fn add(&self, name: &str, amount: f64, unit: &str) -> MealPlanResult<PantryItem> {
        let quantity = self.checked_quantity(amount, unit)?;
        let item = PantryItem::new(name.trim(), quantity);
        item.validate()
            .map_err(|e| MealPlanError::Validation(e.to_string()))?;

        self.storage.pantry.upsert(item.clone())?;
        self.storage.pantry.save()?;

        self.storage.log_create(
            EntityType::PantryItem,
            item.id.to_string(),
            Some(item.name.clone()),
            &item,
        )?;

        Ok(item)
    }

    /// Overwrite a row's amount, and optionally its unit
    pub fn set(
        &self,
        identifier: &str,
        amount: f64,
        unit: Option<&str>,
    ) -> MealPlanResult<PantryItem> {
        let mut item = self.find(identifier)?;
        let before = item.clone();

        let unit = unit.unwrap_or(before.quantity.unit.as_str());
        item.set_quantity(self.checked_quantity(amount, unit)?);
        item.validate()
            .map_err(|e| MealPlanError::Validation(e.to_string()))?;

        self.storage.pantry.upsert(item.clone())?;
        self.storage.pantry.save()?;

        self.storage.log_update(
            EntityType::PantryItem,
            item.id.to_string(),
            Some(item.name.clone()),
            &before,
            &item,
            Some(format!("{} -> {}", before.quantity, item.quantity)),
        )?;

        Ok(item)
    }

    /// Delete a row
    pub fn remove(&self, identifier: &str) -> MealPlanResult<PantryItem> {
        let item = self.find(identifier)?;
        self.storage.pantry.delete(item.id)?;
        self.storage.pantry.save()?;

        self.storage.log_delete(
            EntityType::PantryItem,
            item.id.to_string(),
            Some(item.name.clone()),
            &item,
        )?;

        Ok(item)
    }

    /// Delete every row that holds nothing
    pub fn prune(&self) -> MealPlanResult<Vec<PantryItem>> {
        let removed = self.storage.pantry.remove_empty()?;
        if removed.is_empty() {
            return Ok(removed);
        }

        self.storage.pantry.save()?;
        for item in &removed {
            self.storage.log_delete(
                EntityType::PantryItem,
                item.id.to_string(),
                Some(item.name.clone()),
                item,
            )?;
        }

        Ok(removed)
    }

    fn checked_quantity(&self, amount: f64, unit: &str) -> MealPlanResult<Quantity> {
        if self.registry.lookup(unit).is_none() {
            return Err(MealPlanError::UnknownUnit(unit.trim().to_string()));
        }
        Ok(Quantity::new(amount, unit.trim()).rounded())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::MealPlanPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = MealPlanPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_add_and_find() {
        let (_temp_dir, storage) = create_test_storage();
        let registry = UnitRegistry::standard();
        let service = PantryService::new(&storage, &registry);

        let item = service.add("Flour", 2.5, "cup").unwrap();
        assert_eq!(service.find("flour").unwrap().id, item.id);
        assert_eq!(service.find(&item.id.to_string()).unwrap().name, "Flour");
    }

    #[test]
    fn test_add_rejects_unknown_unit_and_negative_amount() {
        let (_temp_dir, storage) = create_test_storage();
        let registry = UnitRegistry::standard();
        let service = PantryService::new(&storage, &registry);

        let err = service.add("salt", 1.0, "pinch").unwrap_err();
        assert!(matches!(err, MealPlanError::UnknownUnit(_)));

        let err = service.add("salt", -1.0, "gram").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_ambiguous_name_needs_id() {
        let (_temp_dir, storage) = create_test_storage();
        let registry = UnitRegistry::standard();
        let service = PantryService::new(&storage, &registry);

        service.add("rice", 2.0, "kilogram").unwrap();
        service.add("rice", 500.0, "gram").unwrap();

        assert!(service.find("rice").unwrap_err().is_validation());
        assert!(service.find("quinoa").unwrap_err().is_not_found());
    }

    #[test]
    fn test_set_keeps_unit_unless_given() {
        let (_temp_dir, storage) = create_test_storage();
        let registry = UnitRegistry::standard();
        let service = PantryService::new(&storage, &registry);
        service.add("milk", 1.0, "liter").unwrap();

        let item = service.set("milk", 0.5, None).unwrap();
        assert_eq!(item.quantity, Quantity::new(0.5, "liter"));

        let item = service.set("milk", 250.0, Some("ml")).unwrap();
        assert_eq!(item.quantity, Quantity::new(250.0, "ml"));
    }

    #[test]
    fn test_remove_and_prune() {
        let (_temp_dir, storage) = create_test_storage();
        let registry = UnitRegistry::standard();
        let service = PantryService::new(&storage, &registry);

        service.add("eggs", 0.0, "piece").unwrap();
        service.add("butter", 250.0, "gram").unwrap();
        service.add("oil", 1.0, "bottle").unwrap();

        service.remove("oil").unwrap();
        let pruned = service.prune().unwrap();
        assert_eq!(pruned.len(), 1);
        assert_eq!(pruned[0].name, "eggs");

        let names: Vec<_> = service.list().unwrap().into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["butter"]);
    }
}
