//! Grocery list service
//!
//! Keeps the saved grocery list: regenerates it from the meal plan and
//! pantry, manages hand-added items and the checked state, and commits
//! bought items into the pantry.

use chrono::{NaiveDate, Utc};

use crate::audit::EntityType;
use crate::error::{MealPlanError, MealPlanResult};
use crate::models::{
    normalize_name, GroceryItem, GroceryItemId, PantryItem, Quantity, SavedGroceryList, WeekKey,
};
use crate::storage::Storage;
use crate::units::UnitRegistry;

use super::demand::DemandAggregator;
use super::grocery::GroceryListGenerator;
use super::pantry::PantryService;
use super::reconcile::{PantryStore, PantryUpdateReport, PantryUpdater};

/// Audit id of the single saved grocery list
const GROCERY_LIST_ID: &str = "current";

/// Result of regenerating the grocery list
#[derive(Debug, Clone)]
pub struct GenerateOutcome {
    pub list: SavedGroceryList,
    /// Weeks whose plan could not be read; their meals are missing
    pub failed_weeks: Vec<WeekKey>,
    /// Planned meals whose dish no longer exists
    pub missing_dishes: usize,
}

/// Result of committing checked items to the pantry
#[derive(Debug, Clone, Default)]
pub struct CommitOutcome {
    pub committed: Vec<GroceryItem>,
    pub report: PantryUpdateReport,
    /// Empty pantry rows removed afterwards
    pub pruned: Vec<PantryItem>,
}

/// Service for the saved grocery list
pub struct GroceryService<'a> {
    storage: &'a Storage,
    registry: &'a UnitRegistry,
}

impl<'a> GroceryService<'a> {
    pub fn new(storage: &'a Storage, registry: &'a UnitRegistry) -> Self {
        Self { storage, registry }
    }

    /// The saved list
    pub fn show(&self) -> MealPlanResult<SavedGroceryList> {
        self.storage.grocery.get()
    }

    /// Rebuild the generated part of the list for a date range (inclusive)
    ///
    /// Manual items are kept, with their checked state.
    pub fn generate(&self, start: NaiveDate, end: NaiveDate) -> MealPlanResult<GenerateOutcome> {
        if end < start {
            return Err(MealPlanError::Validation(format!(
                "End date {} is before start date {}",
                end, start
            )));
        }

        let dishes = self.storage.dishes.get_all()?;
        let aggregation = DemandAggregator::new(self.storage).aggregate(start, end, &dishes);
        let pantry = self.storage.load_pantry()?;
        let mut generated =
            GroceryListGenerator::new(self.registry).generate(&aggregation.demand, &pantry);

        for item in generated.needed.iter_mut().chain(generated.available.iter_mut()) {
            item.id = Some(GroceryItemId::new());
        }

        let before = self.storage.grocery.get()?;
        let list = SavedGroceryList {
            start_date: Some(start),
            end_date: Some(end),
            generated,
            manual_items: before.manual_items.clone(),
            updated_at: Some(Utc::now()),
        };

        let summary = format!(
            "generated {} to {}: {} needed, {} available",
            start,
            end,
            list.generated.needed.len(),
            list.generated.available.len()
        );
        self.save_list(&before, &list, summary)?;

        Ok(GenerateOutcome {
            list,
            failed_weeks: aggregation.failed_weeks,
            missing_dishes: aggregation.missing_dishes,
        })
    }

    /// Add an item by hand
    pub fn add_manual(&self, name: &str, amount: f64, unit: &str) -> MealPlanResult<GroceryItem> {
        let name = name.trim();
        if name.is_empty() {
            return Err(MealPlanError::Validation(
                "Grocery item name cannot be empty".into(),
            ));
        }
        if !amount.is_finite() || amount <= 0.0 {
            return Err(MealPlanError::Validation(format!(
                "Grocery item amount must be positive, got {}",
                amount
            )));
        }
        if self.registry.lookup(unit).is_none() {
            return Err(MealPlanError::UnknownUnit(unit.trim().to_string()));
        }

        let item = GroceryItem::manual(name, Quantity::new(amount, unit.trim()).rounded());

        let before = self.storage.grocery.get()?;
        let mut list = before.clone();
        list.manual_items.push(item.clone());
        list.updated_at = Some(Utc::now());
        self.save_list(&before, &list, format!("added {}", item))?;

        Ok(item)
    }

    /// Remove a hand-added item
    pub fn remove_manual(&self, identifier: &str) -> MealPlanResult<GroceryItem> {
        let before = self.storage.grocery.get()?;
        let mut list = before.clone();

        let position = find_item(&list.manual_items, identifier)?;
        let item = list.manual_items.remove(position);
        list.updated_at = Some(Utc::now());
        self.save_list(&before, &list, format!("removed {}", item))?;

        Ok(item)
    }

    /// Check or uncheck a needed item
    pub fn set_checked(&self, identifier: &str, checked: bool) -> MealPlanResult<GroceryItem> {
        let before = self.storage.grocery.get()?;
        let mut list = before.clone();

        let needed: Vec<GroceryItem> = list.needed_items().cloned().collect();
        let position = find_item(&needed, identifier)?;
        let Some(item) = list.needed_items_mut().nth(position) else {
            return Err(MealPlanError::grocery_item_not_found(identifier.trim()));
        };
        if item.checked == checked {
            return Ok(item.clone());
        }
        item.checked = checked;
        let item = item.clone();

        let verb = if checked { "checked" } else { "unchecked" };
        self.save_list(&before, &list, format!("{} {}", verb, item))?;

        Ok(item)
    }

    /// Move checked items into the pantry and drop them from the list
    ///
    /// The pantry is updated first; if that fails the list is left as is.
    pub fn commit(&self, prune: bool) -> MealPlanResult<CommitOutcome> {
        let before = self.storage.grocery.get()?;
        let committed = before.checked_items();
        if committed.is_empty() {
            return Ok(CommitOutcome::default());
        }

        let report =
            PantryUpdater::new(self.registry, self.storage).complete_grocery_items(&committed)?;

        let mut list = before.clone();
        list.remove_checked();
        list.updated_at = Some(Utc::now());
        self.save_list(
            &before,
            &list,
            format!("committed {} items to pantry", committed.len()),
        )?;

        let pruned = if prune {
            PantryService::new(self.storage, self.registry).prune()?
        } else {
            Vec::new()
        };

        Ok(CommitOutcome {
            committed,
            report,
            pruned,
        })
    }

    /// Forget the generated items; manual items stay
    pub fn clear(&self) -> MealPlanResult<SavedGroceryList> {
        let before = self.storage.grocery.get()?;
        let mut list = before.clone();
        list.clear_generated();
        self.save_list(&before, &list, "cleared generated items".to_string())?;
        Ok(list)
    }

    fn save_list(
        &self,
        before: &SavedGroceryList,
        after: &SavedGroceryList,
        summary: String,
    ) -> MealPlanResult<()> {
        self.storage.grocery.set(after.clone())?;
        self.storage.grocery.save()?;

        self.storage.log_update(
            EntityType::GroceryList,
            GROCERY_LIST_ID,
            None,
            before,
            after,
            Some(summary),
        )
    }
}

/// Position of an item by ID, or by a name only one item carries
fn find_item(items: &[GroceryItem], identifier: &str) -> MealPlanResult<usize> {
    if let Some(position) = items
        .iter()
        .position(|i| i.id.is_some_and(|id| id.matches(identifier)))
    {
        return Ok(position);
    }

    let target = normalize_name(identifier);
    let mut named = items
        .iter()
        .enumerate()
        .filter(|(_, i)| normalize_name(&i.name) == target)
        .map(|(position, _)| position);

    match (named.next(), named.next()) {
        (Some(position), None) => Ok(position),
        (Some(_), Some(_)) => Err(MealPlanError::Validation(format!(
            "Several grocery items are named '{}'; use the item ID instead",
            identifier.trim()
        ))),
        _ => Err(MealPlanError::grocery_item_not_found(identifier.trim())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::MealPlanPaths;
    use crate::models::MealSlot;
    use crate::services::dish::DishService;
    use crate::services::plan::PlanService;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = MealPlanPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn tuesday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 7).unwrap()
    }

    fn plan_pancakes(storage: &Storage, registry: &UnitRegistry) {
        let dishes = DishService::new(storage, registry);
        dishes.create("Pancakes").unwrap();
        dishes.add_ingredient("Pancakes", "flour", 2.0, "cup").unwrap();
        dishes.add_ingredient("Pancakes", "eggs", 2.0, "piece").unwrap();
        PlanService::new(storage, registry)
            .assign(tuesday(), MealSlot::Breakfast, "Pancakes")
            .unwrap();
    }

    fn summary(items: &[GroceryItem]) -> Vec<(String, f64, String)> {
        items
            .iter()
            .map(|i| (i.name.clone(), i.quantity.amount, i.quantity.unit.clone()))
            .collect()
    }

    #[test]
    fn test_generate_splits_needed_and_available() {
        let (_temp_dir, storage) = create_test_storage();
        let registry = UnitRegistry::standard();
        plan_pancakes(&storage, &registry);
        PantryService::new(&storage, &registry)
            .add("flour", 1.0, "cup")
            .unwrap();

        let service = GroceryService::new(&storage, &registry);
        let outcome = service.generate(tuesday(), tuesday()).unwrap();

        assert!(outcome.failed_weeks.is_empty());
        assert_eq!(outcome.missing_dishes, 0);
        assert_eq!(
            summary(&outcome.list.generated.needed),
            vec![
                ("flour".to_string(), 1.0, "cup".to_string()),
                ("eggs".to_string(), 2.0, "piece".to_string()),
            ]
        );
        assert_eq!(
            summary(&outcome.list.generated.available),
            vec![("flour".to_string(), 1.0, "cup".to_string())]
        );
        assert!(outcome.list.needed_items().all(|i| i.id.is_some()));

        let saved = service.show().unwrap();
        assert_eq!(saved.start_date, Some(tuesday()));
        assert_eq!(saved.generated, outcome.list.generated);
    }

    #[test]
    fn test_generate_rejects_reversed_range() {
        let (_temp_dir, storage) = create_test_storage();
        let registry = UnitRegistry::standard();
        let service = GroceryService::new(&storage, &registry);

        let monday = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        assert!(service.generate(tuesday(), monday).unwrap_err().is_validation());
    }

    #[test]
    fn test_manual_items_survive_regeneration_and_clear() {
        let (_temp_dir, storage) = create_test_storage();
        let registry = UnitRegistry::standard();
        plan_pancakes(&storage, &registry);
        let service = GroceryService::new(&storage, &registry);

        service.add_manual("dish soap", 1.0, "bottle").unwrap();
        service.generate(tuesday(), tuesday()).unwrap();

        let list = service.show().unwrap();
        let names: Vec<_> = list.needed_items().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["flour", "eggs", "dish soap"]);

        let list = service.clear().unwrap();
        assert!(list.generated.is_empty());
        assert_eq!(list.manual_items.len(), 1);

        service.remove_manual("Dish Soap").unwrap();
        assert!(service.show().unwrap().manual_items.is_empty());
        assert!(service.remove_manual("dish soap").unwrap_err().is_not_found());
    }

    #[test]
    fn test_add_manual_validates() {
        let (_temp_dir, storage) = create_test_storage();
        let registry = UnitRegistry::standard();
        let service = GroceryService::new(&storage, &registry);

        assert!(service.add_manual(" ", 1.0, "piece").unwrap_err().is_validation());
        assert!(service.add_manual("tea", 0.0, "box").unwrap_err().is_validation());
        let err = service.add_manual("tea", 1.0, "crate").unwrap_err();
        assert!(matches!(err, MealPlanError::UnknownUnit(_)));
    }

    #[test]
    fn test_commit_restocks_checked_items() {
        let (_temp_dir, storage) = create_test_storage();
        let registry = UnitRegistry::standard();
        plan_pancakes(&storage, &registry);
        let pantry = PantryService::new(&storage, &registry);
        pantry.add("flour", 1.0, "cup").unwrap();

        let service = GroceryService::new(&storage, &registry);
        service.generate(tuesday(), tuesday()).unwrap();
        service.set_checked("flour", true).unwrap();
        service.set_checked("eggs", true).unwrap();
        service.set_checked("eggs", false).unwrap();

        let outcome = service.commit(false).unwrap();
        assert_eq!(outcome.committed.len(), 1);
        assert_eq!(pantry.find("flour").unwrap().quantity, Quantity::new(2.0, "cup"));

        let names: Vec<_> = service
            .show()
            .unwrap()
            .needed_items()
            .map(|i| i.name.clone())
            .collect();
        assert_eq!(names, vec!["eggs"]);

        // Nothing left to commit
        assert!(service.commit(false).unwrap().committed.is_empty());
    }

    #[test]
    fn test_commit_creates_rows_and_prunes() {
        let (_temp_dir, storage) = create_test_storage();
        let registry = UnitRegistry::standard();
        let pantry = PantryService::new(&storage, &registry);
        pantry.add("yeast", 0.0, "pack").unwrap();

        let service = GroceryService::new(&storage, &registry);
        assert!(service.add_manual("basil", 1.0, "bunch").unwrap_err().is_validation());
        service.add_manual("basil", 30.0, "g").unwrap();
        service.set_checked("basil", true).unwrap();

        let outcome = service.commit(true).unwrap();
        assert_eq!(outcome.report.saved.len(), 1);
        assert_eq!(outcome.pruned.len(), 1);

        let rows = pantry.list().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "basil");
        assert_eq!(rows[0].quantity, Quantity::new(30.0, "g"));
    }

    #[test]
    fn test_check_unknown_item_fails() {
        let (_temp_dir, storage) = create_test_storage();
        let registry = UnitRegistry::standard();
        let service = GroceryService::new(&storage, &registry);

        assert!(service.set_checked("milk", true).unwrap_err().is_not_found());
    }
}
