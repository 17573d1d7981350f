//! Dish service
//!
//! Dish CRUD and ingredient editing. Ingredient units must resolve in the
//! unit registry so that every stored recipe can be converted later.

use crate::audit::EntityType;
use crate::error::{MealPlanError, MealPlanResult};
use crate::models::{Dish, Ingredient};
use crate::storage::Storage;
use crate::units::UnitRegistry;

/// Service for dish management
pub struct DishService<'a> {
    storage: &'a Storage,
    registry: &'a UnitRegistry,
}

impl<'a> DishService<'a> {
    pub fn new(storage: &'a Storage, registry: &'a UnitRegistry) -> Self {
        Self { storage, registry }
    }

    /// Create a new dish with no ingredients
    pub fn create(&self, name: &str) -> MealPlanResult<Dish> {
        let name = name.trim();

        if self.storage.dishes.get_by_name(name)?.is_some() {
            return Err(MealPlanError::Duplicate {
                entity_type: "Dish",
                identifier: name.to_string(),
            });
        }

        let dish = Dish::new(name);
        dish.validate()
            .map_err(|e| MealPlanError::Validation(e.to_string()))?;

        self.storage.dishes.upsert(dish.clone())?;
        self.storage.dishes.save()?;

        self.storage.log_create(
            EntityType::Dish,
            dish.id.to_string(),
            Some(dish.name.clone()),
            &dish,
        )?;

        Ok(dish)
    }

    /// Find a dish by name or ID string
    pub fn find(&self, identifier: &str) -> MealPlanResult<Option<Dish>> {
        if let Some(dish) = self.storage.dishes.get_by_name(identifier)? {
            return Ok(Some(dish));
        }

        Ok(self
            .storage
            .dishes
            .get_all()?
            .into_iter()
            .find(|d| d.id.matches(identifier)))
    }

    /// Like [`find`](Self::find), but a missing dish is an error
    pub fn get(&self, identifier: &str) -> MealPlanResult<Dish> {
        self.find(identifier)?
            .ok_or_else(|| MealPlanError::dish_not_found(identifier.trim()))
    }

    pub fn list(&self) -> MealPlanResult<Vec<Dish>> {
        self.storage.dishes.get_all()
    }

    /// Delete a dish
    ///
    /// Dishes still placed on a meal plan are kept unless `force` is set;
    /// forced deletes leave the plan entries dangling, and demand
    /// aggregation skips them.
    pub fn delete(&self, identifier: &str, force: bool) -> MealPlanResult<Dish> {
        let dish = self.get(identifier)?;

        if !force && self.storage.plans.references_dish(dish.id)? {
            return Err(MealPlanError::Validation(format!(
                "Dish '{}' is still on the meal plan; unassign it first or use --force",
                dish.name
            )));
        }

        self.storage.dishes.delete(dish.id)?;
        self.storage.dishes.save()?;

        self.storage.log_delete(
            EntityType::Dish,
            dish.id.to_string(),
            Some(dish.name.clone()),
            &dish,
        )?;

        Ok(dish)
    }

    /// Append an ingredient to a dish
    pub fn add_ingredient(
        &self,
        identifier: &str,
        name: &str,
        amount: f64,
        unit: &str,
    ) -> MealPlanResult<Dish> {
        let mut dish = self.get(identifier)?;
        let before = dish.clone();

        if self.registry.lookup(unit).is_none() {
            return Err(MealPlanError::UnknownUnit(unit.trim().to_string()));
        }
        let ingredient = Ingredient::new(name.trim(), amount, unit.trim());
        ingredient
            .validate()
            .map_err(|e| MealPlanError::Validation(e.to_string()))?;

        dish.add_ingredient(ingredient);
        self.save_update(&before, &dish)?;

        Ok(dish)
    }

    /// Remove every ingredient with the given name from a dish
    pub fn remove_ingredient(&self, identifier: &str, name: &str) -> MealPlanResult<Dish> {
        let mut dish = self.get(identifier)?;
        let before = dish.clone();

        if dish.remove_ingredient(name) == 0 {
            return Err(MealPlanError::NotFound {
                entity_type: "Ingredient",
                identifier: format!("{} in {}", name.trim(), dish.name),
            });
        }
        self.save_update(&before, &dish)?;

        Ok(dish)
    }

    fn save_update(&self, before: &Dish, after: &Dish) -> MealPlanResult<()> {
        self.storage.dishes.upsert(after.clone())?;
        self.storage.dishes.save()?;

        self.storage.log_update(
            EntityType::Dish,
            after.id.to_string(),
            Some(after.name.clone()),
            before,
            after,
            Some(format!(
                "ingredients: {} -> {}",
                before.ingredients.len(),
                after.ingredients.len()
            )),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::MealPlanPaths;
    use crate::models::{MealSlot, PlannedMeal, WeekKey, WeeklyPlan};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = MealPlanPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_create_rejects_duplicates() {
        let (_temp_dir, storage) = create_test_storage();
        let registry = UnitRegistry::standard();
        let service = DishService::new(&storage, &registry);

        service.create("Pancakes").unwrap();
        let err = service.create("pancakes").unwrap_err();
        assert!(matches!(err, MealPlanError::Duplicate { .. }));
        assert!(service.create("   ").unwrap_err().is_validation());
    }

    #[test]
    fn test_find_by_name_or_id() {
        let (_temp_dir, storage) = create_test_storage();
        let registry = UnitRegistry::standard();
        let service = DishService::new(&storage, &registry);

        let dish = service.create("Chili").unwrap();
        assert_eq!(service.find("chili").unwrap().unwrap().id, dish.id);
        assert_eq!(service.find(&dish.id.to_string()).unwrap().unwrap().id, dish.id);
        assert!(service.find("Lasagna").unwrap().is_none());
        assert!(service.get("Lasagna").unwrap_err().is_not_found());
    }

    #[test]
    fn test_ingredient_editing() {
        let (_temp_dir, storage) = create_test_storage();
        let registry = UnitRegistry::standard();
        let service = DishService::new(&storage, &registry);
        service.create("Pancakes").unwrap();

        service.add_ingredient("Pancakes", "flour", 2.0, "cup").unwrap();
        let dish = service.add_ingredient("Pancakes", "eggs", 2.0, "piece").unwrap();
        assert_eq!(dish.ingredients.len(), 2);

        let err = service.add_ingredient("Pancakes", "love", 1.0, "handful").unwrap_err();
        assert!(matches!(err, MealPlanError::UnknownUnit(_)));
        let err = service.add_ingredient("Pancakes", "milk", 0.0, "cup").unwrap_err();
        assert!(err.is_validation());

        let dish = service.remove_ingredient("Pancakes", "FLOUR").unwrap();
        assert_eq!(dish.ingredients, vec![Ingredient::new("eggs", 2.0, "piece")]);
        assert!(service.remove_ingredient("Pancakes", "flour").unwrap_err().is_not_found());
    }

    #[test]
    fn test_delete_planned_dish_requires_force() {
        let (_temp_dir, storage) = create_test_storage();
        let registry = UnitRegistry::standard();
        let service = DishService::new(&storage, &registry);
        let dish = service.create("Tacos").unwrap();

        let date = NaiveDate::from_ymd_opt(2025, 1, 7).unwrap();
        let mut plan = WeeklyPlan::new(WeekKey::containing(date));
        plan.day_mut(crate::models::DayOfWeek::of(date))
            .slot_mut(MealSlot::Dinner)
            .push(PlannedMeal::new(dish.id));
        storage.plans.upsert(plan).unwrap();

        assert!(service.delete("Tacos", false).unwrap_err().is_validation());
        service.delete("Tacos", true).unwrap();
        assert!(service.find("Tacos").unwrap().is_none());
    }
}
