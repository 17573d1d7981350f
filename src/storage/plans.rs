//! Meal plan repository for JSON storage
//!
//! Weekly plans are stored together in plans.json, keyed by week.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::MealPlanError;
use crate::models::{DishId, WeekKey, WeeklyPlan};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct PlanData {
    plans: Vec<WeeklyPlan>,
}

/// Repository for weekly plan persistence
pub struct PlanRepository {
    path: PathBuf,
    data: RwLock<BTreeMap<WeekKey, WeeklyPlan>>,
}

impl PlanRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), MealPlanError> {
        let file_data: PlanData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| MealPlanError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for plan in file_data.plans {
            data.insert(plan.week, plan);
        }

        Ok(())
    }

    /// Save plans to disk in week order; empty weeks are not written
    pub fn save(&self) -> Result<(), MealPlanError> {
        let data = self
            .data
            .read()
            .map_err(|e| MealPlanError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let file_data = PlanData {
            plans: data.values().filter(|p| !p.is_empty()).cloned().collect(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    pub fn get(&self, week: WeekKey) -> Result<Option<WeeklyPlan>, MealPlanError> {
        let data = self
            .data
            .read()
            .map_err(|e| MealPlanError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&week).cloned())
    }

    /// The week's plan, or an empty one
    pub fn get_or_default(&self, week: WeekKey) -> Result<WeeklyPlan, MealPlanError> {
        Ok(self.get(week)?.unwrap_or_else(|| WeeklyPlan::new(week)))
    }

    pub fn upsert(&self, plan: WeeklyPlan) -> Result<(), MealPlanError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| MealPlanError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(plan.week, plan);
        Ok(())
    }

    /// Whether any week still references the dish
    pub fn references_dish(&self, dish_id: DishId) -> Result<bool, MealPlanError> {
        let data = self
            .data
            .read()
            .map_err(|e| MealPlanError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.values().any(|plan| {
            plan.days
                .values()
                .any(|day| day.meals().any(|(_, meal)| meal.dish_id == dish_id))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DayOfWeek, MealSlot, PlannedMeal};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn week() -> WeekKey {
        WeekKey::containing(NaiveDate::from_ymd_opt(2025, 1, 8).unwrap())
    }

    fn create_test_repo() -> (TempDir, PlanRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = PlanRepository::new(temp_dir.path().join("plans.json"));
        (temp_dir, repo)
    }

    #[test]
    fn test_missing_week_is_none() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert!(repo.get(week()).unwrap().is_none());
        assert!(repo.get_or_default(week()).unwrap().is_empty());
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        let dish_id = DishId::new();
        let mut plan = WeeklyPlan::new(week());
        plan.day_mut(DayOfWeek::Friday)
            .slot_mut(MealSlot::Dinner)
            .push(PlannedMeal::new(dish_id));
        repo.upsert(plan.clone()).unwrap();
        repo.save().unwrap();

        let repo2 = PlanRepository::new(temp_dir.path().join("plans.json"));
        repo2.load().unwrap();
        assert_eq!(repo2.get(week()).unwrap(), Some(plan));
        assert!(repo2.references_dish(dish_id).unwrap());
        assert!(!repo2.references_dish(DishId::new()).unwrap());
    }

    #[test]
    fn test_empty_weeks_not_persisted() {
        let (temp_dir, repo) = create_test_repo();
        repo.upsert(WeeklyPlan::new(week())).unwrap();
        repo.save().unwrap();
        assert!(repo.get(week()).unwrap().map_or(true, |p| p.is_empty()));

        let repo2 = PlanRepository::new(temp_dir.path().join("plans.json"));
        repo2.load().unwrap();
        assert!(repo2.get(week()).unwrap().is_none());
    }
}
