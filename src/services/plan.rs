//! Meal plan service
//!
//! Places dishes into day slots and marks planned meals as eaten. Completing
//! a meal consumes its ingredients from the pantry; undoing the completion
//! restocks them.

use chrono::NaiveDate;

use crate::audit::EntityType;
use crate::error::{MealPlanError, MealPlanResult};
use crate::models::{DayOfWeek, Dish, DishId, MealSlot, PlannedMeal, WeekKey, WeeklyPlan};
use crate::storage::Storage;
use crate::units::UnitRegistry;

use super::dish::DishService;
use super::reconcile::{PantryUpdateReport, PantryUpdater};

/// Result of marking a meal completed or not completed
#[derive(Debug, Clone)]
pub struct CompletionOutcome {
    pub dish: Dish,
    /// False when the meal already had the requested state
    pub changed: bool,
    /// Pantry changes, present only when the state changed
    pub report: Option<PantryUpdateReport>,
}

/// Service for weekly meal plans
pub struct PlanService<'a> {
    storage: &'a Storage,
    registry: &'a UnitRegistry,
}

impl<'a> PlanService<'a> {
    pub fn new(storage: &'a Storage, registry: &'a UnitRegistry) -> Self {
        Self { storage, registry }
    }

    /// The plan of the week containing `date`, empty if nothing is planned
    pub fn week(&self, date: NaiveDate) -> MealPlanResult<WeeklyPlan> {
        self.storage.plans.get_or_default(WeekKey::containing(date))
    }

    /// Append a dish to a slot
    pub fn assign(&self, date: NaiveDate, slot: MealSlot, dish: &str) -> MealPlanResult<Dish> {
        let dish = DishService::new(self.storage, self.registry).get(dish)?;

        let before = self.week(date)?;
        let mut plan = before.clone();
        plan.day_mut(DayOfWeek::of(date))
            .slot_mut(slot)
            .push(PlannedMeal::new(dish.id));

        self.save_plan(
            &before,
            &plan,
            format!("assigned {} to {} {}", dish.name, date, slot),
        )?;

        Ok(dish)
    }

    /// Remove the first occurrence of a dish from a slot
    ///
    /// The dish may be given by ID even if it has since been deleted.
    pub fn unassign(&self, date: NaiveDate, slot: MealSlot, dish: &str) -> MealPlanResult<()> {
        let before = self.week(date)?;
        let mut plan = before.clone();

        let dish_id = self.resolve_planned(&before, date, slot, dish)?;
        let meals = plan.day_mut(DayOfWeek::of(date)).slot_mut(slot);
        let position = meals
            .iter()
            .position(|m| m.dish_id == dish_id)
            .ok_or_else(|| not_planned(dish, date, slot))?;
        meals.remove(position);

        self.save_plan(
            &before,
            &plan,
            format!("unassigned {} from {} {}", dish.trim(), date, slot),
        )
    }

    /// Mark a planned meal as eaten, or undo that
    ///
    /// The pantry is reconciled only when the flag actually flips, and
    /// before the plan is saved, so a failed pantry update leaves the meal
    /// in its previous state.
    pub fn set_completed(
        &self,
        date: NaiveDate,
        slot: MealSlot,
        dish: &str,
        completed: bool,
    ) -> MealPlanResult<CompletionOutcome> {
        let dish = DishService::new(self.storage, self.registry).get(dish)?;

        let before = self.week(date)?;
        let mut plan = before.clone();
        let meals = plan.day_mut(DayOfWeek::of(date)).slot_mut(slot);

        if !meals.iter().any(|m| m.dish_id == dish.id) {
            return Err(not_planned(&dish.name, date, slot));
        }
        let Some(meal) = meals
            .iter_mut()
            .find(|m| m.dish_id == dish.id && m.completed != completed)
        else {
            return Ok(CompletionOutcome {
                dish,
                changed: false,
                report: None,
            });
        };
        meal.completed = completed;

        let report =
            PantryUpdater::new(self.registry, self.storage).complete_meal(&dish, completed)?;

        let verb = if completed { "completed" } else { "reopened" };
        self.save_plan(
            &before,
            &plan,
            format!("{} {} on {} {}", verb, dish.name, date, slot),
        )?;

        Ok(CompletionOutcome {
            dish,
            changed: true,
            report: Some(report),
        })
    }

    fn resolve_planned(
        &self,
        plan: &WeeklyPlan,
        date: NaiveDate,
        slot: MealSlot,
        dish: &str,
    ) -> MealPlanResult<DishId> {
        if let Some(found) = DishService::new(self.storage, self.registry).find(dish)? {
            return Ok(found.id);
        }

        plan.day(DayOfWeek::of(date))
            .and_then(|day| day.slot(slot).iter().find(|m| m.dish_id.matches(dish)))
            .map(|m| m.dish_id)
            .ok_or_else(|| MealPlanError::dish_not_found(dish.trim()))
    }

    fn save_plan(
        &self,
        before: &WeeklyPlan,
        after: &WeeklyPlan,
        summary: String,
    ) -> MealPlanResult<()> {
        self.storage.plans.upsert(after.clone())?;
        self.storage.plans.save()?;

        self.storage.log_update(
            EntityType::MealPlan,
            after.week.to_string(),
            None,
            before,
            after,
            Some(summary),
        )
    }
}

fn not_planned(dish: &str, date: NaiveDate, slot: MealSlot) -> MealPlanError {
    MealPlanError::NotFound {
        entity_type: "Planned meal",
        identifier: format!("{} on {} {}", dish.trim(), date, slot),
    }
}
