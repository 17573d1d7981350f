//! Demand aggregation
//!
//! Walks a date range day by day, reads the weekly plan for each day and
//! folds the ingredients of every planned dish into one demand map. Entries
//! are keyed by name and the literal unit they were written in; unit-family
//! normalization happens later, in the grocery list generator.

use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::error::MealPlanResult;
use crate::models::{DayOfWeek, Dish, DishId, Ingredient, WeekKey, WeeklyPlan};

/// Source of weekly meal plans
pub trait MealPlanSource {
    /// Load the plan for a week; `Ok(None)` when nothing is planned
    fn load_weekly_plan(&self, week: WeekKey) -> MealPlanResult<Option<WeeklyPlan>>;
}

/// Ingredient demand keyed by name and literal unit
///
/// Insertion order is preserved so repeated aggregation over the same plan
/// yields the same order.
#[derive(Debug, Clone, Default)]
pub struct IngredientDemand {
    entries: Vec<Ingredient>,
    /// Index: (name, unit) -> position in `entries`
    index: HashMap<(String, String), usize>,
}

impl IngredientDemand {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one ingredient in, summing with an entry of the same name and unit
    pub fn add(&mut self, ingredient: &Ingredient) {
        let key = (
            ingredient.name.trim().to_string(),
            ingredient.quantity.unit.trim().to_string(),
        );

        match self.index.get(&key) {
            Some(&position) => {
                self.entries[position].quantity.amount += ingredient.quantity.amount;
            }
            None => {
                self.index.insert(key, self.entries.len());
                self.entries.push(ingredient.clone());
            }
        }
    }

    pub fn get(&self, name: &str, unit: &str) -> Option<&Ingredient> {
        self.index
            .get(&(name.trim().to_string(), unit.trim().to_string()))
            .map(|&position| &self.entries[position])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ingredient> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<Ingredient> for IngredientDemand {
    fn from_iter<I: IntoIterator<Item = Ingredient>>(iter: I) -> Self {
        let mut demand = IngredientDemand::new();
        for ingredient in iter {
            demand.add(&ingredient);
        }
        demand
    }
}

/// Outcome of aggregating a date range
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    pub demand: IngredientDemand,
    /// Weeks whose plan could not be loaded; their days contribute nothing
    pub failed_weeks: Vec<WeekKey>,
    /// Planned dish references that no longer resolve
    pub missing_dishes: usize,
}

/// Builds ingredient demand from planned meals
pub struct DemandAggregator<'a, P: MealPlanSource + ?Sized> {
    plans: &'a P,
}

impl<'a, P: MealPlanSource + ?Sized> DemandAggregator<'a, P> {
    pub fn new(plans: &'a P) -> Self {
        Self { plans }
    }

    /// Aggregate demand for every day from `start` to `end`, inclusive
    ///
    /// Plans are read one week at a time, in date order, and cached per week.
    /// A week that fails to load is logged and skipped; the rest of the range
    /// still counts.
    pub fn aggregate(&self, start: NaiveDate, end: NaiveDate, dishes: &[Dish]) -> Aggregation {
        let catalog: HashMap<DishId, &Dish> = dishes.iter().map(|d| (d.id, d)).collect();
        let mut weeks: HashMap<WeekKey, Option<WeeklyPlan>> = HashMap::new();
        let mut result = Aggregation::default();

        let mut day = start;
        while day <= end {
            let week = WeekKey::containing(day);

            if !weeks.contains_key(&week) {
                let plan = match self.plans.load_weekly_plan(week) {
                    Ok(plan) => plan,
                    Err(e) => {
                        warn!(week = %week, error = %e, "failed to load meal plan; skipping week");
                        result.failed_weeks.push(week);
                        None
                    }
                };
                weeks.insert(week, plan);
            }

            if let Some(Some(plan)) = weeks.get(&week) {
                if let Some(day_plan) = plan.day(DayOfWeek::of(day)) {
                    for (slot, meal) in day_plan.meals() {
                        let Some(dish) = catalog.get(&meal.dish_id) else {
                            debug!(
                                date = %day,
                                slot = %slot,
                                dish = %meal.dish_id,
                                "planned dish not found"
                            );
                            result.missing_dishes += 1;
                            continue;
                        };
                        for ingredient in &dish.ingredients {
                            if is_countable(ingredient) {
                                result.demand.add(ingredient);
                            } else {
                                debug!(
                                    dish = %dish.name,
                                    ingredient = %ingredient.name,
                                    "skipping incomplete ingredient"
                                );
                            }
                        }
                    }
                }
            }

            day = match day.succ_opt() {
                Some(next) => next,
                None => break,
            };
        }

        result
    }
}

/// Ingredients missing a name, a unit or a positive amount add no demand
fn is_countable(ingredient: &Ingredient) -> bool {
    !ingredient.name.trim().is_empty()
        && !ingredient.quantity.unit.trim().is_empty()
        && ingredient.quantity.amount.is_finite()
        && ingredient.quantity.amount > 0.0
}
