//! Pantry reconciliation
//!
//! Keeps pantry stock in step with what happens in the kitchen: completing a
//! meal consumes its ingredients, undoing it or committing bought groceries
//! restocks them. Work is split in two:
//!
//! - [`plan_pantry_mutations`] is pure. It runs over an index-addressed copy
//!   of a pantry snapshot and returns the row writes to perform.
//! - [`PantryUpdater`] reloads the pantry, plans, and applies each write
//!   through a [`PantryStore`] one at a time, in plan order.

use std::cmp::Ordering;

use tracing::{debug, info, warn};

use crate::error::MealPlanResult;
use crate::models::{normalize_name, Dish, GroceryItem, Ingredient, PantryItem, Quantity};
use crate::units::UnitRegistry;

/// Persistence for pantry rows
pub trait PantryStore {
    /// Current pantry rows, re-read from the backing store
    fn load_pantry(&self) -> MealPlanResult<Vec<PantryItem>>;

    /// Persist new values for an existing row
    fn update_pantry_item(&self, item: PantryItem) -> MealPlanResult<PantryItem>;

    /// Persist a new row
    fn create_pantry_item(&self, name: &str, quantity: Quantity) -> MealPlanResult<PantryItem>;
}

/// Whether ingredients leave or enter the pantry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockDirection {
    Consume,
    Restock,
}

impl StockDirection {
    fn sign(self) -> f64 {
        match self {
            Self::Consume => -1.0,
            Self::Restock => 1.0,
        }
    }
}

/// A single pantry write
#[derive(Debug, Clone, PartialEq)]
pub enum PantryMutation {
    /// New values for the snapshot row at `index`
    Update {
        index: usize,
        previous: Quantity,
        item: PantryItem,
    },
    /// A row that does not exist yet
    Create { name: String, quantity: Quantity },
}

/// Writes to perform, plus what could not be applied
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MutationPlan {
    /// In the order rows were first touched
    pub mutations: Vec<PantryMutation>,
    /// Consumption the pantry could not cover, in the ingredient's unit
    pub shortfalls: Vec<Ingredient>,
    /// Ingredients ignored because of an unknown unit or bad amount
    pub skipped: Vec<Ingredient>,
}

impl MutationPlan {
    pub fn is_empty(&self) -> bool {
        self.mutations.is_empty()
    }
}

/// A row of the working copy
struct WorkingRow {
    item: PantryItem,
    /// Position in the snapshot; `None` for rows created by this plan
    snapshot_index: Option<usize>,
    /// Position of this row's write in the plan, once touched
    mutation: Option<usize>,
}

struct Planner<'r> {
    registry: &'r UnitRegistry,
    rows: Vec<WorkingRow>,
    plan: MutationPlan,
}

impl<'r> Planner<'r> {
    fn write(&mut self, row: usize, amount: f64) {
        let quantity = Quantity::new(amount, self.rows[row].item.quantity.unit.clone());
        if quantity == self.rows[row].item.quantity {
            return;
        }

        let previous = self.rows[row].item.quantity.clone();
        self.rows[row].item.quantity = quantity.clone();

        match self.rows[row].mutation {
            Some(position) => match &mut self.plan.mutations[position] {
                PantryMutation::Update { item, .. } => item.set_quantity(quantity),
                PantryMutation::Create { quantity: q, .. } => *q = quantity,
            },
            None => {
                if let Some(index) = self.rows[row].snapshot_index {
                    let mut item = self.rows[row].item.clone();
                    item.set_quantity(quantity);
                    self.rows[row].mutation = Some(self.plan.mutations.len());
                    self.plan.mutations.push(PantryMutation::Update {
                        index,
                        previous,
                        item,
                    });
                }
            }
        }
    }

    fn create(&mut self, name: &str, quantity: Quantity) {
        self.rows.push(WorkingRow {
            item: PantryItem::new(name, quantity.clone()),
            snapshot_index: None,
            mutation: Some(self.plan.mutations.len()),
        });
        self.plan.mutations.push(PantryMutation::Create {
            name: name.to_string(),
            quantity,
        });
    }

    /// Base amount of a compatible row, clamped at zero
    fn row_base(&self, row: usize) -> f64 {
        let quantity = &self.rows[row].item.quantity;
        self.registry
            .to_base_amount(quantity.amount, &quantity.unit)
            .unwrap_or(0.0)
            .max(0.0)
    }

    fn apply(&mut self, ingredient: &Ingredient, direction: StockDirection) {
        let unit = ingredient.quantity.unit.as_str();
        let amount = ingredient.quantity.amount;
        let (Some(family), Some(base_amount)) = (
            self.registry.family_of(unit),
            self.registry.to_base_amount(amount, unit),
        ) else {
            debug!(ingredient = %ingredient.name, unit, "skipping ingredient with unknown unit");
            self.plan.skipped.push(ingredient.clone());
            return;
        };
        if amount <= 0.0 {
            debug!(ingredient = %ingredient.name, amount, "skipping non-positive amount");
            self.plan.skipped.push(ingredient.clone());
            return;
        }

        let name = normalize_name(&ingredient.name);
        let mut compatible: Vec<usize> = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| {
                row.item.normalized_name() == name
                    && self.registry.family_of(&row.item.quantity.unit) == Some(family)
            })
            .map(|(position, _)| position)
            .collect();

        if compatible.is_empty() {
            match direction {
                StockDirection::Restock => {
                    self.create(ingredient.name.trim(), ingredient.quantity.clone())
                }
                StockDirection::Consume => self.plan.shortfalls.push(ingredient.clone()),
            }
            return;
        }

        // Largest rows first
        let bases: Vec<f64> = (0..self.rows.len()).map(|row| self.row_base(row)).collect();
        compatible.sort_by(|&a, &b| bases[b].partial_cmp(&bases[a]).unwrap_or(Ordering::Equal));

        let mut delta = direction.sign() * base_amount;
        for row in compatible {
            if delta == 0.0 {
                break;
            }
            let row_base = bases[row];
            let new_base = row_base + delta;
            let row_unit = self.rows[row].item.quantity.unit.clone();

            if new_base >= 0.0 {
                // Change applied in the row's own unit
                let current = self.rows[row].item.quantity.amount.max(0.0);
                if let Some(change) = self.registry.from_base_amount(delta, &row_unit) {
                    self.write(row, (current + change).max(0.0));
                }
                delta = 0.0;
            } else {
                self.write(row, 0.0);
                delta += row_base;
            }
        }

        let leftover = self.registry.from_base_amount(delta.abs(), unit).unwrap_or(0.0);
        if delta > 0.0 && direction == StockDirection::Restock {
            self.create(ingredient.name.trim(), Quantity::new(leftover, unit));
        } else if delta < 0.0 && direction == StockDirection::Consume {
            self.plan.shortfalls.push(Ingredient {
                name: ingredient.name.clone(),
                quantity: Quantity::new(leftover, unit).rounded(),
            });
        }
    }
}

/// Plan the pantry writes for a batch of ingredients
///
/// Rows match an ingredient by case-insensitive name and measurement family;
/// rows of another family are never touched. Consumption drains the largest
/// row first and floors rows at zero; whatever the pantry cannot cover is
/// reported as a shortfall and otherwise dropped. Restocking tops up the
/// largest row, or creates a row when none is compatible. Later ingredients
/// see the effect of earlier ones.
pub fn plan_pantry_mutations(
    registry: &UnitRegistry,
    snapshot: &[PantryItem],
    ingredients: &[Ingredient],
    direction: StockDirection,
) -> MutationPlan {
    let mut planner = Planner {
        registry,
        rows: snapshot
            .iter()
            .enumerate()
            .map(|(index, item)| WorkingRow {
                item: item.clone(),
                snapshot_index: Some(index),
                mutation: None,
            })
            .collect(),
        plan: MutationPlan::default(),
    };

    for ingredient in ingredients {
        planner.apply(ingredient, direction);
    }

    planner.plan
}

/// What a reconciliation wrote and what it could not do
#[derive(Debug, Clone, Default)]
pub struct PantryUpdateReport {
    /// Rows as returned by the store, in write order
    pub saved: Vec<PantryItem>,
    pub shortfalls: Vec<Ingredient>,
    pub skipped: Vec<Ingredient>,
}

/// Applies stock changes to a pantry store
pub struct PantryUpdater<'a, S: PantryStore + ?Sized> {
    registry: &'a UnitRegistry,
    store: &'a S,
}

impl<'a, S: PantryStore + ?Sized> PantryUpdater<'a, S> {
    pub fn new(registry: &'a UnitRegistry, store: &'a S) -> Self {
        Self { registry, store }
    }

    /// Reload the pantry, plan the writes and apply them in order
    ///
    /// Store errors abort the batch and propagate; writes already applied
    /// stay applied. Retrying is safe since each call starts from a reload.
    pub fn update_from_ingredients(
        &self,
        ingredients: &[Ingredient],
        direction: StockDirection,
    ) -> MealPlanResult<PantryUpdateReport> {
        let snapshot = self.store.load_pantry()?;
        let plan = plan_pantry_mutations(self.registry, &snapshot, ingredients, direction);

        for shortfall in &plan.shortfalls {
            warn!(
                ingredient = %shortfall.name,
                missing = %shortfall.quantity,
                "pantry stock insufficient; shortfall discarded"
            );
        }

        let mut saved = Vec::with_capacity(plan.mutations.len());
        for mutation in plan.mutations {
            let row = match mutation {
                PantryMutation::Update { item, .. } => self.store.update_pantry_item(item)?,
                PantryMutation::Create { name, quantity } => {
                    self.store.create_pantry_item(&name, quantity)?
                }
            };
            saved.push(row);
        }

        info!(
            direction = ?direction,
            ingredients = ingredients.len(),
            rows = saved.len(),
            "pantry reconciled"
        );

        Ok(PantryUpdateReport {
            saved,
            shortfalls: plan.shortfalls,
            skipped: plan.skipped,
        })
    }

    /// Completing a meal consumes its ingredients; undoing it restocks them
    pub fn complete_meal(
        &self,
        dish: &Dish,
        is_completing: bool,
    ) -> MealPlanResult<PantryUpdateReport> {
        let direction = if is_completing {
            StockDirection::Consume
        } else {
            StockDirection::Restock
        };
        self.update_from_ingredients(&dish.ingredients, direction)
    }

    /// Bought grocery items go into the pantry
    pub fn complete_grocery_items(
        &self,
        items: &[GroceryItem],
    ) -> MealPlanResult<PantryUpdateReport> {
        let ingredients: Vec<Ingredient> = items.iter().map(GroceryItem::to_ingredient).collect();
        self.update_from_ingredients(&ingredients, StockDirection::Restock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MealPlanError;
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct MemoryPantry {
        rows: RefCell<Vec<PantryItem>>,
        loads: Cell<usize>,
        fail_writes: bool,
    }

    impl MemoryPantry {
        fn with_rows(rows: &[(&str, f64, &str)]) -> Self {
            let pantry = Self::default();
            *pantry.rows.borrow_mut() = rows
                .iter()
                .map(|&(name, amount, unit)| PantryItem::new(name, Quantity::new(amount, unit)))
                .collect();
            pantry
        }

        fn summary(&self) -> Vec<(String, f64, String)> {
            self.rows
                .borrow()
                .iter()
                .map(|r| (r.name.clone(), r.quantity.amount, r.quantity.unit.clone()))
                .collect()
        }
    }

    impl PantryStore for MemoryPantry {
        fn load_pantry(&self) -> MealPlanResult<Vec<PantryItem>> {
            self.loads.set(self.loads.get() + 1);
            Ok(self.rows.borrow().clone())
        }

        fn update_pantry_item(&self, item: PantryItem) -> MealPlanResult<PantryItem> {
            if self.fail_writes {
                return Err(MealPlanError::Storage("disk full".into()));
            }
            let mut rows = self.rows.borrow_mut();
            let row = rows
                .iter_mut()
                .find(|r| r.id == item.id)
                .ok_or_else(|| MealPlanError::pantry_item_not_found(item.id.to_string()))?;
            *row = item.clone();
            Ok(item)
        }

        fn create_pantry_item(&self, name: &str, quantity: Quantity) -> MealPlanResult<PantryItem> {
            if self.fail_writes {
                return Err(MealPlanError::Storage("disk full".into()));
            }
            let item = PantryItem::new(name, quantity);
            self.rows.borrow_mut().push(item.clone());
            Ok(item)
        }
    }

    fn row(name: &str, amount: f64, unit: &str) -> (String, f64, String) {
        (name.to_string(), amount, unit.to_string())
    }

    #[test]
    fn test_consume_drains_largest_row_first() {
        let registry = UnitRegistry::standard();
        let pantry = MemoryPantry::with_rows(&[("rice", 500.0, "gram"), ("rice", 2.0, "kilogram")]);
        let snapshot = pantry.rows.borrow().clone();

        let plan = plan_pantry_mutations(
            &registry,
            &snapshot,
            &[Ingredient::new("rice", 2200.0, "gram")],
            StockDirection::Consume,
        );

        let writes: Vec<(usize, f64)> = plan
            .mutations
            .iter()
            .map(|m| match m {
                PantryMutation::Update { index, item, .. } => (*index, item.quantity.amount),
                PantryMutation::Create { .. } => panic!("unexpected create"),
            })
            .collect();
        assert_eq!(writes, vec![(1, 0.0), (0, 300.0)]);
        assert!(plan.shortfalls.is_empty());
    }

    #[test]
    fn test_updater_applies_depletion() {
        let registry = UnitRegistry::standard();
        let pantry = MemoryPantry::with_rows(&[("rice", 2.0, "kilogram"), ("rice", 500.0, "gram")]);

        PantryUpdater::new(&registry, &pantry)
            .update_from_ingredients(&[Ingredient::new("Rice", 2200.0, "gram")], StockDirection::Consume)
            .unwrap();

        assert_eq!(
            pantry.summary(),
            vec![row("rice", 0.0, "kilogram"), row("rice", 300.0, "gram")]
        );
        assert_eq!(pantry.loads.get(), 1);
    }

    #[test]
    fn test_restock_empty_pantry_creates_row() {
        let registry = UnitRegistry::standard();
        let pantry = MemoryPantry::default();
        let items = vec![GroceryItem::new("eggs", Quantity::new(12.0, "piece"))];

        let report = PantryUpdater::new(&registry, &pantry)
            .complete_grocery_items(&items)
            .unwrap();

        assert_eq!(report.saved.len(), 1);
        assert_eq!(pantry.summary(), vec![row("eggs", 12.0, "piece")]);
    }

    #[test]
    fn test_restock_converts_into_row_unit() {
        let registry = UnitRegistry::standard();
        let pantry = MemoryPantry::with_rows(&[("eggs", 1.0, "dozen")]);

        PantryUpdater::new(&registry, &pantry)
            .update_from_ingredients(&[Ingredient::new("eggs", 6.0, "piece")], StockDirection::Restock)
            .unwrap();

        assert_eq!(pantry.summary(), vec![row("eggs", 1.5, "dozen")]);
    }

    #[test]
    fn test_small_delta_against_large_row_is_written() {
        let registry = UnitRegistry::standard();
        let snapshot = vec![PantryItem::new("milk", Quantity::new(1.0, "gallon"))];
        let tablespoon = [Ingredient::new("milk", 1.0, "tablespoon")];

        let consume =
            plan_pantry_mutations(&registry, &snapshot, &tablespoon, StockDirection::Consume);
        assert!(consume.shortfalls.is_empty());
        let [PantryMutation::Update { item, .. }] = consume.mutations.as_slice() else {
            panic!("expected one update, got {:?}", consume.mutations);
        };
        assert_eq!(item.quantity.unit, "gallon");
        let after = registry.to_base_amount(item.quantity.amount, "gallon").unwrap();
        assert!((3785.41 - after - 14.7868).abs() < 1e-9);

        let restock =
            plan_pantry_mutations(&registry, &snapshot, &tablespoon, StockDirection::Restock);
        let [PantryMutation::Update { item, .. }] = restock.mutations.as_slice() else {
            panic!("expected one update, got {:?}", restock.mutations);
        };
        let after = registry.to_base_amount(item.quantity.amount, "gallon").unwrap();
        assert!((after - 3785.41 - 14.7868).abs() < 1e-9);
    }

    #[test]
    fn test_complete_and_undo_meal() {
        let registry = UnitRegistry::standard();
        let pantry = MemoryPantry::with_rows(&[("flour", 5.0, "cup")]);
        let dish = Dish::with_ingredients("Pancakes", vec![Ingredient::new("flour", 2.0, "cup")]);
        let updater = PantryUpdater::new(&registry, &pantry);

        updater.complete_meal(&dish, true).unwrap();
        assert_eq!(pantry.summary(), vec![row("flour", 3.0, "cup")]);

        updater.complete_meal(&dish, false).unwrap();
        assert_eq!(pantry.summary(), vec![row("flour", 5.0, "cup")]);
    }

    #[test]
    fn test_consume_shortfall_floors_at_zero() {
        let registry = UnitRegistry::standard();
        let pantry = MemoryPantry::with_rows(&[("flour", 1.0, "cup")]);

        let report = PantryUpdater::new(&registry, &pantry)
            .update_from_ingredients(&[Ingredient::new("flour", 3.0, "cup")], StockDirection::Consume)
            .unwrap();

        assert_eq!(pantry.summary(), vec![row("flour", 0.0, "cup")]);
        assert_eq!(report.shortfalls, vec![Ingredient::new("flour", 2.0, "cup")]);
    }

    #[test]
    fn test_other_family_rows_untouched() {
        let registry = UnitRegistry::standard();
        let snapshot = vec![PantryItem::new("parmesan", Quantity::new(200.0, "gram"))];

        let consume = plan_pantry_mutations(
            &registry,
            &snapshot,
            &[Ingredient::new("parmesan", 1.0, "piece")],
            StockDirection::Consume,
        );
        assert!(consume.is_empty());
        assert_eq!(consume.shortfalls.len(), 1);

        let restock = plan_pantry_mutations(
            &registry,
            &snapshot,
            &[Ingredient::new("parmesan", 1.0, "piece")],
            StockDirection::Restock,
        );
        assert_eq!(
            restock.mutations,
            vec![PantryMutation::Create {
                name: "parmesan".into(),
                quantity: Quantity::new(1.0, "piece"),
            }]
        );
    }

    #[test]
    fn test_batch_sees_rows_created_earlier() {
        let registry = UnitRegistry::standard();
        let plan = plan_pantry_mutations(
            &registry,
            &[],
            &[
                Ingredient::new("milk", 1.0, "liter"),
                Ingredient::new("milk", 500.0, "milliliter"),
            ],
            StockDirection::Restock,
        );

        assert_eq!(
            plan.mutations,
            vec![PantryMutation::Create {
                name: "milk".into(),
                quantity: Quantity::new(1.5, "liter"),
            }]
        );
    }

    #[test]
    fn test_unknown_units_and_bad_amounts_skipped() {
        let registry = UnitRegistry::standard();
        let snapshot = vec![PantryItem::new("salt", Quantity::new(1.0, "pinch"))];

        let plan = plan_pantry_mutations(
            &registry,
            &snapshot,
            &[
                Ingredient::new("salt", 1.0, "pinch"),
                Ingredient::new("sugar", -1.0, "cup"),
            ],
            StockDirection::Restock,
        );

        assert!(plan.is_empty());
        assert_eq!(plan.skipped.len(), 2);
    }

    #[test]
    fn test_store_errors_propagate() {
        let registry = UnitRegistry::standard();
        let pantry = MemoryPantry {
            fail_writes: true,
            ..MemoryPantry::with_rows(&[("flour", 1.0, "cup")])
        };

        let result = PantryUpdater::new(&registry, &pantry)
            .update_from_ingredients(&[Ingredient::new("flour", 1.0, "cup")], StockDirection::Restock);

        assert!(matches!(result, Err(MealPlanError::Storage(_))));
        assert_eq!(pantry.summary(), vec![row("flour", 1.0, "cup")]);
    }
}
