//! Grocery list generation
//!
//! Reconciles ingredient demand against pantry stock. Demand is re-keyed by
//! lowercase name and converted to base amounts; entries of the same name
//! but a different measurement family are tracked under a separate key and
//! never merged. Each key is then matched against the pantry rows of the
//! same name and family and split into the part still to buy and the part
//! already on hand.

use std::collections::HashMap;

use tracing::debug;

use crate::models::{
    normalize_name, round_to_hundredths, GroceryItem, GroceryList, Ingredient, PantryItem,
    Quantity,
};
use crate::units::{DisplayUnitSelector, MeasurementFamily, UnitHints, UnitRegistry};

use super::demand::IngredientDemand;

/// Demand for one ingredient key, in base units
#[derive(Debug, Clone)]
struct BaseDemand {
    name: String,
    match_name: String,
    family: MeasurementFamily,
    base_amount: f64,
    /// Unit of the first demand entry folded into this key
    original_unit: String,
}

/// Pantry stock matching one demand key
struct Stock<'p> {
    base_amount: f64,
    /// Unit of the first matching row, used as a display hint
    unit: &'p str,
}

/// Splits demand into needed and available items
pub struct GroceryListGenerator<'a> {
    registry: &'a UnitRegistry,
}

impl<'a> GroceryListGenerator<'a> {
    pub fn new(registry: &'a UnitRegistry) -> Self {
        Self { registry }
    }

    /// Generate a grocery list from demand and the current pantry
    ///
    /// Entries whose unit cannot be resolved are dropped. All matching pantry
    /// rows of the same family count towards the stock. Output amounts are
    /// rounded to two decimals and follow the order of the demand.
    pub fn generate(&self, demand: &IngredientDemand, pantry: &[PantryItem]) -> GroceryList {
        let selector = DisplayUnitSelector::new(self.registry);
        let mut list = GroceryList::default();

        for entry in self.rekey(demand.iter()) {
            let stock = self.stock_for(&entry, pantry);

            match stock {
                None => {
                    let hints = UnitHints::new().prefer(Some(entry.original_unit.as_str()));
                    let shown = selector.select(entry.base_amount, entry.family, &hints);
                    list.needed.push(grocery_item(&entry.name, shown.amount, shown.unit));
                }
                Some(stock) => {
                    let hints = UnitHints::new()
                        .prefer(Some(entry.original_unit.as_str()))
                        .prefer(Some(stock.unit));

                    if stock.base_amount >= entry.base_amount {
                        let shown = selector.select(entry.base_amount, entry.family, &hints);
                        list.available
                            .push(grocery_item(&entry.name, shown.amount, shown.unit));
                    } else {
                        let missing = entry.base_amount - stock.base_amount;
                        let shown = selector.select(missing, entry.family, &hints);
                        list.needed.push(grocery_item(&entry.name, shown.amount, shown.unit));

                        let shown = selector.select(stock.base_amount, entry.family, &hints);
                        list.available
                            .push(grocery_item(&entry.name, shown.amount, shown.unit));
                    }
                }
            }
        }

        list
    }

    /// Fold demand entries into per-name, per-family base amounts
    fn rekey<'d>(&self, entries: impl Iterator<Item = &'d Ingredient>) -> Vec<BaseDemand> {
        let mut keyed: Vec<BaseDemand> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for ingredient in entries {
            let unit = ingredient.quantity.unit.as_str();
            let (Some(family), Some(base_amount)) = (
                self.registry.family_of(unit),
                self.registry.to_base_amount(ingredient.quantity.amount, unit),
            ) else {
                debug!(ingredient = %ingredient.name, unit, "dropping demand with unknown unit");
                continue;
            };
            if base_amount <= 0.0 {
                debug!(ingredient = %ingredient.name, "dropping non-positive demand");
                continue;
            }

            let match_name = normalize_name(&ingredient.name);
            let primary = match_name.clone();
            let key = match index.get(&primary) {
                Some(&position) if keyed[position].family != family => {
                    format!("{}::{}", match_name, family)
                }
                _ => primary,
            };

            match index.get(&key) {
                Some(&position) => keyed[position].base_amount += base_amount,
                None => {
                    index.insert(key, keyed.len());
                    keyed.push(BaseDemand {
                        name: ingredient.name.trim().to_string(),
                        match_name,
                        family,
                        base_amount,
                        original_unit: unit.to_string(),
                    });
                }
            }
        }

        keyed
    }

    /// Total stock of pantry rows with the same name and family
    ///
    /// `None` when no row matches or the matching rows hold nothing.
    fn stock_for<'p>(&self, entry: &BaseDemand, pantry: &'p [PantryItem]) -> Option<Stock<'p>> {
        let mut stock: Option<Stock<'p>> = None;

        for row in pantry {
            if row.normalized_name() != entry.match_name {
                continue;
            }
            if self.registry.family_of(&row.quantity.unit) != Some(entry.family) {
                continue;
            }
            let Some(base) = self
                .registry
                .to_base_amount(row.quantity.amount, &row.quantity.unit)
            else {
                continue;
            };

            // Every compatible row counts, not just the first one found
            let unit = stock.as_ref().map_or(row.quantity.unit.as_str(), |s| s.unit);
            let base_amount = stock.as_ref().map_or(0.0, |s| s.base_amount) + base.max(0.0);
            stock = Some(Stock { base_amount, unit });
        }

        stock.filter(|s| s.base_amount > 0.0)
    }
}

fn grocery_item(name: &str, amount: f64, unit: String) -> GroceryItem {
    GroceryItem::new(name, Quantity::new(round_to_hundredths(amount), unit))
}
