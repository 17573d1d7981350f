//! CSV export of the grocery list

use std::io::Write;

use serde::Serialize;

use crate::error::{MealPlanError, MealPlanResult};
use crate::models::{GroceryItem, SavedGroceryList};

/// One CSV row
#[derive(Serialize)]
struct GroceryRow<'a> {
    section: &'static str,
    id: String,
    name: &'a str,
    amount: f64,
    unit: &'a str,
    checked: bool,
}

impl<'a> GroceryRow<'a> {
    fn new(section: &'static str, item: &'a GroceryItem) -> Self {
        Self {
            section,
            id: item.id.map(|id| id.to_string()).unwrap_or_default(),
            name: &item.name,
            amount: item.quantity.amount,
            unit: &item.quantity.unit,
            checked: item.checked,
        }
    }
}

/// Export every item: needed, then manual, then already available
pub fn export_grocery_csv<W: Write>(list: &SavedGroceryList, writer: W) -> MealPlanResult<()> {
    let mut csv = ::csv::Writer::from_writer(writer);

    let rows = list
        .generated
        .needed
        .iter()
        .map(|item| GroceryRow::new("needed", item))
        .chain(list.manual_items.iter().map(|item| GroceryRow::new("manual", item)))
        .chain(
            list.generated
                .available
                .iter()
                .map(|item| GroceryRow::new("available", item)),
        );

    for row in rows {
        csv.serialize(row)
            .map_err(|e| MealPlanError::Export(e.to_string()))?;
    }

    csv.flush().map_err(|e| MealPlanError::Export(e.to_string()))
}
