//! JSON export of the grocery list
//!
//! The export document carries a schema version and a few counts so that
//! other tools can check what they are reading.

use std::io::Write;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{MealPlanError, MealPlanResult};
use crate::models::{GroceryItem, SavedGroceryList};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Grocery list export document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroceryExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    pub app_version: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Generated items still to buy
    pub needed: Vec<GroceryItem>,
    /// Hand-added items
    pub manual: Vec<GroceryItem>,
    /// Demand the pantry already covers
    pub available: Vec<GroceryItem>,
    pub metadata: ExportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub item_count: usize,
    pub checked_count: usize,
}

impl GroceryExport {
    pub fn from_list(list: &SavedGroceryList) -> Self {
        let checked_count = list.needed_items().filter(|i| i.checked).count();
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            start_date: list.start_date,
            end_date: list.end_date,
            needed: list.generated.needed.clone(),
            manual: list.manual_items.clone(),
            available: list.generated.available.clone(),
            metadata: ExportMetadata {
                item_count: list.generated.needed.len()
                    + list.manual_items.len()
                    + list.generated.available.len(),
                checked_count,
            },
        }
    }
}

/// Export the grocery list as JSON
pub fn export_grocery_json<W: Write>(
    list: &SavedGroceryList,
    writer: &mut W,
    pretty: bool,
) -> MealPlanResult<()> {
    let export = GroceryExport::from_list(list);

    if pretty {
        serde_json::to_writer_pretty(&mut *writer, &export)
    } else {
        serde_json::to_writer(&mut *writer, &export)
    }
    .map_err(|e| MealPlanError::Export(e.to_string()))?;

    writeln!(writer).map_err(|e| MealPlanError::Export(e.to_string()))
}
