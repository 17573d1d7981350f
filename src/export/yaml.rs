//! YAML export of the grocery list

use std::io::Write;

use crate::error::{MealPlanError, MealPlanResult};
use crate::export::json::GroceryExport;
use crate::models::SavedGroceryList;

/// Export the grocery list as YAML
pub fn export_grocery_yaml<W: Write>(list: &SavedGroceryList, writer: &mut W) -> MealPlanResult<()> {
    let export = GroceryExport::from_list(list);

    writeln!(writer, "# Meal planner grocery list")
        .map_err(|e| MealPlanError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", export.exported_at)
        .map_err(|e| MealPlanError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| MealPlanError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| MealPlanError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GroceryItem, Quantity};

    #[test]
    fn test_yaml_export_parses_back() {
        let mut list = SavedGroceryList::default();
        list.manual_items
            .push(GroceryItem::manual("tea", Quantity::new(2.0, "box")));

        let mut buffer = Vec::new();
        export_grocery_yaml(&list, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("# Meal planner grocery list\n"));

        let parsed: GroceryExport = serde_yaml::from_str(&text).unwrap();
        assert_eq!(parsed.manual.len(), 1);
        assert_eq!(parsed.manual[0].name, "tea");
        assert_eq!(parsed.metadata.item_count, 1);
    }
}
