//! Grocery list models
//!
//! A generated grocery list splits demand into what still has to be bought
//! ("needed") and what the pantry already covers ("available"). Manual items
//! are added by hand and survive regeneration.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::GroceryItemId;
use super::ingredient::Ingredient;
use super::quantity::Quantity;

/// One line on a grocery list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroceryItem {
    /// Assigned when the list is saved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<GroceryItemId>,

    pub name: String,

    #[serde(flatten)]
    pub quantity: Quantity,

    /// Added by hand rather than generated from the meal plan
    #[serde(default)]
    pub manual: bool,

    /// Checked off while shopping, waiting to be committed to the pantry
    #[serde(default)]
    pub checked: bool,
}

impl GroceryItem {
    pub fn new(name: impl Into<String>, quantity: Quantity) -> Self {
        Self {
            id: None,
            name: name.into(),
            quantity,
            manual: false,
            checked: false,
        }
    }

    /// Create a hand-entered item with a fresh id
    pub fn manual(name: impl Into<String>, quantity: Quantity) -> Self {
        let mut item = Self::new(name, quantity);
        item.id = Some(GroceryItemId::new());
        item.manual = true;
        item
    }

    /// The ingredient this item restocks
    pub fn to_ingredient(&self) -> Ingredient {
        Ingredient {
            name: self.name.clone(),
            quantity: self.quantity.clone(),
        }
    }
}

impl fmt::Display for GroceryItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.quantity, self.name)
    }
}

/// Result of reconciling demand against the pantry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroceryList {
    /// Demand not covered by the pantry
    pub needed: Vec<GroceryItem>,
    /// Demand the pantry already covers
    pub available: Vec<GroceryItem>,
}

impl GroceryList {
    pub fn is_empty(&self) -> bool {
        self.needed.is_empty() && self.available.is_empty()
    }
}

/// The persisted grocery list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SavedGroceryList {
    /// First day of the planned range
    #[serde(default)]
    pub start_date: Option<NaiveDate>,

    /// Last day of the planned range (inclusive)
    #[serde(default)]
    pub end_date: Option<NaiveDate>,

    /// Items generated from the meal plan
    #[serde(default)]
    pub generated: GroceryList,

    /// Items added by hand
    #[serde(default)]
    pub manual_items: Vec<GroceryItem>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl SavedGroceryList {
    /// Needed items: generated first, then manual ones
    pub fn needed_items(&self) -> impl Iterator<Item = &GroceryItem> {
        self.generated.needed.iter().chain(self.manual_items.iter())
    }

    pub fn needed_items_mut(&mut self) -> impl Iterator<Item = &mut GroceryItem> {
        self.generated
            .needed
            .iter_mut()
            .chain(self.manual_items.iter_mut())
    }

    pub fn checked_items(&self) -> Vec<GroceryItem> {
        self.needed_items().filter(|i| i.checked).cloned().collect()
    }

    /// Drop every checked needed item; returns how many were removed
    pub fn remove_checked(&mut self) -> usize {
        let before = self.generated.needed.len() + self.manual_items.len();
        self.generated.needed.retain(|i| !i.checked);
        self.manual_items.retain(|i| !i.checked);
        before - self.generated.needed.len() - self.manual_items.len()
    }

    /// Forget the generated part, keeping manual items
    pub fn clear_generated(&mut self) {
        self.start_date = None;
        self.end_date = None;
        self.generated = GroceryList::default();
        self.updated_at = Some(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn saved_list() -> SavedGroceryList {
        let mut flour = GroceryItem::new("flour", Quantity::new(2.0, "cup"));
        flour.id = Some(GroceryItemId::new());
        SavedGroceryList {
            generated: GroceryList {
                needed: vec![flour],
                available: vec![GroceryItem::new("milk", Quantity::new(1.0, "cup"))],
            },
            manual_items: vec![GroceryItem::manual("soap", Quantity::new(1.0, "bottle"))],
            ..Default::default()
        }
    }

    #[test]
    fn test_needed_items_include_manual() {
        let list = saved_list();
        let names: Vec<_> = list.needed_items().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["flour", "soap"]);
    }

    #[test]
    fn test_remove_checked() {
        let mut list = saved_list();
        for item in list.needed_items_mut() {
            item.checked = item.name == "soap";
        }
        assert_eq!(list.checked_items().len(), 1);
        assert_eq!(list.remove_checked(), 1);
        assert!(list.manual_items.is_empty());
        assert_eq!(list.generated.needed.len(), 1);
    }

    #[test]
    fn test_clear_generated_keeps_manual() {
        let mut list = saved_list();
        list.clear_generated();
        assert!(list.generated.is_empty());
        assert_eq!(list.manual_items.len(), 1);
    }

    #[test]
    fn test_generated_item_serializes_without_id() {
        let item = GroceryItem::new("eggs", Quantity::new(12.0, "piece"));
        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["manual"], false);
    }
}
