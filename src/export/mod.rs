//! Grocery list export
//!
//! Writes the saved grocery list in one of three formats:
//! - CSV: one row per item, for spreadsheets and shopping apps
//! - JSON: the full list with metadata, machine-readable
//! - YAML: the same document as JSON, for reading by hand

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_grocery_csv;
pub use json::{export_grocery_json, GroceryExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_grocery_yaml;
