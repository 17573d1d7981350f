//! Display formatting for terminal output
//!
//! Plain-text tables and detail views for pantry rows, dishes, meal plans,
//! grocery lists and the unit table. Every formatter returns a `String`; the
//! CLI decides where to print it.

pub mod dish;
pub mod grocery;
pub mod pantry;
pub mod plan;
pub mod units;

pub use dish::{format_dish_details, format_dish_list};
pub use grocery::{format_commit_outcome, format_grocery_list};
pub use pantry::{format_pantry_list, format_pantry_report};
pub use plan::format_week;
pub use units::format_unit_table;
