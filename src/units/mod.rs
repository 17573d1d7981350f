//! Unit conversion
//!
//! Every measured quantity belongs to one of three measurement families
//! (volume, weight, count). Units within a family convert through the
//! family's base unit (milliliter, gram, single piece); units across
//! families never convert.
//!
//! - `registry`: the unit table and base-unit arithmetic
//! - `display`: picking a readable unit for a base amount

pub mod display;
pub mod family;
pub mod registry;

pub use display::{DisplayQuantity, DisplayUnitSelector, UnitHints};
pub use family::MeasurementFamily;
pub use registry::{parse_amount, UnitDefinition, UnitRegistry};
