//! Quantity type: an amount paired with its unit
//!
//! Units are kept exactly as entered so stored records round-trip unchanged;
//! interpretation happens in the unit registry.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An amount with the unit it was measured in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub amount: f64,
    pub unit: String,
}

impl Quantity {
    pub fn new(amount: f64, unit: impl Into<String>) -> Self {
        Self {
            amount,
            unit: unit.into(),
        }
    }

    /// Same unit, amount rounded to hundredths
    pub fn rounded(&self) -> Self {
        Self::new(round_to_hundredths(self.amount), self.unit.clone())
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", format_amount(self.amount), self.unit)
    }
}

/// Round to two decimal places
pub fn round_to_hundredths(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    // Avoid "-0" in output
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Format an amount with at most two decimals and no trailing zeros
pub fn format_amount(value: f64) -> String {
    let text = format!("{:.2}", round_to_hundredths(value));
    let text = text.trim_end_matches('0').trim_end_matches('.');
    text.to_string()
}
