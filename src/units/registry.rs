//! Unit registry
//!
//! The registry is an immutable table built once at startup and passed by
//! reference to everything that converts quantities. Unit names are part of
//! the stored data format: pantry rows and ingredients keep the unit string
//! exactly as entered, so lookups accept the canonical name, the labelled
//! form ("gram (g)") and common abbreviations.

use std::collections::HashMap;

use super::family::MeasurementFamily;
use crate::error::{MealPlanError, MealPlanResult};

use MeasurementFamily::{Count, Volume, Weight};

/// (name, label, abbreviations, family, factor into the family base unit)
type UnitRow = (
    &'static str,
    &'static str,
    &'static [&'static str],
    MeasurementFamily,
    f64,
);

/// The standard unit table. Order matters: display fallback scans walk it.
const STANDARD_UNITS: &[UnitRow] = &[
    ("teaspoon", "teaspoon (tsp)", &["tsp", "teaspoons"], Volume, 4.92892),
    ("tablespoon", "tablespoon (tbsp)", &["tbsp", "tablespoons"], Volume, 14.7868),
    ("fluid ounce", "fluid ounce (fl oz)", &["fl oz", "fluid ounces"], Volume, 29.5735),
    ("cup", "cup", &["cups"], Volume, 236.588),
    ("pint", "pint (pt)", &["pt", "pints"], Volume, 473.176),
    ("quart", "quart (qt)", &["qt", "quarts"], Volume, 946.353),
    ("gallon", "gallon (gal)", &["gal", "gallons"], Volume, 3785.41),
    ("milliliter", "milliliter (ml)", &["ml", "milliliters"], Volume, 1.0),
    ("liter", "liter (l)", &["l", "liters"], Volume, 1000.0),
    ("ounce", "ounce (oz)", &["oz", "ounces"], Weight, 28.3495),
    ("pound", "pound (lb)", &["lb", "lbs", "pounds"], Weight, 453.592),
    ("gram", "gram (g)", &["g", "grams"], Weight, 1.0),
    ("kilogram", "kilogram (kg)", &["kg", "kilograms"], Weight, 1000.0),
    ("piece", "piece", &["pieces", "pc"], Count, 1.0),
    ("dozen", "dozen", &[], Count, 12.0),
    ("pack", "pack", &["packs"], Count, 1.0),
    ("can", "can", &["cans"], Count, 1.0),
    ("bottle", "bottle", &["bottles"], Count, 1.0),
    ("box", "box", &["boxes"], Count, 1.0),
];

/// A single unit in the registry
#[derive(Debug, Clone, PartialEq)]
pub struct UnitDefinition {
    /// Canonical name, used when the planner picks a unit itself
    pub name: String,
    /// Labelled form shown in pickers
    pub label: String,
    /// Extra spellings accepted on lookup
    pub aliases: Vec<String>,
    pub family: MeasurementFamily,
    /// Multiplier into the family base unit
    pub factor: f64,
}

impl UnitDefinition {
    /// Create a definition whose label is its name
    pub fn new(name: impl Into<String>, family: MeasurementFamily, factor: f64) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            aliases: Vec::new(),
            family,
            factor,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    fn lookup_keys(&self) -> impl Iterator<Item = String> + '_ {
        std::iter::once(&self.name)
            .chain(std::iter::once(&self.label))
            .chain(self.aliases.iter())
            .map(|k| normalize_unit(k))
    }
}

/// Immutable table of known units
#[derive(Debug, Clone)]
pub struct UnitRegistry {
    units: Vec<UnitDefinition>,
    /// Index: normalized spelling -> position in `units`
    index: HashMap<String, usize>,
}

impl UnitRegistry {
    /// Build the standard registry
    pub fn standard() -> Self {
        let units = STANDARD_UNITS
            .iter()
            .map(|&(name, label, aliases, family, factor)| UnitDefinition {
                name: name.to_string(),
                label: label.to_string(),
                aliases: aliases.iter().map(|a| a.to_string()).collect(),
                family,
                factor,
            })
            .collect();

        // The static table is known-good; skip validation.
        Self::index_units(units)
    }

    /// Build a registry from custom definitions
    ///
    /// Rejects empty names, non-positive factors and spellings claimed by two
    /// different units.
    pub fn from_definitions(units: Vec<UnitDefinition>) -> MealPlanResult<Self> {
        let mut seen: HashMap<String, usize> = HashMap::new();

        for (position, unit) in units.iter().enumerate() {
            if unit.name.trim().is_empty() {
                return Err(MealPlanError::Config("Unit name cannot be empty".into()));
            }
            if !(unit.factor.is_finite() && unit.factor > 0.0) {
                return Err(MealPlanError::Config(format!(
                    "Unit '{}' has invalid conversion factor {}",
                    unit.name, unit.factor
                )));
            }
            for key in unit.lookup_keys() {
                if let Some(&other) = seen.get(&key) {
                    if other != position {
                        return Err(MealPlanError::Config(format!(
                            "Unit spelling '{}' is used by both '{}' and '{}'",
                            key, units[other].name, unit.name
                        )));
                    }
                }
                seen.insert(key, position);
            }
        }

        Ok(Self::index_units(units))
    }

    fn index_units(units: Vec<UnitDefinition>) -> Self {
        let mut index = HashMap::new();
        for (position, unit) in units.iter().enumerate() {
            for key in unit.lookup_keys() {
                index.entry(key).or_insert(position);
            }
        }
        Self { units, index }
    }

    /// Find a unit by any accepted spelling
    pub fn lookup(&self, unit: &str) -> Option<&UnitDefinition> {
        self.index
            .get(&normalize_unit(unit))
            .map(|&position| &self.units[position])
    }

    /// Measurement family of a unit, if known
    pub fn family_of(&self, unit: &str) -> Option<MeasurementFamily> {
        self.lookup(unit).map(|u| u.family)
    }

    /// Convert an amount into its family base unit
    pub fn to_base_amount(&self, amount: f64, unit: &str) -> Option<f64> {
        if !amount.is_finite() {
            return None;
        }
        self.lookup(unit).map(|u| amount * u.factor)
    }

    /// Convert a textual amount into its family base unit
    pub fn to_base_amount_str(&self, amount: &str, unit: &str) -> Option<f64> {
        self.to_base_amount(parse_amount(amount)?, unit)
    }

    /// Convert a base amount back into `unit`
    pub fn from_base_amount(&self, base_amount: f64, unit: &str) -> Option<f64> {
        if !base_amount.is_finite() {
            return None;
        }
        self.lookup(unit).map(|u| base_amount / u.factor)
    }

    /// True iff both units resolve to the same family
    pub fn units_comparable(&self, unit_a: &str, unit_b: &str) -> bool {
        match (self.family_of(unit_a), self.family_of(unit_b)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// Whether the first quantity is at least the second
    ///
    /// Returns `None` when the units are not comparable.
    pub fn compare(&self, amount_a: f64, unit_a: &str, amount_b: f64, unit_b: &str) -> Option<bool> {
        if !self.units_comparable(unit_a, unit_b) {
            return None;
        }
        let base_a = self.to_base_amount(amount_a, unit_a)?;
        let base_b = self.to_base_amount(amount_b, unit_b)?;
        Some(base_a >= base_b)
    }

    /// Units of one family, in table order
    pub fn units_in(&self, family: MeasurementFamily) -> impl Iterator<Item = &UnitDefinition> {
        self.units.iter().filter(move |u| u.family == family)
    }

    /// All units, in table order
    pub fn all_units(&self) -> &[UnitDefinition] {
        &self.units
    }
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

fn normalize_unit(unit: &str) -> String {
    unit.trim().to_lowercase()
}

/// Parse the leading number of a string
///
/// The longest numeric prefix is used, so "2 cups" parses as 2. Text with no
/// numeric prefix yields `None`.
pub fn parse_amount(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }

    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}
