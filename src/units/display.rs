//! Display unit selection
//!
//! Turns a base amount back into something a person would write on a
//! shopping list. Units the caller already uses are honored when they give a
//! sensible number; otherwise the family's table is scanned for a unit that
//! avoids "0.003 gallon" or "50000 gram".

use serde::{Deserialize, Serialize};

use super::family::MeasurementFamily;
use super::registry::UnitRegistry;

/// Hinted units are accepted when the amount lands in [min, max)
const HINT_RANGE: (f64, f64) = (0.1, 1000.0);

/// Scanned units are accepted when the amount lands in [min, max)
const SCAN_RANGE: (f64, f64) = (0.1, 100.0);

const DEFAULT_COUNT_UNIT: &str = "piece";

/// Ordered unit preferences, highest precedence first
///
/// Absent and blank hints are dropped on insertion, so callers can push
/// optional units without checking them first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnitHints {
    hints: Vec<String>,
}

impl UnitHints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a preference with lower precedence than the existing ones
    pub fn prefer(mut self, unit: Option<&str>) -> Self {
        if let Some(unit) = unit {
            if !unit.trim().is_empty() {
                self.hints.push(unit.to_string());
            }
        }
        self
    }

    /// The highest-precedence hint
    pub fn first(&self) -> Option<&str> {
        self.hints.first().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.hints.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.hints.is_empty()
    }
}

impl<'a> FromIterator<&'a str> for UnitHints {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter()
            .fold(UnitHints::new(), |hints, unit| hints.prefer(Some(unit)))
    }
}

/// An amount paired with the unit chosen to show it in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayQuantity {
    pub amount: f64,
    pub unit: String,
}

/// Picks readable units for base amounts
pub struct DisplayUnitSelector<'a> {
    registry: &'a UnitRegistry,
}

impl<'a> DisplayUnitSelector<'a> {
    pub fn new(registry: &'a UnitRegistry) -> Self {
        Self { registry }
    }

    /// Choose the display unit for `base_amount` of the given family
    ///
    /// Count amounts always use the first hint (or "piece"). Volume and
    /// weight amounts use the first hint in the same family that yields an
    /// amount in [0.1, 1000); failing that, the first table unit yielding
    /// [0.1, 100), or else the unit whose amount is closest to 1.
    pub fn select(
        &self,
        base_amount: f64,
        family: MeasurementFamily,
        hints: &UnitHints,
    ) -> DisplayQuantity {
        if family == MeasurementFamily::Count {
            let unit = hints.first().unwrap_or(DEFAULT_COUNT_UNIT);
            let amount = match self.registry.lookup(unit) {
                Some(def) if def.family == MeasurementFamily::Count => base_amount / def.factor,
                _ => base_amount,
            };
            return DisplayQuantity {
                amount,
                unit: unit.to_string(),
            };
        }

        for hint in hints.iter() {
            let Some(def) = self.registry.lookup(hint) else {
                continue;
            };
            if def.family != family {
                continue;
            }
            let amount = base_amount / def.factor;
            if in_range(amount, HINT_RANGE) {
                return DisplayQuantity {
                    amount,
                    unit: hint.to_string(),
                };
            }
        }

        self.scan(base_amount, family)
    }

    fn scan(&self, base_amount: f64, family: MeasurementFamily) -> DisplayQuantity {
        let mut units = self.registry.units_in(family);

        let Some(first) = units.next() else {
            return DisplayQuantity {
                amount: base_amount,
                unit: family.base_unit().to_string(),
            };
        };

        let mut best_unit = first;
        let mut best_amount = base_amount / first.factor;
        if in_range(best_amount, SCAN_RANGE) {
            return DisplayQuantity {
                amount: best_amount,
                unit: best_unit.name.clone(),
            };
        }

        for unit in units {
            let amount = base_amount / unit.factor;
            if in_range(amount, SCAN_RANGE) {
                best_unit = unit;
                best_amount = amount;
                break;
            }
            if (1.0 - amount).abs() < (1.0 - best_amount).abs() {
                best_unit = unit;
                best_amount = amount;
            }
        }

        DisplayQuantity {
            amount: best_amount,
            unit: best_unit.name.clone(),
        }
    }
}

fn in_range(amount: f64, (min, max): (f64, f64)) -> bool {
    amount >= min && amount < max
}

#[cfg(test)]
mod tests {
    use super::*;

    fn select(base: f64, family: MeasurementFamily, hints: &[&str]) -> DisplayQuantity {
        let registry = UnitRegistry::standard();
        let hints: UnitHints = hints.iter().copied().collect();
        DisplayUnitSelector::new(&registry).select(base, family, &hints)
    }

    #[test]
    fn test_round_trip_keeps_preferred_unit() {
        let registry = UnitRegistry::standard();
        let base = registry.to_base_amount(3.0, "cup").unwrap();
        let shown = select(base, MeasurementFamily::Volume, &["cup"]);
        assert_eq!(shown.unit, "cup");
        assert!((shown.amount - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_preferred_unit_verbatim() {
        let shown = select(500.0, MeasurementFamily::Weight, &["gram (g)"]);
        assert_eq!(shown.unit, "gram (g)");
        assert!((shown.amount - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_out_of_range_hint_falls_back_to_scan() {
        // 0.5 ml is far below 0.1 gallon
        let shown = select(0.5, MeasurementFamily::Volume, &["gallon"]);
        assert_eq!(shown.unit, "teaspoon");
    }

    #[test]
    fn test_scan_prefers_reasonable_weight() {
        let shown = select(50_000.0, MeasurementFamily::Weight, &[]);
        assert_eq!(shown.unit, "kilogram");
        assert!((shown.amount - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_second_hint_used_when_first_out_of_range() {
        let shown = select(2000.0, MeasurementFamily::Weight, &["ounce", "kilogram"]);
        assert_eq!(shown.unit, "ounce");

        let shown = select(2000.0, MeasurementFamily::Weight, &["gram", "kilogram"]);
        assert_eq!(shown.unit, "kilogram");
        assert!((shown.amount - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_hint_from_other_family_is_ignored() {
        let shown = select(1000.0, MeasurementFamily::Weight, &["cup", "gram"]);
        assert_eq!(shown.unit, "gram");
    }

    #[test]
    fn test_count_uses_first_hint() {
        let shown = select(24.0, MeasurementFamily::Count, &["dozen", "piece"]);
        assert_eq!(shown.unit, "dozen");
        assert!((shown.amount - 2.0).abs() < 1e-9);

        let shown = select(5.0, MeasurementFamily::Count, &[]);
        assert_eq!(shown.unit, "piece");
        assert!((shown.amount - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_hints_skip_blank_entries() {
        let hints = UnitHints::new()
            .prefer(None)
            .prefer(Some("  "))
            .prefer(Some("can"));
        assert_eq!(hints.first(), Some("can"));
        assert_eq!(hints.iter().count(), 1);
    }
}
