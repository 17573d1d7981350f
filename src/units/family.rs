//! Measurement families

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A group of mutually convertible units
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementFamily {
    /// Measured in milliliters
    Volume,
    /// Measured in grams
    Weight,
    /// Measured in single pieces
    Count,
}

impl MeasurementFamily {
    /// All families in table order
    pub const ALL: [MeasurementFamily; 3] = [Self::Volume, Self::Weight, Self::Count];

    /// Name of the family's base unit
    pub fn base_unit(&self) -> &'static str {
        match self {
            Self::Volume => "milliliter",
            Self::Weight => "gram",
            Self::Count => "piece",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Volume => "volume",
            Self::Weight => "weight",
            Self::Count => "count",
        }
    }
}

impl fmt::Display for MeasurementFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MeasurementFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "volume" => Ok(Self::Volume),
            "weight" => Ok(Self::Weight),
            "count" => Ok(Self::Count),
            other => Err(format!("Unknown measurement family: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        for family in MeasurementFamily::ALL {
            let parsed: MeasurementFamily = family.to_string().parse().unwrap();
            assert_eq!(parsed, family);
        }
        assert!("length".parse::<MeasurementFamily>().is_err());
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&MeasurementFamily::Weight).unwrap();
        assert_eq!(json, "\"weight\"");
    }
}
