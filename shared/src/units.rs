//! Unit conversion and normalization module
//!
//! Every measurement is normalized into one canonical representation
//! (kilograms, centimeters) before any formula sees it. The form may collect
//! values in metric or imperial units; the estimator never knows which.
//!
//! # Design Principles
//!
//! 1. **Canonical Storage**: `Measurement` is always kg + cm, never rounded
//! 2. **Conversion at Boundaries**: Convert on input/output, not in formulas
//! 3. **Display Rounding Only**: Rounded helpers exist for re-expressing
//!    already-entered values, the exact conversions are kept separate

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::ParseError;
use crate::validation::{is_present, RawField};

/// Kilograms in one international avoirdupois pound
pub const KG_PER_LB: f64 = 0.45359237;

/// Centimeters in one inch
pub const CM_PER_INCH: f64 = 2.54;

/// Inches in one foot
pub const INCHES_PER_FOOT: f64 = 12.0;

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

// ============================================================================
// Unit Systems
// ============================================================================

/// Unit system the form collects values in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    /// Kilograms and centimeters
    #[default]
    Metric,
    /// Pounds and feet + inches
    Imperial,
}

impl UnitSystem {
    pub fn weight_unit(&self) -> WeightUnit {
        match self {
            UnitSystem::Metric => WeightUnit::Kg,
            UnitSystem::Imperial => WeightUnit::Lb,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UnitSystem {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "metric" | "si" => Ok(UnitSystem::Metric),
            "imperial" | "us" => Ok(UnitSystem::Imperial),
            _ => Err(ParseError::UnitSystem(s.to_string())),
        }
    }
}

// ============================================================================
// Weight Units
// ============================================================================

/// Weight unit used by a unit system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lb,
}

impl WeightUnit {
    /// Convert from this unit to kilograms
    pub fn to_kg(&self, value: f64) -> f64 {
        match self {
            WeightUnit::Kg => value,
            WeightUnit::Lb => lb_to_kg(value),
        }
    }

    /// Convert from kilograms to this unit
    pub fn from_kg(&self, kg: f64) -> f64 {
        match self {
            WeightUnit::Kg => kg,
            WeightUnit::Lb => kg_to_lb(kg),
        }
    }

    /// Convert from kilograms to this unit, rounded to one decimal for display
    pub fn display_from_kg(&self, kg: f64) -> f64 {
        round_to(self.from_kg(kg), 1)
    }

    /// Get the unit abbreviation
    pub fn abbreviation(&self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lb => "lb",
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

/// Pounds to kilograms
pub fn lb_to_kg(lb: f64) -> f64 {
    lb * KG_PER_LB
}

/// Kilograms to pounds
pub fn kg_to_lb(kg: f64) -> f64 {
    kg / KG_PER_LB
}

// ============================================================================
// Height
// ============================================================================

/// Height expressed in feet and inches
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeetInches {
    pub feet: u32,
    pub inches: f64,
}

impl FeetInches {
    /// Create from total inches
    pub fn from_total_inches(total_inches: f64) -> Self {
        let total_inches = total_inches.max(0.0);
        let feet = (total_inches / INCHES_PER_FOOT).floor();
        let inches = total_inches - feet * INCHES_PER_FOOT;
        Self {
            feet: feet as u32,
            inches,
        }
    }

    /// Inches rounded to one decimal, carrying a full 12 into the feet
    pub fn rounded(&self) -> Self {
        let inches = round_to(self.inches, 1);
        if inches >= INCHES_PER_FOOT {
            Self {
                feet: self.feet + 1,
                inches: round_to(inches - INCHES_PER_FOOT, 1),
            }
        } else {
            Self {
                feet: self.feet,
                inches,
            }
        }
    }
}

impl fmt::Display for FeetInches {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.rounded();
        write!(f, "{}'{}\"", rounded.feet, rounded.inches)
    }
}

/// Centimeters to feet + inches (exact)
pub fn cm_to_ft_in(cm: f64) -> FeetInches {
    FeetInches::from_total_inches(cm / CM_PER_INCH)
}

/// Feet + inches to centimeters
pub fn ft_in_to_cm(feet: f64, inches: f64) -> f64 {
    (feet * INCHES_PER_FOOT + inches) * CM_PER_INCH
}

// ============================================================================
// Canonical Measurement
// ============================================================================

/// Body measurement in canonical units
///
/// Both fields are finite and non-negative. A field of `0.0` means the value
/// has not been entered yet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Measurement {
    pub mass_kg: f64,
    pub height_cm: f64,
}

impl Measurement {
    pub fn new(mass_kg: f64, height_cm: f64) -> Self {
        Self {
            mass_kg: mass_kg.field_value(),
            height_cm: height_cm.field_value(),
        }
    }

    /// Both mass and height are present
    pub fn is_complete(&self) -> bool {
        is_present(self.mass_kg) && is_present(self.height_cm)
    }
}

/// Normalize raw form input into a canonical measurement
///
/// In metric the secondary height field is ignored. In imperial the primary
/// height field is feet and the secondary is inches. Unreadable input counts
/// as zero, and so does a converted value too large to represent. No rounding
/// is applied.
pub fn normalize(
    unit_system: UnitSystem,
    raw_weight: impl RawField,
    raw_height_primary: impl RawField,
    raw_height_secondary: impl RawField,
) -> Measurement {
    let mass_kg = unit_system.weight_unit().to_kg(raw_weight.field_value());
    let primary = raw_height_primary.field_value();

    let height_cm = match unit_system {
        UnitSystem::Metric => primary,
        UnitSystem::Imperial => ft_in_to_cm(primary, raw_height_secondary.field_value()),
    };

    Measurement::new(mass_kg, height_cm)
}
