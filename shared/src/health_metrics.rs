//! Health metrics calculations module
//!
//! Derives BMR, TDEE, BMI and calorie goal bands from a canonical
//! measurement, a subject and an activity level.
//!
//! # Design Principles
//!
//! 1. **Pure Functions**: All calculations are pure, no side effects
//! 2. **Total**: Every input yields a result; nothing panics or errors
//! 3. **Explicit Availability**: Values that cannot be computed yet are
//!    `Computed::Unavailable`, never a misleading zero
//!
//! BMR uses the Mifflin-St Jeor equation (Mifflin et al., 1990), which only
//! defines constants for male and female subjects.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::ParseError;
use crate::units::{round_to, Measurement};

/// Placeholder shown for values that cannot be computed yet
pub const UNAVAILABLE_PLACEHOLDER: &str = "—";

/// Multiplier applied to TDEE for the calorie deficit band
pub const CUT_FACTOR: f64 = 0.85;

/// Multiplier applied to TDEE for the calorie surplus band
pub const GAIN_FACTOR: f64 = 1.15;

// ============================================================================
// Availability
// ============================================================================

/// A derived value that may not be computable from the current input
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Computed<T> {
    Unavailable,
    Value(T),
}

impl<T> Default for Computed<T> {
    fn default() -> Self {
        Computed::Unavailable
    }
}

impl<T> Computed<T> {
    pub fn is_available(&self) -> bool {
        matches!(self, Computed::Value(_))
    }

    pub fn value(self) -> Option<T> {
        match self {
            Computed::Value(v) => Some(v),
            Computed::Unavailable => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Computed<U> {
        match self {
            Computed::Value(v) => Computed::Value(f(v)),
            Computed::Unavailable => Computed::Unavailable,
        }
    }

    pub fn and_then<U>(self, f: impl FnOnce(T) -> Computed<U>) -> Computed<U> {
        match self {
            Computed::Value(v) => f(v),
            Computed::Unavailable => Computed::Unavailable,
        }
    }
}

impl<T: Default> Computed<T> {
    /// The value, or the type's zero for collaborators that render `0` as
    /// "not available"
    pub fn or_zero(self) -> T {
        self.value().unwrap_or_default()
    }
}

impl<T> From<Option<T>> for Computed<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Computed::Value(v),
            None => Computed::Unavailable,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Computed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Computed::Value(v) => write!(f, "{}", v),
            Computed::Unavailable => f.write_str(UNAVAILABLE_PLACEHOLDER),
        }
    }
}

// ============================================================================
// Subject and Activity
// ============================================================================

/// Biological sex for health calculations
/// Note: This is used for physiological calculations only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BiologicalSex {
    #[default]
    Male,
    Female,
}

impl BiologicalSex {
    pub fn as_str(&self) -> &'static str {
        match self {
            BiologicalSex::Male => "male",
            BiologicalSex::Female => "female",
        }
    }
}

impl fmt::Display for BiologicalSex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BiologicalSex {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(BiologicalSex::Male),
            "female" | "f" => Ok(BiologicalSex::Female),
            _ => Err(ParseError::BiologicalSex(s.to_string())),
        }
    }
}

/// Who the estimate is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Subject {
    pub biological_sex: BiologicalSex,
    pub age_years: u32,
}

impl Subject {
    pub fn new(biological_sex: BiologicalSex, age_years: u32) -> Self {
        Self {
            biological_sex,
            age_years,
        }
    }

    /// Age has been entered
    pub fn is_complete(&self) -> bool {
        self.age_years >= 1
    }
}

/// Activity level for TDEE calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    #[default]
    Sedentary,
    /// Light exercise 1-3 days/week
    Light,
    /// Moderate exercise 3-5 days/week
    Moderate,
    /// Hard exercise 6-7 days/week
    VeryActive,
    /// Hard training or physical job
    ExtraActive,
}

impl ActivityLevel {
    /// All levels, least to most active
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::VeryActive,
        ActivityLevel::ExtraActive,
    ];

    /// Get the activity multiplier for TDEE calculation
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::ExtraActive => 1.9,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::VeryActive => "very_active",
            ActivityLevel::ExtraActive => "extra_active",
        }
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Little or no exercise",
            ActivityLevel::Light => "Light exercise 1-3 days/week",
            ActivityLevel::Moderate => "Moderate exercise 3-5 days/week",
            ActivityLevel::VeryActive => "Hard exercise 6-7 days/week",
            ActivityLevel::ExtraActive => "Hard training or physical job",
        }
    }

    /// Find the level whose multiplier matches `value`
    pub fn from_multiplier(value: f64) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|level| (level.multiplier() - value).abs() < 1e-9)
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for ActivityLevel {
    type Err = ParseError;

    /// Accepts a level key or its multiplier ("1.55")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        if let Some(level) = Self::ALL.into_iter().find(|l| l.key() == normalized) {
            return Ok(level);
        }
        normalized
            .parse::<f64>()
            .ok()
            .and_then(Self::from_multiplier)
            .ok_or_else(|| ParseError::ActivityLevel(s.to_string()))
    }
}

// ============================================================================
// BMI Calculations
// ============================================================================

/// Lower bound of the BMI gauge
pub const BMI_GAUGE_MIN: f64 = 12.0;

/// Upper bound of the BMI gauge
pub const BMI_GAUGE_MAX: f64 = 40.0;

/// BMI category classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
}

impl BmiCategory {
    /// Get the BMI range for this category
    pub fn range(&self) -> (f64, f64) {
        match self {
            BmiCategory::Underweight => (0.0, 18.5),
            BmiCategory::Normal => (18.5, 24.9),
            BmiCategory::Overweight => (24.9, f64::INFINITY),
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "underweight",
            BmiCategory::Normal => "normal",
            BmiCategory::Overweight => "overweight",
        }
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
        }
    }
}

/// Calculate BMI from weight and height, unrounded
///
/// Formula: BMI = weight(kg) / height(m)²
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> Computed<f64> {
    if weight_kg <= 0.0 || height_cm <= 0.0 {
        return Computed::Unavailable;
    }
    let height_m = height_cm / 100.0;
    let bmi = weight_kg / (height_m * height_m);
    if bmi.is_finite() {
        Computed::Value(bmi)
    } else {
        Computed::Unavailable
    }
}

/// Classify BMI into category
pub fn classify_bmi(bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 24.9 {
        BmiCategory::Normal
    } else {
        BmiCategory::Overweight
    }
}

/// Position of a BMI on the gauge as a fraction in [0, 1]
///
/// Values outside [12, 40] are pinned to the ends.
pub fn bmi_gauge_position(bmi: f64) -> f64 {
    if bmi.is_nan() {
        return 0.0;
    }
    let clamped = bmi.clamp(BMI_GAUGE_MIN, BMI_GAUGE_MAX);
    (clamped - BMI_GAUGE_MIN) / (BMI_GAUGE_MAX - BMI_GAUGE_MIN)
}

// ============================================================================
// BMR and TDEE Calculations
// ============================================================================

/// Calculate Basal Metabolic Rate using Mifflin-St Jeor equation, unrounded
///
/// Men: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) + 5
/// Women: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) - 161
pub fn calculate_bmr_mifflin(weight_kg: f64, height_cm: f64, age_years: u32, sex: BiologicalSex) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age_years);
    match sex {
        BiologicalSex::Male => base + 5.0,
        BiologicalSex::Female => base - 161.0,
    }
}

/// Round kcal to a whole number, floored at zero
fn whole_kcal(kcal: f64) -> u32 {
    if !kcal.is_finite() || kcal <= 0.0 {
        return 0;
    }
    let rounded = kcal.round();
    if rounded >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        rounded as u32
    }
}

/// BMR for a complete measurement and subject
pub fn calculate_bmr(measurement: &Measurement, subject: &Subject) -> Computed<u32> {
    if !measurement.is_complete() || !subject.is_complete() {
        return Computed::Unavailable;
    }
    let bmr = calculate_bmr_mifflin(
        measurement.mass_kg,
        measurement.height_cm,
        subject.age_years,
        subject.biological_sex,
    );
    Computed::Value(whole_kcal(bmr))
}

/// Total Daily Energy Expenditure
///
/// TDEE = BMR × Activity Multiplier
pub fn calculate_tdee(bmr: Computed<u32>, activity_level: ActivityLevel) -> Computed<u32> {
    bmr.map(|bmr| whole_kcal(f64::from(bmr) * activity_level.multiplier()))
}

/// Daily calorie targets derived from TDEE
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalorieGoals {
    /// Calories for maintenance
    pub maintain: u32,
    /// Calories for weight loss (15% deficit)
    pub cut: u32,
    /// Calories for weight gain (15% surplus)
    pub gain: u32,
}

/// Goal bands, only when TDEE is positive
pub fn calculate_goals(tdee: Computed<u32>) -> Computed<CalorieGoals> {
    tdee.and_then(|tdee| {
        if tdee == 0 {
            return Computed::Unavailable;
        }
        let tdee_f = f64::from(tdee);
        Computed::Value(CalorieGoals {
            maintain: tdee,
            cut: whole_kcal(tdee_f * CUT_FACTOR),
            gain: whole_kcal(tdee_f * GAIN_FACTOR),
        })
    })
}

// ============================================================================
// Estimate
// ============================================================================

/// Everything derived from one snapshot of the form
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct EstimateResult {
    /// kcal/day
    pub bmr: Computed<u32>,
    /// kcal/day
    pub tdee: Computed<u32>,
    /// kg/m², one decimal
    pub bmi: Computed<f64>,
    pub goals: Computed<CalorieGoals>,
}

impl EstimateResult {
    /// Category of the computed BMI
    pub fn bmi_category(&self) -> Computed<BmiCategory> {
        self.bmi.map(classify_bmi)
    }
}

/// Estimate BMR, TDEE, BMI and goal bands
///
/// BMR, TDEE and goals need mass, height and age. BMI needs only mass and
/// height, so it is still reported when age is missing.
pub fn estimate(measurement: &Measurement, subject: &Subject, activity_level: ActivityLevel) -> EstimateResult {
    let bmr = calculate_bmr(measurement, subject);
    let tdee = calculate_tdee(bmr, activity_level);
    let bmi = calculate_bmi(measurement.mass_kg, measurement.height_cm).map(|bmi| round_to(bmi, 1));

    EstimateResult {
        bmr,
        tdee,
        bmi,
        goals: calculate_goals(tdee),
    }
}
