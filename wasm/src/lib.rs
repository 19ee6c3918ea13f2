//! Body Metrics WASM Module
//!
//! WebAssembly bindings that let the browser form call the calculator core.
//! Structured results cross the boundary as JSON strings.

use body_metrics_shared::{
    self as shared, estimate as estimate_core, normalize as normalize_core, ActivityLevel,
    BiologicalSex, BmiCategory, EstimateResult, Measurement, ParseError, Subject, UnitSystem,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

fn to_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(value)
}

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// One option of the activity selector
#[derive(Debug, Serialize)]
struct ActivityOption {
    key: &'static str,
    multiplier: f64,
    description: &'static str,
}

fn activity_options() -> Vec<ActivityOption> {
    ActivityLevel::ALL
        .into_iter()
        .map(|level| ActivityOption {
            key: level.key(),
            multiplier: level.multiplier(),
            description: level.description(),
        })
        .collect()
}

/// BMI band with its label, for the gauge legend
#[derive(Debug, Serialize)]
struct BmiBand {
    key: &'static str,
    description: &'static str,
    min: f64,
    /// `None` for the open-ended top band
    max: Option<f64>,
}

fn bmi_band(category: BmiCategory) -> BmiBand {
    let (min, max) = category.range();
    BmiBand {
        key: category.key(),
        description: category.description(),
        min,
        max: max.is_finite().then_some(max),
    }
}

fn normalize_fields(unit_system: &str, weight: &str, height_primary: &str, height_secondary: &str) -> Result<Measurement, ParseError> {
    let system: UnitSystem = unit_system.parse()?;
    Ok(normalize_core(system, weight, height_primary, height_secondary))
}

fn estimate_fields(measurement: &Measurement, sex: &str, age_years: &str, activity: &str) -> Result<EstimateResult, ParseError> {
    let sex: BiologicalSex = sex.parse()?;
    let activity: ActivityLevel = activity.parse()?;
    let subject = Subject::new(sex, shared::validation::parse_age_years(age_years));
    Ok(estimate_core(measurement, &subject, activity))
}

/// Normalize raw form values into `{ mass_kg, height_cm }`
#[wasm_bindgen]
pub fn normalize(unit_system: &str, weight: &str, height_primary: &str, height_secondary: &str) -> Result<String, JsValue> {
    let measurement = normalize_fields(unit_system, weight, height_primary, height_secondary).map_err(to_js_error)?;
    to_json(&measurement).map_err(to_js_error)
}

/// Estimate BMR, TDEE, BMI and goals from canonical values
#[wasm_bindgen]
pub fn estimate(mass_kg: f64, height_cm: f64, sex: &str, age_years: &str, activity: &str) -> Result<String, JsValue> {
    let result = estimate_fields(&Measurement::new(mass_kg, height_cm), sex, age_years, activity).map_err(to_js_error)?;
    to_json(&result).map_err(to_js_error)
}

/// Normalize and estimate in one call, as the form does on every change
#[wasm_bindgen]
pub fn calculate(
    unit_system: &str,
    weight: &str,
    height_primary: &str,
    height_secondary: &str,
    sex: &str,
    age_years: &str,
    activity: &str,
) -> Result<String, JsValue> {
    let result = normalize_fields(unit_system, weight, height_primary, height_secondary)
        .and_then(|m| estimate_fields(&m, sex, age_years, activity))
        .map_err(to_js_error)?;
    to_json(&result).map_err(to_js_error)
}

#[wasm_bindgen]
pub fn kg_to_lb(kg: f64) -> f64 {
    shared::kg_to_lb(kg)
}

#[wasm_bindgen]
pub fn lb_to_kg(lb: f64) -> f64 {
    shared::lb_to_kg(lb)
}

/// Centimeters to `{ feet, inches }`, inches rounded to one decimal
#[wasm_bindgen]
pub fn cm_to_ft_in(cm: f64) -> Result<String, JsValue> {
    to_json(&shared::cm_to_ft_in(cm).rounded()).map_err(to_js_error)
}

#[wasm_bindgen]
pub fn ft_in_to_cm(feet: f64, inches: f64) -> f64 {
    shared::ft_in_to_cm(feet, inches)
}

/// BMI category key: "underweight", "normal" or "overweight"
#[wasm_bindgen]
pub fn classify_bmi(bmi: f64) -> String {
    shared::classify_bmi(bmi).key().to_string()
}

/// BMI band for a value as `{ key, description, min, max }`
#[wasm_bindgen]
pub fn bmi_category(bmi: f64) -> Result<String, JsValue> {
    to_json(&bmi_band(shared::classify_bmi(bmi))).map_err(to_js_error)
}

/// Activity selector options, least to most active
#[wasm_bindgen]
pub fn activity_levels() -> Result<String, JsValue> {
    to_json(&activity_options()).map_err(to_js_error)
}

/// BMI position on the [12, 40] gauge as a fraction
#[wasm_bindgen]
pub fn bmi_gauge_position(bmi: f64) -> f64 {
    shared::bmi_gauge_position(bmi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use body_metrics_shared::Computed;

    #[test]
    fn test_normalize_fields() {
        let m = normalize_fields("imperial", "154", "5", "9").unwrap();
        assert!((m.mass_kg - 69.85).abs() < 0.01);
        assert!((m.height_cm - 175.26).abs() < 0.01);
        assert!(normalize_fields("furlongs", "1", "1", "1").is_err());
    }

    #[test]
    fn test_calculate_json() {
        let m = normalize_fields("metric", "70", "175", "").unwrap();
        let result = estimate_fields(&m, "male", "28", "1.2").unwrap();
        assert_eq!(result.bmr, Computed::Value(1659));

        let json: serde_json::Value = serde_json::from_str(&to_json(&result).unwrap()).unwrap();
        assert_eq!(json["tdee"]["value"], 1991);
        assert_eq!(json["goals"]["value"]["cut"], 1692);
    }

    #[test]
    fn test_incomplete_json() {
        let m = normalize_fields("metric", "", "175", "").unwrap();
        let result = estimate_fields(&m, "female", "", "sedentary").unwrap();
        let json: serde_json::Value = serde_json::from_str(&to_json(&result).unwrap()).unwrap();
        assert_eq!(json["bmr"]["status"], "unavailable");
        assert_eq!(json["bmi"]["status"], "unavailable");
    }

    #[test]
    fn test_conversions() {
        assert!((kg_to_lb(lb_to_kg(154.0)) - 154.0).abs() < 0.01);
        assert!((ft_in_to_cm(5.0, 9.0) - 175.26).abs() < 1e-9);
        assert_eq!(
            to_json(&shared::cm_to_ft_in(175.0).rounded()).unwrap(),
            r#"{"feet":5,"inches":8.9}"#
        );
        assert_eq!(classify_bmi(22.9), "normal");
        assert_eq!(bmi_gauge_position(26.0), 0.5);
    }

    #[test]
    fn test_serialization_failure_is_an_error() {
        // Maps with non-string keys cannot become JSON objects
        let mut bad = std::collections::BTreeMap::new();
        bad.insert((1, 2), "x");
        assert!(to_json(&bad).is_err());
    }

    #[test]
    fn test_activity_options_json() {
        let json: serde_json::Value = serde_json::from_str(&to_json(&activity_options()).unwrap()).unwrap();
        let options = json.as_array().unwrap();
        assert_eq!(options.len(), 5);
        assert_eq!(options[0]["key"], "sedentary");
        assert_eq!(options[0]["description"], "Little or no exercise");
        assert_eq!(options[2]["multiplier"], 1.55);
        assert_eq!(options[4]["key"], "extra_active");
    }

    #[test]
    fn test_bmi_band_json() {
        let normal = to_json(&bmi_band(shared::classify_bmi(22.9))).unwrap();
        assert_eq!(normal, r#"{"key":"normal","description":"Normal","min":18.5,"max":24.9}"#);

        let json: serde_json::Value =
            serde_json::from_str(&to_json(&bmi_band(shared::classify_bmi(31.0))).unwrap()).unwrap();
        assert_eq!(json["key"], "overweight");
        assert_eq!(json["min"], 24.9);
        assert!(json["max"].is_null());
    }
}
