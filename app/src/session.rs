//! Calculator session - recompute-on-change orchestration
//!
//! A session owns the form and the estimate derived from it. Every mutation
//! goes through [`CalculatorSession::apply`], which recomputes the estimate
//! from scratch afterwards, so the two can never disagree.

use body_metrics_shared::{ActivityLevel, BiologicalSex, EstimateResult, UnitSystem};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::error::AppError;
use crate::form::FormState;

/// A single change made by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    UnitSystem(UnitSystem),
    BiologicalSex(BiologicalSex),
    ActivityLevel(ActivityLevel),
    Age(String),
    Weight(String),
    HeightCm(String),
    HeightFt(String),
    HeightIn(String),
}

impl FieldUpdate {
    /// Build an update from a field name and its raw value
    ///
    /// Numeric fields accept any text. Selection fields must name a known
    /// option.
    pub fn parse(field: &str, value: &str) -> Result<Self, AppError> {
        let update = match field {
            "unit_system" | "unitSystem" => FieldUpdate::UnitSystem(value.parse()?),
            "sex" | "biological_sex" => FieldUpdate::BiologicalSex(value.parse()?),
            "activity" | "activity_level" => FieldUpdate::ActivityLevel(value.parse()?),
            "age" => FieldUpdate::Age(value.to_string()),
            "weight" => FieldUpdate::Weight(value.to_string()),
            "height_cm" | "heightCm" => FieldUpdate::HeightCm(value.to_string()),
            "height_ft" | "heightFt" => FieldUpdate::HeightFt(value.to_string()),
            "height_in" | "heightIn" => FieldUpdate::HeightIn(value.to_string()),
            other => return Err(AppError::UnknownField(other.to_string())),
        };
        Ok(update)
    }

    fn field_name(&self) -> &'static str {
        match self {
            FieldUpdate::UnitSystem(_) => "unit_system",
            FieldUpdate::BiologicalSex(_) => "biological_sex",
            FieldUpdate::ActivityLevel(_) => "activity_level",
            FieldUpdate::Age(_) => "age",
            FieldUpdate::Weight(_) => "weight",
            FieldUpdate::HeightCm(_) => "height_cm",
            FieldUpdate::HeightFt(_) => "height_ft",
            FieldUpdate::HeightIn(_) => "height_in",
        }
    }
}

/// Saved form contents, e.g. for browser storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSnapshot {
    pub state: FormState,
    pub saved_at: DateTime<Utc>,
}

/// The form plus its current estimate
#[derive(Debug, Clone)]
pub struct CalculatorSession {
    state: FormState,
    result: EstimateResult,
}

impl CalculatorSession {
    /// Fresh session using configured form defaults
    pub fn new(config: &AppConfig) -> Self {
        Self::from_state(FormState::from_defaults(&config.form))
    }

    /// Fresh session using configuration loaded from files and environment
    pub fn from_env() -> Result<Self, AppError> {
        let config = AppConfig::load()?;
        debug!(unit_system = %config.form.unit_system, "Loaded form defaults");
        Ok(Self::new(&config))
    }

    pub fn from_state(state: FormState) -> Self {
        let result = state.result();
        Self { state, result }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn result(&self) -> &EstimateResult {
        &self.result
    }

    /// Apply one change and recompute
    pub fn apply(&mut self, update: FieldUpdate) -> &EstimateResult {
        let field = update.field_name();

        match update {
            FieldUpdate::UnitSystem(system) => self.state.switch_unit_system(system),
            FieldUpdate::BiologicalSex(sex) => self.state.biological_sex = sex,
            FieldUpdate::ActivityLevel(level) => self.state.activity_level = level,
            FieldUpdate::Age(v) => self.state.fields.age = v,
            FieldUpdate::Weight(v) => self.state.fields.weight = v,
            FieldUpdate::HeightCm(v) => self.state.fields.height_cm = v,
            FieldUpdate::HeightFt(v) => self.state.fields.height_ft = v,
            FieldUpdate::HeightIn(v) => self.state.fields.height_in = v,
        }

        self.recompute(field)
    }

    /// Apply a change given as field name and raw value
    ///
    /// Rejected updates leave the form and estimate untouched.
    pub fn apply_raw(&mut self, field: &str, value: &str) -> Result<&EstimateResult, AppError> {
        match FieldUpdate::parse(field, value) {
            Ok(update) => Ok(self.apply(update)),
            Err(e) => {
                warn!(field, value, error = %e, "Rejected form update");
                Err(e)
            }
        }
    }

    fn recompute(&mut self, field: &'static str) -> &EstimateResult {
        self.result = self.state.result();

        debug!(
            field,
            unit_system = %self.state.unit_system,
            bmr = %self.result.bmr,
            tdee = %self.result.tdee,
            bmi = %self.result.bmi,
            "Recomputed estimate"
        );

        &self.result
    }

    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            state: self.state.clone(),
            saved_at: Utc::now(),
        }
    }

    pub fn snapshot_json(&self) -> Result<String, AppError> {
        Ok(serde_json::to_string(&self.snapshot())?)
    }

    /// Rebuild a session from a saved snapshot
    pub fn restore(snapshot: FormSnapshot) -> Self {
        info!(
            saved_at = %snapshot.saved_at,
            unit_system = %snapshot.state.unit_system,
            "Restoring form snapshot"
        );
        Self::from_state(snapshot.state)
    }

    pub fn restore_json(json: &str) -> Result<Self, AppError> {
        let snapshot: FormSnapshot = serde_json::from_str(json)?;
        Ok(Self::restore(snapshot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use body_metrics_shared::Computed;
    use rstest::rstest;

    #[rstest]
    #[case("unitSystem", "imperial", FieldUpdate::UnitSystem(UnitSystem::Imperial))]
    #[case("sex", "female", FieldUpdate::BiologicalSex(BiologicalSex::Female))]
    #[case("activity", "1.55", FieldUpdate::ActivityLevel(ActivityLevel::Moderate))]
    #[case("heightIn", "9", FieldUpdate::HeightIn("9".to_string()))]
    #[case("weight", "abc", FieldUpdate::Weight("abc".to_string()))]
    fn test_parse_update(#[case] field: &str, #[case] value: &str, #[case] expected: FieldUpdate) {
        assert_eq!(FieldUpdate::parse(field, value).unwrap(), expected);
    }

    #[test]
    fn test_parse_rejects_unknown_field() {
        let err = FieldUpdate::parse("shoe_size", "44").unwrap_err();
        assert_eq!(err.code(), "UNKNOWN_FIELD");
    }

    #[test]
    fn test_rejected_update_leaves_state() {
        let mut session = CalculatorSession::new(&AppConfig::default());
        session.apply(FieldUpdate::Weight("70".to_string()));
        let before = session.state().clone();

        assert!(session.apply_raw("sex", "unknown").is_err());
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn test_from_env_starts_empty() {
        let session = CalculatorSession::from_env().unwrap();
        assert_eq!(session.state().fields, crate::form::FormFields::default());
        assert_eq!(session.result(), &EstimateResult::default());
    }

    #[test]
    fn test_result_tracks_every_update() {
        let mut session = CalculatorSession::new(&AppConfig::default());
        assert_eq!(session.result(), &EstimateResult::default());

        session.apply(FieldUpdate::Weight("70".to_string()));
        session.apply(FieldUpdate::HeightCm("175".to_string()));
        assert_eq!(session.result().bmi, Computed::Value(22.9));
        assert_eq!(session.result().bmr, Computed::Unavailable);

        let result = *session.apply(FieldUpdate::Age("28".to_string()));
        assert_eq!(result.bmr, Computed::Value(1659));
        assert_eq!(&result, session.result());
    }
}
