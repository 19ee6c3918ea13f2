//! Form state and unit-system switching
//!
//! `FormState` holds exactly what the user typed, as text, plus the current
//! selections. Canonical values are derived from it on demand; nothing
//! derived is stored.

use body_metrics_shared::validation::{is_present, parse_age_years};
use body_metrics_shared::{
    cm_to_ft_in, estimate, normalize, round_to, ActivityLevel, BiologicalSex,
    EstimateResult, Measurement, Subject, UnitSystem, WeightUnit,
};
use serde::{Deserialize, Serialize};

use crate::config::FormDefaults;

/// Raw text of every numeric input
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFields {
    pub age: String,
    pub weight: String,
    pub height_cm: String,
    pub height_ft: String,
    pub height_in: String,
}

/// Everything the user has entered or selected
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    pub unit_system: UnitSystem,
    pub biological_sex: BiologicalSex,
    pub activity_level: ActivityLevel,
    #[serde(default)]
    pub fields: FormFields,
}

impl FormState {
    /// Empty form with configured selections
    pub fn from_defaults(defaults: &FormDefaults) -> Self {
        Self {
            unit_system: defaults.unit_system,
            biological_sex: defaults.biological_sex,
            activity_level: defaults.activity_level,
            fields: FormFields::default(),
        }
    }

    /// Canonical measurement for the current unit system
    pub fn measurement(&self) -> Measurement {
        match self.unit_system {
            UnitSystem::Metric => normalize(
                UnitSystem::Metric,
                self.fields.weight.as_str(),
                self.fields.height_cm.as_str(),
                "",
            ),
            UnitSystem::Imperial => normalize(
                UnitSystem::Imperial,
                self.fields.weight.as_str(),
                self.fields.height_ft.as_str(),
                self.fields.height_in.as_str(),
            ),
        }
    }

    pub fn subject(&self) -> Subject {
        Subject::new(self.biological_sex, parse_age_years(self.fields.age.as_str()))
    }

    /// Recompute the estimate from scratch
    pub fn result(&self) -> EstimateResult {
        estimate(&self.measurement(), &self.subject(), self.activity_level)
    }

    /// Change unit system, re-expressing weight and height in the new units
    ///
    /// Values are rounded for display. When the source value holds nothing
    /// usable the target fields are cleared, so a value the user deleted
    /// cannot come back from an earlier switch.
    pub fn switch_unit_system(&mut self, target: UnitSystem) {
        if self.unit_system == target {
            return;
        }

        let measurement = self.measurement();
        let fields = &mut self.fields;

        fields.weight = if is_present(measurement.mass_kg) {
            format_number(target.weight_unit().display_from_kg(measurement.mass_kg))
        } else {
            String::new()
        };

        let height_cm = measurement.height_cm;
        match target {
            UnitSystem::Imperial => {
                if is_present(height_cm) {
                    let height = cm_to_ft_in(height_cm).rounded();
                    fields.height_ft = height.feet.to_string();
                    fields.height_in = format_number(height.inches);
                } else {
                    fields.height_ft.clear();
                    fields.height_in.clear();
                }
            }
            UnitSystem::Metric => {
                fields.height_cm = if is_present(height_cm) {
                    format_number(round_to(height_cm, 1))
                } else {
                    String::new()
                };
            }
        }

        self.unit_system = target;
    }

    /// Weight unit label for the current system
    pub fn weight_unit(&self) -> WeightUnit {
        self.unit_system.weight_unit()
    }
}

/// Shortest text for a display-rounded number ("70" rather than "70.0")
fn format_number(value: f64) -> String {
    format!("{}", value)
}
