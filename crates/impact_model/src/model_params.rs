//! Data-driven model parameters.
//!
//! Collects the tunables of the sampling domain and the hazard coefficients in
//! one serde value so they can be overridden from a JSON file. Defaults are
//! the constants in [`crate::config`]. The value is passed explicitly into
//! [`crate::ScenarioModel::new`]; nothing reads it from global state.

use serde::{Deserialize, Serialize};

use crate::config::WAVEFORM_MAX_SAMPLE_COUNT;
use crate::earthquake::Earthquake;
use crate::error::InvalidModelParams;
use crate::waveform::WaveformParams;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelParams {
    pub waveform: WaveformParams,
    pub earthquake: Earthquake,
}

impl ModelParams {
    /// Parse from JSON. Missing keys keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reject values that would make the formulas meaningless.
    pub fn validate(&self) -> Result<(), InvalidModelParams> {
        let count = self.waveform.sample_count;
        if !(2..=WAVEFORM_MAX_SAMPLE_COUNT).contains(&count) {
            return Err(InvalidModelParams {
                name: "waveform.sample_count",
                value: self.waveform.sample_count as f64,
            });
        }
        let checks = [
            ("waveform.max_distance", self.waveform.max_distance),
            ("waveform.decay_constant", self.waveform.decay_constant),
            (
                "earthquake.radius_km_per_magnitude",
                self.earthquake.radius_km_per_magnitude,
            ),
            (
                "earthquake.population_divisor",
                self.earthquake.population_divisor,
            ),
        ];
        for (name, value) in checks {
            if !(value.is_finite() && value > 0.0) {
                return Err(InvalidModelParams { name, value });
            }
        }
        Ok(())
    }
}
