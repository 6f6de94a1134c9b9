//! Validated, immutable description of one disaster scenario.
//!
//! [`ScenarioParameters::new`] is the only way in: every numeric field must lie
//! in its closed interval or construction fails with a [`ValidationError`]
//! naming the first offending field. Nothing is clamped here; snapping raw
//! input into range is the caller's business.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::*;
use crate::error::ValidationError;
use crate::hazard::HazardType;

// =============================================================================
// Ranges and fields
// =============================================================================

/// Closed interval `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParamRange {
    pub min: f64,
    pub max: f64,
}

impl ParamRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// NaN is never contained.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl fmt::Display for ParamRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// The bounded numeric fields of a scenario, in validation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioField {
    Magnitude,
    Depth,
    Duration,
    PopulationDensity,
}

impl ScenarioField {
    pub const ALL: [ScenarioField; 4] = [
        ScenarioField::Magnitude,
        ScenarioField::Depth,
        ScenarioField::Duration,
        ScenarioField::PopulationDensity,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ScenarioField::Magnitude => "magnitude",
            ScenarioField::Depth => "depth",
            ScenarioField::Duration => "duration",
            ScenarioField::PopulationDensity => "population_density",
        }
    }

    pub fn range(self) -> ParamRange {
        match self {
            ScenarioField::Magnitude => ParamRange::new(MAGNITUDE_MIN, MAGNITUDE_MAX),
            ScenarioField::Depth => ParamRange::new(DEPTH_MIN_KM, DEPTH_MAX_KM),
            ScenarioField::Duration => ParamRange::new(DURATION_MIN_S, DURATION_MAX_S),
            ScenarioField::PopulationDensity => {
                ParamRange::new(POPULATION_DENSITY_MIN, POPULATION_DENSITY_MAX)
            }
        }
    }

    fn check(self, value: f64) -> Result<f64, ValidationError> {
        let range = self.range();
        if range.contains(value) {
            Ok(value)
        } else {
            Err(ValidationError {
                field: self,
                value,
                range,
            })
        }
    }
}

// =============================================================================
// Raw (unvalidated) input
// =============================================================================

/// Scenario exactly as it arrives from a caller, before any checks.
///
/// Missing fields in JSON fall back to the default scenario. Unknown keys are
/// rejected so a misspelled field can never silently take its default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawScenario {
    pub hazard: HazardType,
    pub magnitude: f64,
    pub depth_km: f64,
    pub duration_s: f64,
    pub population_density: f64,
}

impl Default for RawScenario {
    fn default() -> Self {
        Self {
            hazard: HazardType::Earthquake,
            magnitude: DEFAULT_MAGNITUDE,
            depth_km: DEFAULT_DEPTH_KM,
            duration_s: DEFAULT_DURATION_S,
            population_density: DEFAULT_POPULATION_DENSITY,
        }
    }
}

impl RawScenario {
    pub fn get(&self, field: ScenarioField) -> f64 {
        match field {
            ScenarioField::Magnitude => self.magnitude,
            ScenarioField::Depth => self.depth_km,
            ScenarioField::Duration => self.duration_s,
            ScenarioField::PopulationDensity => self.population_density,
        }
    }

    pub fn set(&mut self, field: ScenarioField, value: f64) {
        match field {
            ScenarioField::Magnitude => self.magnitude = value,
            ScenarioField::Depth => self.depth_km = value,
            ScenarioField::Duration => self.duration_s = value,
            ScenarioField::PopulationDensity => self.population_density = value,
        }
    }

    pub fn validate(self) -> Result<ScenarioParameters, ValidationError> {
        ScenarioParameters::new(
            self.hazard,
            self.magnitude,
            self.depth_km,
            self.duration_s,
            self.population_density,
        )
    }
}

// =============================================================================
// Validated scenario
// =============================================================================

/// One fully-specified, validated scenario.
///
/// Fields are private so the interval invariant cannot be broken after
/// construction. `depth_km` and `duration_s` are carried even though the
/// current estimators do not read them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawScenario", into = "RawScenario")]
pub struct ScenarioParameters {
    hazard: HazardType,
    magnitude: f64,
    depth_km: f64,
    duration_s: f64,
    population_density: f64,
}

impl ScenarioParameters {
    /// Validate all fields and build the scenario, or fail on the first
    /// out-of-range field (magnitude, depth, duration, population density).
    pub fn new(
        hazard: HazardType,
        magnitude: f64,
        depth_km: f64,
        duration_s: f64,
        population_density: f64,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            hazard,
            magnitude: ScenarioField::Magnitude.check(magnitude)?,
            depth_km: ScenarioField::Depth.check(depth_km)?,
            duration_s: ScenarioField::Duration.check(duration_s)?,
            population_density: ScenarioField::PopulationDensity.check(population_density)?,
        })
    }

    pub fn hazard(&self) -> HazardType {
        self.hazard
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    pub fn depth_km(&self) -> f64 {
        self.depth_km
    }

    pub fn duration_s(&self) -> f64 {
        self.duration_s
    }

    pub fn population_density(&self) -> f64 {
        self.population_density
    }

    /// Same scenario under a different hazard. The numeric fields are already
    /// valid, so this cannot fail.
    pub fn with_hazard(self, hazard: HazardType) -> Self {
        Self { hazard, ..self }
    }
}

impl Default for ScenarioParameters {
    fn default() -> Self {
        let raw = RawScenario::default();
        Self {
            hazard: raw.hazard,
            magnitude: raw.magnitude,
            depth_km: raw.depth_km,
            duration_s: raw.duration_s,
            population_density: raw.population_density,
        }
    }
}

impl TryFrom<RawScenario> for ScenarioParameters {
    type Error = ValidationError;

    fn try_from(raw: RawScenario) -> Result<Self, Self::Error> {
        raw.validate()
    }
}

impl From<ScenarioParameters> for RawScenario {
    fn from(p: ScenarioParameters) -> Self {
        Self {
            hazard: p.hazard,
            magnitude: p.magnitude,
            depth_km: p.depth_km,
            duration_s: p.duration_s,
            population_density: p.population_density,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
