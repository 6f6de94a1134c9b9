//! `ScenarioModel`: the single request/response unit handed to callers.
//!
//! Looks up the scenario's hazard once, then runs synthesis and estimation
//! from the same registry entry. An unsupported hazard fails before either
//! runs, so a caller never sees half a result.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::earthquake::Earthquake;
use crate::error::{InvalidModelParams, ModelError, UnsupportedHazardError};
use crate::hazard::{HazardRegistry, HazardType};
use crate::impact::ImpactEstimate;
use crate::model_params::ModelParams;
use crate::scenario::{RawScenario, ScenarioParameters};
use crate::waveform::{WaveformParams, WaveformSeries};

/// Waveform for plotting plus metrics for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub waveform: WaveformSeries,
    pub impact: ImpactEstimate,
}

impl ScenarioOutcome {
    pub fn into_parts(self) -> (WaveformSeries, ImpactEstimate) {
        (self.waveform, self.impact)
    }
}

/// Stateless facade over the hazard registry and the sampling domain.
///
/// Holds no per-call state: `evaluate` takes `&self` and allocates its output,
/// so one instance can serve any number of callers at once.
#[derive(Resource, Debug)]
pub struct ScenarioModel {
    registry: HazardRegistry,
    sampling: WaveformParams,
}

impl Default for ScenarioModel {
    fn default() -> Self {
        Self::with_registry(
            HazardRegistry::default().with(Earthquake::default()),
            WaveformParams::default(),
        )
    }
}

impl ScenarioModel {
    /// Build the default hazard set from validated parameters.
    pub fn new(params: ModelParams) -> Result<Self, InvalidModelParams> {
        params.validate()?;
        Ok(Self::with_registry(
            HazardRegistry::default().with(params.earthquake),
            params.waveform,
        ))
    }

    /// Use a caller-assembled registry, e.g. with extra hazards.
    pub fn with_registry(registry: HazardRegistry, sampling: WaveformParams) -> Self {
        Self { registry, sampling }
    }

    pub fn registry(&self) -> &HazardRegistry {
        &self.registry
    }

    pub fn sampling(&self) -> &WaveformParams {
        &self.sampling
    }

    pub fn supports(&self, hazard: HazardType) -> bool {
        self.registry.is_supported(hazard)
    }

    /// Waveform and impact estimate for one scenario.
    pub fn evaluate(
        &self,
        scenario: ScenarioParameters,
    ) -> Result<ScenarioOutcome, UnsupportedHazardError> {
        let entry = self.registry.get(scenario.hazard())?;
        let waveform = (entry.synthesize_fn)(&scenario, &self.sampling);
        let impact = (entry.estimate_fn)(&scenario);
        Ok(ScenarioOutcome { waveform, impact })
    }

    /// Validate raw input, then evaluate it.
    pub fn evaluate_raw(&self, raw: RawScenario) -> Result<ScenarioOutcome, ModelError> {
        let scenario = raw.validate()?;
        Ok(self.evaluate(scenario)?)
    }
}
