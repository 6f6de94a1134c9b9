//! Hazard types and the registry that maps each one to its model.
//!
//! A hazard model provides two things: a synthesis function producing the
//! visualization waveform and an estimation function producing the impact
//! metrics. Adding a hazard means implementing [`HazardModel`] and registering
//! it; the facade and every existing model stay untouched.

use std::fmt;
use std::sync::Arc;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::UnsupportedHazardError;
use crate::impact::ImpactEstimate;
use crate::scenario::ScenarioParameters;
use crate::waveform::{WaveformParams, WaveformSeries};

// =============================================================================
// Types
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardType {
    Earthquake,
    Flood,
    Wildfire,
}

impl HazardType {
    pub const ALL: [HazardType; 3] = [
        HazardType::Earthquake,
        HazardType::Flood,
        HazardType::Wildfire,
    ];

    pub fn name(self) -> &'static str {
        match self {
            HazardType::Earthquake => "Earthquake",
            HazardType::Flood => "Flood",
            HazardType::Wildfire => "Wildfire",
        }
    }
}

impl fmt::Display for HazardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// HazardModel trait
// =============================================================================

/// Synthesis and estimation for one hazard type.
///
/// Both functions must be pure: identical scenarios give bit-identical output.
pub trait HazardModel: Send + Sync + 'static {
    /// The hazard this model answers for. Used as the registry key.
    const HAZARD: HazardType;

    /// Distance-vs-amplitude signal for plotting.
    fn synthesize(&self, scenario: &ScenarioParameters, sampling: &WaveformParams)
        -> WaveformSeries;

    /// Scalar impact metrics.
    fn estimate(&self, scenario: &ScenarioParameters) -> ImpactEstimate;
}

/// Type alias for the synthesis function stored in a `HazardEntry`.
pub type SynthesizeFn =
    Box<dyn Fn(&ScenarioParameters, &WaveformParams) -> WaveformSeries + Send + Sync>;
/// Type alias for the estimation function stored in a `HazardEntry`.
pub type EstimateFn = Box<dyn Fn(&ScenarioParameters) -> ImpactEstimate + Send + Sync>;

/// Type-erased synthesis/estimation pair for a single registered hazard.
pub struct HazardEntry {
    pub hazard: HazardType,
    pub synthesize_fn: SynthesizeFn,
    pub estimate_fn: EstimateFn,
}

// =============================================================================
// Registry
// =============================================================================

/// Registry of hazard models, populated when the facade is built.
///
/// Lookups are linear; there are only ever a handful of hazards.
#[derive(Default)]
pub struct HazardRegistry {
    entries: Vec<HazardEntry>,
}

impl HazardRegistry {
    /// Register a model under `T::HAZARD`.
    ///
    /// A second registration for the same hazard is ignored with a warning, so
    /// the first model registered always wins.
    pub fn register<T: HazardModel>(&mut self, model: T) {
        if self.is_supported(T::HAZARD) {
            warn!(
                "HazardRegistry: {} already registered, ignoring second registration",
                T::HAZARD
            );
            return;
        }
        let model = Arc::new(model);
        let synth_model = Arc::clone(&model);
        self.entries.push(HazardEntry {
            hazard: T::HAZARD,
            synthesize_fn: Box::new(
                move |scenario: &ScenarioParameters, sampling: &WaveformParams| {
                    synth_model.synthesize(scenario, sampling)
                },
            ),
            estimate_fn: Box::new(move |scenario: &ScenarioParameters| model.estimate(scenario)),
        });
    }

    /// Builder-style [`HazardRegistry::register`].
    pub fn with<T: HazardModel>(mut self, model: T) -> Self {
        self.register(model);
        self
    }

    pub fn get(&self, hazard: HazardType) -> Result<&HazardEntry, UnsupportedHazardError> {
        self.entries
            .iter()
            .find(|e| e.hazard == hazard)
            .ok_or(UnsupportedHazardError(hazard))
    }

    pub fn is_supported(&self, hazard: HazardType) -> bool {
        self.entries.iter().any(|e| e.hazard == hazard)
    }

    /// Registered hazards in registration order.
    pub fn supported(&self) -> Vec<HazardType> {
        self.entries.iter().map(|e| e.hazard).collect()
    }

    pub fn synthesize(
        &self,
        scenario: &ScenarioParameters,
        sampling: &WaveformParams,
    ) -> Result<WaveformSeries, UnsupportedHazardError> {
        let entry = self.get(scenario.hazard())?;
        Ok((entry.synthesize_fn)(scenario, sampling))
    }

    pub fn estimate(
        &self,
        scenario: &ScenarioParameters,
    ) -> Result<ImpactEstimate, UnsupportedHazardError> {
        let entry = self.get(scenario.hazard())?;
        Ok((entry.estimate_fn)(scenario))
    }
}

impl fmt::Debug for HazardRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HazardRegistry")
            .field("supported", &self.supported())
            .finish()
    }
}
