//! Disaster impact estimation model.
//!
//! Maps a validated [`ScenarioParameters`] to a synthetic propagation
//! [`WaveformSeries`] (for plotting) and an [`ImpactEstimate`] (radius, area,
//! people affected). The computation is pure and synchronous; the Bevy plugin
//! below only moves requests and results through events.

use bevy::prelude::*;

pub mod config;
pub mod earthquake;
pub mod error;
pub mod evaluation;
pub mod hazard;
pub mod impact;
pub mod model;
pub mod model_params;
pub mod protocol;
pub mod scenario;
pub mod waveform;

#[cfg(test)]
mod test_harness;

pub use earthquake::Earthquake;
pub use error::{InvalidModelParams, ModelError, UnsupportedHazardError, ValidationError};
pub use evaluation::{EvaluateScenario, LatestEvaluation, ScenarioEvaluated};
pub use hazard::{HazardModel, HazardRegistry, HazardType};
pub use impact::ImpactEstimate;
pub use model::{ScenarioModel, ScenarioOutcome};
pub use model_params::ModelParams;
pub use scenario::{ParamRange, RawScenario, ScenarioField, ScenarioParameters};
pub use waveform::{WaveformParams, WaveformSample, WaveformSeries};

/// System sets for ordering front-end systems around evaluation.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ImpactModelSet {
    /// Pending `EvaluateScenario` requests are turned into results.
    Evaluate,
}

/// Registers the model resource, its events and the evaluation system.
///
/// Insert a custom [`ScenarioModel`] before adding the plugin to override the
/// default one.
pub struct ImpactModelPlugin;

impl Plugin for ImpactModelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ScenarioModel>()
            .init_resource::<LatestEvaluation>()
            .add_event::<EvaluateScenario>()
            .add_event::<ScenarioEvaluated>()
            .add_systems(
                Update,
                evaluation::evaluate_requested_scenarios.in_set(ImpactModelSet::Evaluate),
            );

        let model = app.world().resource::<ScenarioModel>();
        info!(
            "Impact model ready: {} samples over [0, {}], hazards {:?}",
            model.sampling().sample_count,
            model.sampling().max_distance,
            model.registry().supported(),
        );
    }
}
