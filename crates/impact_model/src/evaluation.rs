//! ECS side of the model: request/result events and the system between them.
//!
//! A front end sends [`EvaluateScenario`] and reads either the
//! [`ScenarioEvaluated`] events or the [`LatestEvaluation`] resource after the
//! next update. The scenario is carried by value in the event; the system
//! reads nothing else from the world except the [`ScenarioModel`].

use bevy::prelude::*;

use crate::error::UnsupportedHazardError;
use crate::model::{ScenarioModel, ScenarioOutcome};
use crate::scenario::ScenarioParameters;

// =============================================================================
// Types
// =============================================================================

/// Request to evaluate one scenario. `request_id` is echoed in the result.
#[derive(Event, Debug, Clone, Copy)]
pub struct EvaluateScenario {
    pub request_id: u64,
    pub scenario: ScenarioParameters,
}

/// Result for one [`EvaluateScenario`], in request order.
#[derive(Event, Debug, Clone)]
pub struct ScenarioEvaluated {
    pub request_id: u64,
    pub scenario: ScenarioParameters,
    pub result: Result<ScenarioOutcome, UnsupportedHazardError>,
}

/// Most recent result, for front ends that poll instead of reading events.
#[derive(Resource, Debug, Default)]
pub struct LatestEvaluation {
    pub current: Option<ScenarioEvaluated>,
    /// Total requests handled since startup.
    pub evaluated_count: u64,
}

// =============================================================================
// Systems
// =============================================================================

/// Evaluates every pending request and publishes one result per request.
pub fn evaluate_requested_scenarios(
    model: Res<ScenarioModel>,
    mut requests: EventReader<EvaluateScenario>,
    mut evaluated: EventWriter<ScenarioEvaluated>,
    mut latest: ResMut<LatestEvaluation>,
) {
    for request in requests.read() {
        let result = model.evaluate(request.scenario);

        match &result {
            Ok(outcome) => debug!(
                "Scenario {}: {} M{:.1} -> radius {:.0} km, {} people affected",
                request.request_id,
                request.scenario.hazard(),
                request.scenario.magnitude(),
                outcome.impact.affected_radius_km,
                outcome.impact.estimated_people_affected,
            ),
            Err(e) => warn!("Scenario {} rejected: {}", request.request_id, e),
        }

        let event = ScenarioEvaluated {
            request_id: request.request_id,
            scenario: request.scenario,
            result,
        };
        latest.current = Some(event.clone());
        latest.evaluated_count += 1;
        evaluated.send(event);
    }
}
