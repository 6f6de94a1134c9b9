//! # TestScenarioApp: headless harness for the model plugin
//!
//! Wraps `bevy::app::App` + `MinimalPlugins` + [`ImpactModelPlugin`] so tests
//! can push requests through the real event path and inspect the results.

use bevy::app::App;
use bevy::prelude::*;

use crate::evaluation::{EvaluateScenario, LatestEvaluation, ScenarioEvaluated};
use crate::model::ScenarioModel;
use crate::scenario::ScenarioParameters;
use crate::ImpactModelPlugin;

/// Collects every `ScenarioEvaluated` event so tests can see all of them,
/// not just the latest.
#[derive(Resource, Default)]
pub struct EvaluationLog {
    pub events: Vec<ScenarioEvaluated>,
}

fn record_evaluations(mut events: EventReader<ScenarioEvaluated>, mut log: ResMut<EvaluationLog>) {
    log.events.extend(events.read().cloned());
}

pub struct TestScenarioApp {
    app: App,
    next_request_id: u64,
}

impl TestScenarioApp {
    /// App with the default model.
    pub fn new() -> Self {
        Self::build(None)
    }

    /// App with a caller-supplied model inserted before the plugin.
    pub fn with_model(model: ScenarioModel) -> Self {
        Self::build(Some(model))
    }

    fn build(model: Option<ScenarioModel>) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        if let Some(model) = model {
            app.insert_resource(model);
        }
        app.add_plugins(ImpactModelPlugin);
        app.init_resource::<EvaluationLog>();
        app.add_systems(
            Update,
            record_evaluations.after(crate::ImpactModelSet::Evaluate),
        );
        app.update();
        Self {
            app,
            next_request_id: 1,
        }
    }

    /// Queue a request without running an update. Returns its id.
    pub fn request(&mut self, scenario: ScenarioParameters) -> u64 {
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.app.world_mut().send_event(EvaluateScenario {
            request_id,
            scenario,
        });
        request_id
    }

    /// Queue one request, run one update, return its result.
    pub fn evaluate(&mut self, scenario: ScenarioParameters) -> ScenarioEvaluated {
        let request_id = self.request(scenario);
        self.update();
        self.log()
            .events
            .iter()
            .find(|e| e.request_id == request_id)
            .cloned()
            .expect("request should have been evaluated in one update")
    }

    pub fn update(&mut self) {
        self.app.update();
    }

    pub fn latest(&self) -> &LatestEvaluation {
        self.app.world().resource::<LatestEvaluation>()
    }

    pub fn log(&self) -> &EvaluationLog {
        self.app.world().resource::<EvaluationLog>()
    }

    pub fn model(&self) -> &ScenarioModel {
        self.app.world().resource::<ScenarioModel>()
    }
}
