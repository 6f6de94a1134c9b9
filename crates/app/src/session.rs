//! Headless Bevy app wrapping the model plugin.
//!
//! Both front ends (one-shot report and `--agent`) push requests through the
//! same event path a windowed front end would use, then read the result back
//! after a single update.

use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;

use impact_model::{
    EvaluateScenario, HazardType, ImpactModelPlugin, LatestEvaluation, ScenarioEvaluated,
    ScenarioModel, ScenarioParameters,
};

pub struct ScenarioSession {
    app: App,
    next_request_id: u64,
}

impl ScenarioSession {
    /// `log_level: None` installs no log subscriber (stdout stays clean for
    /// the line protocol).
    pub fn new(model: ScenarioModel, log_level: Option<Level>) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        if let Some(level) = log_level {
            app.add_plugins(LogPlugin {
                level,
                ..default()
            });
        }
        // Inserted before the plugin so `init_resource` keeps it.
        app.insert_resource(model);
        app.add_plugins(ImpactModelPlugin);

        // Initial update so Startup systems execute and resources initialize.
        app.update();

        Self {
            app,
            next_request_id: 1,
        }
    }

    /// Evaluate one scenario through the ECS. `None` only if the evaluation
    /// system did not run, which would be a wiring bug.
    pub fn evaluate(&mut self, scenario: ScenarioParameters) -> Option<ScenarioEvaluated> {
        let request_id = self.next_request_id;
        self.next_request_id += 1;

        self.app.world_mut().send_event(EvaluateScenario {
            request_id,
            scenario,
        });
        self.app.update();

        self.app
            .world()
            .get_resource::<LatestEvaluation>()
            .and_then(|latest| latest.current.clone())
            .filter(|evaluated| evaluated.request_id == request_id)
    }

    pub fn supported_hazards(&self) -> Vec<HazardType> {
        self.app
            .world()
            .get_resource::<ScenarioModel>()
            .map(|model| model.registry().supported())
            .unwrap_or_default()
    }
}
