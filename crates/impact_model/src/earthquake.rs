//! Earthquake hazard model.
//!
//! Waveform: `sin(x * magnitude) * exp(-x / decay)` over the shared sampling
//! domain, so stronger events oscillate faster with distance.
//!
//! Impact: radius is `magnitude * 20` km, area is the disk of that radius, and
//! affected people are `floor(density * area / 1_000_000)`.
//!
//! Depth and duration are not read by either function.

use serde::{Deserialize, Serialize};

use crate::config::{EARTHQUAKE_POPULATION_DIVISOR, EARTHQUAKE_RADIUS_KM_PER_MAGNITUDE};
use crate::hazard::{HazardModel, HazardType};
use crate::impact::{affected_radius_km, ImpactEstimate};
use crate::scenario::ScenarioParameters;
use crate::waveform::{damped_oscillation, WaveformParams, WaveformSeries};

/// Earthquake coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Earthquake {
    pub radius_km_per_magnitude: f64,
    pub population_divisor: f64,
}

impl Default for Earthquake {
    fn default() -> Self {
        Self {
            radius_km_per_magnitude: EARTHQUAKE_RADIUS_KM_PER_MAGNITUDE,
            population_divisor: EARTHQUAKE_POPULATION_DIVISOR,
        }
    }
}

impl HazardModel for Earthquake {
    const HAZARD: HazardType = HazardType::Earthquake;

    fn synthesize(
        &self,
        scenario: &ScenarioParameters,
        sampling: &WaveformParams,
    ) -> WaveformSeries {
        let magnitude = scenario.magnitude();
        WaveformSeries::sample(sampling, |x| {
            damped_oscillation(x, magnitude, sampling.decay_constant)
        })
    }

    fn estimate(&self, scenario: &ScenarioParameters) -> ImpactEstimate {
        let radius = affected_radius_km(scenario.magnitude(), self.radius_km_per_magnitude);
        ImpactEstimate::from_radius(
            radius,
            scenario.population_density(),
            self.population_divisor,
        )
    }
}
