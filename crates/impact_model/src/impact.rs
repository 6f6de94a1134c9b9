//! Closed-form impact metrics.
//!
//! The affected zone is treated as a disk centred on the event origin. These
//! are order-of-magnitude figures for display, not loss estimates.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// Scope and scale of one scenario's effect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactEstimate {
    pub affected_radius_km: f64,
    pub affected_area_km2: f64,
    pub estimated_people_affected: u64,
}

impl ImpactEstimate {
    /// Disk of the given radius over a uniform population density.
    pub fn from_radius(radius_km: f64, population_density: f64, population_divisor: f64) -> Self {
        let area = disk_area_km2(radius_km);
        let people = people_affected(population_density, area, population_divisor);
        Self {
            affected_radius_km: radius_km,
            affected_area_km2: area,
            estimated_people_affected: people,
        }
    }
}

/// Radius grows linearly with magnitude.
pub fn affected_radius_km(magnitude: f64, km_per_magnitude: f64) -> f64 {
    magnitude * km_per_magnitude
}

pub fn disk_area_km2(radius_km: f64) -> f64 {
    PI * radius_km * radius_km
}

/// `floor(density * area / divisor)`, never negative.
///
/// Non-finite or negative products collapse to 0; the `as` cast saturates at
/// `u64::MAX` for absurdly large inputs.
pub fn people_affected(population_density: f64, area_km2: f64, divisor: f64) -> u64 {
    let people = (population_density * area_km2 / divisor).floor();
    if people.is_finite() && people > 0.0 {
        people as u64
    } else {
        0
    }
}
