//! Input widgets' bounds and steps, applied before validation.
//!
//! The model never clamps. A front end that wants slider-like behaviour
//! (out-of-range values pinned to the nearest bound, values snapped to the
//! widget step) does it here, then hands the result to validation.

use impact_model::{RawScenario, ScenarioField};

/// Widget step per field: magnitude in tenths, depth and duration in whole
/// units, density in hundreds.
pub fn step_for(field: ScenarioField) -> f64 {
    match field {
        ScenarioField::Magnitude => 0.1,
        ScenarioField::Depth => 1.0,
        ScenarioField::Duration => 1.0,
        ScenarioField::PopulationDensity => 100.0,
    }
}

/// Pin `value` into the field's range and snap it to the widget step.
/// NaN becomes the default scenario's value.
pub fn clamp_to_widget(field: ScenarioField, value: f64) -> f64 {
    if value.is_nan() {
        return RawScenario::default().get(field);
    }
    let range = field.range();
    let clamped = value.clamp(range.min, range.max);
    let step = step_for(field);
    let snapped = if step < 1.0 {
        // Divide by the inverse so tenths come out as the nearest f64.
        let per_unit = (1.0 / step).round();
        (clamped * per_unit).round() / per_unit
    } else {
        (clamped / step).round() * step
    };
    snapped.clamp(range.min, range.max)
}

pub fn clamp_scenario(mut raw: RawScenario) -> RawScenario {
    for field in ScenarioField::ALL {
        raw.set(field, clamp_to_widget(field, raw.get(field)));
    }
    raw
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magnitude_clamped_and_snapped() {
        assert_eq!(clamp_to_widget(ScenarioField::Magnitude, 9.5), 9.0);
        assert_eq!(clamp_to_widget(ScenarioField::Magnitude, 1.0), 3.0);
        assert_eq!(clamp_to_widget(ScenarioField::Magnitude, 6.54), 6.5);
        assert_eq!(clamp_to_widget(ScenarioField::Magnitude, 6.56), 6.6);
    }

    #[test]
    fn test_depth_and_duration_snap_to_whole_units() {
        assert_eq!(clamp_to_widget(ScenarioField::Depth, -3.0), 0.0);
        assert_eq!(clamp_to_widget(ScenarioField::Depth, 12.6), 13.0);
        assert_eq!(clamp_to_widget(ScenarioField::Duration, 500.0), 120.0);
        assert_eq!(clamp_to_widget(ScenarioField::Duration, 29.4), 29.0);
    }

    #[test]
    fn test_density_snaps_to_hundreds() {
        assert_eq!(clamp_to_widget(ScenarioField::PopulationDensity, 5049.0), 5000.0);
        assert_eq!(clamp_to_widget(ScenarioField::PopulationDensity, 5050.0), 5100.0);
        assert_eq!(clamp_to_widget(ScenarioField::PopulationDensity, 20_001.0), 20_000.0);
        assert_eq!(clamp_to_widget(ScenarioField::PopulationDensity, 0.0), 100.0);
    }

    #[test]
    fn test_nan_falls_back_to_default() {
        assert_eq!(clamp_to_widget(ScenarioField::Magnitude, f64::NAN), 6.5);
    }

    #[test]
    fn test_clamped_scenario_always_validates() {
        let wild = RawScenario {
            magnitude: 42.0,
            depth_km: -10.0,
            duration_s: f64::INFINITY,
            population_density: f64::NEG_INFINITY,
            ..RawScenario::default()
        };
        let clamped = clamp_scenario(wild);
        assert!(clamped.validate().is_ok(), "got {:?}", clamped);
        assert_eq!(clamped.duration_s, 120.0);
        assert_eq!(clamped.population_density, 100.0);
    }

    #[test]
    fn test_in_range_values_unchanged() {
        let raw = RawScenario::default();
        assert_eq!(clamp_scenario(raw), raw);
    }
}
