//! Compile-time bounds, defaults and coefficients for the impact model.
//!
//! Everything here can be overridden at runtime through [`crate::ModelParams`]
//! except the scenario bounds, which define what a valid scenario is.

// ---------------------------------------------------------------------------
// Scenario bounds (closed intervals)
// ---------------------------------------------------------------------------

pub const MAGNITUDE_MIN: f64 = 3.0;
pub const MAGNITUDE_MAX: f64 = 9.0;

/// Hypocentre depth in kilometres.
pub const DEPTH_MIN_KM: f64 = 0.0;
pub const DEPTH_MAX_KM: f64 = 100.0;

/// Shaking duration in seconds.
pub const DURATION_MIN_S: f64 = 10.0;
pub const DURATION_MAX_S: f64 = 120.0;

/// Persons per unit area.
pub const POPULATION_DENSITY_MIN: f64 = 100.0;
pub const POPULATION_DENSITY_MAX: f64 = 20_000.0;

// ---------------------------------------------------------------------------
// Default scenario (the values the input widgets start at)
// ---------------------------------------------------------------------------

pub const DEFAULT_MAGNITUDE: f64 = 6.5;
pub const DEFAULT_DEPTH_KM: f64 = 10.0;
pub const DEFAULT_DURATION_S: f64 = 30.0;
pub const DEFAULT_POPULATION_DENSITY: f64 = 5_000.0;

// ---------------------------------------------------------------------------
// Waveform sampling domain
// ---------------------------------------------------------------------------

/// Number of samples in every synthesized waveform.
pub const WAVEFORM_SAMPLE_COUNT: usize = 1000;

/// Largest `sample_count` a parameter file may request.
pub const WAVEFORM_MAX_SAMPLE_COUNT: usize = 100_000;

/// Upper end of the sampled distance interval `[0, WAVEFORM_MAX_DISTANCE]`.
pub const WAVEFORM_MAX_DISTANCE: f64 = 10.0;

/// Distance over which the oscillation envelope decays by a factor of `e`.
pub const WAVEFORM_DECAY_CONSTANT: f64 = 5.0;

// ---------------------------------------------------------------------------
// Earthquake impact coefficients
// ---------------------------------------------------------------------------

/// Affected radius grows linearly: 20 km per magnitude unit.
pub const EARTHQUAKE_RADIUS_KM_PER_MAGNITUDE: f64 = 20.0;

/// Rescales `density * area` into a head count.
pub const EARTHQUAKE_POPULATION_DIVISOR: f64 = 1_000_000.0;
