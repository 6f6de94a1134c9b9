//! Synthetic distance-vs-amplitude signals for visualization.
//!
//! A waveform is a schematic stand-in for energy spreading away from the event
//! origin: an oscillation sampled over a fixed distance interval and damped by
//! an exponential envelope. It is never used for impact estimation.

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh32::xxh32;

use crate::config::{WAVEFORM_DECAY_CONSTANT, WAVEFORM_MAX_DISTANCE, WAVEFORM_SAMPLE_COUNT};

/// Seed for waveform checksums. Changing it changes every published checksum.
const CHECKSUM_SEED: u32 = 0x5157_4156;

// =============================================================================
// Sampling parameters
// =============================================================================

/// Fixed sampling domain shared by every hazard's synthesis function.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WaveformParams {
    /// Number of uniformly spaced samples over `[0, max_distance]`.
    pub sample_count: usize,
    /// Last sampled distance (inclusive).
    pub max_distance: f64,
    /// Envelope decay length: amplitude falls by `e` every `decay_constant`.
    pub decay_constant: f64,
}

impl Default for WaveformParams {
    fn default() -> Self {
        Self {
            sample_count: WAVEFORM_SAMPLE_COUNT,
            max_distance: WAVEFORM_MAX_DISTANCE,
            decay_constant: WAVEFORM_DECAY_CONSTANT,
        }
    }
}

impl WaveformParams {
    /// Distance of sample `i`. The last sample lands exactly on `max_distance`.
    pub fn distance_at(&self, i: usize) -> f64 {
        if self.sample_count < 2 {
            return 0.0;
        }
        let last = self.sample_count - 1;
        if i >= last {
            return self.max_distance;
        }
        i as f64 * (self.max_distance / last as f64)
    }

    /// `sample_count` uniformly spaced distances, ascending, starting at 0.
    pub fn distances(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.sample_count).map(move |i| self.distance_at(i))
    }
}

// =============================================================================
// Series
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveformSample {
    pub distance: f64,
    pub amplitude: f64,
}

/// Ordered `(distance, amplitude)` samples, ascending in distance.
///
/// Built fresh per evaluation and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WaveformSeries {
    samples: Vec<WaveformSample>,
}

impl WaveformSeries {
    /// Samples are taken as given; callers are responsible for ordering.
    pub fn from_samples(samples: Vec<WaveformSample>) -> Self {
        Self { samples }
    }

    /// Sample `amplitude(distance)` over the domain described by `params`.
    pub fn sample(params: &WaveformParams, amplitude: impl Fn(f64) -> f64) -> Self {
        let samples = params
            .distances()
            .map(|distance| WaveformSample {
                distance,
                amplitude: amplitude(distance),
            })
            .collect();
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[WaveformSample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WaveformSample> {
        self.samples.iter()
    }

    pub fn distances(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.distance)
    }

    pub fn amplitudes(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.amplitude)
    }

    /// Sample with the largest absolute amplitude (first one on ties).
    pub fn peak_amplitude(&self) -> Option<WaveformSample> {
        self.samples.iter().copied().fold(None, |best, s| match best {
            Some(b) if b.amplitude.abs() >= s.amplitude.abs() => Some(b),
            _ => Some(s),
        })
    }

    /// 32-bit checksum over the exact bit patterns of every sample.
    ///
    /// Equal checksums for equal series on every platform; used to compare
    /// series without shipping all samples.
    pub fn checksum(&self) -> u32 {
        let mut bytes = Vec::with_capacity(self.samples.len() * 16);
        for s in &self.samples {
            bytes.extend_from_slice(&s.distance.to_bits().to_le_bytes());
            bytes.extend_from_slice(&s.amplitude.to_bits().to_le_bytes());
        }
        xxh32(&bytes, CHECKSUM_SEED)
    }
}

impl<'a> IntoIterator for &'a WaveformSeries {
    type Item = &'a WaveformSample;
    type IntoIter = std::slice::Iter<'a, WaveformSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

// =============================================================================
// Signal shapes
// =============================================================================

/// `sin(distance * frequency) * exp(-distance / decay_constant)`.
pub fn damped_oscillation(distance: f64, frequency: f64, decay_constant: f64) -> f64 {
    (distance * frequency).sin() * (-distance / decay_constant).exp()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_match_config() {
        let p = WaveformParams::default();
        assert_eq!(p.sample_count, 1000);
        assert_eq!(p.max_distance, 10.0);
        assert_eq!(p.decay_constant, 5.0);
    }

    #[test]
    fn test_distances_span_closed_interval() {
        let p = WaveformParams::default();
        let d: Vec<f64> = p.distances().collect();
        assert_eq!(d.len(), 1000);
        assert_eq!(d[0], 0.0);
        assert_eq!(d[999], 10.0);
        assert!(d.windows(2).all(|w| w[0] < w[1]), "distances must ascend");
    }

    #[test]
    fn test_distance_step_is_uniform() {
        let p = WaveformParams::default();
        let step = 10.0 / 999.0;
        assert!((p.distance_at(1) - step).abs() < 1e-15);
        assert!((p.distance_at(500) - 500.0 * step).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_sample_counts() {
        let empty = WaveformParams {
            sample_count: 0,
            ..WaveformParams::default()
        };
        assert_eq!(empty.distances().count(), 0);

        let single = WaveformParams {
            sample_count: 1,
            ..WaveformParams::default()
        };
        assert_eq!(single.distances().collect::<Vec<_>>(), vec![0.0]);
    }

    #[test]
    fn test_damped_oscillation_at_origin_is_zero() {
        assert_eq!(damped_oscillation(0.0, 6.5, 5.0), 0.0);
    }

    #[test]
    fn test_damped_oscillation_envelope() {
        for i in 0..200 {
            let x = i as f64 * 0.05;
            let y = damped_oscillation(x, 7.3, 5.0);
            assert!(
                y.abs() <= (-x / 5.0).exp() + 1e-12,
                "amplitude {} at {} exceeds envelope",
                y,
                x
            );
        }
    }

    #[test]
    fn test_sample_builds_ascending_series() {
        let series = WaveformSeries::sample(&WaveformParams::default(), |x| x * 2.0);
        assert_eq!(series.len(), 1000);
        assert!(!series.is_empty());
        let first = series.samples()[0];
        assert_eq!(first.distance, 0.0);
        assert_eq!(first.amplitude, 0.0);
        let last = series.samples()[999];
        assert_eq!(last.amplitude, 20.0);
    }

    #[test]
    fn test_peak_amplitude_uses_absolute_value() {
        let series = WaveformSeries::from_samples(vec![
            WaveformSample {
                distance: 0.0,
                amplitude: 0.2,
            },
            WaveformSample {
                distance: 1.0,
                amplitude: -0.9,
            },
            WaveformSample {
                distance: 2.0,
                amplitude: 0.9,
            },
        ]);
        let peak = series.peak_amplitude().unwrap();
        assert_eq!(peak.distance, 1.0);
        assert_eq!(peak.amplitude, -0.9);
        assert!(WaveformSeries::default().peak_amplitude().is_none());
    }

    #[test]
    fn test_checksum_stable_and_sensitive() {
        let a = WaveformSeries::sample(&WaveformParams::default(), |x| x.sin());
        let b = WaveformSeries::sample(&WaveformParams::default(), |x| x.sin());
        let c = WaveformSeries::sample(&WaveformParams::default(), |x| x.cos());
        assert_eq!(a.checksum(), b.checksum());
        assert_ne!(a.checksum(), c.checksum());
    }

    #[test]
    fn test_series_serializes_as_plain_array() {
        let series = WaveformSeries::from_samples(vec![WaveformSample {
            distance: 0.5,
            amplitude: 0.25,
        }]);
        let json = serde_json::to_string(&series).unwrap();
        assert_eq!(json, r#"[{"distance":0.5,"amplitude":0.25}]"#);
    }
}
