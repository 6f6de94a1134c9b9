//! Plain-text rendering of one evaluation: parameter summary, metric cards
//! and a coarse chart of the waveform.

use std::fmt;

use impact_model::{ImpactEstimate, ScenarioParameters, WaveformSeries};

/// Largest chart the terminal report will draw.
pub const MAX_CHART_WIDTH: u16 = 400;
pub const MAX_CHART_HEIGHT: u16 = 100;

/// Chart dimensions in characters.
#[derive(Debug, Clone, Copy)]
pub struct ChartSize {
    pub width: usize,
    pub height: usize,
}

impl ChartSize {
    /// Pinned to `[2, MAX_CHART_*]` on both axes.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width: width.clamp(2, usize::from(MAX_CHART_WIDTH)),
            height: height.clamp(2, usize::from(MAX_CHART_HEIGHT)),
        }
    }
}

// -----------------------------------------------------------------------
// Metric formatting
// -----------------------------------------------------------------------

pub fn format_radius(km: f64) -> String {
    format!("{km:.0} km")
}

pub fn format_area(km2: f64) -> String {
    format!("{km2:.0} km²")
}

/// Format a head count with comma separators.
pub fn format_people(people: u64) -> String {
    let s = people.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

// -----------------------------------------------------------------------
// Chart
// -----------------------------------------------------------------------

/// Row of `value` on a symmetric `[-scale, scale]` axis, 0 at the top.
fn row_of(value: f64, scale: f64, height: usize) -> usize {
    let t = (scale - value) / (2.0 * scale);
    ((t * (height - 1) as f64).round().max(0.0) as usize).min(height - 1)
}

/// Text chart of a waveform. Each column covers a contiguous bucket of
/// samples and is filled between the bucket's minimum and maximum amplitude.
/// The zero line is drawn with `-` wherever the signal does not cover it.
pub struct Chart<'a> {
    waveform: &'a WaveformSeries,
    size: ChartSize,
}

impl<'a> Chart<'a> {
    pub fn new(waveform: &'a WaveformSeries, size: ChartSize) -> Self {
        Self { waveform, size }
    }
}

impl fmt::Display for Chart<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.size.width.min(usize::from(MAX_CHART_WIDTH));
        let height = self.size.height.min(usize::from(MAX_CHART_HEIGHT));
        if self.waveform.is_empty() || width < 2 || height < 2 {
            return writeln!(f, "(no samples)");
        }

        let peak = self
            .waveform
            .peak_amplitude()
            .map(|s| s.amplitude.abs())
            .unwrap_or(0.0);
        let scale = if peak > 0.0 && peak.is_finite() { peak } else { 1.0 };

        let samples = self.waveform.samples();
        let len = samples.len();
        let zero_row = row_of(0.0, scale, height);
        let mut grid = vec![vec![' '; width]; height];

        for col in 0..width {
            let start = (col * len / width).min(len - 1);
            let end = ((col + 1) * len / width).clamp(start + 1, len);
            let bucket = &samples[start..end];
            let lo = bucket
                .iter()
                .map(|s| s.amplitude)
                .fold(f64::INFINITY, f64::min);
            let hi = bucket
                .iter()
                .map(|s| s.amplitude)
                .fold(f64::NEG_INFINITY, f64::max);

            grid[zero_row][col] = '-';
            let top = row_of(hi, scale, height);
            let bottom = row_of(lo, scale, height);
            for row in grid.iter_mut().take(bottom + 1).skip(top) {
                row[col] = '*';
            }
        }

        for (i, row) in grid.iter().enumerate() {
            let label = if i == 0 {
                format!("{scale:>+6.2}")
            } else if i == zero_row {
                format!("{:>6}", "0")
            } else if i == height - 1 {
                format!("{:>+6.2}", -scale)
            } else {
                " ".repeat(6)
            };
            let line: String = row.iter().collect();
            writeln!(f, "{label} |{}", line.trim_end())?;
        }
        writeln!(f, "{} +{}", " ".repeat(6), "-".repeat(width))?;

        let left = format!("{}", samples[0].distance);
        let right = format!("{}", samples[len - 1].distance);
        let gap = width.saturating_sub(left.len() + right.len());
        writeln!(f, "{}  {left}{}{right}", " ".repeat(6), " ".repeat(gap))
    }
}

// -----------------------------------------------------------------------
// Full report
// -----------------------------------------------------------------------

pub struct Report<'a> {
    pub scenario: &'a ScenarioParameters,
    pub impact: &'a ImpactEstimate,
    pub waveform: &'a WaveformSeries,
    /// `None` skips the chart.
    pub chart: Option<ChartSize>,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scenario = self.scenario;
        writeln!(f, "{} scenario", scenario.hazard())?;
        writeln!(
            f,
            "  magnitude {:.1} | depth {} km | duration {} s | density {}",
            scenario.magnitude(),
            scenario.depth_km(),
            scenario.duration_s(),
            scenario.population_density(),
        )?;
        writeln!(f)?;

        if let Some(size) = self.chart {
            writeln!(
                f,
                "Wave propagation pattern (amplitude vs distance from epicentre, km)"
            )?;
            write!(f, "{}", Chart::new(self.waveform, size))?;
            writeln!(f)?;
        }

        let impact = self.impact;
        writeln!(f, "Impact assessment")?;
        writeln!(
            f,
            "  Affected Radius   {}",
            format_radius(impact.affected_radius_km)
        )?;
        writeln!(
            f,
            "  Impact Area       {}",
            format_area(impact.affected_area_km2)
        )?;
        writeln!(
            f,
            "  People Affected   {}",
            format_people(impact.estimated_people_affected)
        )
    }
}
