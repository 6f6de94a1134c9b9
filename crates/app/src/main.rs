use std::path::PathBuf;
use std::process::ExitCode;

use bevy::log::Level;
use clap::{Args, Parser, ValueEnum};

use impact_model::config::{
    DEFAULT_DEPTH_KM, DEFAULT_DURATION_S, DEFAULT_MAGNITUDE, DEFAULT_POPULATION_DENSITY,
};
use impact_model::protocol::{evaluation_payload, make_response};
use impact_model::{HazardType, RawScenario};

mod agent_mode;
mod input;
mod model_config;
mod report;
mod session;

use report::{ChartSize, Report, MAX_CHART_HEIGHT, MAX_CHART_WIDTH};
use session::ScenarioSession;

/// Disaster impact estimation: propagation waveform and affected population
/// for one hazard scenario.
#[derive(Parser, Debug)]
#[command(name = "disastersim", version, about)]
struct Cli {
    /// Read newline-delimited JSON commands from stdin instead of evaluating once
    #[arg(long)]
    agent: bool,

    /// JSON file overriding model tunables (sampling domain, coefficients)
    #[arg(long, value_name = "PATH")]
    params: Option<PathBuf>,

    /// Log model activity to stderr
    #[arg(short, long)]
    verbose: bool,

    #[command(flatten)]
    evaluate: EvaluateArgs,
}

#[derive(Args, Debug)]
struct EvaluateArgs {
    /// Hazard type
    #[arg(long, value_enum, default_value_t = HazardArg::Earthquake)]
    hazard: HazardArg,

    /// Magnitude, 3.0 to 9.0
    #[arg(long, default_value_t = DEFAULT_MAGNITUDE, allow_negative_numbers = true)]
    magnitude: f64,

    /// Depth in km, 0 to 100
    #[arg(long, default_value_t = DEFAULT_DEPTH_KM, allow_negative_numbers = true)]
    depth: f64,

    /// Duration in seconds, 10 to 120
    #[arg(long, default_value_t = DEFAULT_DURATION_S, allow_negative_numbers = true)]
    duration: f64,

    /// Population density in people per km², 100 to 20000
    #[arg(long, default_value_t = DEFAULT_POPULATION_DENSITY, allow_negative_numbers = true)]
    density: f64,

    /// Pin out-of-range values to the nearest bound and snap to the slider step
    #[arg(long)]
    clamp: bool,

    /// Skip the waveform chart
    #[arg(long)]
    no_chart: bool,

    /// Chart width in columns
    #[arg(
        long,
        default_value_t = 72,
        value_parser = clap::value_parser!(u16).range(2..=i64::from(MAX_CHART_WIDTH))
    )]
    chart_width: u16,

    /// Chart height in rows
    #[arg(
        long,
        default_value_t = 15,
        value_parser = clap::value_parser!(u16).range(2..=i64::from(MAX_CHART_HEIGHT))
    )]
    chart_height: u16,

    /// Print the evaluation as one JSON object, waveform included
    #[arg(long)]
    json: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum HazardArg {
    Earthquake,
    Flood,
    Wildfire,
}

impl From<HazardArg> for HazardType {
    fn from(arg: HazardArg) -> Self {
        match arg {
            HazardArg::Earthquake => HazardType::Earthquake,
            HazardArg::Flood => HazardType::Flood,
            HazardArg::Wildfire => HazardType::Wildfire,
        }
    }
}

impl EvaluateArgs {
    fn raw_scenario(&self) -> RawScenario {
        RawScenario {
            hazard: self.hazard.into(),
            magnitude: self.magnitude,
            depth_km: self.depth,
            duration_s: self.duration,
            population_density: self.density,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let model = match model_config::load_model(cli.params.as_deref()) {
        Ok(model) => model,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(2);
        }
    };

    if cli.agent {
        return match agent_mode::run_agent_mode(model) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("agent I/O error: {e}");
                ExitCode::FAILURE
            }
        };
    }

    let args = &cli.evaluate;
    let mut raw = args.raw_scenario();
    if args.clamp {
        raw = input::clamp_scenario(raw);
    }
    let scenario = match raw.validate() {
        Ok(scenario) => scenario,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let level = if cli.verbose { Level::INFO } else { Level::WARN };
    let mut session = ScenarioSession::new(model, Some(level));
    let Some(evaluated) = session.evaluate(scenario) else {
        eprintln!("error: evaluation produced no result");
        return ExitCode::FAILURE;
    };
    let outcome = match evaluated.result {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if args.json {
        let response = make_response(evaluation_payload(scenario, outcome, true));
        match serde_json::to_string(&response) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        let chart = (!args.no_chart).then(|| {
            ChartSize::new(
                usize::from(args.chart_width),
                usize::from(args.chart_height),
            )
        });
        let report = Report {
            scenario: &scenario,
            impact: &outcome.impact,
            waveform: &outcome.waveform,
            chart,
        };
        print!("{report}");
    }

    ExitCode::SUCCESS
}
