//! Line protocol types for the headless `agent` mode.
//!
//! Defines the JSON command/response envelope that external programs use to
//! evaluate scenarios over newline-delimited JSON on stdin/stdout.
//!
//! These types live in this crate so they can be unit-tested without the app
//! binary. The I/O loop lives in `crates/app/src/agent_mode.rs`.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::hazard::HazardType;
use crate::impact::ImpactEstimate;
use crate::model::ScenarioOutcome;
use crate::scenario::{RawScenario, ScenarioParameters};
use crate::waveform::WaveformSeries;

// ---------------------------------------------------------------------------
// Commands (stdin → model)
// ---------------------------------------------------------------------------

/// A single command read from one line of stdin. `cmd` is the tag.
#[derive(Debug, Deserialize)]
#[serde(tag = "cmd")]
pub enum ScenarioCommand {
    /// Validate and evaluate one scenario. Missing fields take the default
    /// scenario's values.
    #[serde(rename = "evaluate")]
    Evaluate {
        #[serde(default)]
        scenario: RawScenario,
        /// Ship every sample, not just the checksum.
        #[serde(default)]
        include_waveform: bool,
    },

    /// List registered and known hazard types.
    #[serde(rename = "hazards")]
    Hazards,

    /// Return the default scenario.
    #[serde(rename = "defaults")]
    Defaults,

    /// End the session.
    #[serde(rename = "quit")]
    Quit,
}

// ---------------------------------------------------------------------------
// Responses (model → stdout)
// ---------------------------------------------------------------------------

/// Every response includes the protocol version and a tagged payload.
#[derive(Debug, Serialize)]
pub struct ScenarioResponse {
    pub protocol_version: u32,
    #[serde(flatten)]
    pub payload: ResponsePayload,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum ResponsePayload {
    /// The session is accepting commands.
    #[serde(rename = "ready")]
    Ready,

    /// Result of an `evaluate` command.
    #[serde(rename = "evaluation")]
    Evaluation {
        scenario: ScenarioParameters,
        impact: ImpactEstimate,
        sample_count: usize,
        waveform_checksum: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        waveform: Option<WaveformSeries>,
    },

    #[serde(rename = "hazards")]
    Hazards {
        supported: Vec<HazardType>,
        known: Vec<HazardType>,
    },

    #[serde(rename = "defaults")]
    Defaults { scenario: RawScenario },

    /// The command failed; the session continues.
    #[serde(rename = "error")]
    Error { kind: String, message: String },

    /// Response to `quit`.
    #[serde(rename = "goodbye")]
    Goodbye,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Bump when the command/response schema changes.
pub const PROTOCOL_VERSION: u32 = 1;

pub fn make_response(payload: ResponsePayload) -> ScenarioResponse {
    ScenarioResponse {
        protocol_version: PROTOCOL_VERSION,
        payload,
    }
}

pub fn evaluation_payload(
    scenario: ScenarioParameters,
    outcome: ScenarioOutcome,
    include_waveform: bool,
) -> ResponsePayload {
    let (waveform, impact) = outcome.into_parts();
    ResponsePayload::Evaluation {
        scenario,
        impact,
        sample_count: waveform.len(),
        waveform_checksum: waveform.checksum(),
        waveform: include_waveform.then_some(waveform),
    }
}

pub fn model_error_payload(err: &ModelError) -> ResponsePayload {
    ResponsePayload::Error {
        kind: err.kind().to_string(),
        message: err.to_string(),
    }
}

pub fn parse_error_payload(err: &serde_json::Error) -> ResponsePayload {
    ResponsePayload::Error {
        kind: "parse".to_string(),
        message: format!("Parse error: {err}"),
    }
}

pub fn hazards_payload(supported: Vec<HazardType>) -> ResponsePayload {
    ResponsePayload::Hazards {
        supported,
        known: HazardType::ALL.to_vec(),
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
