//! Headless `--agent` mode: a blocking synchronous loop that reads JSON
//! commands from stdin and writes JSON responses to stdout.
//!
//! ## Protocol
//!
//! Each line of stdin is a JSON object with a `"cmd"` discriminator.
//! Each line of stdout is a JSON response with `"protocol_version"` and
//! `"type"` fields. See [`impact_model::protocol`] for the full schema.
//! A malformed or failing command produces an `error` response and the
//! session keeps reading.

use std::io::{self, BufRead, Write};

use impact_model::protocol::{
    evaluation_payload, hazards_payload, make_response, model_error_payload,
    parse_error_payload, ResponsePayload, ScenarioCommand, ScenarioResponse, PROTOCOL_VERSION,
};
use impact_model::{ModelError, RawScenario, ScenarioModel};

use crate::session::ScenarioSession;

pub fn run_agent_mode(model: ScenarioModel) -> io::Result<()> {
    // No log subscriber: stdout carries only protocol lines.
    let session = ScenarioSession::new(model, None);

    eprintln!("disastersim agent mode v{PROTOCOL_VERSION} ready, waiting for commands on stdin");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let result = run_session(session, stdin.lock(), &mut stdout.lock());

    eprintln!("disastersim agent mode shutting down");
    result
}

/// Announce readiness, then answer commands until `quit` or end of input.
pub fn run_session(
    mut session: ScenarioSession,
    input: impl BufRead,
    out: &mut impl Write,
) -> io::Result<()> {
    write_response(out, &make_response(ResponsePayload::Ready))?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<ScenarioCommand>(&line) {
            Ok(cmd) => process_command(cmd, &mut session),
            Err(e) => make_response(parse_error_payload(&e)),
        };
        let is_goodbye = matches!(response.payload, ResponsePayload::Goodbye);

        write_response(out, &response)?;

        if is_goodbye {
            break;
        }
    }
    Ok(())
}

fn write_response(out: &mut impl Write, response: &ScenarioResponse) -> io::Result<()> {
    let json = serde_json::to_string(response).map_err(io::Error::other)?;
    writeln!(out, "{json}")?;
    out.flush()
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

fn process_command(cmd: ScenarioCommand, session: &mut ScenarioSession) -> ScenarioResponse {
    match cmd {
        ScenarioCommand::Evaluate {
            scenario,
            include_waveform,
        } => {
            let scenario = match scenario.validate() {
                Ok(s) => s,
                Err(e) => return make_response(model_error_payload(&ModelError::from(e))),
            };
            match session.evaluate(scenario) {
                Some(evaluated) => match evaluated.result {
                    Ok(outcome) => {
                        make_response(evaluation_payload(scenario, outcome, include_waveform))
                    }
                    Err(e) => make_response(model_error_payload(&ModelError::from(e))),
                },
                None => make_response(ResponsePayload::Error {
                    kind: "internal".to_string(),
                    message: "evaluation produced no result".to_string(),
                }),
            }
        }

        ScenarioCommand::Hazards => make_response(hazards_payload(session.supported_hazards())),

        ScenarioCommand::Defaults => make_response(ResponsePayload::Defaults {
            scenario: RawScenario::default(),
        }),

        ScenarioCommand::Quit => make_response(ResponsePayload::Goodbye),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use serde_json::Value;

    fn run(input: &str) -> Vec<Value> {
        let session = ScenarioSession::new(ScenarioModel::default(), None);
        let mut out = Vec::new();
        run_session(session, Cursor::new(input.to_string()), &mut out).unwrap();
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_ready_is_first_line() {
        let responses = run("");
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0]["type"], "ready");
        assert_eq!(responses[0]["protocol_version"], 1);
    }

    #[test]
    fn test_evaluate_default_scenario() {
        let responses = run("{\"cmd\":\"evaluate\"}\n");
        let eval = &responses[1];
        assert_eq!(eval["type"], "evaluation");
        assert_eq!(eval["impact"]["affected_radius_km"], 130.0);
        assert_eq!(eval["impact"]["estimated_people_affected"], 265);
        assert_eq!(eval["sample_count"], 1000);
        assert!(eval.get("waveform").is_none());
    }

    #[test]
    fn test_evaluate_with_waveform() {
        let responses = run("{\"cmd\":\"evaluate\",\"include_waveform\":true}\n");
        let samples = responses[1]["waveform"].as_array().unwrap();
        assert_eq!(samples.len(), 1000);
        assert_eq!(samples[999]["distance"], 10.0);
    }

    #[test]
    fn test_validation_error_keeps_session_alive() {
        let input = concat!(
            "{\"cmd\":\"evaluate\",\"scenario\":{\"magnitude\":9.5}}\n",
            "{\"cmd\":\"evaluate\"}\n",
        );
        let responses = run(input);
        assert_eq!(responses[1]["type"], "error");
        assert_eq!(responses[1]["kind"], "validation");
        assert!(responses[1]["message"]
            .as_str()
            .unwrap()
            .contains("magnitude"));
        assert_eq!(responses[2]["type"], "evaluation");
    }

    #[test]
    fn test_unknown_scenario_key_is_parse_error() {
        let input = concat!(
            "{\"cmd\":\"evaluate\",\"scenario\":{\"magnitude\":7,\"density\":20000}}\n",
            "{\"cmd\":\"evaluate\",\"scenario\":{\"magnitude\":7}}\n",
        );
        let responses = run(input);
        assert_eq!(responses[1]["type"], "error");
        assert_eq!(responses[1]["kind"], "parse");
        assert!(responses[1]["message"]
            .as_str()
            .unwrap()
            .contains("density"));
        assert_eq!(responses[2]["type"], "evaluation");
    }

    #[test]
    fn test_unsupported_hazard_error() {
        let responses = run("{\"cmd\":\"evaluate\",\"scenario\":{\"hazard\":\"flood\"}}\n");
        assert_eq!(responses[1]["type"], "error");
        assert_eq!(responses[1]["kind"], "unsupported_hazard");
    }

    #[test]
    fn test_parse_error_then_hazards() {
        let responses = run("not json\n\n{\"cmd\":\"hazards\"}\n");
        assert_eq!(responses.len(), 3);
        assert_eq!(responses[1]["kind"], "parse");
        assert_eq!(responses[2]["supported"], serde_json::json!(["earthquake"]));
    }

    #[test]
    fn test_defaults_command() {
        let responses = run("{\"cmd\":\"defaults\"}\n");
        assert_eq!(responses[1]["type"], "defaults");
        assert_eq!(responses[1]["scenario"]["magnitude"], 6.5);
        assert_eq!(responses[1]["scenario"]["hazard"], "earthquake");
    }

    #[test]
    fn test_quit_stops_reading() {
        let responses = run("{\"cmd\":\"quit\"}\n{\"cmd\":\"hazards\"}\n");
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[1]["type"], "goodbye");
    }
}
