//! Loading model tunables from a JSON file (`--params <path>`).

use std::fmt;
use std::path::{Path, PathBuf};

use impact_model::{InvalidModelParams, ModelParams, ScenarioModel};

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    Invalid(InvalidModelParams),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "cannot read {}: {source}", path.display())
            }
            ConfigError::Parse { path, source } => {
                write!(f, "cannot parse {}: {source}", path.display())
            }
            ConfigError::Invalid(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
            ConfigError::Invalid(e) => Some(e),
        }
    }
}

impl From<InvalidModelParams> for ConfigError {
    fn from(e: InvalidModelParams) -> Self {
        ConfigError::Invalid(e)
    }
}

/// Build the model from `path`, or the built-in defaults when no path is given.
pub fn load_model(path: Option<&Path>) -> Result<ScenarioModel, ConfigError> {
    let Some(path) = path else {
        return Ok(ScenarioModel::default());
    };
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let params = ModelParams::from_json_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(ScenarioModel::new(params)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "disastersim_{}_{}.json",
            name,
            std::process::id()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_no_path_gives_default_model() {
        let model = load_model(None).unwrap();
        assert_eq!(model.sampling().sample_count, 1000);
    }

    #[test]
    fn test_partial_file_overrides_sampling() {
        let path = temp_file("partial", r#"{"waveform":{"sample_count":250}}"#);
        let model = load_model(Some(&path)).unwrap();
        assert_eq!(model.sampling().sample_count, 250);
        assert_eq!(model.sampling().max_distance, 10.0);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("disastersim_does_not_exist.json");
        let err = load_model(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("cannot read"));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let path = temp_file("malformed", "{ not json");
        let err = load_model(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_out_of_range_value_is_invalid() {
        let path = temp_file("invalid", r#"{"waveform":{"sample_count":1}}"#);
        let err = load_model(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        let _ = std::fs::remove_file(path);
    }
}
