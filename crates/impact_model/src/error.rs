// ---------------------------------------------------------------------------
// Model errors: typed failures surfaced to the caller unmodified
// ---------------------------------------------------------------------------

use std::fmt;

use crate::hazard::HazardType;
use crate::scenario::{ParamRange, ScenarioField};

/// A scenario field was outside its closed interval at construction time.
///
/// Only ever produced while building a [`crate::ScenarioParameters`]; a
/// constructed scenario is valid for the rest of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidationError {
    pub field: ScenarioField,
    pub value: f64,
    pub range: ParamRange,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} = {} is outside the allowed range {}",
            self.field.name(),
            self.value,
            self.range
        )
    }
}

impl std::error::Error for ValidationError {}

/// Synthesis or estimation was requested for a hazard with no registered model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnsupportedHazardError(pub HazardType);

impl fmt::Display for UnsupportedHazardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no impact model is registered for {}", self.0.name())
    }
}

impl std::error::Error for UnsupportedHazardError {}

/// Either failure, for callers that validate and evaluate in one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModelError {
    Validation(ValidationError),
    UnsupportedHazard(UnsupportedHazardError),
}

impl ModelError {
    /// Stable machine-readable tag, used by the line protocol.
    pub fn kind(&self) -> &'static str {
        match self {
            ModelError::Validation(_) => "validation",
            ModelError::UnsupportedHazard(_) => "unsupported_hazard",
        }
    }
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::Validation(e) => write!(f, "Validation error: {e}"),
            ModelError::UnsupportedHazard(e) => write!(f, "Unsupported hazard: {e}"),
        }
    }
}

impl std::error::Error for ModelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ModelError::Validation(e) => Some(e),
            ModelError::UnsupportedHazard(e) => Some(e),
        }
    }
}

impl From<ValidationError> for ModelError {
    fn from(e: ValidationError) -> Self {
        ModelError::Validation(e)
    }
}

impl From<UnsupportedHazardError> for ModelError {
    fn from(e: UnsupportedHazardError) -> Self {
        ModelError::UnsupportedHazard(e)
    }
}

/// A tunable in [`crate::ModelParams`] was rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidModelParams {
    pub name: &'static str,
    pub value: f64,
}

impl fmt::Display for InvalidModelParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid model parameter {}: {}", self.name, self.value)
    }
}

impl std::error::Error for InvalidModelParams {}

#[cfg(test)]
mod tests {
    use super::*;

    fn magnitude_error() -> ValidationError {
        ValidationError {
            field: ScenarioField::Magnitude,
            value: 9.5,
            range: ScenarioField::Magnitude.range(),
        }
    }

    #[test]
    fn test_validation_error_display_names_field_and_range() {
        let msg = format!("{}", magnitude_error());
        assert!(msg.contains("magnitude"), "got: {msg}");
        assert!(msg.contains("9.5"), "got: {msg}");
        assert!(msg.contains("[3, 9]"), "got: {msg}");
    }

    #[test]
    fn test_unsupported_hazard_display() {
        let msg = format!("{}", UnsupportedHazardError(HazardType::Flood));
        assert!(msg.contains("Flood"), "got: {msg}");
    }

    #[test]
    fn test_model_error_from_validation() {
        let err: ModelError = magnitude_error().into();
        assert!(matches!(err, ModelError::Validation(_)));
        assert_eq!(err.kind(), "validation");
        assert!(format!("{err}").starts_with("Validation error"));
    }

    #[test]
    fn test_model_error_from_unsupported() {
        let err: ModelError = UnsupportedHazardError(HazardType::Wildfire).into();
        assert_eq!(err.kind(), "unsupported_hazard");
    }

    #[test]
    fn test_model_error_source_is_inner_error() {
        let err = ModelError::from(magnitude_error());
        let source = std::error::Error::source(&err);
        assert!(source.is_some());
        assert!(source.map(|s| s.to_string()).unwrap_or_default().contains("magnitude"));
    }

    #[test]
    fn test_invalid_model_params_display() {
        let err = InvalidModelParams {
            name: "waveform.decay_constant",
            value: 0.0,
        };
        let msg = format!("{err}");
        assert!(msg.contains("waveform.decay_constant"), "got: {msg}");
    }
}
