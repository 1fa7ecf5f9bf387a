use crate::ingredient::IngredientKey;
use thiserror::Error;

/// Errors that can occur while driving the session state machine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    #[error("A user identifier is required before mixing can begin")]
    EmptyUserId,

    #[error(
        "'{key}' belongs to step {key_step}, but the glass is already at step {current_step}"
    )]
    SequenceViolation {
        key: IngredientKey,
        key_step: usize,
        current_step: usize,
    },

    #[error("Action '{action}' is not available in the '{phase}' phase")]
    OutOfPhase { action: &'static str, phase: String },
}

/// Errors that can occur when loading a recipe book from external data.
#[derive(Error, Debug)]
pub enum RecipeLoadError {
    #[error("Failed to parse recipe book JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Rule '{rule_name}' does not specify a required choice for key '{missing_key}'")]
    IncompleteRule {
        rule_name: String,
        missing_key: IngredientKey,
    },

    #[error("Failed to read or write recipe book artifact: {0}")]
    Io(String),
}

/// Errors surfaced by the optional image-recognition collaborator.
///
/// These never escalate: every variant maps to a user-visible status string
/// and leaves the main choice-to-result path untouched.
#[derive(Error, Debug, Clone)]
pub enum VisionError {
    #[error("Could not load classifier model from '{location}': {message}")]
    ModelLoad { location: String, message: String },

    #[error("Capture device unavailable: {0}")]
    Device(String),

    #[error("No recognition loop is running")]
    NotRunning,
}

impl VisionError {
    /// The status string shown to the user in place of the recognition panel.
    pub fn status_message(&self) -> String {
        match self {
            VisionError::ModelLoad { location, message } => {
                format!("Could not load the recognition model ({location}): {message}")
            }
            VisionError::Device(message) => format!("Could not start the camera: {message}"),
            VisionError::NotRunning => "Recognition is not active".to_string(),
        }
    }
}

/// Errors that can occur while assembling or delivering a session report.
///
/// Reports are best-effort: the reporter logs these and swallows them.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Report submission failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Session has no user identifier to report")]
    MissingUserId,
}
