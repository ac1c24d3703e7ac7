use csynth_core::SynthError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, OrchestratorError>;

#[derive(Error, Debug)]
pub enum OrchestratorError {
    #[error("Invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error(transparent)]
    Synth(#[from] SynthError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl OrchestratorError {
    pub fn serialization<E: std::fmt::Display>(e: E) -> Self {
        Self::Serialization(e.to_string())
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            OrchestratorError::Synth(err) => ErrorCategory::of(err),
            OrchestratorError::Io(_) => ErrorCategory::Infrastructure,
            _ => ErrorCategory::Internal,
        }
    }
}

/// What the batch driver does with a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// External tool failed - zero mutants for this seed, continue
    ToolFailure,
    /// Malformed or already-processed seed - skip it, continue
    MalformedInput,
    /// One synthesis choice lost - re-pick inside the pass
    Recoverable,
    /// Filesystem or configuration problem - skip seed, likely affects the rest
    Infrastructure,
    /// Orchestrator bug (illegal state transition)
    Internal,
}

impl ErrorCategory {
    pub fn of(err: &SynthError) -> Self {
        if err.is_tool_failure() {
            ErrorCategory::ToolFailure
        } else if err.is_malformed_input() {
            ErrorCategory::MalformedInput
        } else if err.is_recoverable() {
            ErrorCategory::Recoverable
        } else {
            ErrorCategory::Infrastructure
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::ToolFailure => "tool_failure",
            ErrorCategory::MalformedInput => "malformed_input",
            ErrorCategory::Recoverable => "recoverable",
            ErrorCategory::Infrastructure => "infrastructure",
            ErrorCategory::Internal => "internal",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
