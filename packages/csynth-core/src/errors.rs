//! Error types for csynth-core
//!
//! One taxonomy for the whole pass: malformed input (duplicate ids, scope
//! conflicts, vanished splice targets), external tool failures, and
//! synthesis-time type gaps.

use crate::config::ConfigError;
use thiserror::Error;

/// Why an external tool invocation failed
#[derive(Debug, Error)]
pub enum ToolFailure {
    /// Wall-clock timeout expired; the child was killed
    #[error("timed out after {0}s")]
    Timeout(u64),

    /// Process exited with a nonzero status (None when killed by a signal)
    #[error("exited with status {code:?}: {stderr}")]
    NonZeroExit { code: Option<i32>, stderr: String },

    /// Executable missing or not runnable
    #[error("failed to spawn: {0}")]
    Spawn(#[source] std::io::Error),

    /// The two toolchains disagree on the instrumented program's output
    #[error("toolchain outputs diverge ({left} vs {right})")]
    Divergent { left: String, right: String },
}

/// Main error type for csynth-core operations
#[derive(Debug, Error)]
pub enum SynthError {
    /// Two annotations carry the same tag id
    #[error("Duplicate tag id: Tag{0}")]
    DuplicateTagId(u32),

    /// A scope was recorded under two different parents
    #[error("Scope conflict: scope {child} has parent {existing}, got {conflicting}")]
    ScopeConflict {
        child: i64,
        existing: i64,
        conflicting: i64,
    },

    /// An exact-text splice target is no longer present in the source
    #[error("Splice target not found: {0}")]
    SpliceNotFound(String),

    /// External tool failure (profiler, compiler, instrumented binary)
    #[error("Synthesizer error: {tool} {failure}")]
    Synthesizer { tool: String, failure: ToolFailure },

    /// Missing numeric format/range/type mapping
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Function database has no entry with IO pairs
    #[error("Function database has no function with IO pairs")]
    EmptyFunctionDb,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Function database JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl SynthError {
    /// Create a splice error
    pub fn splice(what: impl Into<String>) -> Self {
        SynthError::SpliceNotFound(what.into())
    }

    /// Create an unsupported-type error
    pub fn unsupported(what: impl Into<String>) -> Self {
        SynthError::UnsupportedType(what.into())
    }

    /// Create a tool failure
    pub fn tool(tool: impl Into<String>, failure: ToolFailure) -> Self {
        SynthError::Synthesizer {
            tool: tool.into(),
            failure,
        }
    }

    /// Malformed or already-processed input; the seed must be abandoned
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            SynthError::DuplicateTagId(_)
                | SynthError::ScopeConflict { .. }
                | SynthError::SpliceNotFound(_)
        )
    }

    /// External tool failure; the pass yields zero mutants
    pub fn is_tool_failure(&self) -> bool {
        matches!(self, SynthError::Synthesizer { .. })
    }

    /// Only this one synthesis choice is lost; re-pick and continue
    pub fn is_recoverable(&self) -> bool {
        matches!(self, SynthError::UnsupportedType(_))
    }
}

/// Result type alias for csynth operations
pub type Result<T> = std::result::Result<T, SynthError>;
