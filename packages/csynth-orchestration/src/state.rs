use crate::error::{ErrorCategory, OrchestratorError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// Stage a pass can fail in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassStage {
    Profiling,
    Synthesis,
}

impl PassStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PassStage::Profiling => "profiling",
            PassStage::Synthesis => "synthesis",
        }
    }
}

impl std::fmt::Display for PassStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Pass state
///
/// `Idle → Profiling → Analyzed → Synthesizing → Done`, or `Failed` from
/// any non-terminal state past `Idle`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PassState {
    Idle,
    Profiling {
        started_at: DateTime<Utc>,
    },
    Analyzed {
        alive_tags: Vec<u32>,
    },
    Synthesizing {
        completed: usize,
    },
    Done {
        mutants: usize,
        duration_ms: u64,
    },
    Failed {
        error: String,
        error_category: ErrorCategory,
        stage: PassStage,
        failed_at: DateTime<Utc>,
    },
}

impl PassState {
    pub fn state_name(&self) -> &'static str {
        match self {
            PassState::Idle => "idle",
            PassState::Profiling { .. } => "profiling",
            PassState::Analyzed { .. } => "analyzed",
            PassState::Synthesizing { .. } => "synthesizing",
            PassState::Done { .. } => "done",
            PassState::Failed { .. } => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PassState::Done { .. } | PassState::Failed { .. })
    }
}

/// One profiling pass over one seed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pass {
    pub id: Uuid,
    pub seed: PathBuf,
    /// RNG seed every random choice of this pass derives from
    pub rng_seed: u64,
    pub state: PassState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
}

impl Pass {
    pub fn new(seed: impl Into<PathBuf>, rng_seed: u64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            seed: seed.into(),
            rng_seed,
            state: PassState::Idle,
            created_at: now,
            updated_at: now,
            started_at: None,
        }
    }
}

/// Pass state machine for transitions
pub struct PassStateMachine {
    pass: Pass,
}

impl PassStateMachine {
    pub fn new(pass: Pass) -> Self {
        Self { pass }
    }

    pub fn pass(&self) -> &Pass {
        &self.pass
    }

    pub fn into_pass(self) -> Pass {
        self.pass
    }

    fn invalid(&self, to: &str) -> OrchestratorError {
        OrchestratorError::InvalidStateTransition {
            from: self.pass.state.state_name().to_string(),
            to: to.to_string(),
        }
    }

    /// Transition: IDLE → PROFILING
    pub fn start_profiling(&mut self) -> Result<()> {
        match &self.pass.state {
            PassState::Idle => {
                let now = Utc::now();
                self.pass.state = PassState::Profiling { started_at: now };
                self.pass.started_at = Some(now);
                self.pass.updated_at = now;
                Ok(())
            }
            _ => Err(self.invalid("profiling")),
        }
    }

    /// Transition: PROFILING → ANALYZED
    pub fn analyzed(&mut self, alive_tags: Vec<u32>) -> Result<()> {
        match &self.pass.state {
            PassState::Profiling { .. } => {
                self.pass.state = PassState::Analyzed { alive_tags };
                self.pass.updated_at = Utc::now();
                Ok(())
            }
            _ => Err(self.invalid("analyzed")),
        }
    }

    /// Transition: ANALYZED → SYNTHESIZING
    pub fn begin_synthesis(&mut self) -> Result<()> {
        match &self.pass.state {
            PassState::Analyzed { .. } => {
                self.pass.state = PassState::Synthesizing { completed: 0 };
                self.pass.updated_at = Utc::now();
                Ok(())
            }
            _ => Err(self.invalid("synthesizing")),
        }
    }

    /// Count one written mutant
    pub fn record_mutant(&mut self) -> Result<()> {
        if let PassState::Synthesizing { completed } = &mut self.pass.state {
            *completed += 1;
            self.pass.updated_at = Utc::now();
            return Ok(());
        }
        Err(self.invalid("record_mutant"))
    }

    /// Transition: SYNTHESIZING → DONE, or ANALYZED → DONE when nothing is alive
    pub fn finish(&mut self) -> Result<()> {
        let mutants = match &self.pass.state {
            PassState::Synthesizing { completed } => *completed,
            PassState::Analyzed { .. } => 0,
            _ => return Err(self.invalid("done")),
        };
        let now = Utc::now();
        let duration_ms = self
            .pass
            .started_at
            .map(|started| (now - started).num_milliseconds().max(0) as u64)
            .unwrap_or(0);
        self.pass.state = PassState::Done {
            mutants,
            duration_ms,
        };
        self.pass.updated_at = now;
        Ok(())
    }

    /// Transition: PROFILING/ANALYZED/SYNTHESIZING → FAILED
    pub fn fail(&mut self, error: String, error_category: ErrorCategory, stage: PassStage) -> Result<()> {
        if self.pass.state.is_terminal() || self.pass.state == PassState::Idle {
            return Err(self.invalid("failed"));
        }
        let now = Utc::now();
        self.pass.state = PassState::Failed {
            error,
            error_category,
            stage,
            failed_at: now,
        };
        self.pass.updated_at = now;
        Ok(())
    }
}
