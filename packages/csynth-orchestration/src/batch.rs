//! Batch driver
//!
//! Seeds run one after another. A failed pass means zero mutants for that
//! seed and the batch moves on.

use crate::error::{ErrorCategory, OrchestratorError, Result};
use crate::state::{PassStage, PassState};
use crate::synthesizer::{PassOutcome, SeedSynthesizer};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

/// Outcome of one seed
#[derive(Debug, Clone, Serialize)]
pub struct SeedReport {
    pub seed: PathBuf,
    pub pass_id: Option<Uuid>,
    pub state: String,
    pub mutants: Vec<PathBuf>,
    pub rejected: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_category: Option<ErrorCategory>,
    /// Stage the pass failed in; `None` for orchestrator faults
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_stage: Option<PassStage>,
}

impl SeedReport {
    fn from_outcome(outcome: PassOutcome) -> Self {
        let (error, error_category, failed_stage) = match &outcome.pass.state {
            PassState::Failed {
                error,
                error_category,
                stage,
                ..
            } => (Some(error.clone()), Some(*error_category), Some(*stage)),
            _ => (None, None, None),
        };
        Self {
            seed: outcome.pass.seed.clone(),
            pass_id: Some(outcome.pass.id),
            state: outcome.pass.state.state_name().to_string(),
            mutants: outcome.mutants,
            rejected: outcome.rejected,
            error,
            error_category,
            failed_stage,
        }
    }

    fn orchestrator_fault(seed: &Path, err: &OrchestratorError) -> Self {
        Self {
            seed: seed.to_path_buf(),
            pass_id: None,
            state: "failed".to_string(),
            mutants: Vec::new(),
            rejected: 0,
            error: Some(err.to_string()),
            error_category: Some(err.category()),
            failed_stage: None,
        }
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }

    /// `failed during <stage> [<category>]: <error>`, or the mutant count
    pub fn status_line(&self) -> String {
        let Some(error) = &self.error else {
            return format!("{} mutant(s)", self.mutants.len());
        };
        let category = self
            .error_category
            .map(|category| format!(" [{category}]"))
            .unwrap_or_default();
        match self.failed_stage {
            Some(stage) => format!("failed during {stage}{category}: {error}"),
            None => format!("failed{category}: {error}"),
        }
    }
}

/// Totals over a batch
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchSummary {
    pub seeds: usize,
    pub failed_seeds: usize,
    pub mutants_written: usize,
    pub rejected_mutants: usize,
    pub duration_ms: u64,
    pub reports: Vec<SeedReport>,
}

impl BatchSummary {
    fn push(&mut self, report: SeedReport) {
        self.seeds += 1;
        if report.is_failed() {
            self.failed_seeds += 1;
        }
        self.mutants_written += report.mutants.len();
        self.rejected_mutants += report.rejected;
        self.reports.push(report);
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(OrchestratorError::serialization)
    }
}

pub struct BatchDriver {
    synthesizer: SeedSynthesizer,
}

impl BatchDriver {
    pub fn new(synthesizer: SeedSynthesizer) -> Self {
        Self { synthesizer }
    }

    pub fn run(&self, seeds: &[PathBuf]) -> BatchSummary {
        let start = Instant::now();
        let mut summary = BatchSummary::default();

        for seed in seeds {
            let report = match self.synthesizer.run(seed) {
                Ok(outcome) => SeedReport::from_outcome(outcome),
                Err(err) => {
                    warn!(seed = %seed.display(), %err, "pass aborted");
                    SeedReport::orchestrator_fault(seed, &err)
                }
            };
            summary.push(report);
        }

        summary.duration_ms = start.elapsed().as_millis() as u64;
        info!(
            seeds = summary.seeds,
            failed = summary.failed_seeds,
            mutants = summary.mutants_written,
            duration_ms = summary.duration_ms,
            "batch complete"
        );
        summary
    }
}
