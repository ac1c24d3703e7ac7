//! Synthesizer orchestrator
//!
//! One profiling pass per seed feeds `num_mutants` independent mutants.
//! Every mutant text is built (and validated) before any file is written,
//! so a pass that fails mid-synthesis leaves no mutant files behind.

use crate::error::{ErrorCategory, Result};
use crate::state::{Pass, PassStage, PassState, PassStateMachine};
use csynth_core::shared::utils::{derive_rng, resolve_seed};
use csynth_core::{
    profile_seed, synthesize_mutant, ExecutionBackend, FunctionDb, InstrumentOptions,
    MutantOptions, MutantValidator, ProfiledSeed, SynthesisConfig,
};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// RNG stream of the profiling pass; mutant `i` uses stream `i`
const PROFILING_STREAM: u64 = u64::MAX;

/// Result of one pass
#[derive(Debug, Clone)]
pub struct PassOutcome {
    pub pass: Pass,
    /// Written mutant files in mutant-index order
    pub mutants: Vec<PathBuf>,
    /// Mutants the validator refused
    pub rejected: usize,
}

impl PassOutcome {
    fn new(pass: Pass) -> Self {
        Self {
            pass,
            mutants: Vec::new(),
            rejected: 0,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.pass.state, PassState::Failed { .. })
    }
}

/// Mutant text that survived validation (`None` when rejected)
struct Candidate {
    index: usize,
    source: Option<String>,
}

pub struct SeedSynthesizer {
    backend: Arc<dyn ExecutionBackend>,
    db: Arc<FunctionDb>,
    config: SynthesisConfig,
    validator: Option<Arc<dyn MutantValidator>>,
    output_dir: Option<PathBuf>,
}

impl SeedSynthesizer {
    pub fn new(
        backend: Arc<dyn ExecutionBackend>,
        db: Arc<FunctionDb>,
        config: SynthesisConfig,
    ) -> Self {
        Self {
            backend,
            db,
            config,
            validator: None,
            output_dir: None,
        }
    }

    pub fn with_validator(mut self, validator: Arc<dyn MutantValidator>) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Write mutants here instead of next to each seed
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    /// `<dir>/<seed stem>_syn<index>.c`
    pub fn mutant_path(&self, seed: &Path, index: usize) -> PathBuf {
        let stem = seed
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "seed".to_string());
        let dir = self
            .output_dir
            .clone()
            .or_else(|| seed.parent().map(Path::to_path_buf))
            .unwrap_or_default();
        dir.join(format!("{stem}_syn{index}.c"))
    }

    /// Profile `seed` once and write its mutants
    ///
    /// Pass failures are recorded in the returned pass state; `Err` is
    /// reserved for orchestrator faults.
    pub fn run(&self, seed: &Path) -> Result<PassOutcome> {
        let rng_seed = resolve_seed(self.config.seed);
        let mut sm = PassStateMachine::new(Pass::new(seed, rng_seed));
        sm.start_profiling()?;
        info!(pass = %sm.pass().id, seed = %seed.display(), rng_seed, "pass started");

        let mut rng = derive_rng(rng_seed, PROFILING_STREAM);
        let profiled = match profile_seed(
            self.backend.as_ref(),
            seed,
            InstrumentOptions::from(&self.config),
            &mut rng,
        ) {
            Ok(profiled) => profiled,
            Err(err) => {
                warn!(seed = %seed.display(), %err, "profiling failed");
                sm.fail(err.to_string(), ErrorCategory::of(&err), PassStage::Profiling)?;
                return Ok(PassOutcome::new(sm.into_pass()));
            }
        };

        sm.analyzed(profiled.alive_tags().to_vec())?;
        if profiled.alive_tags().is_empty() {
            info!(seed = %seed.display(), "no tag executed");
            sm.finish()?;
            return Ok(PassOutcome::new(sm.into_pass()));
        }

        sm.begin_synthesis()?;
        let candidates = match self.build_mutants(&profiled, rng_seed) {
            Ok(candidates) => candidates,
            Err(err) => {
                warn!(seed = %seed.display(), %err, "mutant synthesis failed");
                sm.fail(err.to_string(), ErrorCategory::of(&err), PassStage::Synthesis)?;
                return Ok(PassOutcome::new(sm.into_pass()));
            }
        };

        let mut mutants = Vec::new();
        let mut rejected = 0;
        for candidate in candidates {
            let Some(source) = candidate.source else {
                rejected += 1;
                continue;
            };
            let path = self.mutant_path(seed, candidate.index);
            if let Err(err) = std::fs::write(&path, source) {
                warn!(path = %path.display(), %err, "failed to write mutant");
                sm.fail(
                    err.to_string(),
                    ErrorCategory::Infrastructure,
                    PassStage::Synthesis,
                )?;
                return Ok(PassOutcome {
                    pass: sm.into_pass(),
                    mutants,
                    rejected,
                });
            }
            sm.record_mutant()?;
            mutants.push(path);
        }
        sm.finish()?;

        info!(
            seed = %seed.display(),
            written = mutants.len(),
            rejected,
            "pass complete"
        );
        Ok(PassOutcome {
            pass: sm.into_pass(),
            mutants,
            rejected,
        })
    }

    fn build_mutants(
        &self,
        profiled: &ProfiledSeed,
        rng_seed: u64,
    ) -> csynth_core::Result<Vec<Candidate>> {
        let build = |index: usize| self.build_mutant(profiled, rng_seed, index);
        if self.config.parallel {
            (0..self.config.num_mutants)
                .into_par_iter()
                .map(build)
                .collect()
        } else {
            (0..self.config.num_mutants).map(build).collect()
        }
    }

    fn build_mutant(
        &self,
        profiled: &ProfiledSeed,
        rng_seed: u64,
        index: usize,
    ) -> csynth_core::Result<Candidate> {
        let mut rng = derive_rng(rng_seed, index as u64);
        let mutant = synthesize_mutant(
            &profiled.annotated_source,
            &profiled.tags,
            profiled.alive_tags(),
            &self.db,
            MutantOptions::from(&self.config),
            &mut rng,
        )?;
        debug!(
            index,
            substituted = mutant.substituted.len(),
            functions = mutant.functions.len(),
            "mutant built"
        );

        let accepted = match &self.validator {
            Some(validator) => validator.validate(&mutant.source)?,
            None => true,
        };
        if !accepted {
            warn!(index, "mutant rejected by validator");
        }
        Ok(Candidate {
            index,
            source: accepted.then_some(mutant.source),
        })
    }
}
