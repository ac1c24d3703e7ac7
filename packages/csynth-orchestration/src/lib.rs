/*
 * csynth Orchestration - profiling passes and mutant generation
 *
 * Architecture:
 * - Pass State Machine (Idle → Profiling → Analyzed → Synthesizing → Done | Failed)
 * - Seed Synthesizer (one profiling pass, N mutants on the rayon pool)
 * - Batch Driver (many seeds, failures isolated per seed)
 */

pub mod batch;
pub mod error;
pub mod state;
pub mod synthesizer;

pub use batch::{BatchDriver, BatchSummary, SeedReport};
pub use error::{ErrorCategory, OrchestratorError, Result};
pub use state::{Pass, PassStage, PassState, PassStateMachine};
pub use synthesizer::{PassOutcome, SeedSynthesizer};

/// Initialize the global rayon pool (`threads`, or 75% of cores)
///
/// Returns the pool size. A pool that is already initialized is kept.
pub fn init_thread_pool(threads: Option<usize>) -> usize {
    let threads = threads
        .filter(|&n| n > 0)
        .unwrap_or_else(|| std::cmp::max(1, (num_cpus::get() * 3) / 4));

    if let Err(err) = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
    {
        tracing::debug!(%err, "rayon pool already initialized");
        return rayon::current_num_threads();
    }
    tracing::debug!(threads, cores = num_cpus::get(), "rayon pool initialized");
    threads
}
