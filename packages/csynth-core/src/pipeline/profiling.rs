//! Profiling pass
//!
//! Works on a private copy of the seed. The profiler annotates the copy,
//! the annotated text is analyzed and instrumented, and the instrumented
//! program is built and run by every configured compiler. The compilers
//! must print identical output; only the first compiler's output feeds the
//! stability tracker.
//!
//! Mutants are later built from the *annotated* text, not the instrumented
//! one, so they carry no tag-check functions.

use crate::errors::{Result, SynthError, ToolFailure};
use crate::features::instrumentation::{instrument, InstrumentOptions};
use crate::features::stability::{track_stability, StabilityReport};
use crate::features::static_analysis::analyze;
use crate::features::toolchain::ExecutionBackend;
use crate::shared::models::TagTable;
use rand::Rng;
use std::path::Path;
use tempfile::TempDir;
use tracing::{debug, info};

/// Everything mutant generation needs from one profiling run
#[derive(Debug, Clone)]
pub struct ProfiledSeed {
    /// Profiler output: annotations, statement markers and stub macros
    pub annotated_source: String,
    pub instrumented_source: String,
    /// Tags with environments and stability filled in
    pub tags: TagTable,
    pub report: StabilityReport,
}

impl ProfiledSeed {
    /// Executed tags in first-seen order
    pub fn alive_tags(&self) -> &[u32] {
        &self.report.alive_tags
    }
}

/// Run one profiling pass over `seed`
pub fn profile_seed<R: Rng + ?Sized>(
    backend: &dyn ExecutionBackend,
    seed: &Path,
    options: InstrumentOptions,
    rng: &mut R,
) -> Result<ProfiledSeed> {
    let workdir = TempDir::new()?;
    let file_name = seed
        .file_name()
        .map(|name| name.to_owned())
        .unwrap_or_else(|| "seed.c".into());
    let work_copy = workdir.path().join(file_name);
    std::fs::copy(seed, &work_copy)?;

    backend.annotate(&work_copy)?;
    let annotated_source = std::fs::read_to_string(&work_copy)?;

    let mut analysis = analyze(&annotated_source)?;
    let instrumented_source = instrument(
        &annotated_source,
        &mut analysis.tags,
        &analysis.scopes,
        options,
        rng,
    )?;
    std::fs::write(&work_copy, &instrumented_source)?;
    debug!(seed = %seed.display(), tags = analysis.tags.len(), "seed instrumented");

    let output = run_all_compilers(backend, &work_copy)?;
    let mut tags = analysis.tags;
    let report = track_stability(&mut tags, &output);

    info!(
        seed = %seed.display(),
        tags = tags.len(),
        alive = report.alive_tags.len(),
        "profiling complete"
    );

    Ok(ProfiledSeed {
        annotated_source,
        instrumented_source,
        tags,
        report,
    })
}

/// Output of the first compiler, after checking every other compiler agrees
fn run_all_compilers(backend: &dyn ExecutionBackend, source: &Path) -> Result<String> {
    let compilers = backend.compilers();
    let Some((first, rest)) = compilers.split_first() else {
        return Err(SynthError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "no compiler configured",
        )));
    };

    let reference = backend.compile_and_run(first, source)?;
    for other in rest {
        let output = backend.compile_and_run(other, source)?;
        if output != reference {
            return Err(SynthError::tool(
                "compilers",
                ToolFailure::Divergent {
                    left: first.clone(),
                    right: other.clone(),
                },
            ));
        }
    }
    Ok(reference)
}
