//! Toolchain ports
//!
//! The pipeline only talks to these traits, so tests can script the
//! profiler and compilers without any C toolchain installed.

use crate::errors::Result;
use std::path::Path;

// ═══════════════════════════════════════════════════════════════════════════
// Execution Backend
// ═══════════════════════════════════════════════════════════════════════════

/// Runs the external profiler and the compile-and-execute step
///
/// # Implementors
/// - `ProcessBackend` (infrastructure/process_backend.rs)
pub trait ExecutionBackend: Send + Sync {
    /// Rewrite `source` in place with tag annotations, markers and stubs
    fn annotate(&self, source: &Path) -> Result<()>;

    /// Compiler names, in the order their outputs are compared
    fn compilers(&self) -> Vec<String>;

    /// Compile `source` with `compiler`, run it, return its stdout
    fn compile_and_run(&self, compiler: &str, source: &Path) -> Result<String>;
}

// ═══════════════════════════════════════════════════════════════════════════
// Mutant Validator
// ═══════════════════════════════════════════════════════════════════════════

/// Optional last check on a finished mutant before it is written
pub trait MutantValidator: Send + Sync {
    /// `Ok(true)` when the mutant is well defined
    fn validate(&self, mutant_source: &str) -> Result<bool>;
}
