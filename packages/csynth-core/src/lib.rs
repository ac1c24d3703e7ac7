/*
 * csynth-core - Semantics-preserving mutation of C seed programs
 *
 * Feature-First Architecture:
 * - shared/      : C types, tagged variables, tags, text utilities
 * - features/    : scope_model → static_analysis → instrumentation → stability → synthesis
 * - pipeline/    : Single-seed profiling pass
 * - config/      : Versioned YAML configuration
 *
 * All C values are carried as i128 so every 64-bit signed and unsigned
 * value and every intermediate sum stays exact.
 */

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models and utilities
pub mod shared;

/// Feature modules
pub mod features;

/// Pipeline orchestration for one seed
pub mod pipeline;

/// Configuration system
pub mod config;

/// Error types
pub mod errors;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{SynthConfig, SynthesisConfig, ToolchainConfig};
pub use errors::{Result, SynthError, ToolFailure};
pub use features::function_db::{Function, FunctionDb, IoPair};
pub use features::instrumentation::InstrumentOptions;
pub use features::stability::StabilityReport;
pub use features::static_analysis::{analyze, Analysis};
pub use features::synthesis::{synthesize_mutant, MutantOptions, MutantText};
pub use features::toolchain::{CompcertValidator, ExecutionBackend, MutantValidator, ProcessBackend};
pub use pipeline::{profile_seed, ProfiledSeed};
pub use shared::models::{CType, ScalarType, Tag, TagTable, Var};
