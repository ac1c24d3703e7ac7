//! Synthesis configuration
//!
//! Two sections, both with working defaults:
//! - `synthesis`: mutant count, inclusion probability, environment fan-out
//! - `toolchain`: profiler, compiler pair, include paths, timeouts
//!
//! ```rust,ignore
//! use csynth_core::config::SynthConfig;
//!
//! let config = SynthConfig::from_yaml("csynth.yaml")?;
//! let config = SynthConfig::default().with_num_mutants(8).with_probability(40);
//! config.validate()?;
//! ```

pub mod error;
pub mod io;
pub mod synth_config;
pub mod toolchain;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use io::ConfigExportV1;
pub use synth_config::{SynthConfig, SynthesisConfig};
pub use toolchain::ToolchainConfig;
pub use validation::Validatable;
