//! External toolchain configuration
//!
//! Passed explicitly into the execution backend; nothing here is global.

use super::error::{ConfigError, ConfigResult};
use super::validation::Validatable;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Profiler, compiler pair, include paths and timeouts for one pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolchainConfig {
    /// Profiler executable (rewrites the seed in place with tag annotations)
    pub profiler: PathBuf,

    /// Profiler `--mode=` value
    pub profiler_mode: String,

    /// Two independent compilers; both must agree on the instrumented program
    pub compilers: [String; 2],

    /// `-I` directories for profiler and compilers
    pub include_dirs: Vec<PathBuf>,

    /// Profiler timeout (seconds)
    pub profiler_timeout_secs: u64,

    /// Per-compiler timeout (seconds)
    pub compile_timeout_secs: u64,

    /// Instrumented binary timeout (seconds)
    pub run_timeout_secs: u64,

    /// CompCert executable for optional mutant validation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ccomp: Option<PathBuf>,

    /// CompCert interpreter timeout (seconds)
    pub ccomp_timeout_secs: u64,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            profiler: PathBuf::from("profiler"),
            profiler_mode: "expr".to_string(),
            compilers: ["gcc".to_string(), "clang".to_string()],
            include_dirs: default_include_dirs(),
            profiler_timeout_secs: 10,
            compile_timeout_secs: 10,
            run_timeout_secs: 3,
            ccomp: None,
            ccomp_timeout_secs: 8,
        }
    }
}

/// `$CSMITH_HOME/include` when the variable is set
fn default_include_dirs() -> Vec<PathBuf> {
    std::env::var_os("CSMITH_HOME")
        .map(|home| vec![PathBuf::from(home).join("include")])
        .unwrap_or_default()
}

impl ToolchainConfig {
    pub fn profiler_timeout(&self) -> Duration {
        Duration::from_secs(self.profiler_timeout_secs)
    }

    pub fn compile_timeout(&self) -> Duration {
        Duration::from_secs(self.compile_timeout_secs)
    }

    pub fn run_timeout(&self) -> Duration {
        Duration::from_secs(self.run_timeout_secs)
    }

    pub fn ccomp_timeout(&self) -> Duration {
        Duration::from_secs(self.ccomp_timeout_secs)
    }

    /// `-I<dir>` flags in configured order
    pub fn include_flags(&self) -> Vec<String> {
        self.include_dirs
            .iter()
            .map(|dir| format!("-I{}", dir.display()))
            .collect()
    }

    pub fn with_compilers(mut self, first: impl Into<String>, second: impl Into<String>) -> Self {
        self.compilers = [first.into(), second.into()];
        self
    }

    pub fn with_include_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.include_dirs.push(dir.into());
        self
    }
}

impl Validatable for ToolchainConfig {
    fn validate(&self) -> ConfigResult<()> {
        for (field, value) in [
            ("profiler_timeout_secs", self.profiler_timeout_secs),
            ("compile_timeout_secs", self.compile_timeout_secs),
            ("run_timeout_secs", self.run_timeout_secs),
            ("ccomp_timeout_secs", self.ccomp_timeout_secs),
        ] {
            if value == 0 || value > 600 {
                return Err(ConfigError::range_with_hint(
                    field,
                    value,
                    1,
                    600,
                    "Every external tool call needs a finite, nonzero timeout",
                ));
            }
        }

        if self.compilers.iter().any(|cc| cc.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "both compilers must be named".to_string(),
            ));
        }

        if self.profiler_mode.trim().is_empty() {
            return Err(ConfigError::Validation(
                "profiler_mode must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "toolchain"
    }
}
