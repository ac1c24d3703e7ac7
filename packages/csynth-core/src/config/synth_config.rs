//! Top-level synthesis configuration
//!
//! Defaults reproduce the reference setup: one mutant, every alive tag
//! eligible, five environment variables drawn from a 20-tag backward window.

use super::error::{ConfigError, ConfigResult};
use super::io::ConfigExportV1;
use super::toolchain::ToolchainConfig;
use super::validation::Validatable;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Mutation knobs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SynthesisConfig {
    /// Mutants produced per profiling pass (1..=10000)
    pub num_mutants: usize,

    /// Per-tag inclusion probability in percent (1..=100)
    pub probability: u32,

    /// Environment variables attached to each tag (0..=32)
    pub num_env: usize,

    /// Backward window of previously declared tags searched for environment candidates (1..=1000)
    pub env_window: usize,

    /// RNG seed; `None` draws one from the OS
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Generate mutants on the rayon pool
    pub parallel: bool,

    /// Remove unreplaced tag wrappers, stubs and markers from each mutant
    pub strip_unused_tags: bool,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            num_mutants: 1,
            probability: 100,
            num_env: 5,
            env_window: 20,
            seed: None,
            parallel: true,
            strip_unused_tags: false,
        }
    }
}

impl Validatable for SynthesisConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.num_mutants == 0 || self.num_mutants > 10_000 {
            return Err(ConfigError::range_with_hint(
                "num_mutants",
                self.num_mutants,
                1,
                10_000,
                "At least one mutant per pass",
            ));
        }

        if self.probability == 0 || self.probability > 100 {
            return Err(ConfigError::range_with_hint(
                "probability",
                self.probability,
                1,
                100,
                "Probability is a percentage evaluated per alive tag",
            ));
        }

        if self.num_env > 32 {
            return Err(ConfigError::range_with_hint(
                "num_env",
                self.num_env,
                0,
                32,
                "Each environment variable adds a tag-check argument",
            ));
        }

        if self.env_window == 0 || self.env_window > 1000 {
            return Err(ConfigError::range_with_hint(
                "env_window",
                self.env_window,
                1,
                1000,
                "Backward search window must be finite",
            ));
        }

        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "synthesis"
    }
}

/// Complete configuration for a synthesis pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthConfig {
    pub synthesis: SynthesisConfig,
    pub toolchain: ToolchainConfig,
}

impl SynthConfig {
    /// Load from a versioned YAML file
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse versioned YAML text
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let export: ConfigExportV1 = serde_yaml::from_str(content)?;

        match export.version {
            None => return Err(ConfigError::MissingVersion),
            Some(1) => {}
            Some(found) => {
                return Err(ConfigError::UnsupportedVersion {
                    found,
                    supported: vec![1],
                })
            }
        }

        let config = Self {
            synthesis: export.synthesis.unwrap_or_default(),
            toolchain: export.toolchain.unwrap_or_default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Serialize as versioned YAML
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let export = ConfigExportV1 {
            version: Some(1),
            synthesis: Some(self.synthesis.clone()),
            toolchain: Some(self.toolchain.clone()),
        };
        serde_yaml::to_string(&export).map_err(ConfigError::Yaml)
    }

    /// Validate every section
    pub fn validate(&self) -> ConfigResult<()> {
        self.synthesis.validate()?;
        self.toolchain.validate()
    }

    pub fn with_num_mutants(mut self, num_mutants: usize) -> Self {
        self.synthesis.num_mutants = num_mutants;
        self
    }

    pub fn with_probability(mut self, probability: u32) -> Self {
        self.synthesis.probability = probability;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.synthesis.seed = Some(seed);
        self
    }

    pub fn with_toolchain(mut self, toolchain: ToolchainConfig) -> Self {
        self.toolchain = toolchain;
        self
    }
}
