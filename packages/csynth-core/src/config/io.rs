//! Configuration file schema

use super::{synth_config::SynthesisConfig, toolchain::ToolchainConfig};
use serde::{Deserialize, Serialize};

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigExportV1 {
    /// Schema version (always 1 for v1)
    #[serde(default)]
    pub version: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synthesis: Option<SynthesisConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toolchain: Option<ToolchainConfig>,
}
