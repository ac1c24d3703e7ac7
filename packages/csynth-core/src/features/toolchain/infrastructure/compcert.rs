//! CompCert interpreter check for finished mutants

use super::super::ports::MutantValidator;
use super::command_runner::CommandRunner;
use crate::config::ToolchainConfig;
use crate::errors::{Result, SynthError, ToolFailure};
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::Write;
use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;
use tracing::debug;

static INLINE_ASM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"__asm__ [^\)]*\)").expect("asm regex"));

/// `ccomp <file> -interp -fall -I...`
#[derive(Debug, Clone)]
pub struct CompcertValidator {
    ccomp: PathBuf,
    include_flags: Vec<String>,
    timeout: Duration,
}

impl CompcertValidator {
    pub fn new(ccomp: impl Into<PathBuf>, include_flags: Vec<String>, timeout: Duration) -> Self {
        Self {
            ccomp: ccomp.into(),
            include_flags,
            timeout,
        }
    }

    /// Validator for the configured `ccomp`, if one is configured
    pub fn from_config(config: &ToolchainConfig) -> Option<Self> {
        config.ccomp.as_ref().map(|ccomp| {
            Self::new(ccomp.clone(), config.include_flags(), config.ccomp_timeout())
        })
    }

    /// The interpreter rejects inline assembly
    pub fn prepare(source: &str) -> String {
        INLINE_ASM.replace_all(source, "").into_owned()
    }
}

impl MutantValidator for CompcertValidator {
    fn validate(&self, mutant_source: &str) -> Result<bool> {
        let mut file = tempfile::Builder::new().suffix(".c").tempfile()?;
        file.write_all(Self::prepare(mutant_source).as_bytes())?;
        file.flush()?;

        let mut cmd = Command::new(&self.ccomp);
        cmd.arg(file.path())
            .args(["-interp", "-fall"])
            .args(&self.include_flags);

        let runner = CommandRunner::new("ccomp", self.timeout);
        match runner.run(&mut cmd) {
            Ok(_) => Ok(true),
            Err(SynthError::Synthesizer {
                failure: failure @ (ToolFailure::NonZeroExit { .. } | ToolFailure::Timeout(_)),
                ..
            }) => {
                debug!(%failure, "mutant rejected by ccomp");
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_prepare_strips_inline_asm() {
        let src = "int x; __asm__ (\"nop\"); int y;";
        assert_eq!(CompcertValidator::prepare(src), "int x; ; int y;");
    }

    #[test]
    fn test_from_config_requires_ccomp() {
        let config = ToolchainConfig::default();
        assert!(CompcertValidator::from_config(&config).is_none());

        let mut config = ToolchainConfig::default();
        config.ccomp = Some("/usr/bin/ccomp".into());
        let validator = CompcertValidator::from_config(&config).unwrap();
        assert_eq!(validator.timeout, Duration::from_secs(8));
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_interpreter_rejects() {
        let validator = CompcertValidator::new("false", vec![], Duration::from_secs(5));
        assert!(!validator.validate("int main(void) { return 0; }").unwrap());

        let validator = CompcertValidator::new("true", vec![], Duration::from_secs(5));
        assert!(validator.validate("int main(void) { return 0; }").unwrap());
    }
}
