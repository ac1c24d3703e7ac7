//! Production backend: real profiler and compilers

use super::super::ports::ExecutionBackend;
use super::command_runner::CommandRunner;
use crate::config::ToolchainConfig;
use crate::errors::Result;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Drives the configured profiler and compiler pair as child processes
#[derive(Debug, Clone)]
pub struct ProcessBackend {
    config: ToolchainConfig,
}

impl ProcessBackend {
    pub fn new(config: ToolchainConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ToolchainConfig {
        &self.config
    }

    fn profiler_command(&self, source: &Path) -> Command {
        let mut cmd = Command::new(&self.config.profiler);
        cmd.arg(format!("--mode={}", self.config.profiler_mode))
            .arg(source)
            .arg("--")
            .args(self.config.include_flags());
        cmd
    }

    fn compile_command(&self, compiler: &str, source: &Path, exe: &Path) -> Command {
        let mut cmd = Command::new(compiler);
        cmd.args(self.config.include_flags())
            .args(["-w", "-O0"])
            .arg(source)
            .arg("-o")
            .arg(exe);
        cmd
    }
}

impl ExecutionBackend for ProcessBackend {
    fn annotate(&self, source: &Path) -> Result<()> {
        let tool = self.config.profiler.display().to_string();
        CommandRunner::new(tool, self.config.profiler_timeout())
            .run(&mut self.profiler_command(source))?;
        Ok(())
    }

    fn compilers(&self) -> Vec<String> {
        self.config.compilers.to_vec()
    }

    fn compile_and_run(&self, compiler: &str, source: &Path) -> Result<String> {
        let workdir = TempDir::new()?;
        let exe = workdir.path().join("instrumented.out");

        CommandRunner::new(compiler, self.config.compile_timeout())
            .run(&mut self.compile_command(compiler, source, &exe))?;

        CommandRunner::new(format!("{compiler} binary"), self.config.run_timeout())
            .run(&mut Command::new(&exe))
    }
}
