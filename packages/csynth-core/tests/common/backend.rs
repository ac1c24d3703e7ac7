//! Scripted execution backend
//!
//! `annotate` writes a fixed annotated text over the work copy and each
//! compiler "runs" by returning a canned output.

use csynth_core::errors::{Result, SynthError, ToolFailure};
use csynth_core::ExecutionBackend;
use std::path::Path;
use std::sync::Mutex;

pub struct ScriptedBackend {
    annotated: String,
    outputs: Vec<(String, String)>,
    compiled: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    pub fn new(annotated: impl Into<String>) -> Self {
        Self {
            annotated: annotated.into(),
            outputs: Vec::new(),
            compiled: Mutex::new(Vec::new()),
        }
    }

    pub fn with_output(mut self, compiler: &str, output: &str) -> Self {
        self.outputs.push((compiler.to_string(), output.to_string()));
        self
    }

    /// Every source text handed to `compile_and_run`, in call order
    pub fn compiled_sources(&self) -> Vec<String> {
        self.compiled.lock().unwrap().clone()
    }
}

impl ExecutionBackend for ScriptedBackend {
    fn annotate(&self, source: &Path) -> Result<()> {
        std::fs::write(source, &self.annotated)?;
        Ok(())
    }

    fn compilers(&self) -> Vec<String> {
        self.outputs.iter().map(|(name, _)| name.clone()).collect()
    }

    fn compile_and_run(&self, compiler: &str, source: &Path) -> Result<String> {
        let text = std::fs::read_to_string(source)?;
        self.compiled.lock().unwrap().push(text);
        self.outputs
            .iter()
            .find(|(name, _)| name == compiler)
            .map(|(_, output)| output.clone())
            .ok_or_else(|| {
                SynthError::tool(
                    compiler,
                    ToolFailure::NonZeroExit {
                        code: Some(1),
                        stderr: "unknown compiler".to_string(),
                    },
                )
            })
    }
}
