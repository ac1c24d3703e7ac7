//! Common test utilities for csynth-orchestration

#![allow(dead_code)]

use csynth_core::errors::{Result, SynthError, ToolFailure};
use csynth_core::{ExecutionBackend, FunctionDb, MutantValidator};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const RAW_SEED: &str = "#include <stdint.h>\n\
int32_t g = 3;\n\
int32_t main(void) {\n\
    int32_t x = 7;\n\
    x = x + g;\n\
    g = x - 7;\n\
    return 0;\n\
}\n";

pub const ANNOTATED_SEED: &str = "#include <stdint.h>\n\
#define Tag1(x) (x)\n\
#define Tag2(x) (x)\n\
int32_t g = 3;\n\
int32_t main(void) {\n\
    int32_t x = 7;\n\
/*bef_stmt:1*/\n\
    x = x + Tag1(/*int32_t:0:0:1:e*/g);\n\
/*aft_stmt:1*/\n\
/*bef_stmt:2*/\n\
    g = Tag2(/*int32_t:2:1:2:e*/x) - 7;\n\
/*aft_stmt:2*/\n\
    return 0;\n\
}\n";

pub const STABLE_PROFILE: &str = "Tag1:3\nTag2:10:3\nTag1:3\nTag2:10:3\n";

/// Profiler writes `ANNOTATED_SEED`; each compiler prints its canned output
pub struct ScriptedBackend {
    outputs: Vec<(String, String)>,
}

impl ScriptedBackend {
    pub fn agreeing(output: &str) -> Arc<Self> {
        Arc::new(Self {
            outputs: vec![
                ("gcc".to_string(), output.to_string()),
                ("clang".to_string(), output.to_string()),
            ],
        })
    }

    pub fn diverging() -> Arc<Self> {
        Arc::new(Self {
            outputs: vec![
                ("gcc".to_string(), STABLE_PROFILE.to_string()),
                ("clang".to_string(), "Tag1:4\n".to_string()),
            ],
        })
    }
}

impl ExecutionBackend for ScriptedBackend {
    fn annotate(&self, source: &Path) -> Result<()> {
        std::fs::write(source, ANNOTATED_SEED)?;
        Ok(())
    }

    fn compilers(&self) -> Vec<String> {
        self.outputs.iter().map(|(name, _)| name.clone()).collect()
    }

    fn compile_and_run(&self, compiler: &str, _source: &Path) -> Result<String> {
        self.outputs
            .iter()
            .find(|(name, _)| name == compiler)
            .map(|(_, output)| output.clone())
            .ok_or_else(|| SynthError::tool(compiler, ToolFailure::Timeout(3)))
    }
}

/// Accepts nothing
pub struct RejectAll;

impl MutantValidator for RejectAll {
    fn validate(&self, _mutant_source: &str) -> Result<bool> {
        Ok(false)
    }
}

pub fn add5_db() -> Arc<FunctionDb> {
    let json = r#"[
        {
            "function_name": "add5",
            "parameter_types": ["int32_t"],
            "return_type": "int32_t",
            "function": "int32_t add5(int32_t a) { return a + 5; }",
            "io_list": [[["3"], "8"]],
            "misc": []
        }
    ]"#;
    Arc::new(FunctionDb::from_json_str(json).unwrap())
}

pub fn write_seed(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, RAW_SEED).unwrap();
    path
}
