//! Seed and function-database fixtures

use csynth_core::{CType, Function, FunctionDb, IoPair};
use std::path::PathBuf;
use tempfile::TempDir;

/// Raw seed as written by a generator, before profiling
pub const RAW_SEED: &str = "#include <stdint.h>\n\
int32_t g = 3;\n\
int32_t main(void) {\n\
    int32_t x = 7;\n\
    x = x + g;\n\
    g = x - 7;\n\
    return 0;\n\
}\n";

/// `RAW_SEED` after the profiler: two expression tags, one per statement
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

/// Both tags run twice with unchanged values; Tag2 carries `g` as environment
pub const STABLE_PROFILE: &str = "Tag1:3\nTag2:10:3\nTag1:3\nTag2:10:3\n";

/// Write `RAW_SEED` into a fresh directory
pub fn write_seed(dir: &TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, RAW_SEED).unwrap();
    path
}

/// `int32_t add5(int32_t a)` with the single confirmed call `add5(3) == 8`
pub fn add5() -> Function {
    Function {
        call_name: "add5".to_string(),
        parameter_types: vec![CType::parse("int32_t")],
        return_type: CType::parse("int32_t"),
        body: "int32_t add5(int32_t a) { return a + 5; }".to_string(),
        io_pairs: vec![IoPair {
            inputs: vec![3],
            output: 8,
        }],
        misc: vec![],
        include_headers: vec![],
    }
}

pub fn add5_db() -> FunctionDb {
    FunctionDb::from_functions(vec![add5()]).unwrap()
}
