//! Source instrumentation
//!
//! For each tag in ascending id order:
//! 1. choose its environment (backward window, scope-visible)
//! 2. splice `/*bef*/Tag<id>(...);` at the statement's before-marker
//! 3. replace the annotation with `/*tag*/Tag<id>(...)`
//! 4. splice `/*aft*/Tag<id>(...);` at the after-marker
//! 5. replace the `#define Tag<id>(x) (x)` stub with the tag-check function
//!
//! Several tags can share one statement; its markers are consumed by the
//! first of them and the others only get the inline call. A tag enclosing
//! another annotation keeps its stub and is never executed, while the
//! nested tag is instrumented inside it.

use super::super::domain::{select_environment, tag_check_call_args, tag_check_definition};
use crate::config::SynthesisConfig;
use crate::errors::{Result, SynthError};
use crate::features::scope_model::ScopeForest;
use crate::shared::models::{TagTable, Var};
use crate::shared::utils::{replace_first, replace_first_if_present};
use rand::Rng;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Headers the tag-check functions need
pub const INSTRUMENTATION_PRELUDE: &str = "#include <stdio.h>\n#include <inttypes.h>\n";

/// Environment fan-out and search window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstrumentOptions {
    pub num_env: usize,
    pub env_window: usize,
}

impl Default for InstrumentOptions {
    fn default() -> Self {
        Self {
            num_env: 5,
            env_window: 20,
        }
    }
}

impl From<&SynthesisConfig> for InstrumentOptions {
    fn from(config: &SynthesisConfig) -> Self {
        Self {
            num_env: config.num_env,
            env_window: config.env_window,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
enum Marker {
    Before,
    After,
}

/// Instrument annotated `source`, recording environments and inserted text on `tags`
pub fn instrument<R: Rng + ?Sized>(
    source: &str,
    tags: &mut TagTable,
    scopes: &ScopeForest,
    options: InstrumentOptions,
    rng: &mut R,
) -> Result<String> {
    let mut out = source.to_string();
    let mut consumed: HashSet<(i64, Marker)> = HashSet::new();
    let mut instrumented = 0usize;

    for id in tags.ids() {
        let Some(tag) = tags.get(id) else {
            continue;
        };
        if let Err(err) = tag.primary_var.c_type.value_scalar() {
            warn!(tag = id, var = %tag.primary_var.name, %err, "tag not instrumented");
            continue;
        }
        if tag.encloses_annotation() {
            warn!(tag = id, "tag encloses another annotation; not instrumented");
            continue;
        }

        let env_ids = select_environment(
            tags,
            scopes,
            id,
            options.env_window,
            options.num_env,
            rng,
        );
        let environment: Vec<Var> = env_ids
            .iter()
            .filter_map(|env_id| tags.get(*env_id))
            .map(|env_tag| env_tag.primary_var.clone())
            .collect();

        let mut vars: Vec<&Var> = vec![&tag.primary_var];
        vars.extend(environment.iter());
        let args = tag_check_call_args(&vars);
        let definition = format!("\n{}", tag_check_definition(id, &vars)?);

        let before_call = format!("/*bef*/Tag{id}({args});");
        let inline_call = format!("/*tag*/Tag{id}({args})");
        let after_call = format!("/*aft*/Tag{id}({args});");

        let mut inserted = Vec::new();
        if splice_marker(
            &mut out,
            &mut consumed,
            (tag.statement_id, Marker::Before),
            &tag.before_marker(),
            &before_call,
        )? {
            inserted.push(before_call);
        }
        replace_first(&mut out, &tag.original_text, &inline_call)?;
        if splice_marker(
            &mut out,
            &mut consumed,
            (tag.statement_id, Marker::After),
            &tag.after_marker(),
            &after_call,
        )? {
            inserted.push(after_call);
        }
        replace_first(&mut out, &tag.stub_define(), &definition)?;
        inserted.push(definition);

        debug!(tag = id, envs = environment.len(), "tag instrumented");

        if let Some(tag) = tags.get_mut(id) {
            tag.environment = environment;
            tag.instrumentation_strings = inserted;
            tag.inline_call = Some(inline_call);
        }
        instrumented += 1;
    }

    debug!(instrumented, total = tags.len(), "instrumentation complete");
    Ok(format!("{INSTRUMENTATION_PRELUDE}{out}"))
}

/// Splice one statement marker; an already-consumed marker is skipped
fn splice_marker(
    out: &mut String,
    consumed: &mut HashSet<(i64, Marker)>,
    key: (i64, Marker),
    marker: &str,
    call: &str,
) -> Result<bool> {
    if replace_first_if_present(out, marker, call) {
        consumed.insert(key);
        Ok(true)
    } else if consumed.contains(&key) {
        Ok(false)
    } else {
        Err(SynthError::splice(marker))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::static_analysis::analyze;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const SEED: &str = "#define Tag1(x) (x)\n\
#define Tag2(x) (x)\n\
int g = 3;\n\
int f(void) {\n\
/*bef_stmt:8*/\n\
return Tag1(/*int:0:0:8:e*/g) + Tag2(/*int:0:0:8:e*/g);\n\
/*aft_stmt:8*/\n\
}\n";

    #[test]
    fn test_instrument_single_tag() {
        let src = "#define Tag1(x) (x)\n/*bef_stmt:8*/\nreturn Tag1(/*int:0:0:8:e*/g);\n/*aft_stmt:8*/";
        let mut analysis = analyze(src).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let out = instrument(
            src,
            &mut analysis.tags,
            &analysis.scopes,
            InstrumentOptions::default(),
            &mut rng,
        )
        .unwrap();

        let def = tag_check_definition(1, &[&analysis.tags.get(1).unwrap().primary_var]).unwrap();
        let expected = format!(
            "{INSTRUMENTATION_PRELUDE}\n{def}\n/*bef*/Tag1(g);\nreturn /*tag*/Tag1(g);\n/*aft*/Tag1(g);"
        );
        assert_eq!(out, expected);

        let tag = analysis.tags.get(1).unwrap();
        assert_eq!(tag.inline_call.as_deref(), Some("/*tag*/Tag1(g)"));
        assert_eq!(tag.instrumentation_strings.len(), 3);
    }

    #[test]
    fn test_shared_statement_markers_consumed_once() {
        let mut analysis = analyze(SEED).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let out = instrument(
            SEED,
            &mut analysis.tags,
            &analysis.scopes,
            InstrumentOptions::default(),
            &mut rng,
        )
        .unwrap();

        assert!(out.contains("/*bef*/Tag1(g);"));
        assert!(!out.contains("/*bef*/Tag2"));
        assert!(out.contains("/*tag*/Tag1(g) + /*tag*/Tag2(g)"));
        assert!(!out.contains("#define Tag"));
        // same name as the primary: never its own environment
        assert!(analysis.tags.get(2).unwrap().environment.is_empty());
        assert_eq!(analysis.tags.get(2).unwrap().instrumentation_strings.len(), 1);
    }

    #[test]
    fn test_environment_recorded_in_call() {
        let src = "#define Tag1(x) (x)\n#define Tag2(x) (x)\n\
/*bef_stmt:1*/a = Tag1(/*int:0:0:1:e*/b);/*aft_stmt:1*/\n\
/*bef_stmt:2*/c = Tag2(/*uint8_t:0:0:2:e*/d);/*aft_stmt:2*/";
        let mut analysis = analyze(src).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let out = instrument(
            src,
            &mut analysis.tags,
            &analysis.scopes,
            InstrumentOptions::default(),
            &mut rng,
        )
        .unwrap();
        assert!(out.contains("c = /*tag*/Tag2(d,b);"));
        let env = &analysis.tags.get(2).unwrap().environment;
        assert_eq!(env.len(), 1);
        assert_eq!(env[0].name, "b");
    }

    #[test]
    fn test_unsupported_primary_left_as_stub() {
        let src = "#define Tag1(x) (x)\n/*bef_stmt:1*/s = Tag1(/*struct S0:0:0:1:e*/t);/*aft_stmt:1*/";
        let mut analysis = analyze(src).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let out = instrument(
            src,
            &mut analysis.tags,
            &analysis.scopes,
            InstrumentOptions::default(),
            &mut rng,
        )
        .unwrap();
        assert!(out.contains("#define Tag1(x) (x)"));
        assert!(out.contains("Tag1(/*struct S0:0:0:1:e*/t)"));
        assert!(analysis.tags.get(1).unwrap().inline_call.is_none());
    }

    const NESTED: &str = "#define Tag1(x) (x)\n\
#define Tag2(x) (x)\n\
#define Tag3(x) (x)\n\
int32_t f(int32_t *p, int32_t l_5) {\n\
/*bef_stmt:4*/\n\
l_5 = Tag3(/*int32_t:1:1:4:e*/l_5) + 1;\n\
/*aft_stmt:4*/\n\
/*bef_stmt:5*/\n\
return Tag1(/*int32_t:1:1:5:e*/*(p + Tag2(/*int32_t:1:1:5:e*/l_5)));\n\
/*aft_stmt:5*/\n\
}\n";

    #[test]
    fn test_nested_annotation_instruments_inner_only() {
        let mut analysis = analyze(NESTED).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let out = instrument(
            NESTED,
            &mut analysis.tags,
            &analysis.scopes,
            InstrumentOptions::default(),
            &mut rng,
        )
        .unwrap();

        // enclosing tag stays a no-op macro around the instrumented inner call
        assert!(out.contains("#define Tag1(x) (x)"));
        assert!(out.contains("return Tag1(/*int32_t:1:1:5:e*/*(p + /*tag*/Tag2(l_5)));"));
        assert!(out.contains("/*bef*/Tag2(l_5);"));
        assert!(out.contains("/*aft*/Tag2(l_5);"));
        assert!(!out.contains("Tag2(/*int32_t"));
        assert!(!out.contains("/*bef*/Tag1"));
        assert!(analysis.tags.get(1).unwrap().inline_call.is_none());

        // every emitted call matches its tag-check arity
        for id in [2u32, 3] {
            let tag = analysis.tags.get(id).unwrap();
            let arity = 1 + tag.environment.len();
            let call = tag.inline_call.as_deref().unwrap();
            assert_eq!(call.matches(',').count() + 1, arity, "{call}");
        }
    }

    #[test]
    fn test_enclosing_tag_never_chosen_as_environment() {
        let src = "#define Tag1(x) (x)\n#define Tag2(x) (x)\n#define Tag3(x) (x)\n\
/*bef_stmt:1*/a = Tag1(/*int:0:0:1:e*/b[Tag2(/*int:0:0:1:e*/c)]);/*aft_stmt:1*/\n\
/*bef_stmt:2*/d = Tag3(/*int:0:0:2:e*/e);/*aft_stmt:2*/";
        let mut analysis = analyze(src).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        instrument(
            src,
            &mut analysis.tags,
            &analysis.scopes,
            InstrumentOptions::default(),
            &mut rng,
        )
        .unwrap();
        let names: Vec<_> = analysis
            .tags
            .get(3)
            .unwrap()
            .environment
            .iter()
            .map(|v| v.name.as_str())
            .collect();
        assert_eq!(names, vec!["c"]);
    }

    #[test]
    fn test_missing_marker_is_splice_error() {
        let src = "#define Tag1(x) (x)\nreturn Tag1(/*int:0:0:8:e*/g);";
        let mut analysis = analyze(src).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let result = instrument(
            src,
            &mut analysis.tags,
            &analysis.scopes,
            InstrumentOptions::default(),
            &mut rng,
        );
        assert!(matches!(result, Err(SynthError::SpliceNotFound(m)) if m == "/*bef_stmt:8*/"));
    }
}
