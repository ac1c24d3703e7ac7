//! Function declaration insertion
//!
//! Chosen functions (and the `misc` globals they need) go right after the
//! last `#include` line, or at the top of the file when there is none.
//! Headers a function lists in `include_headers` are included first unless
//! the seed already includes them.

use crate::features::function_db::Function;
use crate::shared::constants::IGNORED_TYPEDEFS;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static INCLUDE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#include.*").expect("include regex"));

/// Standard-width typedefs the seed already has
fn is_ignored_typedef(snippet: &str) -> bool {
    IGNORED_TYPEDEFS
        .iter()
        .any(|ty| snippet.contains(&format!("{ty};")))
}

/// `<name>` for a bare header name; quoted or bracketed names kept as given
fn include_target(header: &str) -> String {
    let header = header.trim();
    if header.starts_with('<') || header.starts_with('"') {
        header.to_string()
    } else {
        format!("<{header}>")
    }
}

/// Insert each distinct function once, preceded by its not-yet-inserted `misc` snippets
pub fn insert_declarations(source: &str, functions: &[&Function]) -> String {
    let insert_at = INCLUDE_LINE
        .find_iter(source)
        .last()
        .map(|m| m.end())
        .unwrap_or(0);

    let mut included: HashSet<String> = INCLUDE_LINE
        .find_iter(source)
        .filter_map(|m| m.as_str().strip_prefix("#include"))
        .map(|target| target.trim().to_string())
        .collect();
    let mut block = String::new();
    for function in functions {
        for header in &function.include_headers {
            let target = include_target(header);
            if included.insert(target.clone()) {
                block.push_str(&format!("\n#include {target}"));
            }
        }
    }

    let mut seen_functions = HashSet::new();
    let mut seen_misc = HashSet::new();
    for function in functions {
        if !seen_functions.insert(function.call_name.as_str()) {
            continue;
        }
        for misc in &function.misc {
            if is_ignored_typedef(misc) || !seen_misc.insert(misc.as_str()) {
                continue;
            }
            block.push('\n');
            block.push_str(misc);
            block.push('\n');
        }
        block.push('\n');
        block.push_str(&function.body);
        block.push('\n');
    }

    let mut out = String::with_capacity(source.len() + block.len());
    out.push_str(&source[..insert_at]);
    out.push_str(&block);
    out.push_str(&source[insert_at..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::CType;
    use pretty_assertions::assert_eq;

    fn function(name: &str, misc: &[&str]) -> Function {
        Function {
            call_name: name.to_string(),
            parameter_types: vec![],
            return_type: CType::parse("int"),
            body: format!("int {name}(void) {{ return 1; }}"),
            io_pairs: vec![],
            misc: misc.iter().map(|m| m.to_string()).collect(),
            include_headers: vec![],
        }
    }

    #[test]
    fn test_after_last_include() {
        let src = "#include <stdio.h>\n#include \"csmith.h\"\nint main(void) { return 0; }\n";
        let f = function("f", &["typedef int T;", "typedef signed char int8_t;"]);
        let out = insert_declarations(src, &[&f]);
        assert_eq!(
            out,
            "#include <stdio.h>\n#include \"csmith.h\"\ntypedef int T;\n\nint f(void) { return 1; }\n\nint main(void) { return 0; }\n"
        );
    }

    #[test]
    fn test_no_include_inserts_at_start() {
        let f = function("f", &[]);
        let out = insert_declarations("int x;", &[&f]);
        assert_eq!(out, "\nint f(void) { return 1; }\nint x;");
    }

    #[test]
    fn test_include_headers_added_once() {
        let mut f = function("f", &[]);
        f.include_headers = vec!["math.h".to_string(), "stdio.h".to_string()];
        let mut g = function("g", &[]);
        g.include_headers = vec!["<math.h>".to_string(), "\"local.h\"".to_string()];
        let out = insert_declarations("#include <stdio.h>\nint x;", &[&f, &g]);
        assert_eq!(
            out,
            "#include <stdio.h>\n#include <math.h>\n#include \"local.h\"\nint f(void) { return 1; }\n\nint g(void) { return 1; }\n\nint x;"
        );
    }

    #[test]
    fn test_functions_and_misc_deduplicated() {
        let f = function("f", &["struct S { int a; };"]);
        let g = function("g", &["struct S { int a; };"]);
        let out = insert_declarations("#include <a.h>", &[&f, &g, &f]);
        assert_eq!(out.matches("struct S { int a; };").count(), 1);
        assert_eq!(out.matches("int f(void)").count(), 1);
        assert_eq!(out.matches("int g(void)").count(), 1);
    }
}
