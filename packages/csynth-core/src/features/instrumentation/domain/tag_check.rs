//! Tag-check function text
//!
//! `Tag<id>(v0, v1, ...)` prints `Tag<id>:v0:v1:...` on its first call.
//! Afterwards each argument has a latch: the first time `vK` differs from
//! its first-seen value the tuple is printed again and the latch closes, so
//! every instability is reported at most once. The function returns `v0`,
//! which keeps the inline call a transparent wrapper.

use crate::errors::Result;
use crate::shared::models::Var;

/// Complete C definition of the tag-check function for `vars` (primary first)
pub fn tag_check_definition(tag_id: u32, vars: &[&Var]) -> Result<String> {
    let mut formats = String::new();
    for var in vars {
        let scalar = var.c_type.value_scalar()?;
        formats.push_str(&format!(":%\"{}\"", scalar.printf_macro()?));
    }
    let params: Vec<String> = (0..vars.len()).map(|i| format!("v{i}")).collect();
    let print = format!(
        "printf(\"Tag{tag_id}{formats}\\n\", {});",
        params.join(",")
    );

    let mut param_decls = Vec::new();
    let mut latch_decls = Vec::new();
    let mut last_decls = Vec::new();
    let mut open_latches = String::new();
    let mut remember = String::new();
    let mut on_change = String::new();
    for (i, var) in vars.iter().enumerate() {
        let ty = &var.declared_type;
        param_decls.push(format!("{ty} v{i}"));
        latch_decls.push(format!("static char i{i}=0;"));
        last_decls.push(format!("static {ty} last_v{i}=0;"));
        open_latches.push_str(&format!("i{i}=1;"));
        remember.push_str(&format!("last_v{i}=v{i};"));
        on_change.push_str(&format!(
            "else if(i{i}==1&&v{i}!=last_v{i}){{{print}i{i}=2;}}"
        ));
    }

    let return_type = vars
        .first()
        .map(|var| var.declared_type.as_str())
        .unwrap_or("int");

    Ok(format!(
        "{return_type} Tag{tag_id}({params}){{ {latches} {lasts} if (i0 == 0) {{ {open} {print} {remember}}} {on_change}return v0; }}",
        params = param_decls.join(","),
        latches = latch_decls.join(" "),
        lasts = last_decls.join(" "),
        open = open_latches,
    ))
}

/// Comma-separated call arguments; dereferences are null-guarded
pub fn tag_check_call_args(vars: &[&Var]) -> String {
    vars.iter()
        .map(|var| var.guarded_arg())
        .collect::<Vec<_>>()
        .join(",")
}
