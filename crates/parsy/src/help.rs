use crate::descriptor::ArgDef;
use crate::value::Value;

fn format_arg_left(def: &ArgDef) -> String {
    let mut names: Vec<String> = Vec::new();
    if !def.short().is_empty() {
        names.push(format!("-{}", def.short()));
    }
    if !def.long().is_empty() {
        names.push(format!("--{}", def.long()));
    }
    // Long-only options line up under the long spelling of the others.
    let mut out = if def.short().is_empty() {
        format!("    {}", names.join(", "))
    } else {
        names.join(", ")
    };
    out.push_str(&format!(" <{}>", def.ty().name().to_ascii_uppercase()));
    out
}

fn format_arg_help(def: &ArgDef) -> String {
    let mut out = def.help().trim().to_string();
    let show_default = !matches!(def.default_value(), Value::String(s) if s.is_empty());
    if show_default {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(&format!("[default: {}]", def.default_value()));
    }
    out
}

/// Render usage plus an `Options:` table for `defs`, in registration order.
pub(crate) fn render(program: &str, defs: &[ArgDef]) -> String {
    let mut out = String::new();
    let program = program.trim();
    if program.is_empty() {
        out.push_str("Usage: [OPTIONS] [ARGS]...\n");
    } else {
        out.push_str(&format!("Usage: {program} [OPTIONS] [ARGS]...\n"));
    }

    if defs.is_empty() {
        return out;
    }

    out.push_str("\nOptions:\n");
    let rows: Vec<(String, String)> = defs
        .iter()
        .map(|d| (format_arg_left(d), format_arg_help(d)))
        .collect();
    let width = rows.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
    for (left, help) in rows {
        if help.is_empty() {
            out.push_str(&format!("  {}\n", left));
        } else {
            out.push_str(&format!("  {:width$}  {}\n", left, help, width = width));
        }
    }
    out
}
