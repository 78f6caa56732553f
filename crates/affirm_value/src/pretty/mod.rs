//! Deterministic multi-line rendering.
//!
//! The diff formatter compares values line by line, so nested containers
//! are rendered one element per line with two-space indentation and a
//! trailing comma on every element. Map keys come out in sorted order.

use std::fmt::Write;

use crate::Value;

const INDENT: &str = "  ";

impl Value {
    /// Render over multiple lines, one container element per line.
    pub fn pretty(&self) -> String {
        let mut out = String::new();
        write_pretty(&mut out, self, 0);
        out
    }
}

fn write_pretty(out: &mut String, value: &Value, depth: usize) {
    match value {
        Value::List(items) if !items.is_empty() => {
            out.push_str("[\n");
            for item in items.iter() {
                push_indent(out, depth + 1);
                write_pretty(out, item, depth + 1);
                out.push_str(",\n");
            }
            push_indent(out, depth);
            out.push(']');
        }
        Value::Map(map) if !map.is_empty() => {
            out.push_str("{\n");
            for (key, item) in map.iter() {
                push_indent(out, depth + 1);
                let _ = write!(out, "{key:?}: ");
                write_pretty(out, item, depth + 1);
                out.push_str(",\n");
            }
            push_indent(out, depth);
            out.push('}');
        }
        Value::Error(err) if !err.props().is_empty() => {
            let _ = writeln!(out, "{} {{", err.name());
            push_indent(out, depth + 1);
            let _ = writeln!(out, "\"message\": {:?},", err.message());
            for (key, item) in err.props() {
                push_indent(out, depth + 1);
                let _ = write!(out, "{key:?}: ");
                write_pretty(out, item, depth + 1);
                out.push_str(",\n");
            }
            push_indent(out, depth);
            out.push('}');
        }
        other => {
            let _ = write!(out, "{other}");
        }
    }
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}
