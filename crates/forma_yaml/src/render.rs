//! The block-style YAML renderer.
//!
//! Two-space indentation, block mappings and sequences, empty collections as
//! `[]`/`{}`. Scalars render plain whenever reparsing would give the same
//! value back; everything ambiguous is double-quoted. Dates render as
//! RFC 3339 strings and byte sequences as base64 strings, matching what the
//! deserializer expects.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use forma_core::Value;

// -----------------------------------------------------------------------------
// Entry point

pub(crate) fn render(value: &Value) -> String {
    let mut out = String::new();
    if is_inline(value) {
        out.push_str(&render_inline(value));
        out.push('\n');
    } else {
        render_block(&mut out, value, 0);
    }
    out
}

// -----------------------------------------------------------------------------
// Blocks

fn render_block(out: &mut String, value: &Value, indent: usize) {
    match value {
        Value::Map(map) => {
            for (key, entry) in map.iter() {
                push_indent(out, indent);
                out.push_str(&render_key(key));
                out.push(':');
                if is_inline(entry) {
                    out.push(' ');
                    out.push_str(&render_inline(entry));
                    out.push('\n');
                } else {
                    out.push('\n');
                    render_block(out, entry, indent + 2);
                }
            }
        }
        Value::Seq(elements) => {
            for element in elements {
                push_indent(out, indent);
                match element {
                    e if is_inline(e) => {
                        out.push_str("- ");
                        out.push_str(&render_inline(e));
                        out.push('\n');
                    }
                    Value::Map(map) => {
                        // First entry shares the dash line, the rest align
                        // two columns deeper.
                        out.push_str("- ");
                        let mut entries = map.iter();
                        if let Some((key, entry)) = entries.next() {
                            render_entry_inline(out, key, entry, indent + 2);
                        }
                        for (key, entry) in entries {
                            push_indent(out, indent + 2);
                            render_entry_inline(out, key, entry, indent + 2);
                        }
                    }
                    nested => {
                        out.push('-');
                        out.push('\n');
                        render_block(out, nested, indent + 2);
                    }
                }
            }
        }
        scalar => {
            push_indent(out, indent);
            out.push_str(&render_inline(scalar));
            out.push('\n');
        }
    }
}

/// Renders `key: value` starting at the current position; nested blocks
/// continue at `indent + 2`.
fn render_entry_inline(out: &mut String, key: &str, entry: &Value, indent: usize) {
    out.push_str(&render_key(key));
    out.push(':');
    if is_inline(entry) {
        out.push(' ');
        out.push_str(&render_inline(entry));
        out.push('\n');
    } else {
        out.push('\n');
        render_block(out, entry, indent + 2);
    }
}

fn push_indent(out: &mut String, indent: usize) {
    for _ in 0..indent {
        out.push(' ');
    }
}

// -----------------------------------------------------------------------------
// Scalars

/// Whether `value` renders on the same line as its key or dash.
fn is_inline(value: &Value) -> bool {
    match value {
        Value::Seq(elements) => elements.is_empty(),
        Value::Map(map) => map.is_empty(),
        _ => true,
    }
}

fn render_inline(value: &Value) -> String {
    match value {
        Value::Null => "null".to_owned(),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => render_string(v),
        Value::Bytes(v) => render_string(&BASE64.encode(v)),
        Value::Date(v) => render_string(&v.to_rfc3339()),
        Value::Seq(_) => "[]".to_owned(),
        Value::Map(_) => "{}".to_owned(),
    }
}

fn render_key(key: &str) -> String {
    render_string(key)
}

fn render_string(v: &str) -> String {
    if needs_quoting(v) {
        let mut out = String::with_capacity(v.len() + 2);
        out.push('"');
        for c in v.chars() {
            match c {
                '"' => out.push_str("\\\""),
                '\\' => out.push_str("\\\\"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                c if (c as u32) < 0x20 => {
                    out.push_str(&format!("\\u{:04x}", c as u32));
                }
                c => out.push(c),
            }
        }
        out.push('"');
        out
    } else {
        v.to_owned()
    }
}

fn needs_quoting(v: &str) -> bool {
    if v.is_empty() {
        return true;
    }
    // Plain text that would reparse as something else.
    if matches!(v, "null" | "~" | "true" | "false" | "[]" | "{}" | "-" | "---") {
        return true;
    }
    let first = match v.chars().next() {
        Some(c) => c,
        None => return true,
    };
    if first.is_whitespace()
        || matches!(
            first,
            '-' | '?' | ':' | ',' | '[' | ']' | '{' | '}' | '#' | '&' | '*' | '!' | '|' | '>'
                | '\'' | '"' | '%' | '@' | '`'
        )
    {
        return true;
    }
    if v.ends_with(char::is_whitespace) {
        return true;
    }
    if v.contains(':') || v.contains('#') || v.chars().any(|c| (c as u32) < 0x20) {
        return true;
    }
    // Anything a reparse would read as a number.
    first.is_ascii_digit() && v.parse::<f64>().is_ok()
}

#[cfg(test)]
mod tests {
    use forma_core::value::Map;

    use super::*;

    #[test]
    fn scalars_quote_only_when_ambiguous() {
        assert_eq!(render_inline(&Value::String("plain".into())), "plain");
        assert_eq!(render_inline(&Value::String("true".into())), "\"true\"");
        assert_eq!(render_inline(&Value::String("12.5".into())), "\"12.5\"");
        assert_eq!(render_inline(&Value::String("a: b".into())), "\"a: b\"");
        assert_eq!(render_inline(&Value::String(String::new())), "\"\"");
    }

    #[test]
    fn nested_blocks_indent_by_two() {
        let mut author = Map::new();
        author.insert("login", Value::String("ada".into()));

        let mut root = Map::new();
        root.insert("author", Value::Map(author));
        root.insert("tags", Value::Seq(vec![Value::String("x".into())]));

        assert_eq!(
            render(&Value::Map(root)),
            concat!("author:\n", "  login: ada\n", "tags:\n", "  - x\n"),
        );
    }

    #[test]
    fn sequence_of_maps_shares_the_dash_line() {
        let mut entry = Map::new();
        entry.insert("name", Value::String("a".into()));
        entry.insert("done", Value::Bool(false));

        assert_eq!(
            render(&Value::Seq(vec![Value::Map(entry)])),
            concat!("- name: a\n", "  done: false\n"),
        );
    }
}
