//! An indentation-driven parser for the block-style YAML subset this backend
//! renders.
//!
//! Supported: block mappings and sequences, plain and quoted scalars, `#`
//! comments, and the empty flow collections `[]` and `{}`. Anchors, aliases,
//! tags, multi-document streams and general flow collections are out of
//! scope; input using them is rejected with a line-numbered error.

use forma_core::value::{Map, Value};

use crate::error::Error;

// -----------------------------------------------------------------------------
// Line scanning

struct Line {
    indent: usize,
    text: String,
    number: usize,
}

/// Strips a trailing comment, honoring quoted regions.
fn strip_comment(text: &str) -> &str {
    let bytes = text.as_bytes();
    let mut quote: Option<u8> = None;
    let mut i = 0;
    while i < bytes.len() {
        match (quote, bytes[i]) {
            (Some(b'"'), b'\\') => i += 1,
            (Some(q), c) if c == q => quote = None,
            (None, c @ (b'"' | b'\'')) => quote = Some(c),
            (None, b'#') if i == 0 || bytes[i - 1].is_ascii_whitespace() => {
                return text[..i].trim_end();
            }
            _ => {}
        }
        i += 1;
    }
    text.trim_end()
}

fn scan_lines(input: &str) -> Result<Vec<Line>, Error> {
    let mut lines = Vec::new();
    for (i, raw) in input.lines().enumerate() {
        let number = i + 1;
        let leading = &raw[..raw.len() - raw.trim_start().len()];
        if leading.contains('\t') {
            return Err(Error::parse(number, "tabs are not allowed in indentation"));
        }
        let indent = leading.len();
        let text = strip_comment(raw[indent..].trim_end());
        if text.is_empty() {
            continue;
        }
        if text == "---" && indent == 0 {
            if lines.is_empty() {
                continue;
            }
            return Err(Error::parse(number, "multi-document streams are not supported"));
        }
        lines.push(Line {
            indent,
            text: text.to_owned(),
            number,
        });
    }
    Ok(lines)
}

// -----------------------------------------------------------------------------
// Parser

pub(crate) struct Parser {
    lines: Vec<Line>,
    at: usize,
}

impl Parser {
    pub(crate) fn new(input: &str) -> Result<Self, Error> {
        Ok(Self {
            lines: scan_lines(input)?,
            at: 0,
        })
    }

    pub(crate) fn parse_document(mut self) -> Result<Value, Error> {
        if self.lines.is_empty() {
            return Ok(Value::Null);
        }
        let indent = self.lines[0].indent;
        let value = self.parse_block(indent)?;
        if let Some(line) = self.lines.get(self.at) {
            return Err(Error::parse(line.number, "trailing content after the document"));
        }
        Ok(value)
    }

    fn parse_block(&mut self, indent: usize) -> Result<Value, Error> {
        let line = &self.lines[self.at];
        if line.indent != indent {
            return Err(Error::parse(line.number, "unexpected indentation"));
        }
        if line.text == "-" || line.text.starts_with("- ") {
            self.parse_sequence(indent)
        } else if split_key(&line.text).is_some() {
            self.parse_mapping(indent)
        } else {
            let number = line.number;
            let text = line.text.clone();
            self.at += 1;
            parse_scalar(&text, number)
        }
    }

    fn parse_sequence(&mut self, indent: usize) -> Result<Value, Error> {
        let mut items = Vec::new();
        while let Some(line) = self.lines.get(self.at) {
            if line.indent != indent || !(line.text == "-" || line.text.starts_with("- ")) {
                break;
            }
            let number = line.number;
            let rest = line.text[1..].trim_start().to_owned();
            if rest.is_empty() {
                self.at += 1;
                items.push(self.parse_child(indent, number)?);
            } else if split_key(&rest).is_some() {
                // Inline first entry of a block mapping: rewrite the line as
                // if the entry started two columns deeper and reparse.
                let entry_indent = indent + 2;
                self.lines[self.at].indent = entry_indent;
                self.lines[self.at].text = rest;
                items.push(self.parse_block(entry_indent)?);
            } else {
                self.at += 1;
                items.push(parse_scalar(&rest, number)?);
            }
        }
        Ok(Value::Seq(items))
    }

    fn parse_mapping(&mut self, indent: usize) -> Result<Value, Error> {
        let mut map = Map::new();
        while let Some(line) = self.lines.get(self.at) {
            if line.indent != indent {
                break;
            }
            let number = line.number;
            let Some((key, rest)) = split_key(&line.text) else {
                break;
            };
            let key = parse_key(key, number)?;
            let rest = rest.to_owned();
            self.at += 1;
            let value = if rest.is_empty() {
                self.parse_child(indent, number)?
            } else {
                parse_scalar(&rest, number)?
            };
            map.insert(key, value);
        }
        Ok(Value::Map(map))
    }

    /// Parses the value belonging to a key or dash whose own line carried no
    /// inline content: either a more-indented block or null.
    fn parse_child(&mut self, parent_indent: usize, _number: usize) -> Result<Value, Error> {
        match self.lines.get(self.at) {
            Some(line) if line.indent > parent_indent => {
                let indent = line.indent;
                self.parse_block(indent)
            }
            _ => Ok(Value::Null),
        }
    }
}

// -----------------------------------------------------------------------------
// Scalars and keys

/// Splits `key: value` or `key:`, honoring a quoted key. Returns `None` when
/// the line is not a mapping entry.
fn split_key(text: &str) -> Option<(&str, &str)> {
    if text.starts_with('"') || text.starts_with('\'') {
        let quote = text.as_bytes()[0];
        let bytes = text.as_bytes();
        let mut i = 1;
        while i < bytes.len() {
            if quote == b'"' && bytes[i] == b'\\' {
                i += 2;
                continue;
            }
            if bytes[i] == quote {
                let after = &text[i + 1..];
                if let Some(rest) = after.strip_prefix(':') {
                    return Some((&text[..i + 1], rest.trim_start()));
                }
                return None;
            }
            i += 1;
        }
        return None;
    }

    let colon = text.find(':')?;
    let after = &text[colon + 1..];
    if after.is_empty() || after.starts_with(' ') {
        Some((text[..colon].trim_end(), after.trim_start()))
    } else {
        None
    }
}

fn parse_key(text: &str, number: usize) -> Result<String, Error> {
    match parse_scalar(text, number)? {
        Value::String(key) => Ok(key),
        other => Ok(render_plain(&other)),
    }
}

/// Plain rendering of a non-string scalar used as a key (`true:`, `1:`).
fn render_plain(value: &Value) -> String {
    match value {
        Value::Null => "null".to_owned(),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        _ => String::new(),
    }
}

fn looks_like_number(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c.is_ascii_digit() || c == '-' => {}
        _ => return false,
    }
    text.chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E'))
}

pub(crate) fn parse_scalar(text: &str, number: usize) -> Result<Value, Error> {
    match text {
        "null" | "~" => return Ok(Value::Null),
        "true" => return Ok(Value::Bool(true)),
        "false" => return Ok(Value::Bool(false)),
        "[]" => return Ok(Value::Seq(Vec::new())),
        "{}" => return Ok(Value::Map(Map::new())),
        _ => {}
    }

    if text.starts_with('"') {
        return parse_double_quoted(text, number).map(Value::String);
    }
    if text.starts_with('\'') {
        return parse_single_quoted(text, number).map(Value::String);
    }
    if text.starts_with('[') || text.starts_with('{') {
        return Err(Error::parse(
            number,
            "flow collections are not supported (only empty `[]` and `{}`)",
        ));
    }
    if text.starts_with('&') || text.starts_with('*') || text.starts_with('!') {
        return Err(Error::parse(
            number,
            "anchors, aliases and tags are not supported",
        ));
    }

    if looks_like_number(text) {
        if let Ok(parsed) = text.parse::<f64>() {
            if parsed.is_finite() {
                return Ok(Value::Number(parsed));
            }
        }
    }
    Ok(Value::String(text.to_owned()))
}

fn parse_double_quoted(text: &str, number: usize) -> Result<String, Error> {
    let inner = text
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .filter(|_| text.len() >= 2)
        .ok_or_else(|| Error::parse(number, "unterminated double-quoted scalar"))?;

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('0') => out.push('\0'),
            Some('u') => {
                let mut scalar = 0u32;
                for _ in 0..4 {
                    let digit = chars
                        .next()
                        .and_then(|d| d.to_digit(16))
                        .ok_or_else(|| Error::parse(number, "invalid `\\u` escape"))?;
                    scalar = scalar * 16 + digit;
                }
                let c = char::from_u32(scalar)
                    .ok_or_else(|| Error::parse(number, "invalid `\\u` escape"))?;
                out.push(c);
            }
            _ => return Err(Error::parse(number, "invalid escape in double-quoted scalar")),
        }
    }
    Ok(out)
}

fn parse_single_quoted(text: &str, number: usize) -> Result<String, Error> {
    let inner = text
        .strip_prefix('\'')
        .and_then(|t| t.strip_suffix('\''))
        .filter(|_| text.len() >= 2)
        .ok_or_else(|| Error::parse(number, "unterminated single-quoted scalar"))?;
    Ok(inner.replace("''", "'"))
}
