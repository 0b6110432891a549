//! A recursive-descent JSON parser producing the neutral raw representation.
//!
//! Strings stay strings at this layer; the deserializer applies the backend's
//! scalar conventions (base64 bytes, RFC 3339 dates) afterwards. Input must
//! be a complete document: trailing non-whitespace content is rejected, and
//! nesting beyond [`MAX_DEPTH`] fails instead of overflowing the stack.

use forma_core::value::{Map, Value};

use crate::error::Error;

/// Nesting levels accepted before a document is rejected as too deep.
pub const MAX_DEPTH: usize = 128;

pub(crate) struct Parser<'a> {
    input: &'a [u8],
    at: usize,
    line: usize,
    column: usize,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Self {
            input: input.as_bytes(),
            at: 0,
            line: 1,
            column: 1,
        }
    }

    /// Parses exactly one document and requires the input to end after it.
    pub(crate) fn parse_document(mut self) -> Result<Value, Error> {
        self.skip_whitespace();
        let value = self.parse_value(0)?;
        self.skip_whitespace();
        if self.at < self.input.len() {
            return Err(self.error("trailing content after the document"));
        }
        Ok(value)
    }

    // -------------------------------------------------------------------------
    // Values

    fn parse_value(&mut self, depth: usize) -> Result<Value, Error> {
        if depth > MAX_DEPTH {
            return Err(self.error("nesting too deep"));
        }
        match self.peek() {
            Some(b'n') => self.parse_literal("null", Value::Null),
            Some(b't') => self.parse_literal("true", Value::Bool(true)),
            Some(b'f') => self.parse_literal("false", Value::Bool(false)),
            Some(b'"') => self.parse_string().map(Value::String),
            Some(b'[') => self.parse_array(depth),
            Some(b'{') => self.parse_object(depth),
            Some(c) if c == b'-' || c.is_ascii_digit() => self.parse_number(),
            Some(c) => Err(self.error(format!("unexpected character `{}`", c as char))),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn parse_literal(&mut self, literal: &'static str, value: Value) -> Result<Value, Error> {
        if self.input[self.at..].starts_with(literal.as_bytes()) {
            for _ in 0..literal.len() {
                self.bump();
            }
            Ok(value)
        } else {
            Err(self.error(format!("expected `{literal}`")))
        }
    }

    fn parse_number(&mut self) -> Result<Value, Error> {
        let start = self.at;
        if self.peek() == Some(b'-') {
            self.bump();
        }
        if !self.peek().is_some_and(|c| c.is_ascii_digit()) {
            return Err(self.error("expected a digit"));
        }
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
        }
        if self.peek() == Some(b'.') {
            self.bump();
            if !self.peek().is_some_and(|c| c.is_ascii_digit()) {
                return Err(self.error("expected a digit after the decimal point"));
            }
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.bump();
            }
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            self.bump();
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.bump();
            }
            if !self.peek().is_some_and(|c| c.is_ascii_digit()) {
                return Err(self.error("expected a digit in the exponent"));
            }
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.bump();
            }
        }

        // The scanned range is ASCII by construction.
        let text = std::str::from_utf8(&self.input[start..self.at])
            .map_err(|_| self.error("invalid number"))?;
        let parsed: f64 = text
            .parse()
            .map_err(|_| self.error(format!("invalid number `{text}`")))?;
        Ok(Value::Number(parsed))
    }

    fn parse_string(&mut self) -> Result<String, Error> {
        self.expect(b'"')?;
        let mut out = String::new();
        loop {
            match self.peek() {
                None => return Err(self.error("unterminated string")),
                Some(b'"') => {
                    self.bump();
                    return Ok(out);
                }
                Some(b'\\') => {
                    self.bump();
                    self.parse_escape(&mut out)?;
                }
                Some(c) if c < 0x20 => {
                    return Err(self.error("control character inside string"));
                }
                Some(_) => {
                    let start = self.at;
                    while self
                        .peek()
                        .is_some_and(|c| c != b'"' && c != b'\\' && c >= 0x20)
                    {
                        self.bump();
                    }
                    let chunk = std::str::from_utf8(&self.input[start..self.at])
                        .map_err(|_| self.error("invalid UTF-8 inside string"))?;
                    out.push_str(chunk);
                }
            }
        }
    }

    fn parse_escape(&mut self, out: &mut String) -> Result<(), Error> {
        let escaped = match self.peek() {
            Some(c) => c,
            None => return Err(self.error("unterminated escape sequence")),
        };
        self.bump();
        match escaped {
            b'"' => out.push('"'),
            b'\\' => out.push('\\'),
            b'/' => out.push('/'),
            b'b' => out.push('\u{8}'),
            b'f' => out.push('\u{c}'),
            b'n' => out.push('\n'),
            b'r' => out.push('\r'),
            b't' => out.push('\t'),
            b'u' => {
                let first = self.parse_hex4()?;
                let scalar = if (0xD800..0xDC00).contains(&first) {
                    // High surrogate: a low surrogate escape must follow.
                    if self.peek() != Some(b'\\') {
                        return Err(self.error("unpaired surrogate escape"));
                    }
                    self.bump();
                    if self.peek() != Some(b'u') {
                        return Err(self.error("unpaired surrogate escape"));
                    }
                    self.bump();
                    let second = self.parse_hex4()?;
                    if !(0xDC00..0xE000).contains(&second) {
                        return Err(self.error("invalid low surrogate escape"));
                    }
                    0x10000 + ((first - 0xD800) << 10) + (second - 0xDC00)
                } else if (0xDC00..0xE000).contains(&first) {
                    return Err(self.error("unpaired surrogate escape"));
                } else {
                    first
                };
                match char::from_u32(scalar) {
                    Some(c) => out.push(c),
                    None => return Err(self.error("invalid unicode escape")),
                }
            }
            other => {
                return Err(self.error(format!("invalid escape `\\{}`", other as char)));
            }
        }
        Ok(())
    }

    fn parse_hex4(&mut self) -> Result<u32, Error> {
        let mut scalar = 0u32;
        for _ in 0..4 {
            let digit = match self.peek().and_then(|c| (c as char).to_digit(16)) {
                Some(digit) => digit,
                None => return Err(self.error("expected four hex digits after `\\u`")),
            };
            self.bump();
            scalar = scalar * 16 + digit;
        }
        Ok(scalar)
    }

    fn parse_array(&mut self, depth: usize) -> Result<Value, Error> {
        self.expect(b'[')?;
        self.skip_whitespace();
        let mut elements = Vec::new();
        if self.peek() == Some(b']') {
            self.bump();
            return Ok(Value::Seq(elements));
        }
        loop {
            elements.push(self.parse_value(depth + 1)?);
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => {
                    self.bump();
                    self.skip_whitespace();
                }
                Some(b']') => {
                    self.bump();
                    return Ok(Value::Seq(elements));
                }
                _ => return Err(self.error("expected `,` or `]` in array")),
            }
        }
    }

    fn parse_object(&mut self, depth: usize) -> Result<Value, Error> {
        self.expect(b'{')?;
        self.skip_whitespace();
        let mut map = Map::new();
        if self.peek() == Some(b'}') {
            self.bump();
            return Ok(Value::Map(map));
        }
        loop {
            if self.peek() != Some(b'"') {
                return Err(self.error("expected a string key"));
            }
            let key = self.parse_string()?;
            self.skip_whitespace();
            self.expect(b':')?;
            self.skip_whitespace();
            let value = self.parse_value(depth + 1)?;
            map.insert(key, value);
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => {
                    self.bump();
                    self.skip_whitespace();
                }
                Some(b'}') => {
                    self.bump();
                    return Ok(Value::Map(map));
                }
                _ => return Err(self.error("expected `,` or `}` in object")),
            }
        }
    }

    // -------------------------------------------------------------------------
    // Input handling

    fn peek(&self) -> Option<u8> {
        self.input.get(self.at).copied()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.at += 1;
            if c == b'\n' {
                self.line += 1;
                self.column = 1;
            } else if c & 0b1100_0000 != 0b1000_0000 {
                // Continuation bytes do not advance the column.
                self.column += 1;
            }
        }
    }

    fn expect(&mut self, expected: u8) -> Result<(), Error> {
        if self.peek() == Some(expected) {
            self.bump();
            Ok(())
        } else {
            Err(self.error(format!("expected `{}`", expected as char)))
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.bump();
        }
    }

    fn error(&self, message: impl Into<String>) -> Error {
        Error::parse(self.line, self.column, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<Value, Error> {
        Parser::new(input).parse_document()
    }

    #[test]
    fn scalars() {
        assert_eq!(parse("null").unwrap(), Value::Null);
        assert_eq!(parse("true").unwrap(), Value::Bool(true));
        assert_eq!(parse("-12.5e2").unwrap(), Value::Number(-1250.0));
        assert_eq!(parse("\"hi\"").unwrap(), Value::String("hi".into()));
    }

    #[test]
    fn escapes_and_surrogates() {
        assert_eq!(
            parse(r#""a\n\t\"\\b""#).unwrap(),
            Value::String("a\n\t\"\\b".into()),
        );
        assert_eq!(
            parse(r#""é😀""#).unwrap(),
            Value::String("é😀".into()),
        );
    }

    #[test]
    fn unpaired_surrogate_is_rejected() {
        assert!(parse(r#""\ud83d""#).is_err());
        assert!(parse(r#""\udc00""#).is_err());
    }

    #[test]
    fn composites_preserve_order() {
        let value = parse(r#"{"z": 1, "a": [true, null]}"#).unwrap();
        let map = value.as_map().unwrap();
        let keys: Vec<_> = map.iter().map(|(k, _)| k.to_owned()).collect();
        assert_eq!(keys, ["z", "a"]);
    }

    #[test]
    fn trailing_content_is_rejected() {
        let err = parse("1 2").unwrap_err();
        assert!(err.to_string().contains("trailing content"), "{err}");
    }

    #[test]
    fn errors_carry_line_and_column() {
        let err = parse("{\"a\": 1,\n  oops}").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("line 2"), "{message}");
    }

    #[test]
    fn nesting_beyond_the_limit_is_rejected() {
        let deep = format!("{}1{}", "[".repeat(MAX_DEPTH + 2), "]".repeat(MAX_DEPTH + 2));
        assert!(parse(&deep).is_err());
    }
}
