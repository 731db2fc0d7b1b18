//! Parser: turns JSON text into a [`Value`] tree.
//!
//! A single-pass recursive descent over the input bytes with a read cursor.
//! The accepted grammar is a strict subset of JSON:
//!
//! - The document is exactly one object, optionally surrounded by whitespace
//! - Values are objects, strings or numbers; arrays, `true`, `false` and
//!   `null` are rejected (they fall through to the number rule)
//! - Numbers without a fraction or exponent become arbitrary-precision
//!   integers; all others become `f64`
//!
//! # Key design decisions
//!
//! - **Escape-free strings are copied in one slice**: the string rule tracks
//!   the start of the current unescaped run and only flushes it when an escape
//!   or the closing quote is reached.
//! - **Surrogate escapes are decoded one at a time**: `\ud83d\ude00` is two
//!   independent escapes, never recombined. Since a Rust `String` cannot hold a
//!   lone surrogate, each one is handled per [`SurrogatePolicy`].
//! - **Explicit depth counter**: every descent into an object is checked
//!   against `Options::max_depth`, so hostile input fails with
//!   `NestingTooDeep` instead of exhausting the stack.

use num_bigint::BigInt;

use crate::error::{Error, Result, SyntaxError, SyntaxErrorKind};
use crate::lex::{hex_value, skip_digits, skip_ws, unescape_letter};
use crate::options::{Options, SurrogatePolicy};
use crate::types::{Map, Value};

/// Parse a document with default [`Options`].
pub fn loads(text: &str) -> Result<Value> {
    loads_with(text, &Options::default())
}

/// Parse a document. The result is always a `Value::Object`.
pub fn loads_with(text: &str, opts: &Options) -> Result<Value> {
    let mut parser = Parser::new(text, opts);
    match parser.document() {
        Ok(value) => {
            tracing::trace!(bytes = text.len(), "loads complete");
            Ok(value)
        }
        Err(err) => {
            tracing::debug!(error = %err, bytes = text.len(), "loads failed");
            Err(err)
        }
    }
}

/// Parse a document from raw bytes with default [`Options`].
pub fn loads_bytes(input: &[u8]) -> Result<Value> {
    loads_bytes_with(input, &Options::default())
}

/// Parse a document from raw bytes, rejecting input that is not UTF-8.
pub fn loads_bytes_with(input: &[u8], opts: &Options) -> Result<Value> {
    let text = std::str::from_utf8(input).map_err(|e| {
        tracing::debug!(offset = e.valid_up_to(), "loads rejected invalid UTF-8");
        SyntaxError::new(SyntaxErrorKind::InvalidUtf8, e.valid_up_to())
    })?;
    loads_with(text, opts)
}

/// Read cursor over the input plus the current object depth.
struct Parser<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
    depth: usize,
    opts: Options,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str, opts: &Options) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos: 0,
            depth: 0,
            opts: *opts,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_ws(&mut self) {
        self.pos = skip_ws(self.bytes, self.pos);
    }

    fn fail(&self, kind: SyntaxErrorKind) -> Error {
        self.fail_at(kind, self.pos)
    }

    fn fail_at(&self, kind: SyntaxErrorKind, offset: usize) -> Error {
        SyntaxError::new(kind, offset).into()
    }

    /// `document := ws object ws EOF`
    fn document(&mut self) -> Result<Value> {
        self.skip_ws();
        match self.peek() {
            Some(b'{') => {}
            Some(_) => return Err(self.fail(SyntaxErrorKind::ExpectedObject)),
            None => return Err(self.fail(SyntaxErrorKind::UnexpectedEnd)),
        }
        let value = self.object()?;
        self.skip_ws();
        if self.pos != self.bytes.len() {
            return Err(self.fail(SyntaxErrorKind::TrailingData));
        }
        Ok(value)
    }

    /// `value := object | string | number`, after leading whitespace.
    fn value(&mut self) -> Result<Value> {
        self.skip_ws();
        match self.peek() {
            None => Err(self.fail(SyntaxErrorKind::UnexpectedEnd)),
            Some(b'{') => self.object(),
            Some(b'"') => self.string().map(Value::Str),
            Some(_) => self.number(),
        }
    }

    /// Parse an object; the cursor is on `{`.
    fn object(&mut self) -> Result<Value> {
        self.depth += 1;
        if self.depth > self.opts.max_depth {
            return Err(Error::NestingTooDeep {
                max: self.opts.max_depth,
            });
        }
        self.pos += 1;
        self.skip_ws();

        let mut map = Map::new();
        if self.peek() == Some(b'}') {
            self.pos += 1;
            self.depth -= 1;
            return Ok(Value::Object(map));
        }

        loop {
            if self.pos >= self.bytes.len() {
                return Err(self.fail(SyntaxErrorKind::UnterminatedObject));
            }
            let key = self.string()?;

            self.skip_ws();
            match self.peek() {
                Some(b':') => self.pos += 1,
                Some(_) => return Err(self.fail(SyntaxErrorKind::ExpectedColon)),
                None => return Err(self.fail(SyntaxErrorKind::UnterminatedObject)),
            }

            let value = self.value()?;
            map.insert(key, value);

            self.skip_ws();
            match self.peek() {
                Some(b'}') => {
                    self.pos += 1;
                    break;
                }
                Some(b',') => {
                    self.pos += 1;
                    self.skip_ws();
                }
                Some(_) => return Err(self.fail(SyntaxErrorKind::ExpectedCommaOrBrace)),
                None => return Err(self.fail(SyntaxErrorKind::UnterminatedObject)),
            }
        }

        self.depth -= 1;
        Ok(Value::Object(map))
    }

    /// Parse a quoted string; the cursor should be on `"`.
    fn string(&mut self) -> Result<String> {
        if self.peek() != Some(b'"') {
            return Err(self.fail(SyntaxErrorKind::InvalidStringEscape));
        }
        self.pos += 1;

        let mut out = String::new();
        let mut run = self.pos;
        loop {
            let Some(b) = self.peek() else {
                return Err(self.fail(SyntaxErrorKind::InvalidStringEscape));
            };
            match b {
                b'"' => {
                    out.push_str(&self.text[run..self.pos]);
                    self.pos += 1;
                    return Ok(out);
                }
                b'\\' => {
                    out.push_str(&self.text[run..self.pos]);
                    out.push(self.escape()?);
                    run = self.pos;
                }
                0x00..=0x1f => return Err(self.fail(SyntaxErrorKind::InvalidStringEscape)),
                _ => self.pos += 1,
            }
        }
    }

    /// Decode one escape sequence; the cursor is on the backslash.
    fn escape(&mut self) -> Result<char> {
        let start = self.pos;
        let Some(letter) = self.bytes.get(start + 1).copied() else {
            return Err(self.fail_at(SyntaxErrorKind::InvalidStringEscape, start));
        };
        if letter != b'u' {
            self.pos = start + 2;
            return unescape_letter(letter)
                .ok_or_else(|| self.fail_at(SyntaxErrorKind::InvalidStringEscape, start));
        }

        let digits = self
            .bytes
            .get(start + 2..start + 6)
            .ok_or_else(|| self.fail_at(SyntaxErrorKind::InvalidStringEscape, start))?;
        let mut unit: u32 = 0;
        for &h in digits {
            let nibble =
                hex_value(h).ok_or_else(|| self.fail_at(SyntaxErrorKind::InvalidStringEscape, start))?;
            unit = (unit << 4) | u32::from(nibble);
        }
        self.pos = start + 6;

        match char::from_u32(unit) {
            Some(ch) => Ok(ch),
            // Only D800..=DFFF fail to convert from four hex digits.
            None => match self.opts.surrogates {
                SurrogatePolicy::Replace => {
                    tracing::trace!(offset = start, unit, "lone surrogate escape replaced");
                    Ok(char::REPLACEMENT_CHARACTER)
                }
                SurrogatePolicy::Reject => {
                    Err(self.fail_at(SyntaxErrorKind::InvalidStringEscape, start))
                }
            },
        }
    }

    /// `number := '-'? digit+ ('.' digit+)? (('e'|'E') ('+'|'-')? digit+)?`
    fn number(&mut self) -> Result<Value> {
        let start = self.pos;
        let bytes = self.bytes;
        let invalid = || -> Error { SyntaxError::new(SyntaxErrorKind::InvalidNumber, start).into() };

        let mut q = start;
        if bytes.get(q) == Some(&b'-') {
            q += 1;
        }
        let int_start = q;
        q = skip_digits(bytes, q);
        if q == int_start {
            return Err(invalid());
        }

        let mut integral = true;
        if bytes.get(q) == Some(&b'.') {
            integral = false;
            let frac_start = q + 1;
            q = skip_digits(bytes, frac_start);
            if q == frac_start {
                return Err(invalid());
            }
        }
        if matches!(bytes.get(q), Some(b'e' | b'E')) {
            integral = false;
            q += 1;
            if matches!(bytes.get(q), Some(b'+' | b'-')) {
                q += 1;
            }
            let exp_start = q;
            q = skip_digits(bytes, exp_start);
            if q == exp_start {
                return Err(invalid());
            }
        }

        // The converters must accept exactly the matched span.
        let token = &self.text[start..q];
        let value = if integral {
            Value::Int(token.parse::<BigInt>().map_err(|_| invalid())?)
        } else {
            Value::Float(token.parse::<f64>().map_err(|_| invalid())?)
        };
        self.pos = q;
        Ok(value)
    }
}
