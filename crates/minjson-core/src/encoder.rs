//! Writer: serializes a [`Value`] tree into compact JSON text.
//!
//! The writer accepts objects, strings and integers only:
//!
//! - **Objects**: `{"key":value,...}` in the map's iteration order, no whitespace
//! - **Strings**: emitted verbatim between quotes when nothing needs escaping,
//!   otherwise with `\" \\ \b \f \n \r \t` and `\u00xx` for other control bytes
//! - **Integers**: exact decimal digits at any magnitude
//!
//! Anything else fails with a [`TypeError`] at the first place it is met. No
//! partial text is ever returned.
//!
//! # Example
//! ```
//! use minjson_core::{dumps, Value};
//! let value: Value = [("name", Value::from("Alice")), ("age", Value::from(30))]
//!     .into_iter()
//!     .collect();
//! assert_eq!(dumps(&value).unwrap(), r#"{"name":"Alice","age":30}"#);
//! ```

use num_bigint::BigInt;
use num_traits::ToPrimitive;

use crate::error::{Error, Result, TypeError, TypeErrorKind};
use crate::lex::{control_escape, needs_escape, short_escape};
use crate::options::Options;
use crate::types::{Map, Value};

/// Serialize a top-level object with default [`Options`].
pub fn dumps(value: &Value) -> Result<String> {
    dumps_with(value, &Options::default())
}

/// Serialize a top-level object.
///
/// Fails with `ExpectedObject` when `value` is not an object, with
/// `UnsupportedValue` on the first float, and with `NestingTooDeep` when
/// objects nest past `opts.max_depth`.
pub fn dumps_with(value: &Value, opts: &Options) -> Result<String> {
    let Value::Object(map) = value else {
        tracing::debug!(kind = value.kind(), "dumps rejected non-object root");
        return Err(TypeError::new(TypeErrorKind::ExpectedObject).into());
    };

    let mut out = String::with_capacity(64);
    match encode_object(map, 1, opts, &mut out) {
        Ok(()) => {
            tracing::trace!(bytes = out.len(), keys = map.len(), "dumps complete");
            Ok(out)
        }
        Err(err) => {
            tracing::debug!(error = %err, written = out.len(), "dumps failed");
            Err(err)
        }
    }
}

/// `{` + comma-separated `"key":value` pairs + `}`.
fn encode_object(map: &Map, depth: usize, opts: &Options, out: &mut String) -> Result<()> {
    if depth > opts.max_depth {
        return Err(Error::NestingTooDeep {
            max: opts.max_depth,
        });
    }
    out.push('{');
    for (i, (key, value)) in map.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        encode_string(key, out);
        out.push(':');
        encode_value(value, depth, opts, out)?;
    }
    out.push('}');
    Ok(())
}

/// Dispatch on the value kind. `depth` is the depth of the enclosing object.
fn encode_value(value: &Value, depth: usize, opts: &Options, out: &mut String) -> Result<()> {
    match value {
        Value::Int(n) => encode_int(n, out),
        Value::Str(s) => encode_string(s, out),
        Value::Object(map) => encode_object(map, depth + 1, opts, out)?,
        Value::Float(_) => return Err(TypeError::unsupported("float").into()),
    }
    Ok(())
}

/// Decimal digits, `-` prefix only when negative. Values that fit in `i64`
/// skip the bignum formatter.
fn encode_int(n: &BigInt, out: &mut String) {
    match n.to_i64() {
        Some(small) => out.push_str(&small.to_string()),
        None => out.push_str(&n.to_str_radix(10)),
    }
}

/// Quote and escape a string.
///
/// Only `"`, `\` and bytes below 0x20 are escaped. Every byte of a multi-byte
/// UTF-8 sequence is >= 0x80, so slicing at an escaped byte always lands on a
/// char boundary and non-ASCII text passes through untouched.
pub(crate) fn encode_string(s: &str, out: &mut String) {
    out.push('"');
    let bytes = s.as_bytes();
    match bytes.iter().position(|&b| needs_escape(b)) {
        // Fast path: nothing to escape.
        None => out.push_str(s),
        Some(first) => {
            let mut start = first;
            out.push_str(&s[..first]);
            for (i, &b) in bytes.iter().enumerate().skip(first) {
                if !needs_escape(b) {
                    continue;
                }
                out.push_str(&s[start..i]);
                match short_escape(b) {
                    Some(esc) => out.push_str(esc),
                    None => out.extend(control_escape(b).iter().map(|&c| char::from(c))),
                }
                start = i + 1;
            }
            out.push_str(&s[start..]);
        }
    }
    out.push('"');
}
