//! Lexical helpers shared by the writer and the parser.

/// Space, tab, line feed or carriage return.
#[inline]
pub(crate) fn is_ws(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

/// Index of the first non-whitespace byte at or after `pos`.
#[inline]
pub(crate) fn skip_ws(input: &[u8], mut pos: usize) -> usize {
    while pos < input.len() && is_ws(input[pos]) {
        pos += 1;
    }
    pos
}

/// Index of the first byte at or after `pos` that is not an ASCII digit.
#[inline]
pub(crate) fn skip_digits(input: &[u8], mut pos: usize) -> usize {
    while pos < input.len() && input[pos].is_ascii_digit() {
        pos += 1;
    }
    pos
}

/// True for bytes the writer must escape inside a string literal.
#[inline]
pub(crate) fn needs_escape(b: u8) -> bool {
    b == b'"' || b == b'\\' || b < 0x20
}

/// Two-character escape for a byte, if it has one.
#[inline]
pub(crate) fn short_escape(b: u8) -> Option<&'static str> {
    Some(match b {
        b'"' => "\\\"",
        b'\\' => "\\\\",
        0x08 => "\\b",
        0x0c => "\\f",
        b'\n' => "\\n",
        b'\r' => "\\r",
        b'\t' => "\\t",
        _ => return None,
    })
}

/// Byte produced by a single-letter escape (`\"`, `\n`, ...) in the input.
#[inline]
pub(crate) fn unescape_letter(b: u8) -> Option<char> {
    Some(match b {
        b'"' => '"',
        b'\\' => '\\',
        b'/' => '/',
        b'b' => '\u{8}',
        b'f' => '\u{c}',
        b'n' => '\n',
        b'r' => '\r',
        b't' => '\t',
        _ => return None,
    })
}

#[inline]
pub(crate) fn hex_value(b: u8) -> Option<u16> {
    match b {
        b'0'..=b'9' => Some(u16::from(b - b'0')),
        b'a'..=b'f' => Some(u16::from(b - b'a' + 10)),
        b'A'..=b'F' => Some(u16::from(b - b'A' + 10)),
        _ => None,
    }
}

const HEX: &[u8; 16] = b"0123456789abcdef";

/// `\u00xx` for a control byte, lowercase hex.
#[inline]
pub(crate) fn control_escape(b: u8) -> [u8; 6] {
    [
        b'\\',
        b'u',
        b'0',
        b'0',
        HEX[usize::from(b >> 4)],
        HEX[usize::from(b & 0x0f)],
    ]
}
