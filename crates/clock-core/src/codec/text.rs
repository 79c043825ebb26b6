//! Line-oriented codec between UTF-8 bytes and a [`PropertyTable`].
//!
//! Format:
//! ```text
//! name=value\n
//! ```
//! One property per line.  Names are runs of key characters
//! (`A-Z a-z 0-9 _ . -`).  There is no header, no comments, and no quoting
//! or escaping.
//!
//! Decoding tolerates blank lines, whitespace before a name, whitespace
//! around `=`, and trailing whitespace (including the `\r` of CRLF line
//! endings), none of which is kept.  Any other deviation from the
//! `name=value` shape fails the whole decode.
//!
//! Encoding writes `name=value\n` for every entry in table order.  A value
//! that itself contains `\n` does not survive a round trip.

use std::collections::TryReserveError;
use std::fmt;

use thiserror::Error;
use tracing::debug;

use crate::error::ErrorKind;
use crate::properties::table::{copy_str, PropertyTable};

const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// Errors that can occur while decoding or encoding a property file.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    /// The text violates the line grammar.
    #[error("malformed property data at line {line}: {reason}")]
    MalformedData { line: usize, reason: MalformedReason },

    /// An allocation failed while building the table or the output buffer.
    #[error("out of memory while processing property data: {0}")]
    OutOfMemory(#[from] TryReserveError),
}

impl CodecError {
    /// Returns the coarse category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CodecError::MalformedData { .. } => ErrorKind::MalformedData,
            CodecError::OutOfMemory(_) => ErrorKind::OutOfMemory,
        }
    }
}

/// What exactly was wrong with a malformed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    /// The line does not start with a key character.
    MissingName { found: char },
    /// Input ended before the line was complete.
    UnexpectedEnd,
    /// Something other than `=` followed the name.
    MissingEquals { found: char },
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedReason::MissingName { found } => {
                write!(f, "expected a property name, found {found:?}")
            }
            MalformedReason::UnexpectedEnd => f.write_str("unexpected end of input"),
            MalformedReason::MissingEquals { found } => {
                write!(f, "expected '=' after the property name, found {found:?}")
            }
        }
    }
}

/// Returns `true` for characters allowed in a property name.
pub fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')
}

/// Returns `true` if `name` is a non-empty run of key characters.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(is_key_char)
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Decodes UTF-8 property text into a new [`PropertyTable`].
///
/// Invalid UTF-8 sequences are replaced with U+FFFD before parsing and a
/// leading byte-order mark is ignored.  When a name appears more than once
/// the last value wins.
///
/// # Errors
///
/// Returns [`CodecError::MalformedData`] on the first grammar violation and
/// [`CodecError::OutOfMemory`] if the table cannot grow.  Nothing decoded
/// before the failure is returned.
///
/// # Examples
///
/// ```rust
/// use clock_core::decode_properties;
///
/// let table = decode_properties(b"scale=80\nspace = 20 \n").unwrap();
/// assert_eq!(table.get("space").unwrap(), "20");
/// ```
pub fn decode_properties(bytes: &[u8]) -> Result<PropertyTable, CodecError> {
    let raw = String::from_utf8_lossy(bytes);
    let text = raw.strip_prefix(BYTE_ORDER_MARK).unwrap_or(raw.as_ref());

    let mut table = PropertyTable::new();
    let mut cursor = Cursor::new(text);

    loop {
        cursor.skip_while(char::is_whitespace);
        if cursor.at_end() {
            break;
        }

        let line = cursor.line;
        let malformed = |reason| CodecError::MalformedData { line, reason };

        let name = cursor.take_while(is_key_char);
        if name.is_empty() {
            let found = cursor.peek().unwrap_or_default();
            return Err(malformed(MalformedReason::MissingName { found }));
        }
        if cursor.at_end() {
            return Err(malformed(MalformedReason::UnexpectedEnd));
        }

        cursor.skip_while(char::is_whitespace);
        match cursor.bump() {
            None => return Err(malformed(MalformedReason::UnexpectedEnd)),
            Some('=') => {}
            Some(found) => return Err(malformed(MalformedReason::MissingEquals { found })),
        }

        cursor.skip_while(|c| c != '\n' && c.is_whitespace());
        if cursor.at_end() {
            return Err(malformed(MalformedReason::UnexpectedEnd));
        }

        let value = cursor.take_while(|c| c != '\n').trim_end();
        // Owned copies are reserved fallibly so a huge file reports OutOfMemory.
        table.insert_owned(copy_str(name)?, copy_str(value)?)?;

        // Step over the line terminator, if any.
        cursor.bump();
    }

    debug!(properties = table.len(), bytes = bytes.len(), "decoded property data");
    Ok(table)
}

/// Encodes `table` as UTF-8 `name=value\n` lines in table order.
///
/// # Errors
///
/// Returns [`CodecError::OutOfMemory`] if the output buffer cannot be
/// allocated.
///
/// # Examples
///
/// ```rust
/// use clock_core::{encode_properties, PropertyTable};
///
/// let mut table = PropertyTable::new();
/// table.set("scale", "80").unwrap();
/// assert_eq!(encode_properties(&table).unwrap(), b"scale=80\n");
/// ```
pub fn encode_properties(table: &PropertyTable) -> Result<Vec<u8>, CodecError> {
    let size: usize = table
        .iter()
        .map(|p| p.name().len() + 1 + p.value().len() + 1)
        .sum();

    let mut buf = Vec::new();
    buf.try_reserve_exact(size)?;
    for property in table {
        buf.extend_from_slice(property.name().as_bytes());
        buf.push(b'=');
        buf.extend_from_slice(property.value().as_bytes());
        buf.push(b'\n');
    }

    debug!(properties = table.len(), bytes = buf.len(), "encoded property data");
    Ok(buf)
}

// ── Cursor ────────────────────────────────────────────────────────────────────

/// Character cursor over the decoded text that tracks the current line.
struct Cursor<'a> {
    text: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0, line: 1 }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.bump();
        }
        &self.text[start..self.pos]
    }

    fn skip_while(&mut self, pred: impl Fn(char) -> bool) {
        self.take_while(pred);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn malformed(bytes: &[u8]) -> (usize, MalformedReason) {
        match decode_properties(bytes) {
            Err(CodecError::MalformedData { line, reason }) => (line, reason),
            other => panic!("expected MalformedData, got {other:?}"),
        }
    }

    // ── Decode: accepted input ────────────────────────────────────────────────

    #[test]
    fn test_decode_trims_whitespace_and_skips_blank_lines() {
        // Arrange
        let text = b"scale=80\nspace = 20 \n\nshowSeconds=yes\n";

        // Act
        let table = decode_properties(text).unwrap();

        // Assert
        assert_eq!(table.len(), 3);
        assert_eq!(table.get("scale").unwrap(), "80");
        assert_eq!(table.get("space").unwrap(), "20");
        assert_eq!(table.get("showSeconds").unwrap(), "yes");
    }

    #[test]
    fn test_decode_empty_input_yields_empty_table() {
        assert!(decode_properties(b"").unwrap().is_empty());
    }

    #[test]
    fn test_decode_whitespace_only_input_yields_empty_table() {
        assert!(decode_properties(b" \r\n\t\n  ").unwrap().is_empty());
    }

    #[test]
    fn test_decode_strips_crlf_line_endings() {
        let table = decode_properties(b"a=1\r\nb=2\r\n").unwrap();
        assert_eq!(table.get("a").unwrap(), "1");
        assert_eq!(table.get("b").unwrap(), "2");
    }

    #[test]
    fn test_decode_last_line_without_newline() {
        let table = decode_properties(b"a=1\nb=2").unwrap();
        assert_eq!(table.get("b").unwrap(), "2");
    }

    #[test]
    fn test_decode_keeps_inner_whitespace_and_equals_in_value() {
        let table = decode_properties(b"fontName=  Segoe UI = Light  \n").unwrap();
        assert_eq!(table.get("fontName").unwrap(), "Segoe UI = Light");
    }

    #[test]
    fn test_decode_empty_value_before_newline() {
        let table = decode_properties(b"fontName=\nscale=1\n").unwrap();
        assert_eq!(table.get("fontName").unwrap(), "");
    }

    #[test]
    fn test_decode_whitespace_only_value_is_empty() {
        let table = decode_properties(b"fontName=   \n").unwrap();
        assert_eq!(table.get("fontName").unwrap(), "");
    }

    #[test]
    fn test_decode_allows_newline_between_name_and_equals() {
        let table = decode_properties(b"scale\n=80\n").unwrap();
        assert_eq!(table.get("scale").unwrap(), "80");
    }

    #[test]
    fn test_decode_duplicate_name_keeps_last_value() {
        let table = decode_properties(b"scale=10\nscale=20\n").unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("scale").unwrap(), "20");
    }

    #[test]
    fn test_decode_name_with_all_key_character_classes() {
        let table = decode_properties(b"Font_name.v2-x=ok\n").unwrap();
        assert_eq!(table.get("Font_name.v2-x").unwrap(), "ok");
    }

    #[test]
    fn test_decode_utf8_value() {
        let table = decode_properties("fontName=Noto Sans 日本語\n".as_bytes()).unwrap();
        assert_eq!(table.get("fontName").unwrap(), "Noto Sans 日本語");
    }

    #[test]
    fn test_decode_skips_byte_order_mark() {
        let table = decode_properties(b"\xEF\xBB\xBFscale=80\n").unwrap();
        assert_eq!(table.get("scale").unwrap(), "80");
    }

    #[test]
    fn test_decode_invalid_utf8_becomes_replacement_character() {
        let table = decode_properties(b"fontName=a\xFFb\n").unwrap();
        assert_eq!(table.get("fontName").unwrap(), "a\u{FFFD}b");
    }

    #[test]
    fn test_decode_preserves_file_order() {
        let table = decode_properties(b"z=1\na=2\nm=3\n").unwrap();
        let names: Vec<&str> = table.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["z", "a", "m"]);
    }

    // ── Decode: rejected input ────────────────────────────────────────────────

    #[test]
    fn test_decode_line_without_equals_is_malformed() {
        let (line, reason) = malformed(b"justaname\n");
        assert_eq!(line, 1);
        assert_eq!(reason, MalformedReason::UnexpectedEnd);
    }

    #[test]
    fn test_decode_name_followed_by_other_text_is_malformed() {
        let (line, reason) = malformed(b"scale=80\nbad line\n");
        assert_eq!(line, 2);
        assert_eq!(reason, MalformedReason::MissingEquals { found: 'l' });
    }

    #[test]
    fn test_decode_indented_line_without_key_characters_is_malformed() {
        let (line, reason) = malformed(b"scale=80\n   =oops\n");
        assert_eq!(line, 2);
        assert_eq!(reason, MalformedReason::MissingName { found: '=' });
    }

    #[test]
    fn test_decode_leading_punctuation_is_malformed() {
        let (_, reason) = malformed(b"# comment\n");
        assert_eq!(reason, MalformedReason::MissingName { found: '#' });
    }

    #[test]
    fn test_decode_name_at_end_of_input_is_malformed() {
        let (_, reason) = malformed(b"scale");
        assert_eq!(reason, MalformedReason::UnexpectedEnd);
    }

    #[test]
    fn test_decode_equals_at_end_of_input_is_malformed() {
        let (_, reason) = malformed(b"scale=");
        assert_eq!(reason, MalformedReason::UnexpectedEnd);
        let (_, reason) = malformed(b"scale =  ");
        assert_eq!(reason, MalformedReason::UnexpectedEnd);
    }

    #[test]
    fn test_decode_malformed_error_kind() {
        let err = decode_properties(b"justaname\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedData);
        assert!(err.to_string().contains("line 1"));
    }

    // ── Encode ────────────────────────────────────────────────────────────────

    #[test]
    fn test_encode_empty_table_is_empty_buffer() {
        assert!(encode_properties(&PropertyTable::new()).unwrap().is_empty());
    }

    #[test]
    fn test_encode_writes_lines_in_table_order() {
        // Arrange
        let mut table = PropertyTable::new();
        table.set("scale", "80").unwrap();
        table.set("fontName", "Segoe UI").unwrap();
        table.set("scale", "90").unwrap();

        // Act
        let bytes = encode_properties(&table).unwrap();

        // Assert
        assert_eq!(bytes, b"scale=90\nfontName=Segoe UI\n");
    }

    #[test]
    fn test_encode_does_not_escape() {
        let mut table = PropertyTable::new();
        table.set("odd", "a=b").unwrap();
        assert_eq!(encode_properties(&table).unwrap(), b"odd=a=b\n");
    }

    #[test]
    fn test_reencoding_decoded_output_is_byte_identical() {
        // Arrange
        let mut table = PropertyTable::new();
        table.set("scale", "80").unwrap();
        table.set("fontName", "Noto Sans 日本語").unwrap();
        table.set("fgColor", "FFFFFF").unwrap();
        let first = encode_properties(&table).unwrap();

        // Act
        let second = encode_properties(&decode_properties(&first).unwrap()).unwrap();

        // Assert
        assert_eq!(first, second);
    }

    // ── Key characters ────────────────────────────────────────────────────────

    #[test]
    fn test_is_valid_name() {
        assert!(is_valid_name("showSeconds"));
        assert!(is_valid_name("a.b-c_9"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("has space"));
        assert!(!is_valid_name("a=b"));
        assert!(!is_valid_name("é"));
    }
}
