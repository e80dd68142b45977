//! Parsing and printing through the [`Event`] protocol.
//!
//! Text goes through a [`Tokenizer`] into a [`TreeBuilder`]; a document the
//! tokenizer rejects gets a second chance as a bare scalar. Printing walks
//! the tree with [`emit`] into a [`Printer`].
//!
//! ```
//! use json_value::Value;
//!
//! let v = json_value::parse(r#"{"name": "Miguel", "age": 40}"#)?;
//! assert_eq!(v["age"], 40i64);
//! assert_eq!(v.stringify(false)?, r#"{"age":40,"name":"Miguel"}"#);
//!
//! assert_eq!(json_value::parse("42")?, 42i64);
//! assert!(json_value::parse("[1, 2").is_err());
//! # Ok::<(), json_value::Error>(())
//! ```

use std::fmt;
use std::io;
use std::str::FromStr;

use json_value_encodings::sanitize_utf8;

use crate::error::{Error, Result};
use crate::value::Value;

mod builder;
mod event;
mod fallback;
mod lexer;
mod location;
mod options;
mod printer;
mod tokenizer;

pub use builder::TreeBuilder;
pub use event::{Event, EventSink};
pub use fallback::pseudo_parse;
pub use lexer::Lexer;
pub use location::locate;
pub use options::ParseOptions;
pub use printer::{emit, emit_lenient, Printer};
pub use tokenizer::{TokenizeError, Tokenized, Tokenizer};

/// Parses `input` with `tokenizer`, falling back to [`pseudo_parse`] when
/// the tokenizer fails or stops early.
pub fn parse_with<T: Tokenizer + ?Sized>(input: &[u8], tokenizer: &mut T) -> Result<Value> {
    let mut builder = TreeBuilder::new();
    let outcome = tokenizer.feed(input, &mut builder);
    if outcome.error.is_none() && tokenizer.is_done() {
        if let Some(value) = builder.finish() {
            return Ok(value);
        }
    }

    if let Some(value) = std::str::from_utf8(input).ok().and_then(pseudo_parse) {
        tracing::debug!(len = input.len(), "document read as a bare scalar");
        return Ok(value);
    }

    let code = outcome.error.unwrap_or(TokenizeError::Incomplete);
    let location = locate(input, outcome.processed);
    tracing::debug!(
        line = location.line,
        column = location.column,
        error = %code,
        "parse failed"
    );
    Err(Error::parse_at(code.to_string(), location.line, location.column))
}

/// Parses bytes with custom limits. Malformed UTF-8 is repaired first, the
/// way [`sanitize_utf8`] does.
pub fn parse_bytes_with(input: &[u8], options: ParseOptions) -> Result<Value> {
    let clean = sanitize_utf8(input);
    parse_with(&clean, &mut Lexer::new(options))
}

pub fn parse_bytes(input: &[u8]) -> Result<Value> {
    parse_bytes_with(input, ParseOptions::default())
}

pub fn parse(text: &str) -> Result<Value> {
    parse_with(text.as_bytes(), &mut Lexer::default())
}

pub fn parse_with_options(text: &str, options: ParseOptions) -> Result<Value> {
    parse_with(text.as_bytes(), &mut Lexer::new(options))
}

/// Reads `reader` to the end and parses the bytes.
pub fn from_reader<R: io::Read>(mut reader: R) -> Result<Value> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    parse_bytes(&buf)
}

impl Value {
    /// Parses `text` into a new value.
    pub fn parse_str(text: &str) -> Result<Value> {
        parse(text)
    }

    /// Replaces `self` with the document in `text`. On failure `self` is
    /// left untouched.
    pub fn parse(&mut self, text: &str) -> Result<&mut Self> {
        *self = parse(text)?;
        Ok(self)
    }

    pub fn parse_bytes(&mut self, input: &[u8]) -> Result<&mut Self> {
        *self = parse_bytes(input)?;
        Ok(self)
    }

    pub fn parse_reader<R: io::Read>(&mut self, reader: R) -> Result<&mut Self> {
        *self = from_reader(reader)?;
        Ok(self)
    }

    /// Writes the JSON text of this value to `writer`.
    pub fn write_to<W: io::Write>(&self, writer: W, pretty: bool) -> Result<()> {
        let mut printer = Printer::new(writer, pretty);
        emit(self, &mut printer)
    }

    /// The JSON text of this value. Fails with `KeyNotFound` if the tree
    /// holds a placeholder.
    pub fn stringify(&self, pretty: bool) -> Result<String> {
        let mut buf = Vec::new();
        self.write_to(&mut buf, pretty)?;
        String::from_utf8(buf)
            .map_err(|err| Error::Io(io::Error::new(io::ErrorKind::InvalidData, err)))
    }
}

impl FromStr for Value {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse(s)
    }
}

/// Compact JSON; `{:#}` gives the pretty form. Placeholders print as
/// `null`; use [`Value::stringify`] to reject them.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut printer = Printer::new(Vec::new(), f.alternate());
        emit_lenient(self, &mut printer).map_err(|_| fmt::Error)?;
        let buf = printer.into_inner();
        f.write_str(&String::from_utf8_lossy(&buf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_array() {
        let v = parse("[10,20,30,40]").unwrap();
        assert_eq!(v.len().unwrap(), 4);
        for (i, expected) in [10i64, 20, 30, 40].into_iter().enumerate() {
            assert_eq!(v[i], expected);
        }
        assert_eq!(v.stringify(false).unwrap(), "[10,20,30,40]");
    }

    #[test]
    fn test_parse_object_roundtrip() {
        let text = r#"{"age":40,"name":"\"Miguel\""}"#;
        let v = parse(text).unwrap();
        assert_eq!(v["age"], 40i64);
        assert_eq!(v["name"], "\"Miguel\"");
        assert_eq!(v.to_string(), text);
    }

    #[test]
    fn test_scalar_documents() {
        assert!(parse("null").unwrap().is_null());
        assert_eq!(parse(" true ").unwrap(), true);
        assert_eq!(parse("-12").unwrap(), -12i64);
        assert_eq!(parse("2.5").unwrap(), 2.5f64);
        assert_eq!(parse("\"plain\"").unwrap(), "plain");
    }

    #[test]
    fn test_error_location() {
        let err = parse("{\n  \"a\": 1,\n  x: 2\n}").unwrap_err();
        match err {
            Error::Parse {
                message,
                location: Some(location),
            } => {
                assert_eq!(message, "unexpected char in the current parser context");
                assert_eq!((location.line, location.column), (3, 3));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_incomplete() {
        let err = parse("[1, 2").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Parse error at (line 1, column 6): incomplete json"
        );
    }

    #[test]
    fn test_parse_in_place_keeps_value_on_error() {
        let mut v = Value::from(1);
        assert!(v.parse("[").is_err());
        assert_eq!(v, 1i64);
        v.parse("[true]").unwrap();
        assert_eq!(v[0], true);
    }

    #[test]
    fn test_parse_bytes_sanitizes() {
        let v = parse_bytes(b"[\"caf\xc3\xa9 \xff\"]").unwrap();
        assert_eq!(v[0], "caf\u{e9} ?");
    }

    #[test]
    fn test_surrogate_bytes_are_rejected() {
        let err = parse_bytes(b"[\"\xed\xa0\x80\"]").unwrap_err();
        assert!(err.to_string().ends_with("utf8 stream is invalid"));
    }

    #[test]
    fn test_from_reader() {
        let v = from_reader(&b"{\"k\": [1, 2]}"[..]).unwrap();
        assert_eq!(v["k"][1], 2i64);
    }

    #[test]
    fn test_display_pretty() {
        let v = parse(r#"{"a":[1]}"#).unwrap();
        assert_eq!(format!("{v:#}"), "{\n  \"a\": [\n    1\n  ]\n}");
    }

    #[test]
    fn test_stringify_placeholder_fails() {
        let mut v = Value::new();
        v.at_mut("ghost").unwrap();
        assert!(v.stringify(false).unwrap_err().is_key_not_found());
    }

    #[test]
    fn test_from_str() {
        let v: Value = "[1]".parse().unwrap();
        assert!(v.is_array());
    }

    #[test]
    fn test_custom_tokenizer_options() {
        let err = parse_with_options("[1] // c", ParseOptions::strict()).unwrap_err();
        assert!(err.to_string().contains("comment are not allowed"));
    }

    #[test]
    fn test_display_prints_placeholder_as_null() {
        let mut v = Value::new();
        v.at_mut("ghost").unwrap();
        v["name"] = "n".into();
        assert_eq!(v.to_string(), r#"{"ghost":null,"name":"n"}"#);
        assert_eq!(format!("{v:#}"), "{\n  \"ghost\": null,\n  \"name\": \"n\"\n}");
        assert!(v.stringify(false).unwrap_err().is_key_not_found());
        assert!(v.at("ghost").unwrap().is_placeholder());
    }
}
