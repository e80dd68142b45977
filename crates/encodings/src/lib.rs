//! Byte-level text helpers used by the `json-value` crates.
//!
//! Everything in here is infallible: malformed input is repaired with a
//! replacement marker instead of being rejected.
//!
//! # Example
//!
//! ```
//! use json_value_encodings::{from_base64, sanitize_utf8, to_base64, utf8_to_wide, wide_to_utf8};
//!
//! // A truncated three byte sequence is replaced by a single `?`.
//! assert_eq!(sanitize_utf8(b"ab\xe2\x82"), b"ab?");
//!
//! let wide = utf8_to_wide("caf\u{e9}".as_bytes());
//! assert_eq!(wide, vec![0x63, 0x61, 0x66, 0xe9]);
//! assert_eq!(wide_to_utf8(&wide), "caf\u{e9}".as_bytes());
//!
//! assert_eq!(to_base64(b"hello"), "aGVsbG8=");
//! assert_eq!(from_base64("aGVsbG8="), b"hello");
//! ```

mod b64;
mod sanitize;
mod wide;

pub use b64::{from_base64, to_base64};
pub use sanitize::{sanitize_utf8, sanitize_utf8_str, REPLACEMENT_BYTE};
pub use wide::{utf8_to_wide, wide_to_string, wide_to_utf8, REPLACEMENT_CHAR};
