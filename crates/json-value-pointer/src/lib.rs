//! JSON Pointer (RFC 6901) over [`json_value::Value`].
//!
//! Besides plain member names and array indices, a reference token may read
//! `key=value`: it then selects the first child whose member `key` is a
//! scalar printing as `value`.
//!
//! # Example
//!
//! ```
//! use json_value::json_value;
//! use json_value_pointer::{Pointer, PointerExt};
//!
//! let doc = json_value!({
//!     "name": "John Doe",
//!     "address": {"street": "Maple Avenue", "number": 125}
//! });
//!
//! let number = doc.pointer(&Pointer::new("/address/number")?)?;
//! assert_eq!(number.as_int()?, 125);
//!
//! let address = doc.pointer(&Pointer::new("/street=Maple Avenue")?)?;
//! assert_eq!(address["number"], 125i64);
//! # Ok::<(), json_value::Error>(())
//! ```

mod ext;
mod find;
mod pointer;
mod util;

pub use ext::PointerExt;
pub use pointer::Pointer;
pub use util::{escape_token, unescape_token};
