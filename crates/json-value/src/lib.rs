//! In-memory JSON values.
//!
//! [`Value`] is a tagged tree of JSON data with two twists: a mutable lookup
//! of a missing key leaves a placeholder behind instead of failing, and an
//! empty container does not commit to being an Array or an Object until it
//! is used as one.
//!
//! # Example
//!
//! ```
//! use json_value::{json_value, Value};
//!
//! let mut person = Value::new();
//! person["name"] = "Miguel".into();
//! person["age"] = 40.into();
//! person["langs"].push("es")?;
//! person["langs"].push("en")?;
//!
//! assert_eq!(
//!     person.stringify(false)?,
//!     r#"{"age":40,"langs":["es","en"],"name":"Miguel"}"#
//! );
//!
//! let parsed: Value = r#"{"age": 40}"#.parse()?;
//! assert_eq!(parsed["age"], person["age"]);
//!
//! // Containers are never equal, even to an identical copy.
//! assert_ne!(json_value!([1]), json_value!([1]));
//! # Ok::<(), json_value::Error>(())
//! ```

mod error;
pub mod io;
mod macros;
mod types;
pub mod value;

pub use error::{Error, Location, Result};
pub use io::{from_reader, parse, parse_bytes, ParseOptions};
pub use types::Type;
pub use value::{FromValue, IntCast, Map, Placeholder, Value};
