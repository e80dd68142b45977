//! The [`Value`] tree and its scalar accessors.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::types::Type;

mod access;
mod convert;
mod index;
pub(crate) mod number;
mod optional;

pub use convert::{FromValue, IntCast};

/// Object storage. Keys iterate in lexicographic order.
pub type Map = BTreeMap<String, Value>;

/// Marker left in a parent by a mutable lookup of a missing key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    key: String,
}

impl Placeholder {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// The key whose lookup created this placeholder.
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Any JSON value.
///
/// `Undetermined(None)` is what [`Value::default`] builds: an empty container
/// that reports itself as an Object but turns into an Array on the first
/// array-style access. `Undetermined(Some(_))` is a placeholder; reading it
/// fails with [`Error::KeyNotFound`] until something is assigned to it.
///
/// ```
/// use json_value::{Type, Value};
///
/// let mut doc = Value::new();
/// doc["name"] = "Miguel".into();
/// doc["tags"].push("a")?;
///
/// assert_eq!(doc.kind()?, Type::OBJECT);
/// assert_eq!(doc["tags"].kind()?, Type::ARRAY);
/// assert!(doc.at_mut("missing")?.as_bool().is_err());
/// # Ok::<(), json_value::Error>(())
/// ```
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    Double(f64),
    String(String),
    Array(Vec<Value>),
    Object(Map),
    Undetermined(Option<Placeholder>),
}

impl Default for Value {
    fn default() -> Self {
        Value::Undetermined(None)
    }
}

impl Value {
    /// An empty, type-flexible container.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn null() -> Self {
        Value::Null
    }

    /// An empty Array with its kind already fixed.
    pub fn array() -> Self {
        Value::Array(Vec::new())
    }

    /// An empty Object with its kind already fixed.
    pub fn object() -> Self {
        Value::Object(Map::new())
    }

    pub(crate) fn placeholder(key: &str) -> Self {
        Value::Undetermined(Some(Placeholder::new(key)))
    }

    /// The kind this value reports without checking for a placeholder.
    /// Undetermined values report `Object`.
    pub fn raw_type(&self) -> Type {
        match self {
            Value::Null => Type::NULL,
            Value::Boolean(_) => Type::BOOLEAN,
            Value::Integer(_) => Type::INTEGER,
            Value::Double(_) => Type::DOUBLE,
            Value::String(_) => Type::STRING,
            Value::Array(_) => Type::ARRAY,
            Value::Object(_) | Value::Undetermined(_) => Type::OBJECT,
        }
    }

    /// Fails with `KeyNotFound` when this value is a placeholder.
    pub fn ensure_present(&self) -> Result<&Self> {
        match self {
            Value::Undetermined(Some(placeholder)) => {
                Err(Error::key_not_found(placeholder.key()))
            }
            _ => Ok(self),
        }
    }

    pub fn kind(&self) -> Result<Type> {
        self.ensure_present().map(Value::raw_type)
    }

    pub(crate) fn bad_type(&self, expected: Type) -> Error {
        match self {
            Value::Undetermined(Some(placeholder)) => Error::key_not_found(placeholder.key()),
            _ => Error::bad_type(expected, self.raw_type()),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Value::Undetermined(Some(_)))
    }

    /// Undetermined, or an empty Array or Object: the container kind can
    /// still change.
    pub fn is_flexible(&self) -> bool {
        match self {
            Value::Undetermined(_) => true,
            Value::Array(items) => items.is_empty(),
            Value::Object(map) => map.is_empty(),
            _ => false,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, Value::Boolean(_))
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Value::Integer(_))
    }

    pub fn is_double(&self) -> bool {
        matches!(self, Value::Double(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Double(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_) | Value::Undetermined(None))
    }

    /// True for empty containers and undetermined values; false for scalars.
    pub fn is_empty(&self) -> bool {
        self.is_flexible()
    }

    // ── Scalars ─────────────────────────────────────────────────────────

    pub fn as_bool(&self) -> Result<bool> {
        match self {
            Value::Boolean(b) => Ok(*b),
            _ => Err(self.bad_type(Type::BOOLEAN)),
        }
    }

    pub fn as_int(&self) -> Result<i64> {
        match self {
            Value::Integer(i) => Ok(*i),
            _ => Err(self.bad_type(Type::INTEGER)),
        }
    }

    /// Reads a Double, widening an Integer.
    pub fn as_double(&self) -> Result<f64> {
        match self {
            Value::Double(d) => Ok(*d),
            Value::Integer(i) => Ok(*i as f64),
            _ => Err(self.bad_type(Type::DOUBLE)),
        }
    }

    pub fn as_str(&self) -> Result<&str> {
        match self {
            Value::String(s) => Ok(s),
            _ => Err(self.bad_type(Type::STRING)),
        }
    }

    /// Reads an Integer and casts it to a narrower integer type. The cast
    /// wraps like `as`.
    ///
    /// ```
    /// use json_value::Value;
    ///
    /// assert_eq!(Value::from(300).as_int_as::<u8>()?, 44);
    /// assert_eq!(Value::from(-1).as_int_as::<i16>()?, -1);
    /// # Ok::<(), json_value::Error>(())
    /// ```
    pub fn as_int_as<T: IntCast>(&self) -> Result<T> {
        self.as_int().map(T::cast)
    }

    /// Forced string form of a scalar: `null`, `true`/`false`, the number
    /// text or the string itself.
    ///
    /// ```
    /// use json_value::Value;
    ///
    /// assert_eq!(Value::Null.to_text()?, "null");
    /// assert_eq!(Value::from(2.0).to_text()?, "2.0");
    /// assert_eq!(Value::from("x").to_text()?, "x");
    /// assert!(Value::array().to_text().is_err());
    /// # Ok::<(), json_value::Error>(())
    /// ```
    pub fn to_text(&self) -> Result<String> {
        match self {
            Value::Null => Ok("null".to_owned()),
            Value::Boolean(b) => Ok(b.to_string()),
            Value::Integer(i) => Ok(i.to_string()),
            Value::Double(d) => Ok(number::format_double(*d)),
            Value::String(s) => Ok(s.clone()),
            _ => Err(self.bad_type(
                Type::NULL | Type::BOOLEAN | Type::NUMBER | Type::STRING,
            )),
        }
    }
}

/// Scalars compare by value. Containers and placeholders are never equal,
/// not even to themselves.
impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            _ => false,
        }
    }
}

macro_rules! partial_eq_scalar {
    ($($variant:ident($t:ty)),*) => {
        $(
            impl PartialEq<$t> for Value {
                fn eq(&self, other: &$t) -> bool {
                    matches!(self, Value::$variant(v) if v == other)
                }
            }

            impl PartialEq<$t> for &Value {
                fn eq(&self, other: &$t) -> bool {
                    <Value as PartialEq<$t>>::eq(&**self, other)
                }
            }

            impl PartialEq<$t> for &mut Value {
                fn eq(&self, other: &$t) -> bool {
                    <Value as PartialEq<$t>>::eq(&**self, other)
                }
            }
        )*
    };
}

partial_eq_scalar!(Boolean(bool), Integer(i64), Double(f64));

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        matches!(self, Value::String(s) if s == other)
    }
}

impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        matches!(self, Value::String(s) if s == other)
    }
}

impl PartialEq<String> for Value {
    fn eq(&self, other: &String) -> bool {
        matches!(self, Value::String(s) if s == other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_flexible_object() {
        let v = Value::new();
        assert_eq!(v.kind().unwrap(), Type::OBJECT);
        assert!(v.is_object());
        assert!(v.is_empty());
        assert!(v.is_flexible());
        assert!(!v.is_placeholder());
    }

    #[test]
    fn test_placeholder_reads_fail() {
        let v = Value::placeholder("missing");
        assert!(v.is_placeholder());
        assert!(!v.is_object());
        for err in [
            v.kind().err(),
            v.as_bool().err(),
            v.as_int().err(),
            v.as_str().err(),
            v.to_text().err(),
        ] {
            match err {
                Some(Error::KeyNotFound { key }) => assert_eq!(key, "missing"),
                other => panic!("unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn test_scalar_getters() {
        assert!(Value::Boolean(true).as_bool().unwrap());
        assert_eq!(Value::Integer(-7).as_int().unwrap(), -7);
        assert_eq!(Value::Integer(3).as_double().unwrap(), 3.0);
        assert_eq!(Value::Double(0.5).as_double().unwrap(), 0.5);
        assert_eq!(Value::String("x".into()).as_str().unwrap(), "x");
    }

    #[test]
    fn test_double_does_not_narrow() {
        match Value::Double(1.0).as_int() {
            Err(Error::BadType { expected, actual }) => {
                assert_eq!(expected, Type::INTEGER);
                assert_eq!(actual, Type::DOUBLE);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_bad_type_reports_object_for_undetermined() {
        match Value::new().as_str() {
            Err(Error::BadType { actual, .. }) => assert_eq!(actual, Type::OBJECT),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_to_text() {
        assert_eq!(Value::Boolean(false).to_text().unwrap(), "false");
        assert_eq!(Value::Integer(42).to_text().unwrap(), "42");
        assert_eq!(Value::Double(2.5).to_text().unwrap(), "2.5");
        assert!(Value::object().to_text().is_err());
    }

    #[test]
    fn test_scalar_equality() {
        assert_eq!(Value::Null, Value::Null);
        assert_eq!(Value::Integer(1), Value::Integer(1));
        assert_ne!(Value::Integer(1), Value::Double(1.0));
        assert_ne!(Value::Integer(1), Value::Integer(2));
        assert_eq!(Value::String("a".into()), "a");
        assert_eq!(Value::Boolean(true), true);
    }

    #[test]
    fn test_containers_never_equal() {
        assert_ne!(Value::array(), Value::array());
        assert_ne!(Value::object(), Value::object());
        let v = Value::new();
        assert_ne!(v, v.clone());
        assert_ne!(Value::placeholder("k"), Value::placeholder("k"));
    }
}
