//! Conversions into and out of [`Value`].

use json_value_encodings::{sanitize_utf8_str, utf8_to_wide, wide_to_string};

use crate::error::{Error, Result};
use crate::types::Type;
use crate::value::{Map, Value};

// ── Into Value ──────────────────────────────────────────────────────────

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

macro_rules! from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(i: $t) -> Self {
                    Value::Integer(i64::from(i))
                }
            }
        )*
    };
}

from_integer!(i8, i16, i32, i64, u8, u16, u32);

/// Wraps values above `i64::MAX`, like the `as` cast.
impl From<u64> for Value {
    fn from(i: u64) -> Self {
        Value::Integer(i as i64)
    }
}

impl From<usize> for Value {
    fn from(i: usize) -> Self {
        Value::Integer(i as i64)
    }
}

impl From<f32> for Value {
    fn from(d: f32) -> Self {
        Value::Double(f64::from(d))
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::Double(d)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::String(s.clone())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Object(map)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::Array(iter.into_iter().collect())
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Value::Object(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl Value {
    /// A String built from wide code units.
    pub fn from_wide(units: &[u32]) -> Self {
        Value::String(wide_to_string(units))
    }

    /// The code points of a String, one unit each. Other kinds are
    /// `BadType(String)`.
    pub fn to_wide(&self) -> Result<Vec<u32>> {
        Ok(utf8_to_wide(self.as_str()?.as_bytes()))
    }

    /// A String built from untrusted bytes; malformed UTF-8 sequences are
    /// replaced with `?`.
    pub fn from_bytes_lossy(bytes: &[u8]) -> Self {
        Value::String(sanitize_utf8_str(bytes))
    }
}

// ── serde_json interop ──────────────────────────────────────────────────

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Boolean(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => Value::Double(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

/// Placeholders and undetermined values become empty objects; non-finite
/// doubles become `null`.
impl From<&Value> for serde_json::Value {
    fn from(v: &Value) -> Self {
        match v {
            Value::Null => serde_json::Value::Null,
            Value::Boolean(b) => serde_json::Value::Bool(*b),
            Value::Integer(i) => serde_json::Value::from(*i),
            Value::Double(d) => serde_json::Number::from_f64(*d)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Array(items) => {
                serde_json::Value::Array(items.iter().map(serde_json::Value::from).collect())
            }
            Value::Object(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), serde_json::Value::from(v)))
                    .collect(),
            ),
            Value::Undetermined(_) => serde_json::Value::Object(serde_json::Map::new()),
        }
    }
}

// ── Out of Value ────────────────────────────────────────────────────────

/// Wrapping conversion from the stored `i64`.
pub trait IntCast: Sized {
    fn cast(i: i64) -> Self;
}

macro_rules! int_cast {
    ($($t:ty),*) => {
        $(
            impl IntCast for $t {
                #[inline]
                fn cast(i: i64) -> Self {
                    i as $t
                }
            }
        )*
    };
}

int_cast!(i8, i16, i32, i64, u8, u16, u32, u64, isize, usize);

/// Types that can be read out of a scalar [`Value`].
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Result<Self>;
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Result<Self> {
        value.as_bool()
    }
}

macro_rules! from_value_int {
    ($($t:ty),*) => {
        $(
            impl FromValue for $t {
                fn from_value(value: &Value) -> Result<Self> {
                    value.as_int_as::<$t>()
                }
            }
        )*
    };
}

from_value_int!(i8, i16, i32, i64, u8, u16, u32, u64, isize, usize);

impl FromValue for f64 {
    fn from_value(value: &Value) -> Result<Self> {
        value.as_double()
    }
}

impl FromValue for f32 {
    fn from_value(value: &Value) -> Result<Self> {
        value.as_double().map(|d| d as f32)
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self> {
        value.as_str().map(str::to_owned)
    }
}

/// Any value, cloned. Placeholders still fail.
impl FromValue for Value {
    fn from_value(value: &Value) -> Result<Self> {
        value.ensure_present().cloned()
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: &Value) -> Result<Self> {
        value.elements()?.map(T::from_value).collect()
    }
}

impl Value {
    /// Reads this value as `T`.
    ///
    /// ```
    /// use json_value::Value;
    ///
    /// let v: Value = vec![Value::from(1), Value::from(2)].into();
    /// assert_eq!(v.convert::<Vec<u8>>()?, vec![1, 2]);
    /// # Ok::<(), json_value::Error>(())
    /// ```
    pub fn convert<T: FromValue>(&self) -> Result<T> {
        T::from_value(self)
    }
}

impl TryFrom<&Value> for bool {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self> {
        value.as_bool()
    }
}

impl TryFrom<&Value> for i64 {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self> {
        value.as_int()
    }
}

impl TryFrom<&Value> for f64 {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self> {
        value.as_double()
    }
}

impl TryFrom<&Value> for String {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self> {
        value.as_str().map(str::to_owned)
    }
}

impl TryFrom<Value> for Map {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(map),
            Value::Undetermined(None) => Ok(Map::new()),
            Value::Array(items) if items.is_empty() => Ok(Map::new()),
            other => Err(other.bad_type(Type::OBJECT)),
        }
    }
}

impl TryFrom<Value> for Vec<Value> {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Array(items) => Ok(items),
            Value::Undetermined(None) => Ok(Vec::new()),
            Value::Object(map) if map.is_empty() => Ok(Vec::new()),
            other => Err(other.bad_type(Type::ARRAY)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_scalars() {
        assert_eq!(Value::from(true), true);
        assert_eq!(Value::from(7u8), 7i64);
        assert_eq!(Value::from(-7i32), -7i64);
        assert_eq!(Value::from(1.5f32), 1.5f64);
        assert_eq!(Value::from("s"), "s");
        assert!(Value::from(None::<i32>).is_null());
        assert_eq!(Value::from(Some(3)), 3i64);
    }

    #[test]
    fn test_from_u64_wraps() {
        assert_eq!(Value::from(u64::MAX), -1i64);
    }

    #[test]
    fn test_collect() {
        let arr: Value = (1..=3).map(Value::from).collect();
        assert_eq!(arr.len().unwrap(), 3);

        let obj: Value = vec![("b", Value::from(2)), ("a", Value::from(1))]
            .into_iter()
            .collect();
        assert_eq!(obj.keys().unwrap().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_from_wide_and_lossy() {
        assert_eq!(Value::from_wide(&[0x68, 0xe9]), "h\u{e9}");
        assert_eq!(Value::from_bytes_lossy(b"ok\xff"), "ok?");
    }

    #[test]
    fn test_to_wide() {
        let v = Value::from("h\u{e9}\u{1f600}");
        assert_eq!(v.to_wide().unwrap(), vec![0x68, 0xe9, 0x1f600]);
        assert_eq!(Value::from_wide(&v.to_wide().unwrap()), v);
        assert_eq!(Value::from("").to_wide().unwrap(), Vec::<u32>::new());
        match Value::from(1).to_wide() {
            Err(Error::BadType { expected, .. }) => assert_eq!(expected, Type::STRING),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_serde_json_interop() {
        let src = serde_json::json!({"a": [1, 2.5, "x", null, true]});
        let v = Value::from(src.clone());
        assert!(v.at("a").unwrap().at_index(1).unwrap().is_double());
        assert_eq!(serde_json::Value::from(&v), src);
    }

    #[test]
    fn test_convert_wraps_integers() {
        assert_eq!(Value::from(-1).convert::<u32>().unwrap(), u32::MAX);
        assert_eq!(Value::from(1).convert::<f64>().unwrap(), 1.0);
        assert!(Value::from(1.5).convert::<i64>().is_err());
    }

    #[test]
    fn test_try_from_containers() {
        assert!(Map::try_from(Value::array()).unwrap().is_empty());
        assert!(Vec::<Value>::try_from(Value::from(1)).is_err());
    }
}
