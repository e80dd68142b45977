//! Container access on [`Value`].
//!
//! Read-only getters accept an empty container of the other kind, so an
//! empty Array can be read as an empty Object and the reverse. Mutable
//! getters go one step further and switch the kind of a flexible value
//! (undetermined, placeholder or empty) to the one they need. Once a
//! container holds an element its kind is fixed.

use std::collections::btree_map;
use std::slice;

use crate::error::{Error, Result};
use crate::types::Type;
use crate::value::{Map, Value};

static EMPTY_MAP: Map = Map::new();

impl Value {
    // ── Read-only ───────────────────────────────────────────────────────

    pub fn as_object(&self) -> Result<&Map> {
        match self {
            Value::Object(map) => Ok(map),
            Value::Undetermined(None) => Ok(&EMPTY_MAP),
            Value::Array(items) if items.is_empty() => Ok(&EMPTY_MAP),
            _ => Err(self.bad_type(Type::OBJECT)),
        }
    }

    pub fn as_array(&self) -> Result<&[Value]> {
        match self {
            Value::Array(items) => Ok(items),
            Value::Undetermined(None) => Ok(&[]),
            Value::Object(map) if map.is_empty() => Ok(&[]),
            _ => Err(self.bad_type(Type::ARRAY)),
        }
    }

    pub fn keys(&self) -> Result<impl Iterator<Item = &str>> {
        Ok(self.as_object()?.keys().map(String::as_str))
    }

    pub fn entries(&self) -> Result<btree_map::Iter<'_, String, Value>> {
        Ok(self.as_object()?.iter())
    }

    pub fn elements(&self) -> Result<slice::Iter<'_, Value>> {
        Ok(self.as_array()?.iter())
    }

    /// Member lookup. A missing key is `KeyNotFound`.
    pub fn at(&self, key: &str) -> Result<&Value> {
        self.as_object()?
            .get(key)
            .ok_or_else(|| Error::key_not_found(key))
    }

    /// Element lookup. An index past the end is `OutOfRange`.
    pub fn at_index(&self, index: usize) -> Result<&Value> {
        let items = self.as_array()?;
        items
            .get(index)
            .ok_or_else(|| Error::index_out_of_range(index, items.len()))
    }

    pub fn contains_key(&self, key: &str) -> Result<bool> {
        Ok(self.as_object()?.contains_key(key))
    }

    /// Number of members or elements. Scalars have no length.
    pub fn len(&self) -> Result<usize> {
        match self {
            Value::Array(items) => Ok(items.len()),
            Value::Object(map) => Ok(map.len()),
            Value::Undetermined(None) => Ok(0),
            _ => Err(self.bad_type(Type::CONTAINER)),
        }
    }

    // ── Coercion ────────────────────────────────────────────────────────

    /// Turns a flexible value into an empty Object. Placeholders are
    /// materialized.
    fn coerce_object(&mut self) -> Result<&mut Map> {
        if !matches!(self, Value::Object(_)) {
            if !self.is_flexible() {
                return Err(self.bad_type(Type::OBJECT));
            }
            *self = Value::Object(Map::new());
        }
        match self {
            Value::Object(map) => Ok(map),
            _ => Err(self.bad_type(Type::OBJECT)),
        }
    }

    fn coerce_array(&mut self) -> Result<&mut Vec<Value>> {
        if !matches!(self, Value::Array(_)) {
            if !self.is_flexible() {
                return Err(self.bad_type(Type::ARRAY));
            }
            *self = Value::Array(Vec::new());
        }
        match self {
            Value::Array(items) => Ok(items),
            _ => Err(self.bad_type(Type::ARRAY)),
        }
    }

    /// The members of an Object, fixing the kind of a flexible value to
    /// Object first.
    pub fn as_object_mut(&mut self) -> Result<&mut Map> {
        self.coerce_object()
    }

    /// The elements of an Array, fixing the kind of a flexible value to
    /// Array first.
    pub fn as_array_mut(&mut self) -> Result<&mut Vec<Value>> {
        self.coerce_array()
    }

    // ── Mutable ─────────────────────────────────────────────────────────

    pub fn entries_mut(&mut self) -> Result<btree_map::IterMut<'_, String, Value>> {
        Ok(self.as_object_mut()?.iter_mut())
    }

    pub fn elements_mut(&mut self) -> Result<slice::IterMut<'_, Value>> {
        Ok(self.as_array_mut()?.iter_mut())
    }

    /// The slot for `key`, inserting a placeholder when the key is absent.
    ///
    /// The placeholder stays in the Object. Reading it fails with
    /// `KeyNotFound(key)` until a value is assigned.
    pub fn at_mut(&mut self, key: &str) -> Result<&mut Value> {
        Ok(self
            .coerce_object()?
            .entry(key.to_owned())
            .or_insert_with(|| Value::placeholder(key)))
    }

    /// The element at `index`. Never grows the Array.
    pub fn at_index_mut(&mut self, index: usize) -> Result<&mut Value> {
        match self {
            Value::Array(items) => {
                let len = items.len();
                items
                    .get_mut(index)
                    .ok_or_else(|| Error::index_out_of_range(index, len))
            }
            Value::Undetermined(Some(placeholder)) => {
                Err(Error::key_not_found(placeholder.key()))
            }
            other if other.is_flexible() => Err(Error::index_out_of_range(index, 0)),
            other => Err(Error::bad_type(Type::ARRAY, other.raw_type())),
        }
    }

    /// Appends to an Array and returns the new element. A flexible value
    /// becomes an Array; anything else that is not an Array is `BadType`.
    pub fn push(&mut self, value: impl Into<Value>) -> Result<&mut Value> {
        let items = self.coerce_array()?;
        items.push(value.into());
        let last = items.len() - 1;
        Ok(&mut items[last])
    }

    pub fn append<I>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.coerce_array()?.extend(values.into_iter().map(Into::into));
        Ok(())
    }

    /// Sets `key`, returning the previous value.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Option<Value>> {
        Ok(self.coerce_object()?.insert(key.into(), value.into()))
    }

    /// Removes `key`, returning its value if it was present. A placeholder
    /// has nothing to remove and fails with `KeyNotFound`.
    pub fn remove(&mut self, key: &str) -> Result<Option<Value>> {
        self.ensure_present()?;
        Ok(self.as_object_mut()?.remove(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_array_reads_as_object() {
        let v = Value::array();
        assert!(v.as_object().unwrap().is_empty());
        assert_eq!(v.keys().unwrap().count(), 0);
        assert!(!v.contains_key("a").unwrap());
    }

    #[test]
    fn test_non_empty_object_is_not_an_array() {
        let mut v = Value::new();
        v.insert("a", 1).unwrap();
        match v.as_array() {
            Err(Error::BadType { expected, actual }) => {
                assert_eq!(expected, Type::ARRAY);
                assert_eq!(actual, Type::OBJECT);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_at_mut_inserts_placeholder() {
        let mut v = Value::new();
        assert!(v.at_mut("x").unwrap().is_placeholder());
        assert!(v.contains_key("x").unwrap());
        assert!(v.at("x").unwrap().as_int().unwrap_err().is_key_not_found());
    }

    #[test]
    fn test_at_mut_flips_empty_array() {
        let mut v = Value::array();
        *v.at_mut("k").unwrap() = Value::from(1);
        assert!(v.is_object());
        assert_eq!(v.len().unwrap(), 1);
    }

    #[test]
    fn test_at_mut_on_filled_array_fails() {
        let mut v = Value::array();
        v.push(1).unwrap();
        assert!(matches!(v.at_mut("k"), Err(Error::BadType { .. })));
    }

    #[test]
    fn test_push_flips_empty_object() {
        let mut v = Value::object();
        v.push("a").unwrap();
        assert!(v.is_array());
        assert_eq!(v.at_index(0).unwrap().as_str().unwrap(), "a");
    }

    #[test]
    fn test_push_on_scalar_fails() {
        let mut v = Value::from(1);
        assert!(matches!(v.push(2), Err(Error::BadType { .. })));
    }

    #[test]
    fn test_push_materializes_placeholder() {
        let mut v = Value::new();
        v.at_mut("list").unwrap().push(true).unwrap();
        assert!(v.at("list").unwrap().is_array());
    }

    #[test]
    fn test_at_index_mut_never_grows() {
        let mut v = Value::new();
        assert!(v.at_index_mut(0).unwrap_err().is_out_of_range());
        v.push(1).unwrap();
        assert!(v.at_index_mut(1).unwrap_err().is_out_of_range());
        *v.at_index_mut(0).unwrap() = Value::from(5);
        assert_eq!(v.at_index(0).unwrap().as_int().unwrap(), 5);
    }

    #[test]
    fn test_len_of_scalar_fails() {
        match Value::from("s").len() {
            Err(Error::BadType { expected, .. }) => assert_eq!(expected, Type::CONTAINER),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_mutable_iteration_materializes_placeholder() {
        let mut v = Value::placeholder("p");
        assert_eq!(v.entries_mut().unwrap().count(), 0);
        assert!(v.is_object());

        let mut v = Value::placeholder("p");
        assert_eq!(v.elements_mut().unwrap().count(), 0);
        assert!(v.is_array());

        let mut v = Value::placeholder("p");
        assert!(v.remove("a").unwrap_err().is_key_not_found());
        assert!(v.is_placeholder());
    }

    #[test]
    fn test_remove() {
        let mut v = Value::new();
        v.insert("a", 1).unwrap();
        assert!(v.remove("a").unwrap().is_some());
        assert!(v.remove("a").unwrap().is_none());
        assert!(v.is_empty());
    }

    #[test]
    fn test_append() {
        let mut v = Value::new();
        v.append(vec![1, 2, 3]).unwrap();
        assert_eq!(v.len().unwrap(), 3);
        v.append(["x"]).unwrap();
        assert_eq!(v.at_index(3).unwrap().as_str().unwrap(), "x");
    }
}
