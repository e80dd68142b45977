use std::ops::{Index, IndexMut};

use crate::value::Value;

/// Panics when `key` is missing or the value is not an Object. Use
/// [`Value::at`] for a fallible lookup.
impl Index<&str> for Value {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        match self.at(key) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

/// Inserts a placeholder for a missing key, see [`Value::at_mut`].
impl IndexMut<&str> for Value {
    fn index_mut(&mut self, key: &str) -> &mut Value {
        match self.at_mut(key) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl Index<usize> for Value {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        match self.at_index(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl IndexMut<usize> for Value {
    fn index_mut(&mut self, index: usize) -> &mut Value {
        match self.at_index_mut(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::value::Value;

    #[test]
    fn test_assign_through_index() {
        let mut v = Value::new();
        v["a"]["b"] = 1.into();
        assert_eq!(v["a"]["b"], 1i64);
    }

    #[test]
    fn test_placeholder_then_assign() {
        let mut v = Value::new();
        let slot = &mut v["missing"];
        assert!(slot.as_bool().unwrap_err().is_key_not_found());
        v["missing"] = true.into();
        assert!(v["missing"].as_bool().unwrap());
    }

    #[test]
    #[should_panic(expected = "Key 'nope' does not exist")]
    fn test_index_missing_key_panics() {
        let v = Value::new();
        let _ = &v["nope"];
    }

    #[test]
    #[should_panic(expected = "Index 2 out of range (len 1)")]
    fn test_index_out_of_range_panics() {
        let mut v = Value::new();
        v.push(1).unwrap();
        let _ = &v[2];
    }
}
