//! Keyed reads with a fallback.

use crate::error::Result;
use crate::value::{FromValue, Value};

impl Value {
    /// Reads `key` as `T`, returning `default` when the key is absent or
    /// holds Null. A present value of the wrong kind is still `BadType`.
    ///
    /// ```
    /// use json_value::{json_value, Value};
    ///
    /// let obj = json_value!({ "port": 8080, "host": null });
    /// assert_eq!(obj.get_optional("port", 80u16)?, 8080);
    /// assert_eq!(obj.get_optional("host", "localhost".to_string())?, "localhost");
    /// assert!(obj.get_optional("port", false).is_err());
    /// # Ok::<(), json_value::Error>(())
    /// ```
    pub fn get_optional<T: FromValue>(&self, key: &str, default: T) -> Result<T> {
        match self.as_object()?.get(key) {
            None | Some(Value::Null) => Ok(default),
            Some(value) => T::from_value(value),
        }
    }

    /// [`get_optional`](Value::get_optional) with `T::default()` as the
    /// fallback.
    pub fn get_optional_or_default<T: FromValue + Default>(&self, key: &str) -> Result<T> {
        self.get_optional(key, T::default())
    }
}
