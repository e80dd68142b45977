//! Pointer resolution.
//!
//! Every token is first turned into a [`Step`] by looking at the current
//! node read-only; the step is then taken with the shared or the mutable
//! accessor, so both lookups follow the same rules.

use json_value::{Error, Result, Value};

use crate::pointer::Pointer;
use crate::util::{check_array_token, parse_index, split_property};

enum Step {
    Key(String),
    Index(usize),
}

/// True when `child` is an Object whose member `key` is a scalar printing as
/// `value`.
fn matches_property(child: &Value, key: &str, value: &str) -> bool {
    if !matches!(child, Value::Object(_)) {
        return false;
    }
    child
        .at(key)
        .and_then(Value::to_text)
        .is_ok_and(|text| text == value)
}

fn locate(node: &Value, token: &str) -> Result<Step> {
    node.ensure_present()?;
    let property = split_property(token);

    if node.is_object() {
        if node.contains_key(token)? {
            return Ok(Step::Key(token.to_owned()));
        }
        if let Some((key, value)) = property {
            let found = node
                .entries()?
                .find(|(_, child)| matches_property(child, key, value));
            if let Some((name, _)) = found {
                return Ok(Step::Key(name.clone()));
            }
        }
        return Err(Error::key_not_found(token));
    }

    if node.is_array() {
        check_array_token(token)?;
        if let Some((key, value)) = property {
            if let Some(index) = node
                .elements()?
                .position(|child| matches_property(child, key, value))
            {
                return Ok(Step::Index(index));
            }
        }
        return Ok(Step::Index(parse_index(token)?));
    }

    Err(Error::unresolved(token))
}

impl Pointer {
    /// Resolves this pointer against `target`.
    ///
    /// Object tokens are member names. When no member has that exact name
    /// and the token reads `key=value`, the first child (in key order) whose
    /// member `key` prints as `value` is taken instead. Array tokens are
    /// tried the same way as `key=value` before they are read as an index.
    ///
    /// # Errors
    ///
    /// - `KeyNotFound` for a missing member or a placeholder on the path.
    /// - `OutOfRange` for an index past the end or a token applied to a
    ///   scalar.
    /// - `Parse` for `-`, a leading `0`/`-` or a non-numeric array token.
    ///
    /// # Example
    ///
    /// ```
    /// use json_value::json_value;
    /// use json_value_pointer::Pointer;
    ///
    /// let doc = json_value!({
    ///     "people": [
    ///         {"name": "John Doe", "gender": "male"},
    ///         {"name": "Jane Doe", "gender": "female"}
    ///     ]
    /// });
    /// let jane = Pointer::new("/people/gender=female/name")?.get_reference(&doc)?;
    /// assert_eq!(jane.as_str()?, "Jane Doe");
    /// assert_eq!(Pointer::new("/people/0/name")?.get_reference(&doc)?.as_str()?, "John Doe");
    /// # Ok::<(), json_value::Error>(())
    /// ```
    pub fn get_reference<'a>(&self, target: &'a Value) -> Result<&'a Value> {
        let mut node = target;
        for token in self.tokens() {
            node = match locate(node, token)? {
                Step::Key(key) => node.at(&key)?,
                Step::Index(index) => node.at_index(index)?,
            };
        }
        node.ensure_present()
    }

    /// Mutable counterpart of [`get_reference`](Self::get_reference). Never
    /// inserts anything.
    pub fn resolve_mut<'a>(&self, target: &'a mut Value) -> Result<&'a mut Value> {
        let mut node = target;
        for token in self.tokens() {
            node = match locate(node, token)? {
                Step::Key(key) => node
                    .as_object_mut()?
                    .get_mut(&key)
                    .ok_or_else(|| Error::key_not_found(key.as_str()))?,
                Step::Index(index) => node.at_index_mut(index)?,
            };
        }
        node.ensure_present()?;
        Ok(node)
    }

    /// Whether this pointer resolves in `target`. A missing member or index
    /// is `false`; malformed tokens are still errors.
    pub fn is_valid_for(&self, target: &Value) -> Result<bool> {
        match self.get_reference(target) {
            Ok(_) => Ok(true),
            Err(err) if err.is_key_not_found() || err.is_out_of_range() => {
                tracing::trace!(pointer = %self, error = %err, "pointer does not resolve");
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }
}
