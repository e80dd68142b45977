use json_value::{Error, Result, Type, Value};

use crate::pointer::Pointer;

/// Pointer lookups as methods on [`Value`].
///
/// ```
/// use json_value::json_value;
/// use json_value_pointer::{Pointer, PointerExt};
///
/// let mut doc = json_value!({"servlet": [{"name": "cofax"}, {"name": "file"}]});
/// let pointer: Pointer = "/servlet/name=file".parse()?;
///
/// assert!(doc.exists(&pointer)?);
/// doc.pointer_mut(&pointer)?.insert("class", "FileServlet")?;
/// assert_eq!(doc.pointer(&"/servlet/1/class".parse()?)?.as_str()?, "FileServlet");
/// # Ok::<(), json_value::Error>(())
/// ```
pub trait PointerExt {
    fn pointer(&self, pointer: &Pointer) -> Result<&Value>;

    fn pointer_mut(&mut self, pointer: &Pointer) -> Result<&mut Value>;

    /// Whether `pointer` resolves inside this document, which must be an
    /// Object or an empty container.
    fn exists(&self, pointer: &Pointer) -> Result<bool>;
}

impl PointerExt for Value {
    fn pointer(&self, pointer: &Pointer) -> Result<&Value> {
        pointer.get_reference(self)
    }

    fn pointer_mut(&mut self, pointer: &Pointer) -> Result<&mut Value> {
        pointer.resolve_mut(self)
    }

    fn exists(&self, pointer: &Pointer) -> Result<bool> {
        let kind = self.kind()?;
        if !self.is_object() && !self.is_empty() {
            return Err(Error::bad_type(Type::OBJECT, kind));
        }
        pointer.is_valid_for(self)
    }
}
