use crate::error::{Error, Result};
use crate::io::event::{Event, EventSink};
use crate::types::Type;
use crate::value::{number, Value};

struct Frame {
    value: Value,
    key: Option<String>,
}

/// Builds a [`Value`] tree from events.
///
/// Open containers live on a stack of owned frames; a closed container is
/// attached to its parent under the pending key (Object) or at the end
/// (Array). A scalar with no open container becomes the root.
#[derive(Default)]
pub struct TreeBuilder {
    stack: Vec<Frame>,
    root: Option<Value>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The finished tree, or `None` while a container is still open or no
    /// value has been seen.
    pub fn finish(self) -> Option<Value> {
        if self.stack.is_empty() {
            self.root
        } else {
            None
        }
    }

    fn open(&mut self, value: Value) {
        self.stack.push(Frame { value, key: None });
    }

    fn close(&mut self, expected: Type) -> Result<()> {
        let frame = self
            .stack
            .pop()
            .ok_or_else(|| Error::parse("container end without a begin"))?;
        if frame.value.raw_type() != expected {
            return Err(Error::parse(format!(
                "{expected} end inside {}",
                frame.value.raw_type()
            )));
        }
        self.attach(frame.value)
    }

    fn attach(&mut self, value: Value) -> Result<()> {
        let Some(frame) = self.stack.last_mut() else {
            if self.root.is_some() {
                return Err(Error::parse("more than one top-level value"));
            }
            self.root = Some(value);
            return Ok(());
        };
        match &mut frame.value {
            Value::Array(items) => items.push(value),
            Value::Object(map) => {
                let key = frame
                    .key
                    .take()
                    .ok_or_else(|| Error::parse("object member without a key"))?;
                map.insert(key, value);
            }
            other => return Err(Error::bad_type(Type::CONTAINER, other.raw_type())),
        }
        Ok(())
    }
}

impl EventSink for TreeBuilder {
    fn event(&mut self, event: Event<'_>) -> Result<()> {
        match event {
            Event::ObjectBegin => {
                self.open(Value::object());
                Ok(())
            }
            Event::ArrayBegin => {
                self.open(Value::array());
                Ok(())
            }
            Event::ObjectEnd => self.close(Type::OBJECT),
            Event::ArrayEnd => self.close(Type::ARRAY),
            Event::Key(key) => match self.stack.last_mut() {
                Some(Frame {
                    value: Value::Object(_),
                    key: slot,
                }) => {
                    *slot = Some(key.into_owned());
                    Ok(())
                }
                _ => Err(Error::parse(format!("key '{key}' outside of an object"))),
            },
            Event::String(s) => self.attach(Value::String(s.into_owned())),
            Event::Int(text) => {
                let value = number::parse_int_text(text)
                    .ok_or_else(|| Error::parse(format!("invalid integer '{text}'")))?;
                self.attach(value)
            }
            Event::Float(text) => {
                let d = text
                    .parse::<f64>()
                    .map_err(|_| Error::parse(format!("invalid number '{text}'")))?;
                self.attach(Value::Double(d))
            }
            Event::True => self.attach(Value::Boolean(true)),
            Event::False => self.attach(Value::Boolean(false)),
            Event::Null => self.attach(Value::Null),
        }
    }
}
