use std::borrow::Cow;
use std::collections::btree_map;
use std::io;
use std::slice;

use crate::error::{Error, Result};
use crate::io::event::{Event, EventSink};
use crate::value::{number, Value};

struct Level {
    empty: bool,
}

/// Writes events as JSON text.
///
/// Compact output has no whitespace at all. Pretty output puts every
/// member and element on its own line, indented by two spaces per level,
/// with `": "` after keys; empty containers stay `{}` and `[]`.
pub struct Printer<W: io::Write> {
    out: W,
    pretty: bool,
    levels: Vec<Level>,
    after_key: bool,
}

impl<W: io::Write> Printer<W> {
    pub fn new(out: W, pretty: bool) -> Self {
        Self {
            out,
            pretty,
            levels: Vec::new(),
            after_key: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn newline(&mut self) -> io::Result<()> {
        self.out.write_all(b"\n")?;
        for _ in 0..self.levels.len() {
            self.out.write_all(b"  ")?;
        }
        Ok(())
    }

    /// Separator before a key or a value.
    fn separate(&mut self) -> io::Result<()> {
        if self.after_key {
            self.after_key = false;
            return Ok(());
        }
        let Some(level) = self.levels.last_mut() else {
            return Ok(());
        };
        let first = level.empty;
        level.empty = false;
        if !first {
            self.out.write_all(b",")?;
        }
        if self.pretty {
            self.newline()?;
        }
        Ok(())
    }

    fn open(&mut self, bracket: &[u8]) -> io::Result<()> {
        self.separate()?;
        self.out.write_all(bracket)?;
        self.levels.push(Level { empty: true });
        Ok(())
    }

    fn close(&mut self, bracket: &[u8]) -> Result<()> {
        let level = self
            .levels
            .pop()
            .ok_or_else(|| Error::parse("container end without a begin"))?;
        if self.pretty && !level.empty {
            self.newline()?;
        }
        self.out.write_all(bracket)?;
        Ok(())
    }

    fn scalar(&mut self, text: &[u8]) -> io::Result<()> {
        self.separate()?;
        self.out.write_all(text)
    }

    fn string(&mut self, s: &str) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, s).map_err(io::Error::from)
    }
}

impl<W: io::Write> EventSink for Printer<W> {
    fn event(&mut self, event: Event<'_>) -> Result<()> {
        match event {
            Event::ObjectBegin => self.open(b"{")?,
            Event::ArrayBegin => self.open(b"[")?,
            Event::ObjectEnd => self.close(b"}")?,
            Event::ArrayEnd => self.close(b"]")?,
            Event::Key(key) => {
                self.separate()?;
                self.string(&key)?;
                let colon: &[u8] = if self.pretty { b": " } else { b":" };
                self.out.write_all(colon)?;
                self.after_key = true;
            }
            Event::String(s) => {
                self.separate()?;
                self.string(&s)?;
            }
            Event::Int(text) | Event::Float(text) => self.scalar(text.as_bytes())?,
            Event::True => self.scalar(b"true")?,
            Event::False => self.scalar(b"false")?,
            Event::Null => self.scalar(b"null")?,
        }
        Ok(())
    }
}

/// Walks `value` depth first and reports it to `sink`: Object members in
/// key order as a `Key` followed by the member, Array elements in order.
///
/// A placeholder anywhere in the tree is `KeyNotFound`. Non-finite doubles
/// are reported as `Null`.
pub fn emit<S: EventSink + ?Sized>(value: &Value, sink: &mut S) -> Result<()> {
    walk(value, sink, Placeholders::Fail)
}

/// Like [`emit`], but a placeholder is reported as `Null`. Used by
/// `Display`, which cannot fail on a well-formed tree.
pub fn emit_lenient<S: EventSink + ?Sized>(value: &Value, sink: &mut S) -> Result<()> {
    walk(value, sink, Placeholders::Null)
}

#[derive(Clone, Copy)]
enum Placeholders {
    Fail,
    Null,
}

/// Open container on the walk stack.
enum Frame<'v> {
    Array(slice::Iter<'v, Value>),
    Object(btree_map::Iter<'v, String, Value>),
}

// Iterative so that the depth the parser accepts never bounds the call stack.
fn walk<S: EventSink + ?Sized>(
    root: &Value,
    sink: &mut S,
    placeholders: Placeholders,
) -> Result<()> {
    let mut stack: Vec<Frame<'_>> = Vec::new();
    let mut next = Some(root);
    loop {
        if let Some(value) = next.take() {
            match value {
                Value::Null => sink.event(Event::Null)?,
                Value::Boolean(true) => sink.event(Event::True)?,
                Value::Boolean(false) => sink.event(Event::False)?,
                Value::Integer(i) => sink.event(Event::Int(&i.to_string()))?,
                Value::Double(d) if d.is_finite() => {
                    sink.event(Event::Float(&number::format_double(*d)))?
                }
                Value::Double(_) => sink.event(Event::Null)?,
                Value::String(s) => sink.event(Event::String(Cow::Borrowed(s)))?,
                Value::Array(items) => {
                    sink.event(Event::ArrayBegin)?;
                    stack.push(Frame::Array(items.iter()));
                }
                Value::Object(map) => {
                    sink.event(Event::ObjectBegin)?;
                    stack.push(Frame::Object(map.iter()));
                }
                Value::Undetermined(None) => {
                    sink.event(Event::ObjectBegin)?;
                    sink.event(Event::ObjectEnd)?;
                }
                Value::Undetermined(Some(placeholder)) => match placeholders {
                    Placeholders::Fail => return Err(Error::key_not_found(placeholder.key())),
                    Placeholders::Null => sink.event(Event::Null)?,
                },
            }
        }
        let Some(frame) = stack.last_mut() else {
            return Ok(());
        };
        match frame {
            Frame::Array(items) => match items.next() {
                Some(item) => next = Some(item),
                None => {
                    stack.pop();
                    sink.event(Event::ArrayEnd)?;
                }
            },
            Frame::Object(members) => match members.next() {
                Some((key, member)) => {
                    sink.event(Event::Key(Cow::Borrowed(key)))?;
                    next = Some(member);
                }
                None => {
                    stack.pop();
                    sink.event(Event::ObjectEnd)?;
                }
            },
        }
    }
}
