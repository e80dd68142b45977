use std::borrow::Cow;

use crate::error::Result;

/// One step of a depth-first walk over a JSON document.
///
/// Number events carry their source text; the consumer decides how to
/// read it.
#[derive(Debug, Clone, PartialEq)]
pub enum Event<'a> {
    ObjectBegin,
    ObjectEnd,
    ArrayBegin,
    ArrayEnd,
    Key(Cow<'a, str>),
    String(Cow<'a, str>),
    Int(&'a str),
    Float(&'a str),
    True,
    False,
    Null,
}

/// Receives events from a tokenizer or from [`emit`](crate::io::emit).
pub trait EventSink {
    fn event(&mut self, event: Event<'_>) -> Result<()>;
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn event(&mut self, event: Event<'_>) -> Result<()> {
        (**self).event(event)
    }
}
