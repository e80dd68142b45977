use thiserror::Error;

use crate::io::event::EventSink;

/// Why a tokenizer stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenizeError {
    #[error("bad character (character < 32, except space newline tab)")]
    BadChar,
    #[error("trying to pop more object/array than pushed on the stack")]
    PopEmpty,
    #[error("trying to pop wrong type of mode. popping array in object mode, vice versa")]
    PopUnexpectedMode,
    #[error("reach nesting limit on stack")]
    NestingLimit,
    #[error("reach data limit on buffer")]
    DataLimit,
    #[error("comment are not allowed with current configuration")]
    CommentNotAllowed,
    #[error("unexpected char in the current parser context")]
    UnexpectedChar,
    #[error("unicode low surrogate missing after high surrogate")]
    MissingLowSurrogate,
    #[error("unicode low surrogate missing without previous high surrogate")]
    UnexpectedLowSurrogate,
    #[error("found a comma not in structure (array/object)")]
    CommaOutOfStructure,
    #[error("error in a callback (callback returns error)")]
    CallbackError,
    #[error("utf8 stream is invalid")]
    Utf8,
    #[error("incomplete json")]
    Incomplete,
}

/// Outcome of [`Tokenizer::feed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tokenized {
    /// Offset of the byte that stopped the tokenizer, or the input length.
    pub processed: usize,
    pub error: Option<TokenizeError>,
}

/// Turns bytes into [`Event`](crate::io::Event)s.
///
/// A tokenizer that reaches the end of its input in the middle of a
/// document reports no error but is not [`done`](Tokenizer::is_done).
pub trait Tokenizer {
    fn feed(&mut self, input: &[u8], sink: &mut dyn EventSink) -> Tokenized;

    /// Whether a complete top-level value has been seen.
    fn is_done(&self) -> bool;
}
