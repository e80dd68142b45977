//! The default [`Tokenizer`].
//!
//! Scans a complete document held in memory and reports events as it goes.
//! The top level must be an Object or an Array; bare scalars are left to
//! the caller's fallback. Escaped strings are decoded with `serde_json`.

use std::borrow::Cow;

use crate::io::event::{Event, EventSink};
use crate::io::options::ParseOptions;
use crate::io::tokenizer::{TokenizeError, Tokenized, Tokenizer};

#[derive(Debug, Default)]
pub struct Lexer {
    options: ParseOptions,
    done: bool,
}

impl Lexer {
    pub fn new(options: ParseOptions) -> Self {
        Self {
            options,
            done: false,
        }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }
}

impl Tokenizer for Lexer {
    fn feed(&mut self, input: &[u8], sink: &mut dyn EventSink) -> Tokenized {
        self.done = false;
        if input.len() > self.options.max_data_bytes {
            return Tokenized {
                processed: 0,
                error: Some(TokenizeError::DataLimit),
            };
        }
        let mut scan = Scan {
            input,
            pos: 0,
            depth: 0,
            options: self.options,
            sink,
        };
        match scan.document() {
            Ok(()) => {
                self.done = true;
                Tokenized {
                    processed: input.len(),
                    error: None,
                }
            }
            Err(Stop::Eof) => Tokenized {
                processed: input.len(),
                error: None,
            },
            Err(Stop::Error(code)) => Tokenized {
                processed: scan.pos,
                error: Some(code),
            },
        }
    }

    fn is_done(&self) -> bool {
        self.done
    }
}

enum Stop {
    /// Input ended inside the document.
    Eof,
    Error(TokenizeError),
}

impl From<TokenizeError> for Stop {
    fn from(code: TokenizeError) -> Self {
        Stop::Error(code)
    }
}

type Step<T = ()> = Result<T, Stop>;

struct Scan<'a, 's> {
    input: &'a [u8],
    pos: usize,
    depth: usize,
    options: ParseOptions,
    sink: &'s mut dyn EventSink,
}

impl<'a, 's> Scan<'a, 's> {
    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn emit(&mut self, event: Event<'_>) -> Step {
        self.sink.event(event).map_err(|err| {
            tracing::debug!(offset = self.pos, error = %err, "event sink rejected event");
            Stop::Error(TokenizeError::CallbackError)
        })
    }

    // ── Structure ───────────────────────────────────────────────────────

    fn document(&mut self) -> Step {
        self.skip_ws()?;
        match self.peek() {
            None => return Err(Stop::Eof),
            Some(b'{' | b'[') => self.value()?,
            Some(c) => return Err(Self::misplaced(c).into()),
        }
        self.skip_ws()?;
        match self.peek() {
            None => Ok(()),
            Some(c) => Err(Self::misplaced(c).into()),
        }
    }

    /// Error for a byte found where no value may start.
    fn misplaced(c: u8) -> TokenizeError {
        match c {
            b',' => TokenizeError::CommaOutOfStructure,
            b'}' | b']' => TokenizeError::PopEmpty,
            c if c < 0x20 => TokenizeError::BadChar,
            _ => TokenizeError::UnexpectedChar,
        }
    }

    fn value(&mut self) -> Step {
        match self.peek() {
            None => Err(Stop::Eof),
            Some(b'{') => self.object(),
            Some(b'[') => self.array(),
            Some(b'"') => {
                let text = self.string()?;
                self.emit(Event::String(text))
            }
            Some(b't') => {
                self.literal(b"true")?;
                self.emit(Event::True)
            }
            Some(b'f') => {
                self.literal(b"false")?;
                self.emit(Event::False)
            }
            Some(b'n') => {
                self.literal(b"null")?;
                self.emit(Event::Null)
            }
            Some(b'-' | b'0'..=b'9') => self.number(),
            Some(c) if c < 0x20 => Err(TokenizeError::BadChar.into()),
            Some(_) => Err(TokenizeError::UnexpectedChar.into()),
        }
    }

    fn enter(&mut self) -> Step {
        self.depth += 1;
        if self.depth > self.options.max_nesting {
            return Err(TokenizeError::NestingLimit.into());
        }
        Ok(())
    }

    fn object(&mut self) -> Step {
        self.enter()?;
        self.emit(Event::ObjectBegin)?;
        self.pos += 1;
        self.skip_ws()?;
        if self.peek() == Some(b'}') {
            return self.close(Event::ObjectEnd);
        }
        loop {
            match self.peek() {
                None => return Err(Stop::Eof),
                Some(b'"') => {}
                Some(b']') => return Err(TokenizeError::PopUnexpectedMode.into()),
                Some(c) if c < 0x20 => return Err(TokenizeError::BadChar.into()),
                Some(_) => return Err(TokenizeError::UnexpectedChar.into()),
            }
            let key = self.string()?;
            self.emit(Event::Key(key))?;
            self.skip_ws()?;
            self.expect(b':')?;
            self.skip_ws()?;
            self.value()?;
            self.skip_ws()?;
            match self.peek() {
                None => return Err(Stop::Eof),
                Some(b',') => {
                    self.pos += 1;
                    self.skip_ws()?;
                }
                Some(b'}') => return self.close(Event::ObjectEnd),
                Some(b']') => return Err(TokenizeError::PopUnexpectedMode.into()),
                Some(_) => return Err(TokenizeError::UnexpectedChar.into()),
            }
        }
    }

    fn array(&mut self) -> Step {
        self.enter()?;
        self.emit(Event::ArrayBegin)?;
        self.pos += 1;
        self.skip_ws()?;
        if self.peek() == Some(b']') {
            return self.close(Event::ArrayEnd);
        }
        loop {
            self.value()?;
            self.skip_ws()?;
            match self.peek() {
                None => return Err(Stop::Eof),
                Some(b',') => {
                    self.pos += 1;
                    self.skip_ws()?;
                }
                Some(b']') => return self.close(Event::ArrayEnd),
                Some(b'}') => return Err(TokenizeError::PopUnexpectedMode.into()),
                Some(_) => return Err(TokenizeError::UnexpectedChar.into()),
            }
        }
    }

    fn close(&mut self, event: Event<'_>) -> Step {
        self.pos += 1;
        self.depth -= 1;
        self.emit(event)
    }

    fn expect(&mut self, byte: u8) -> Step {
        match self.peek() {
            None => Err(Stop::Eof),
            Some(c) if c == byte => {
                self.pos += 1;
                Ok(())
            }
            Some(_) => Err(TokenizeError::UnexpectedChar.into()),
        }
    }

    fn literal(&mut self, word: &[u8]) -> Step {
        for &expected in word {
            match self.peek() {
                None => return Err(Stop::Eof),
                Some(c) if c == expected => self.pos += 1,
                Some(_) => return Err(TokenizeError::UnexpectedChar.into()),
            }
        }
        Ok(())
    }

    // ── Whitespace and comments ─────────────────────────────────────────

    fn skip_ws(&mut self) -> Step {
        while let Some(c) = self.peek() {
            match c {
                b' ' | b'\t' | b'\n' | b'\r' => self.pos += 1,
                b'/' => self.comment()?,
                _ => break,
            }
        }
        Ok(())
    }

    fn comment(&mut self) -> Step {
        if !self.options.allow_comments {
            return Err(TokenizeError::CommentNotAllowed.into());
        }
        match self.input.get(self.pos + 1) {
            None => Err(Stop::Eof),
            Some(b'/') => {
                self.pos += 2;
                while let Some(c) = self.peek() {
                    self.pos += 1;
                    if c == b'\n' {
                        break;
                    }
                }
                Ok(())
            }
            Some(b'*') => {
                self.pos += 2;
                loop {
                    match self.peek() {
                        None => return Err(Stop::Eof),
                        Some(b'*') if self.input.get(self.pos + 1) == Some(&b'/') => {
                            self.pos += 2;
                            return Ok(());
                        }
                        Some(_) => self.pos += 1,
                    }
                }
            }
            Some(_) => {
                self.pos += 1;
                Err(TokenizeError::UnexpectedChar.into())
            }
        }
    }

    // ── Strings ─────────────────────────────────────────────────────────

    /// Scans a string starting at the opening quote and leaves the cursor
    /// after the closing one.
    fn string(&mut self) -> Step<Cow<'a, str>> {
        let open = self.pos;
        self.pos += 1;
        let mut escaped = false;
        let mut pending_high = false;
        loop {
            let c = self.peek().ok_or(Stop::Eof)?;
            match c {
                b'"' => {
                    if pending_high {
                        return Err(TokenizeError::MissingLowSurrogate.into());
                    }
                    break;
                }
                b'\\' => {
                    escaped = true;
                    self.pos += 1;
                    let e = self.peek().ok_or(Stop::Eof)?;
                    if e == b'u' {
                        self.pos += 1;
                        let unit = self.hex4()?;
                        match unit {
                            0xd800..=0xdbff if pending_high => {
                                return Err(TokenizeError::MissingLowSurrogate.into());
                            }
                            0xd800..=0xdbff => pending_high = true,
                            0xdc00..=0xdfff if !pending_high => {
                                return Err(TokenizeError::UnexpectedLowSurrogate.into());
                            }
                            0xdc00..=0xdfff => pending_high = false,
                            _ if pending_high => {
                                return Err(TokenizeError::MissingLowSurrogate.into());
                            }
                            _ => {}
                        }
                        continue;
                    }
                    if pending_high {
                        return Err(TokenizeError::MissingLowSurrogate.into());
                    }
                    match e {
                        b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't' => self.pos += 1,
                        _ => return Err(TokenizeError::UnexpectedChar.into()),
                    }
                }
                c if c < 0x20 => return Err(TokenizeError::BadChar.into()),
                _ => {
                    if pending_high {
                        return Err(TokenizeError::MissingLowSurrogate.into());
                    }
                    self.pos += 1;
                }
            }
        }
        let close = self.pos;
        self.pos += 1;

        let input = self.input;
        let body = &input[open + 1..close];
        let text = std::str::from_utf8(body).map_err(|err| {
            self.pos = open + 1 + err.valid_up_to();
            TokenizeError::Utf8
        })?;
        if !escaped {
            return Ok(Cow::Borrowed(text));
        }
        serde_json::from_slice::<String>(&input[open..=close])
            .map(Cow::Owned)
            .map_err(|err| {
                tracing::debug!(offset = open, error = %err, "string unescape failed");
                self.pos = open;
                Stop::Error(TokenizeError::UnexpectedChar)
            })
    }

    fn hex4(&mut self) -> Step<u32> {
        let mut unit = 0u32;
        for _ in 0..4 {
            let c = self.peek().ok_or(Stop::Eof)?;
            let digit = (c as char)
                .to_digit(16)
                .ok_or(Stop::Error(TokenizeError::UnexpectedChar))?;
            unit = (unit << 4) | digit;
            self.pos += 1;
        }
        Ok(unit)
    }

    // ── Numbers ─────────────────────────────────────────────────────────

    fn digits(&mut self) -> usize {
        let start = self.pos;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
        self.pos - start
    }

    fn require_digits(&mut self) -> Step {
        match self.peek() {
            None => Err(Stop::Eof),
            Some(b'0'..=b'9') => {
                self.digits();
                Ok(())
            }
            Some(_) => Err(TokenizeError::UnexpectedChar.into()),
        }
    }

    fn number(&mut self) -> Step {
        let start = self.pos;
        let mut float = false;
        if self.peek() == Some(b'-') {
            self.pos += 1;
        }
        match self.peek() {
            None => return Err(Stop::Eof),
            Some(b'0') => self.pos += 1,
            Some(b'1'..=b'9') => {
                self.digits();
            }
            Some(_) => return Err(TokenizeError::UnexpectedChar.into()),
        }
        if self.peek() == Some(b'.') {
            float = true;
            self.pos += 1;
            self.require_digits()?;
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            float = true;
            self.pos += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            self.require_digits()?;
        }
        let input = self.input;
        let text = std::str::from_utf8(&input[start..self.pos])
            .map_err(|_| Stop::Error(TokenizeError::Utf8))?;
        if float {
            self.emit(Event::Float(text))
        } else {
            self.emit(Event::Int(text))
        }
    }
}
