//! Best-effort repair of malformed UTF-8.
//!
//! The scanner keeps three pieces of state while walking the input once:
//! the number of continuation bytes still expected, the bytes of the
//! sequence collected so far and an overlong watch mask. A sequence is only
//! copied to the output once it is complete. Every broken sequence turns into
//! exactly one [`REPLACEMENT_BYTE`].

/// Marker written in place of a malformed sequence.
pub const REPLACEMENT_BYTE: u8 = b'?';

/// Longest sequence the scanner accepts, counted in continuation bytes.
const MAX_CONTINUATION: u32 = 6;

/// Number of continuation bytes announced by a lead byte (`0b11xx_xxxx`).
#[inline]
fn continuation_len(lead: u8) -> u32 {
    lead.leading_ones().saturating_sub(1)
}

/// Whether a lead byte leaves no payload bits set, so that only the next
/// byte can tell if the sequence is overlong (`0xE0`, `0xF0`, `0xF8`, `0xFC`).
#[inline]
fn arms_overlong_watch(lead: u8, continuation: u32) -> bool {
    lead.trailing_zeros() + continuation == 7
}

struct Sanitizer {
    out: Vec<u8>,
    pending: u32,
    sequence: Vec<u8>,
    overlong_mask: u8,
}

impl Sanitizer {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            out: Vec::with_capacity(capacity),
            pending: 0,
            sequence: Vec::with_capacity(8),
            overlong_mask: 0,
        }
    }

    fn reset(&mut self) {
        self.pending = 0;
        self.sequence.clear();
        self.overlong_mask = 0;
    }

    fn abandon(&mut self) {
        self.out.push(REPLACEMENT_BYTE);
        self.sequence.clear();
        self.overlong_mask = 0;
    }

    /// Feeds one byte. Returns `true` when the current sequence is broken and
    /// the caller must skip the continuation bytes that follow.
    fn push(&mut self, c: u8) -> bool {
        match c {
            0x00..=0x7f => {
                if self.pending > 0 {
                    self.abandon();
                    self.pending = 0;
                }
                self.out.push(c);
                false
            }
            0x80..=0xbf => {
                if self.pending > 0 && (c & self.overlong_mask) != 0x80 {
                    self.pending -= 1;
                    self.sequence.push(c);
                    self.overlong_mask = 0;
                    false
                } else {
                    true
                }
            }
            _ => {
                if self.pending > 0 {
                    self.abandon();
                }
                self.pending = continuation_len(c);
                if self.pending > MAX_CONTINUATION {
                    return true;
                }
                // 0xC0 and 0xC1 can only encode ASCII.
                if c & 0xfe == 0xc0 {
                    return true;
                }
                if arms_overlong_watch(c, self.pending) {
                    self.overlong_mask = c;
                }
                self.sequence.push(c);
                false
            }
        }
    }

    fn flush_if_complete(&mut self) {
        if self.pending == 0 && !self.sequence.is_empty() {
            self.out.extend_from_slice(&self.sequence);
            self.sequence.clear();
        }
    }

    fn finish(mut self) -> Vec<u8> {
        if self.pending > 0 {
            self.out.push(REPLACEMENT_BYTE);
        }
        self.out
    }
}

/// Replaces malformed UTF-8 sequences in `src` with `?`.
///
/// Handles unexpected continuation bytes, overlong encodings, invalid lead
/// bytes, sequences interrupted by ASCII or by a new lead byte and a sequence
/// truncated by the end of input. Valid input is returned unchanged.
///
/// ```
/// use json_value_encodings::sanitize_utf8;
///
/// assert_eq!(sanitize_utf8("d\u{e9}j\u{e0}".as_bytes()), "d\u{e9}j\u{e0}".as_bytes());
/// assert_eq!(sanitize_utf8(b"a\x80\x80b"), b"a?b");
/// assert_eq!(sanitize_utf8(b"\xc0\xafx"), b"?x");
/// ```
pub fn sanitize_utf8(src: &[u8]) -> Vec<u8> {
    let mut state = Sanitizer::with_capacity(src.len());
    let mut i = 0;
    while i < src.len() {
        if state.push(src[i]) {
            state.out.push(REPLACEMENT_BYTE);
            while i + 1 < src.len() && src[i + 1] & 0xc0 == 0x80 {
                i += 1;
            }
            state.reset();
        } else {
            state.flush_if_complete();
        }
        i += 1;
    }
    state.finish()
}

/// Same as [`sanitize_utf8`], returning a `String`.
///
/// The sanitizer also lets through some sequences Rust strings reject
/// (surrogates, five and six byte forms); those are replaced with U+FFFD.
pub fn sanitize_utf8_str(src: &[u8]) -> String {
    let clean = sanitize_utf8(src);
    match String::from_utf8(clean) {
        Ok(s) => s,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    }
}
