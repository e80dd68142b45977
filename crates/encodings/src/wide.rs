//! Conversion between UTF-8 bytes and wide code units.
//!
//! A wide unit is a `u32` holding one code point. Units are converted one at
//! a time; surrogate pairs are not merged.

/// Unit emitted by [`utf8_to_wide`] for malformed input.
pub const REPLACEMENT_CHAR: u32 = 0xfffd;

/// Encodes each wide unit as UTF-8.
///
/// Units above `0x10FFFF` become `?`. Surrogate units are written as
/// standalone three byte sequences, so the result is not always valid UTF-8.
pub fn wide_to_utf8(src: &[u32]) -> Vec<u8> {
    let mut out = Vec::with_capacity(src.len());
    for &w in src {
        match w {
            0..=0x7f => out.push(w as u8),
            0x80..=0x7ff => {
                out.push(0xc0 | ((w >> 6) & 0x1f) as u8);
                out.push(0x80 | (w & 0x3f) as u8);
            }
            0x800..=0xffff => {
                out.push(0xe0 | ((w >> 12) & 0x0f) as u8);
                out.push(0x80 | ((w >> 6) & 0x3f) as u8);
                out.push(0x80 | (w & 0x3f) as u8);
            }
            0x1_0000..=0x10_ffff => {
                out.push(0xf0 | ((w >> 18) & 0x07) as u8);
                out.push(0x80 | ((w >> 12) & 0x3f) as u8);
                out.push(0x80 | ((w >> 6) & 0x3f) as u8);
                out.push(0x80 | (w & 0x3f) as u8);
            }
            _ => out.push(b'?'),
        }
    }
    out
}

/// Like [`wide_to_utf8`] but returns a `String`; surrogate units become
/// U+FFFD.
pub fn wide_to_string(src: &[u32]) -> String {
    String::from_utf8_lossy(&wide_to_utf8(src)).into_owned()
}

/// Decodes UTF-8 into one wide unit per code point.
///
/// An unexpected continuation byte, an ASCII byte inside a sequence, a lead
/// byte of `0xF8` or above and a truncated trailing sequence each produce
/// [`REPLACEMENT_CHAR`]. A lead byte arriving inside a sequence restarts
/// decoding silently.
pub fn utf8_to_wide(src: &[u8]) -> Vec<u32> {
    let mut out = Vec::with_capacity(src.len());
    let mut acc: u32 = 0;
    let mut pending = 0u8;
    for &c in src {
        match c {
            0x00..=0x7f => {
                if pending > 0 {
                    out.push(REPLACEMENT_CHAR);
                    pending = 0;
                }
                out.push(u32::from(c));
            }
            0x80..=0xbf => {
                if pending > 0 {
                    acc = (acc << 6) | u32::from(c & 0x3f);
                    pending -= 1;
                    if pending == 0 {
                        out.push(acc);
                    }
                } else {
                    out.push(REPLACEMENT_CHAR);
                }
            }
            0xc0..=0xdf => {
                pending = 1;
                acc = u32::from(c & 0x1f);
            }
            0xe0..=0xef => {
                pending = 2;
                acc = u32::from(c & 0x0f);
            }
            0xf0..=0xf7 => {
                pending = 3;
                acc = u32::from(c & 0x07);
            }
            _ => {
                out.push(REPLACEMENT_CHAR);
                pending = 0;
            }
        }
    }
    if pending > 0 {
        out.push(REPLACEMENT_CHAR);
    }
    out
}
