//! Last resort for documents the tokenizer rejects, which is how bare
//! scalars such as `42` or `"text"` are read.

use crate::value::Value;

/// Reads a whole document as a single scalar.
///
/// Quoted text is taken verbatim between the quotes; escapes are not
/// decoded. Numbers are the longest integer prefix, extended to a float
/// prefix when text remains. The entire trimmed input must be consumed.
pub fn pseudo_parse(text: &str) -> Option<Value> {
    let s = text.trim();
    match s {
        "null" => return Some(Value::Null),
        "true" => return Some(Value::Boolean(true)),
        "false" => return Some(Value::Boolean(false)),
        _ => {}
    }
    if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
        return Some(Value::String(s[1..s.len() - 1].to_owned()));
    }

    let int_len = integer_prefix(s.as_bytes());
    if int_len == 0 {
        return None;
    }
    if int_len == s.len() {
        return s.parse::<i64>().ok().map(Value::Integer);
    }
    if float_prefix(s.as_bytes()) == s.len() {
        return s.parse::<f64>().ok().map(Value::Double);
    }
    None
}

fn sign(bytes: &[u8]) -> usize {
    usize::from(matches!(bytes.first(), Some(b'+' | b'-')))
}

fn digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Length of `[+-]?[0-9]+`, or 0.
fn integer_prefix(bytes: &[u8]) -> usize {
    let start = sign(bytes);
    match digits(&bytes[start..]) {
        0 => 0,
        n => start + n,
    }
}

/// Length of `[+-]?[0-9]*(\.[0-9]*)?([eE][+-]?[0-9]+)?` with at least one
/// mantissa digit, or 0.
fn float_prefix(bytes: &[u8]) -> usize {
    let mut pos = sign(bytes);
    let whole = digits(&bytes[pos..]);
    pos += whole;
    let mut fraction = 0;
    if bytes.get(pos) == Some(&b'.') {
        fraction = digits(&bytes[pos + 1..]);
        pos += 1 + fraction;
    }
    if whole + fraction == 0 {
        return 0;
    }
    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let exp_start = pos + 1;
        let exp_sign = sign(&bytes[exp_start..]);
        let exp_digits = digits(&bytes[exp_start + exp_sign..]);
        if exp_digits > 0 {
            pos = exp_start + exp_sign + exp_digits;
        }
    }
    pos
}
