use std::borrow::Cow;

use json_value::{Error, Result};

/// Escapes a reference token: `~` becomes `~0` and `/` becomes `~1`.
///
/// # Example
///
/// ```
/// use json_value_pointer::escape_token;
///
/// assert_eq!(escape_token("a~b"), "a~0b");
/// assert_eq!(escape_token("c/d"), "c~1d");
/// assert_eq!(escape_token("plain"), "plain");
/// ```
pub fn escape_token(token: &str) -> Cow<'_, str> {
    if !token.contains(['/', '~']) {
        return Cow::Borrowed(token);
    }
    // `~` first, or the `~` of a fresh `~1` would be escaped again.
    Cow::Owned(token.replace('~', "~0").replace('/', "~1"))
}

/// Reverses [`escape_token`]. A `~` that is not followed by `0` or `1` is a
/// parse error.
///
/// # Example
///
/// ```
/// use json_value_pointer::unescape_token;
///
/// assert_eq!(unescape_token("a~0b~1c")?, "a~b/c");
/// assert!(unescape_token("hello~world").is_err());
/// assert!(unescape_token("trailing~").is_err());
/// # Ok::<(), json_value::Error>(())
/// ```
pub fn unescape_token(token: &str) -> Result<String> {
    if !token.contains('~') {
        return Ok(token.to_owned());
    }
    let mut out = String::with_capacity(token.len());
    let mut chars = token.chars();
    while let Some(c) = chars.next() {
        if c != '~' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('0') => out.push('~'),
            Some('1') => out.push('/'),
            Some(_) => {
                return Err(Error::parse(
                    "Escape character '~' must be followed with '0' or '1'",
                ))
            }
            None => {
                return Err(Error::parse(
                    "Escape character '~' found at the end of string",
                ))
            }
        }
    }
    Ok(out)
}

/// Splits a `key=value` token at its first `=`.
pub(crate) fn split_property(token: &str) -> Option<(&str, &str)> {
    token.split_once('=')
}

/// Array tokens may not be `-` nor carry a leading `0` or `-`.
pub(crate) fn check_array_token(token: &str) -> Result<()> {
    let leading = token.as_bytes().first().copied();
    let invalid = token == "-" || (token.len() > 1 && matches!(leading, Some(b'0' | b'-')));
    if invalid {
        return Err(Error::parse(format!(
            "Reference token '{token}' is invalid in this context"
        )));
    }
    Ok(())
}

/// Parses an array index. Non-digit tokens are parse errors; an index too
/// large for `usize` can never be in range.
pub(crate) fn parse_index(token: &str) -> Result<usize> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::parse(format!(
            "Reference token '{token}' is not a number"
        )));
    }
    token
        .parse()
        .map_err(|_| Error::OutOfRange(format!("Index {token} out of range")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_token() {
        assert_eq!(escape_token("foo"), "foo");
        assert_eq!(escape_token("a~b/c"), "a~0b~1c");
        assert_eq!(escape_token("~~"), "~0~0");
        assert_eq!(escape_token("//"), "~1~1");
        assert_eq!(escape_token("~1"), "~01");
    }

    #[test]
    fn test_unescape_token() {
        assert_eq!(unescape_token("foo").unwrap(), "foo");
        assert_eq!(unescape_token("~0~0").unwrap(), "~~");
        assert_eq!(unescape_token("~1~1").unwrap(), "//");
        assert_eq!(unescape_token("~01").unwrap(), "~1");
    }

    #[test]
    fn test_unescape_token_errors() {
        for bad in ["~", "a~", "~2", "x~y"] {
            assert!(
                matches!(unescape_token(bad), Err(Error::Parse { .. })),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_check_array_token() {
        assert!(check_array_token("0").is_ok());
        assert!(check_array_token("10").is_ok());
        assert!(check_array_token("name=x").is_ok());
        assert!(check_array_token("-").is_err());
        assert!(check_array_token("01").is_err());
        assert!(check_array_token("-1").is_err());
    }

    #[test]
    fn test_parse_index() {
        assert_eq!(parse_index("0").unwrap(), 0);
        assert_eq!(parse_index("42").unwrap(), 42);
        assert!(matches!(parse_index("abc"), Err(Error::Parse { .. })));
        assert!(matches!(parse_index(""), Err(Error::Parse { .. })));
        assert!(parse_index("99999999999999999999999").unwrap_err().is_out_of_range());
    }

    #[test]
    fn test_split_property() {
        assert_eq!(split_property("a=b=c"), Some(("a", "b=c")));
        assert_eq!(split_property("=x"), Some(("", "x")));
        assert_eq!(split_property("plain"), None);
    }
}
