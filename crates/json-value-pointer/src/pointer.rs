use std::fmt;
use std::str::FromStr;

use json_value::{Error, Result};

use crate::util::{escape_token, unescape_token};

/// A parsed JSON Pointer: the unescaped reference tokens of a path such as
/// `/people/0/name`.
///
/// `""` and `"/"` both address the whole document. A token of the form
/// `key=value` also selects the first child whose member `key` prints as
/// `value` (see [`Pointer::get_reference`]).
///
/// # Example
///
/// ```
/// use json_value_pointer::Pointer;
///
/// let pointer = Pointer::new("/a~1b/c~0d/0")?;
/// assert_eq!(pointer.tokens(), ["a/b", "c~d", "0"]);
/// assert_eq!(pointer.to_string(), "/a~1b/c~0d/0");
/// assert!(Pointer::new("")?.is_root());
/// assert!(Pointer::new("no-slash").is_err());
/// # Ok::<(), json_value::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Pointer {
    tokens: Vec<String>,
}

impl Pointer {
    pub fn new(path: &str) -> Result<Self> {
        if path.is_empty() || path == "/" {
            return Ok(Self::root());
        }
        let Some(rest) = path.strip_prefix('/') else {
            return Err(Error::parse(
                "Non-empty JSON pointer string must start with '/'",
            ));
        };
        let tokens = rest
            .split('/')
            .map(unescape_token)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { tokens })
    }

    /// The pointer to the whole document.
    pub fn root() -> Self {
        Self::default()
    }

    /// Builds a pointer from already unescaped tokens.
    pub fn from_tokens<I>(tokens: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn is_root(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The pointer one level up, or `None` for the root.
    pub fn parent(&self) -> Option<Pointer> {
        let (_, init) = self.tokens.split_last()?;
        Some(Self {
            tokens: init.to_vec(),
        })
    }

    /// Appends an unescaped token.
    pub fn push(&mut self, token: impl Into<String>) {
        self.tokens.push(token.into());
    }

    /// A copy of this pointer with `token` appended.
    pub fn join(&self, token: impl Into<String>) -> Pointer {
        let mut child = self.clone();
        child.push(token);
        child
    }
}

/// The escaped form; the root prints as `""`.
impl fmt::Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            write!(f, "/{}", escape_token(token))?;
        }
        Ok(())
    }
}

impl FromStr for Pointer {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Pointer::new(s)
    }
}

impl TryFrom<&str> for Pointer {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        Pointer::new(s)
    }
}

impl TryFrom<String> for Pointer {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Pointer::new(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_forms() {
        assert!(Pointer::new("").unwrap().is_root());
        assert!(Pointer::new("/").unwrap().is_root());
        assert_eq!(Pointer::root().to_string(), "");
    }

    #[test]
    fn test_tokens() {
        assert_eq!(Pointer::new("/foo/bar").unwrap().tokens(), ["foo", "bar"]);
        assert_eq!(Pointer::new("/foo/").unwrap().tokens(), ["foo", ""]);
        assert_eq!(Pointer::new("/foo//").unwrap().tokens(), ["foo", "", ""]);
        assert_eq!(Pointer::new("//").unwrap().tokens(), ["", ""]);
    }

    #[test]
    fn test_must_start_with_slash() {
        let err = Pointer::new("foo/bar").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Parse error: Non-empty JSON pointer string must start with '/'"
        );
    }

    #[test]
    fn test_bad_escape() {
        assert!(Pointer::new("/root/hello~world/0").is_err());
        assert!(Pointer::new("/end~").is_err());
    }

    #[test]
    fn test_display_escapes() {
        let pointer = Pointer::from_tokens(["a/b", "c~d"]);
        assert_eq!(pointer.to_string(), "/a~1b/c~0d");
        assert_eq!(pointer.to_string().parse::<Pointer>().unwrap(), pointer);
    }

    #[test]
    fn test_parent_and_push() {
        let mut pointer = Pointer::new("/a").unwrap();
        pointer.push("b");
        assert_eq!(pointer.to_string(), "/a/b");
        assert_eq!(pointer.parent().unwrap().to_string(), "/a");
        assert!(Pointer::root().parent().is_none());
        assert_eq!(Pointer::root().join("x").join("0").to_string(), "/x/0");
    }

    #[test]
    fn test_try_from() {
        assert!(Pointer::try_from("/x").is_ok());
        assert!(Pointer::try_from(String::from("x")).is_err());
    }
}
