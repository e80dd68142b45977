/// Limits and dialect switches for the default [`Lexer`](crate::io::Lexer).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Deepest allowed Array/Object nesting.
    pub max_nesting: usize,
    /// Largest accepted input, in bytes.
    pub max_data_bytes: usize,
    /// Accept `// line` and `/* block */` comments between tokens.
    pub allow_comments: bool,
}

impl ParseOptions {
    pub const DEFAULT_MAX_NESTING: usize = 1024;
    pub const DEFAULT_MAX_DATA_BYTES: usize = 128 * 1024 * 1024;

    pub const fn new() -> Self {
        Self {
            max_nesting: Self::DEFAULT_MAX_NESTING,
            max_data_bytes: Self::DEFAULT_MAX_DATA_BYTES,
            allow_comments: true,
        }
    }

    /// Plain RFC 8259 input: no comments.
    pub const fn strict() -> Self {
        Self {
            allow_comments: false,
            ..Self::new()
        }
    }

    pub const fn with_max_nesting(mut self, max_nesting: usize) -> Self {
        self.max_nesting = max_nesting;
        self
    }

    pub const fn with_max_data_bytes(mut self, max_data_bytes: usize) -> Self {
        self.max_data_bytes = max_data_bytes;
        self
    }

    pub const fn with_comments(mut self, allow_comments: bool) -> Self {
        self.allow_comments = allow_comments;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::new()
    }
}
