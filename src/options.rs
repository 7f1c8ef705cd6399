/// Knobs of a parse that the grammar alone cannot decide.
///
/// The grammar is ambiguous wherever it relies on the service metadata (is
/// `/users/myid` a key segment or a navigation?). Without a schema these options
/// pick the reading; the defaults follow the most common service layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum nesting of recursive rules (parenthesized and nested
    /// expressions, `$expand` inside `$expand`, collection literals...).
    /// Deeper input fails with a recursion limit error instead of exhausting
    /// the stack.
    pub max_depth: usize,
    /// Number of `/`-separated key segments a key-as-segment predicate takes.
    pub key_segments: usize,
    /// Service root the parsed URLs are expected to start with, for example
    /// `https://graph.microsoft.com/v1.0/`. When unset, the service root is
    /// everything up to the last `/` of the path.
    pub service_root: Option<String>,
}

impl ParseOptions {
    pub const DEFAULT_MAX_DEPTH: usize = 64;

    pub const DEFAULT: ParseOptions = ParseOptions {
        max_depth: Self::DEFAULT_MAX_DEPTH,
        key_segments: 1,
        service_root: None,
    };

    pub fn new() -> Self {
        Self::DEFAULT
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_key_segments(mut self, key_segments: usize) -> Self {
        self.key_segments = key_segments;
        self
    }

    pub fn with_service_root(mut self, service_root: impl Into<String>) -> Self {
        self.service_root = Some(service_root.into());
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}
