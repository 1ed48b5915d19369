//! Parser configuration.

use serde::{Deserialize, Serialize};

/// Default maximum nesting depth of parentheses, functions and subqueries.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Options controlling a parse.
///
/// Missing fields take their default value when deserialized, so a partial
/// configuration document is enough:
///
/// ```rust
/// use sqltree::ParseOptions;
///
/// let options: ParseOptions = serde_json::from_str(r#"{"max_depth": 16}"#).unwrap();
/// assert_eq!(options.max_depth, 16);
/// assert!(!options.allow_trailing_input);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Maximum nesting depth before the parse fails with
    /// [`ParseError::DepthLimitExceeded`](crate::ParseError::DepthLimitExceeded).
    pub max_depth: usize,
    /// Accept tokens after the end of the query instead of failing.
    pub allow_trailing_input: bool,
}

impl ParseOptions {
    /// Creates the default options.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            allow_trailing_input: false,
        }
    }

    /// Sets the maximum nesting depth.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets whether tokens may follow the query.
    #[must_use]
    pub const fn with_trailing_input(mut self, allow: bool) -> Self {
        self.allow_trailing_input = allow;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::new()
    }
}
