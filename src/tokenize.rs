//! A minimal word/punctuation tokenizer.
//!
//! The token engine accepts any `AsRef<str>` sequence; this helper covers the
//! common case of matching token entries against plain text. Each token keeps
//! its byte offsets, so token-index matches map back onto the text:
//!
//! ```
//! use termtrie::{MatcherConfig, TokenMatcher, TokenPolicy, tokenize};
//!
//! let mut matcher = TokenMatcher::new(TokenPolicy::case_insensitive(), MatcherConfig::default()).unwrap();
//! matcher.insert(&["new", "york"], 1).unwrap();
//!
//! let text = "Flights to New  York, today";
//! let tokens = tokenize(text);
//! let found = matcher.find(&tokens);
//! let m = &found[0];
//! assert_eq!(&text[tokens[m.start].start..tokens[m.end - 1].end], "New  York");
//! ```

use serde::Serialize;

/// A token and its UTF-8 byte offsets in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TokenSpan<'t> {
    pub text: &'t str,
    /// Byte offset (inclusive).
    pub start: usize,
    /// Byte offset (exclusive).
    pub end: usize,
}

impl AsRef<str> for TokenSpan<'_> {
    fn as_ref(&self) -> &str {
        self.text
    }
}

/// Split `text` into runs of word characters and single punctuation marks.
/// Whitespace separates tokens and is dropped.
pub fn tokenize(text: &str) -> Vec<TokenSpan<'_>> {
    regex!(r"\w+|[^\w\s]")
        .find_iter(text)
        .map(|m| TokenSpan { text: m.as_str(), start: m.start(), end: m.end() })
        .collect()
}
