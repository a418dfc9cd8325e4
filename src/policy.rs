//! Canonicalization policies.
//!
//! A policy decides two things about every raw symbol, both at build time and
//! at scan time:
//!
//! - which canonical key it is compared by (`map`), and
//! - whether that key is ignorable (`is_ignorable`).
//!
//! The order is fixed: a symbol is mapped first and the *mapped* key is then
//! tested for ignorability. Ignorable symbols are elided from canonical keys:
//! they never consume a trie edge and never interrupt a descent.
//!
//! ```text
//! raw:        'N'  'e'  'w'  ' '  'Y'
//! map:        'n'  'e'  'w'  ' '  'y'
//! ignorable:   .    .    .   yes   .
//! key:        'n'  'e'  'w'       'y'
//! ```
//!
//! Policies are plain values. They hold no mutable state and their output
//! depends only on the symbol, so a matcher can share one policy between any
//! number of concurrent scans.

use std::fmt;
use std::hash::Hash;

use unicode_categories::UnicodeCategories;
use unicode_normalization::UnicodeNormalization;

/// Maps a raw symbol to its canonical comparison key.
pub trait Canonicalize<S: ?Sized> {
    /// Canonical key stored on trie edges.
    type Key: Eq + Hash + Clone;

    /// Map a raw symbol to its canonical key.
    fn map(&self, symbol: &S) -> Self::Key;

    /// Whether a mapped key is elided from canonical sequences.
    fn is_ignorable(&self, _key: &Self::Key) -> bool {
        false
    }

    /// Map `symbol` and return `None` when the result is ignorable.
    fn canonical(&self, symbol: &S) -> Option<Self::Key> {
        let key = self.map(symbol);
        if self.is_ignorable(&key) { None } else { Some(key) }
    }
}

/// Compare symbols as they are; nothing is ignorable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Identity;

impl Canonicalize<char> for Identity {
    type Key = char;

    fn map(&self, symbol: &char) -> char {
        *symbol
    }
}

impl Canonicalize<str> for Identity {
    type Key = String;

    fn map(&self, symbol: &str) -> String {
        symbol.to_owned()
    }
}

bitflags::bitflags! {
    /// Character folding options for [`CharPolicy`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CharFold: u8 {
        const LOWERCASE          = 1 << 0;
        const IGNORE_WHITESPACE  = 1 << 1;
        const IGNORE_PUNCTUATION = 1 << 2;
        const IGNORE_CONTROL     = 1 << 3;
    }
}

impl Default for CharFold {
    fn default() -> Self {
        Self::empty()
    }
}

/// Character policy for the string engine.
///
/// Lowercasing is one-to-one: a character whose lowercase form expands to
/// several characters (for example `'İ'`) is kept unchanged, so every raw
/// character still maps to exactly one key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CharPolicy {
    pub fold: CharFold,
}

impl CharPolicy {
    pub fn new(fold: CharFold) -> Self {
        Self { fold }
    }

    /// Case-insensitive comparison, nothing ignored.
    pub fn case_insensitive() -> Self {
        Self::new(CharFold::LOWERCASE)
    }
}

impl Canonicalize<char> for CharPolicy {
    type Key = char;

    fn map(&self, symbol: &char) -> char {
        if self.fold.contains(CharFold::LOWERCASE) { lowercase_char(*symbol) } else { *symbol }
    }

    fn is_ignorable(&self, key: &char) -> bool {
        (self.fold.contains(CharFold::IGNORE_WHITESPACE) && key.is_whitespace())
            || (self.fold.contains(CharFold::IGNORE_PUNCTUATION) && key.is_punctuation())
            || (self.fold.contains(CharFold::IGNORE_CONTROL) && key.is_control())
    }
}

fn lowercase_char(c: char) -> char {
    if c.is_ascii() {
        return c.to_ascii_lowercase();
    }
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

bitflags::bitflags! {
    /// Token folding options for [`TokenPolicy`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TokenFold: u8 {
        const LOWERCASE          = 1 << 0;
        /// Apply Unicode NFKC normalization before any other folding.
        const NFKC               = 1 << 1;
        /// Ignore tokens made only of punctuation characters.
        const IGNORE_PUNCTUATION = 1 << 2;
        /// Ignore empty and whitespace-only tokens.
        const IGNORE_BLANK       = 1 << 3;
    }
}

impl Default for TokenFold {
    fn default() -> Self {
        Self::empty()
    }
}

/// Token policy for the token engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenPolicy {
    pub fold: TokenFold,
}

impl TokenPolicy {
    pub fn new(fold: TokenFold) -> Self {
        Self { fold }
    }

    /// Case-insensitive comparison, nothing ignored.
    pub fn case_insensitive() -> Self {
        Self::new(TokenFold::LOWERCASE)
    }
}

impl Canonicalize<str> for TokenPolicy {
    type Key = String;

    fn map(&self, symbol: &str) -> String {
        let normalized: String =
            if self.fold.contains(TokenFold::NFKC) { symbol.nfkc().collect() } else { symbol.to_owned() };
        if self.fold.contains(TokenFold::LOWERCASE) { normalized.to_lowercase() } else { normalized }
    }

    fn is_ignorable(&self, key: &String) -> bool {
        if self.fold.contains(TokenFold::IGNORE_BLANK) && key.trim().is_empty() {
            return true;
        }
        self.fold.contains(TokenFold::IGNORE_PUNCTUATION) && !key.is_empty() && key.chars().all(|c| c.is_punctuation())
    }
}

/// Policy assembled from plain function pointers.
///
/// ```
/// use termtrie::{Canonicalize, FnPolicy};
///
/// let policy: FnPolicy<char, char> = FnPolicy::new(|c: &char| c.to_ascii_uppercase()).ignoring(|c| *c == '-');
/// assert_eq!(policy.canonical(&'a'), Some('A'));
/// assert_eq!(policy.canonical(&'-'), None);
/// ```
pub struct FnPolicy<S: ?Sized, K> {
    map: fn(&S) -> K,
    ignore: Option<fn(&K) -> bool>,
}

impl<S: ?Sized, K> FnPolicy<S, K> {
    pub fn new(map: fn(&S) -> K) -> Self {
        Self { map, ignore: None }
    }

    /// Mark keys for which `ignore` returns true as ignorable.
    pub fn ignoring(mut self, ignore: fn(&K) -> bool) -> Self {
        self.ignore = Some(ignore);
        self
    }
}

impl<S: ?Sized, K> Clone for FnPolicy<S, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: ?Sized, K> Copy for FnPolicy<S, K> {}

impl<S: ?Sized, K> fmt::Debug for FnPolicy<S, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnPolicy")
            .field("map", &"<function>")
            .field("ignore", &self.ignore.map(|_| "<function>"))
            .finish()
    }
}

impl<S: ?Sized, K: Eq + Hash + Clone> Canonicalize<S> for FnPolicy<S, K> {
    type Key = K;

    fn map(&self, symbol: &S) -> K {
        (self.map)(symbol)
    }

    fn is_ignorable(&self, key: &K) -> bool {
        self.ignore.is_some_and(|ignore| ignore(key))
    }
}

/// Default word-character predicate used by word-boundary checks.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_keeps_symbols() {
        assert_eq!(Identity.canonical(&'A'), Some('A'));
        assert_eq!(Canonicalize::<str>::canonical(&Identity, "New"), Some("New".to_string()));
        assert_eq!(Identity.canonical(&' '), Some(' '));
    }

    #[test]
    fn char_policy_folds_and_ignores() {
        let policy = CharPolicy::new(CharFold::LOWERCASE | CharFold::IGNORE_WHITESPACE | CharFold::IGNORE_PUNCTUATION);
        assert_eq!(policy.canonical(&'Q'), Some('q'));
        assert_eq!(policy.canonical(&'Ä'), Some('ä'));
        assert_eq!(policy.canonical(&' '), None);
        assert_eq!(policy.canonical(&'\t'), None);
        assert_eq!(policy.canonical(&'-'), None);
        assert_eq!(policy.canonical(&'7'), Some('7'));
    }

    #[test]
    fn char_policy_keeps_expanding_lowercase() {
        // 'İ' lowercases to two chars; the mapping must stay one-to-one.
        assert_eq!(CharPolicy::case_insensitive().map(&'İ'), 'İ');
    }

    #[test]
    fn control_chars_only_ignored_when_requested() {
        assert_eq!(CharPolicy::default().canonical(&'\u{7}'), Some('\u{7}'));
        assert_eq!(CharPolicy::new(CharFold::IGNORE_CONTROL).canonical(&'\u{7}'), None);
    }

    #[test]
    fn token_policy_folds_and_ignores() {
        let policy = TokenPolicy::new(TokenFold::LOWERCASE | TokenFold::IGNORE_PUNCTUATION | TokenFold::IGNORE_BLANK);
        assert_eq!(policy.canonical("York"), Some("york".to_string()));
        assert_eq!(policy.canonical(","), None);
        assert_eq!(policy.canonical("..."), None);
        assert_eq!(policy.canonical(""), None);
        assert_eq!(policy.canonical("  "), None);
        assert_eq!(policy.canonical("U.S."), Some("u.s.".to_string()));
    }

    #[test]
    fn token_policy_nfkc() {
        let policy = TokenPolicy::new(TokenFold::NFKC | TokenFold::LOWERCASE);
        // Fullwidth latin letters fold to ASCII under NFKC.
        assert_eq!(policy.map("ＡＢＣ"), "abc");
        assert_eq!(TokenPolicy::default().map("ＡＢＣ"), "ＡＢＣ");
    }

    #[test]
    fn fn_policy_maps_then_ignores() {
        // The ignore predicate sees the mapped key, not the raw symbol.
        let policy: FnPolicy<char, char> = FnPolicy::new(|c: &char| if *c == '_' { ' ' } else { *c }).ignoring(|c| *c == ' ');
        assert_eq!(policy.canonical(&'_'), None);
        assert_eq!(policy.canonical(&'x'), Some('x'));
    }

    #[test]
    fn word_chars() {
        assert!(is_word_char('a'));
        assert!(is_word_char('9'));
        assert!(is_word_char('_'));
        assert!(is_word_char('é'));
        assert!(!is_word_char(' '));
        assert!(!is_word_char('-'));
    }
}
