//! Input preparation.
//!
//! Before scanning, the raw input is canonicalized once: every position gets
//! `Some(key)` or `None` when the symbol is ignorable. Descents then compare
//! pre-computed keys, so overlapping descents under `NoSkip` never map the
//! same symbol twice.
//!
//! When word boundaries are checked, a per-position word flag is computed in
//! the same pass. The flags always cover the whole input, not just the scan
//! window, so a match at the window edge still sees its real neighbours.

use crate::Canonicalize;

#[derive(Debug, Clone)]
pub(crate) struct PreparedInput<K> {
    keys: Vec<Option<K>>,
    words: Option<Vec<bool>>,
}

impl<K> PreparedInput<K> {
    /// Canonicalize every symbol of `symbols` with `policy`.
    pub(crate) fn canonicalize<'s, S, C, I>(policy: &C, symbols: I) -> Self
    where
        S: ?Sized + 's,
        C: Canonicalize<S, Key = K>,
        I: IntoIterator<Item = &'s S>,
    {
        let keys = symbols.into_iter().map(|s| policy.canonical(s)).collect();
        PreparedInput { keys, words: None }
    }

    /// Canonicalize a string's characters, optionally recording word flags.
    pub(crate) fn from_chars<C>(policy: &C, chars: &[char], word_chars: Option<fn(char) -> bool>) -> Self
    where
        C: Canonicalize<char, Key = K>,
    {
        let mut prepared = Self::canonicalize(policy, chars);
        prepared.words = word_chars.map(|is_word| chars.iter().map(|&c| is_word(c)).collect());
        prepared
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub(crate) fn key(&self, pos: usize) -> Option<&K> {
        self.keys[pos].as_ref()
    }

    /// A match may start at `pos`: the previous symbol is absent or not a
    /// word character.
    #[inline]
    pub(crate) fn start_boundary(&self, pos: usize) -> bool {
        match &self.words {
            Some(words) => pos == 0 || !words[pos - 1],
            None => true,
        }
    }

    /// A match may end at `pos` (exclusive): the next symbol is absent or not
    /// a word character.
    #[inline]
    pub(crate) fn end_boundary(&self, pos: usize) -> bool {
        match &self.words {
            Some(words) => pos >= words.len() || !words[pos],
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CharFold, CharPolicy, TokenPolicy, is_word_char};

    #[test]
    fn ignorable_positions_are_none() {
        let chars: Vec<char> = "a B".chars().collect();
        let policy = CharPolicy::new(CharFold::LOWERCASE | CharFold::IGNORE_WHITESPACE);
        let prepared = PreparedInput::from_chars(&policy, &chars, None);
        assert_eq!(prepared.len(), 3);
        assert_eq!(prepared.key(0), Some(&'a'));
        assert_eq!(prepared.key(1), None);
        assert_eq!(prepared.key(2), Some(&'b'));
        assert!(prepared.start_boundary(1));
    }

    #[test]
    fn word_flags_drive_boundaries() {
        let chars: Vec<char> = "a cat.".chars().collect();
        let prepared = PreparedInput::from_chars(&CharPolicy::default(), &chars, Some(is_word_char));
        assert!(prepared.start_boundary(0));
        assert!(prepared.start_boundary(2));
        assert!(!prepared.start_boundary(3));
        assert!(prepared.end_boundary(5));
        assert!(!prepared.end_boundary(4));
        assert!(prepared.end_boundary(6));
    }

    #[test]
    fn tokens_are_canonicalized() {
        let tokens = ["New", "York"];
        let prepared = PreparedInput::canonicalize(&TokenPolicy::case_insensitive(), tokens.iter().map(|t| *t));
        assert_eq!(prepared.key(0).map(String::as_str), Some("new"));
        assert_eq!(prepared.key(1).map(String::as_str), Some("york"));
    }
}
