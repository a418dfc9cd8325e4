//! The matching state machine.
//!
//! A scan moves a cursor over the prepared input. At every admissible start
//! it performs a *descent*: it follows trie edges for the canonical keys that
//! come next, stepping over ignorable positions, until an edge is missing or
//! the window ends. Every terminal node passed on the way is a candidate end
//! point.
//!
//! ```text
//! input:  i   l i v e   i n   n e w   y o r k   c i t y
//!                             ^ start
//!                             ├─────┤             new york       (candidate)
//!                             ├──────────────────┤ new york city (candidate)
//! ```
//!
//! Per start position:
//!
//! - `Longest` keeps the candidate with the greatest end, `All` keeps every
//!   candidate in ascending end order.
//! - With word boundaries, a start needs a non-word symbol (or nothing) before
//!   it and a candidate end needs a non-word symbol (or nothing) after it.
//! - `Skip` moves the cursor to the end of the last emitted match, or one
//!   symbol on when nothing matched; `NoSkip` always moves one symbol on.
//!
//! Ignorable positions never start a match. Output is ordered by start, then
//! by end.

use super::metrics::ScanMetrics;
use super::prepare::PreparedInput;
use super::store::{NodeId, Trie};
use crate::{Continuation, Hit, MatchMode};
use std::hash::Hash;
use std::ops::Range;

#[derive(Debug, Clone)]
pub(crate) struct ScanSettings {
    pub mode: MatchMode,
    pub continuation: Continuation,
    /// Positions (not bytes) the scan may consume.
    pub window: Range<usize>,
}

pub(crate) struct Scanner<'a, K, P> {
    trie: &'a Trie<K, P>,
    input: &'a PreparedInput<K>,
    settings: ScanSettings,
}

impl<'a, K: Eq + Hash, P> Scanner<'a, K, P> {
    pub(crate) fn new(trie: &'a Trie<K, P>, input: &'a PreparedInput<K>, mut settings: ScanSettings) -> Self {
        settings.window.end = settings.window.end.min(input.len());
        Scanner { trie, input, settings }
    }

    /// Run the scan and return the hits in output order.
    pub(crate) fn run(&self, metrics: &mut ScanMetrics) -> Vec<Hit> {
        let mut hits = Vec::new();
        if self.trie.is_empty() {
            return hits;
        }

        let Range { start: lo, end: hi } = self.settings.window;
        let mut cursor = lo;
        while cursor < hi {
            if self.input.key(cursor).is_none() {
                cursor += 1;
                continue;
            }
            metrics.starts += 1;

            if !self.input.start_boundary(cursor) {
                cursor += 1;
                continue;
            }
            metrics.descents += 1;

            let emitted_end = self.descend(cursor, &mut hits, metrics);
            cursor = match (self.settings.continuation, emitted_end) {
                (Continuation::Skip, Some(end)) => end,
                _ => cursor + 1,
            };
        }

        metrics.matches = hits.len();
        hits
    }

    /// Descend from `start`, push the selected hits and return the end of the
    /// last one pushed.
    fn descend(&self, start: usize, hits: &mut Vec<Hit>, metrics: &mut ScanMetrics) -> Option<usize> {
        let hi = self.settings.window.end;
        let mut node = NodeId::ROOT;
        let mut pos = start;
        let mut longest: Option<Hit> = None;
        let mut last_end = None;

        while pos < hi {
            let Some(key) = self.input.key(pos) else {
                pos += 1;
                continue;
            };
            let Some(next) = self.trie.child(node, key) else {
                break;
            };
            node = next;
            pos += 1;
            metrics.visited += 1;

            if !self.trie.is_terminal(node) || !self.input.end_boundary(pos) {
                continue;
            }

            let hit = Hit { start, end: pos, node };
            tracing::trace!(start, end = pos, "candidate");
            match self.settings.mode {
                MatchMode::All => {
                    last_end = Some(pos);
                    hits.push(hit);
                }
                MatchMode::Longest => longest = Some(hit),
            }
        }

        if let Some(hit) = longest {
            last_end = Some(hit.end);
            hits.push(hit);
        }
        last_end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::builder::{EntryKeys, insert};
    use crate::{CharPolicy, DuplicatePolicy, is_word_char};

    fn trie_of(words: &[&str]) -> Trie<char, usize> {
        let mut trie = Trie::new();
        for (i, w) in words.iter().enumerate() {
            let keys: EntryKeys<char> = w.chars().collect();
            insert(&mut trie, keys, i, DuplicatePolicy::Append).unwrap();
        }
        trie
    }

    fn spans(words: &[&str], text: &str, mode: MatchMode, continuation: Continuation, words_only: bool) -> Vec<(usize, usize)> {
        let trie = trie_of(words);
        let chars: Vec<char> = text.chars().collect();
        let input = PreparedInput::from_chars(&CharPolicy::default(), &chars, words_only.then_some(is_word_char as fn(char) -> bool));
        let settings = ScanSettings { mode, continuation, window: 0..chars.len() };
        let mut metrics = ScanMetrics::default();
        Scanner::new(&trie, &input, settings).run(&mut metrics).into_iter().map(|h| (h.start, h.end)).collect()
    }

    #[test]
    fn longest_skip_takes_longest_then_jumps() {
        let found = spans(&["ab", "abcd", "cd"], "abcd", MatchMode::Longest, Continuation::Skip, false);
        assert_eq!(found, vec![(0, 4)]);
    }

    #[test]
    fn all_noskip_reports_nested_and_overlapping() {
        let found = spans(&["ab", "abcd", "cd"], "abcd", MatchMode::All, Continuation::NoSkip, false);
        assert_eq!(found, vec![(0, 2), (0, 4), (2, 4)]);
    }

    #[test]
    fn all_skip_jumps_past_last_candidate() {
        let found = spans(&["ab", "abcd", "cd"], "abcdcd", MatchMode::All, Continuation::Skip, false);
        assert_eq!(found, vec![(0, 2), (0, 4), (4, 6)]);
    }

    #[test]
    fn failed_descent_advances_by_one() {
        let found = spans(&["abx", "bc"], "abc", MatchMode::Longest, Continuation::Skip, false);
        assert_eq!(found, vec![(1, 3)]);
    }

    #[test]
    fn boundaries_reject_mid_word_candidates() {
        let found = spans(&["cat"], "concatenate cat", MatchMode::Longest, Continuation::Skip, true);
        assert_eq!(found, vec![(12, 15)]);
    }

    #[test]
    fn boundary_rejected_longest_falls_back_to_shorter() {
        // "new yorker" must not yield "new york", but "new" is still a word.
        let found = spans(&["new", "new york"], "new yorker", MatchMode::Longest, Continuation::Skip, true);
        assert_eq!(found, vec![(0, 3)]);
    }

    #[test]
    fn empty_trie_and_empty_input() {
        assert!(spans(&[], "anything", MatchMode::All, Continuation::NoSkip, false).is_empty());
        assert!(spans(&["a"], "", MatchMode::All, Continuation::NoSkip, false).is_empty());
    }

    #[test]
    fn window_limits_consumption() {
        let trie = trie_of(&["abc", "ab"]);
        let chars: Vec<char> = "abc".chars().collect();
        let input = PreparedInput::from_chars(&CharPolicy::default(), &chars, None);
        let settings = ScanSettings { mode: MatchMode::Longest, continuation: Continuation::Skip, window: 0..2 };
        let mut metrics = ScanMetrics::default();
        let hits = Scanner::new(&trie, &input, settings).run(&mut metrics);
        assert_eq!(hits.iter().map(|h| (h.start, h.end)).collect::<Vec<_>>(), vec![(0, 2)]);
        assert_eq!(metrics.matches, 1);
        assert_eq!(metrics.visited, 2);
    }
}
