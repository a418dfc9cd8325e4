use crate::engine::{self, EntryId, EntryKeys, PreparedInput, ScanMetrics, ScanRun, ScanSettings, Scanner, Trie};
use crate::{
    Boundary, Canonicalize, CharPolicy, DuplicatePolicy, Hit, MatchError, MatcherConfig, ScanOptions, TokenPolicy,
    is_word_char,
};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::ops::Range;
use std::time::Instant;
use tracing::{Level, debug};

/// A vocabulary entry found in the input.
///
/// `start`/`end` are UTF-8 byte offsets for [`StringMatcher`] and token
/// indices for [`TokenMatcher`]. Both refer to the raw input: ignorable
/// symbols inside the span are included, and `raw` is exactly the input slice
/// `start..end`.
///
/// Equality and ordering only look at `(start, end)`.
#[derive(Debug, Serialize)]
pub struct Match<'a, R: ?Sized, P> {
    /// Start offset (inclusive).
    pub start: usize,
    /// End offset (exclusive).
    pub end: usize,
    /// The matched slice of the input.
    pub raw: &'a R,
    /// Entries whose canonical form ends here, in insertion order.
    pub entries: Vec<EntryId>,
    /// Payloads of `entries`, same order. Never empty.
    pub payloads: Vec<&'a P>,
    /// Matcher-level data from [`MatcherConfig::tag`].
    pub tag: Option<&'a str>,
}

/// A match over a string.
pub type StringMatch<'a, P> = Match<'a, str, P>;

/// A match over a token slice.
pub type TokenMatch<'a, T, P> = Match<'a, [T], P>;

impl<R: ?Sized, P> Match<'_, R, P> {
    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl<R: ?Sized, P> Clone for Match<'_, R, P> {
    fn clone(&self) -> Self {
        Match {
            start: self.start,
            end: self.end,
            raw: self.raw,
            entries: self.entries.clone(),
            payloads: self.payloads.clone(),
            tag: self.tag,
        }
    }
}

impl<R: ?Sized, P> PartialEq for Match<'_, R, P> {
    fn eq(&self, other: &Self) -> bool {
        (self.start, self.end) == (other.start, other.end)
    }
}

impl<R: ?Sized, P> Eq for Match<'_, R, P> {}

impl<R: ?Sized, P> PartialOrd for Match<'_, R, P> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<R: ?Sized, P> Ord for Match<'_, R, P> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.start, self.end).cmp(&(other.start, other.end))
    }
}

// --- String matcher ---------------------------------------------------------

/// Matches entries character by character.
///
/// Offsets in matches and in [`ScanOptions::window`] are UTF-8 byte offsets.
pub struct StringMatcher<P, C: Canonicalize<char> = CharPolicy> {
    trie: Trie<C::Key, P>,
    policy: C,
    config: MatcherConfig,
    word_chars: fn(char) -> bool,
}

impl<P> Default for StringMatcher<P> {
    fn default() -> Self {
        Self::new(CharPolicy::default(), MatcherConfig::default())
    }
}

impl<P, C: Canonicalize<char>> fmt::Debug for StringMatcher<P, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringMatcher")
            .field("entries", &self.trie.len())
            .field("nodes", &self.trie.node_count())
            .field("config", &self.config)
            .finish()
    }
}

impl<P, C: Canonicalize<char>> StringMatcher<P, C> {
    /// Create an empty matcher. Every [`MatcherConfig`] is valid for strings.
    pub fn new(policy: C, config: MatcherConfig) -> Self {
        StringMatcher { trie: Trie::new(), policy, config, word_chars: is_word_char }
    }

    /// Replace the word-character predicate used by [`Boundary::NonWord`].
    pub fn with_word_chars(mut self, word_chars: fn(char) -> bool) -> Self {
        self.word_chars = word_chars;
        self
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    pub fn policy(&self) -> &C {
        &self.policy
    }

    /// Insert `entry` with the configured duplicate policy.
    pub fn insert(&mut self, entry: &str, payload: P) -> Result<EntryId, MatchError> {
        self.insert_with(entry, payload, self.config.duplicates)
    }

    /// Insert `entry` with an explicit duplicate policy.
    pub fn insert_with(&mut self, entry: &str, payload: P, policy: DuplicatePolicy) -> Result<EntryId, MatchError> {
        let keys = self.entry_keys(entry);
        engine::insert(&mut self.trie, keys, payload, policy).inspect_err(|err| {
            debug!(entry, error = %err, "entry_rejected");
        })
    }

    /// Insert every `(entry, payload)` pair, stopping at the first error.
    pub fn extend<E, I>(&mut self, entries: I) -> Result<(), MatchError>
    where
        E: AsRef<str>,
        I: IntoIterator<Item = (E, P)>,
    {
        for (entry, payload) in entries {
            self.insert(entry.as_ref(), payload)?;
        }
        Ok(())
    }

    /// Payloads stored for the canonical form of `entry`.
    pub fn get(&self, entry: &str) -> Option<Vec<&P>> {
        let keys = self.entry_keys(entry);
        if keys.is_empty() {
            return None;
        }
        let node = self.trie.locate(keys.iter())?;
        let bindings = self.trie.bindings(node);
        if bindings.is_empty() { None } else { Some(bindings.iter().map(|b| &b.payload).collect()) }
    }

    pub fn contains(&self, entry: &str) -> bool {
        self.get(entry).is_some()
    }

    /// Number of distinct canonical forms.
    pub fn len(&self) -> usize {
        self.trie.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trie.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.trie.node_count()
    }

    /// Scan `text` with the configured modes.
    pub fn find<'a>(&'a self, text: &'a str) -> Vec<StringMatch<'a, P>> {
        self.find_with(text, &self.config.scan_options())
    }

    /// Scan `text` with explicit modes and an optional byte window.
    pub fn find_with<'a>(&'a self, text: &'a str, opts: &ScanOptions) -> Vec<StringMatch<'a, P>> {
        self.find_with_metrics(text, opts).matches
    }

    /// Like [`find_with`](Self::find_with), also returning scan metrics.
    pub fn find_with_metrics<'a>(&'a self, text: &'a str, opts: &ScanOptions) -> ScanRun<StringMatch<'a, P>> {
        let started = Instant::now();
        let span = tracing::span!(Level::DEBUG, "termtrie.scan", engine = "string", input_len = text.len());
        let _guard = span.enter();

        let (chars, offsets): (Vec<char>, Vec<usize>) = text.char_indices().map(|(b, c)| (c, b)).unzip();
        let word_chars = (self.config.boundary == Boundary::NonWord).then_some(self.word_chars);
        let input = PreparedInput::from_chars(&self.policy, &chars, word_chars);

        let byte_at = |pos: usize| offsets.get(pos).copied().unwrap_or(text.len());
        // Both ends round inward: only chars lying wholly inside the byte range.
        let window = match &opts.window {
            Some(bytes) => {
                let end = bytes.end.min(text.len());
                let mut hi = offsets.partition_point(|&b| b < end);
                if hi > 0 && byte_at(hi) > end {
                    hi -= 1;
                }
                offsets.partition_point(|&b| b < bytes.start)..hi
            }
            None => 0..chars.len(),
        };
        let settings = ScanSettings { mode: opts.mode, continuation: opts.continuation, window };

        let mut metrics = ScanMetrics::default();
        let hits = Scanner::new(&self.trie, &input, settings).run(&mut metrics);

        let tag = self.config.tag.as_deref();
        let matches: Vec<StringMatch<'a, P>> = hits
            .iter()
            .map(|hit: &Hit| {
                let (start, end) = (byte_at(hit.start), byte_at(hit.end));
                engine::resolve_hit(&self.trie, hit, (start, end), &text[start..end], tag)
            })
            .collect();

        metrics.elapsed = started.elapsed();
        debug!(
            starts = metrics.starts,
            descents = metrics.descents,
            matches = metrics.matches,
            elapsed_micros = metrics.elapsed.as_micros() as u64,
            "scan_complete"
        );
        ScanRun { matches, metrics }
    }

    /// Replace every longest, non-overlapping match in `text` with the output
    /// of `replacer`. Text between matches is copied verbatim.
    ///
    /// ```
    /// use termtrie::StringMatcher;
    ///
    /// let mut m: StringMatcher<i32> = StringMatcher::default();
    /// m.insert("thisis", 3).unwrap();
    /// m.insert("word", 1).unwrap();
    /// let out = m.replace("thisis a word", |hit| hit.payloads[0].to_string());
    /// assert_eq!(out, "3 a 1");
    /// ```
    pub fn replace<F>(&self, text: &str, mut replacer: F) -> String
    where
        F: FnMut(&StringMatch<'_, P>) -> String,
    {
        let matches = self.find_with(text, &ScanOptions::default());
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for m in &matches {
            out.push_str(&text[last..m.start]);
            out.push_str(&replacer(m));
            last = m.end;
        }
        out.push_str(&text[last..]);
        out
    }

    fn entry_keys(&self, entry: &str) -> EntryKeys<C::Key> {
        entry.chars().filter_map(|c| self.policy.canonical(&c)).collect()
    }
}

// --- Token matcher ----------------------------------------------------------

/// Matches entries token by token.
///
/// Entries and inputs are slices of anything that is `AsRef<str>`. Offsets in
/// matches and in [`ScanOptions::window`] are token indices.
pub struct TokenMatcher<P, C: Canonicalize<str> = TokenPolicy> {
    trie: Trie<C::Key, P>,
    policy: C,
    config: MatcherConfig,
}

impl<P, C: Canonicalize<str>> fmt::Debug for TokenMatcher<P, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenMatcher")
            .field("entries", &self.trie.len())
            .field("nodes", &self.trie.node_count())
            .field("config", &self.config)
            .finish()
    }
}

impl<P, C: Canonicalize<str>> TokenMatcher<P, C> {
    /// Create an empty matcher.
    ///
    /// Fails with [`MatchError::UnsupportedConfiguration`] for
    /// [`Boundary::NonWord`]: tokens have no character classes.
    pub fn new(policy: C, config: MatcherConfig) -> Result<Self, MatchError> {
        if config.boundary != Boundary::Any {
            return Err(MatchError::UnsupportedConfiguration(
                "word boundaries are not available for token matching".to_string(),
            ));
        }
        Ok(TokenMatcher { trie: Trie::new(), policy, config })
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    pub fn policy(&self) -> &C {
        &self.policy
    }

    /// Insert a token sequence with the configured duplicate policy.
    pub fn insert<T: AsRef<str>>(&mut self, entry: &[T], payload: P) -> Result<EntryId, MatchError> {
        self.insert_with(entry, payload, self.config.duplicates)
    }

    /// Insert a token sequence with an explicit duplicate policy.
    pub fn insert_with<T: AsRef<str>>(
        &mut self,
        entry: &[T],
        payload: P,
        policy: DuplicatePolicy,
    ) -> Result<EntryId, MatchError> {
        let keys = self.entry_keys(entry);
        engine::insert(&mut self.trie, keys, payload, policy).inspect_err(|err| {
            debug!(tokens = entry.len(), error = %err, "entry_rejected");
        })
    }

    /// Insert every `(entry, payload)` pair, stopping at the first error.
    pub fn extend<T, E, I>(&mut self, entries: I) -> Result<(), MatchError>
    where
        T: AsRef<str>,
        E: AsRef<[T]>,
        I: IntoIterator<Item = (E, P)>,
    {
        for (entry, payload) in entries {
            self.insert(entry.as_ref(), payload)?;
        }
        Ok(())
    }

    /// Payloads stored for the canonical form of `entry`.
    pub fn get<T: AsRef<str>>(&self, entry: &[T]) -> Option<Vec<&P>> {
        let keys = self.entry_keys(entry);
        if keys.is_empty() {
            return None;
        }
        let node = self.trie.locate(keys.iter())?;
        let bindings = self.trie.bindings(node);
        if bindings.is_empty() { None } else { Some(bindings.iter().map(|b| &b.payload).collect()) }
    }

    pub fn contains<T: AsRef<str>>(&self, entry: &[T]) -> bool {
        self.get(entry).is_some()
    }

    /// Number of distinct canonical forms.
    pub fn len(&self) -> usize {
        self.trie.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trie.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.trie.node_count()
    }

    /// Scan `tokens` with the configured modes.
    pub fn find<'a, T: AsRef<str>>(&'a self, tokens: &'a [T]) -> Vec<TokenMatch<'a, T, P>> {
        self.find_with(tokens, &self.config.scan_options())
    }

    /// Scan `tokens` with explicit modes and an optional index window.
    pub fn find_with<'a, T: AsRef<str>>(&'a self, tokens: &'a [T], opts: &ScanOptions) -> Vec<TokenMatch<'a, T, P>> {
        self.find_with_metrics(tokens, opts).matches
    }

    /// Like [`find_with`](Self::find_with), also returning scan metrics.
    pub fn find_with_metrics<'a, T: AsRef<str>>(
        &'a self,
        tokens: &'a [T],
        opts: &ScanOptions,
    ) -> ScanRun<TokenMatch<'a, T, P>> {
        let started = Instant::now();
        let span = tracing::span!(Level::DEBUG, "termtrie.scan", engine = "token", input_len = tokens.len());
        let _guard = span.enter();

        let input = PreparedInput::canonicalize(&self.policy, tokens.iter().map(AsRef::<str>::as_ref));
        let window = opts.window.clone().unwrap_or(0..tokens.len());
        let settings = ScanSettings { mode: opts.mode, continuation: opts.continuation, window };

        let mut metrics = ScanMetrics::default();
        let hits = Scanner::new(&self.trie, &input, settings).run(&mut metrics);

        let tag = self.config.tag.as_deref();
        let matches: Vec<TokenMatch<'a, T, P>> = hits
            .iter()
            .map(|hit| engine::resolve_hit(&self.trie, hit, (hit.start, hit.end), &tokens[hit.start..hit.end], tag))
            .collect();

        metrics.elapsed = started.elapsed();
        debug!(
            starts = metrics.starts,
            descents = metrics.descents,
            matches = metrics.matches,
            elapsed_micros = metrics.elapsed.as_micros() as u64,
            "scan_complete"
        );
        ScanRun { matches, metrics }
    }

    fn entry_keys<T: AsRef<str>>(&self, entry: &[T]) -> EntryKeys<C::Key> {
        entry.iter().filter_map(|t| self.policy.canonical(t.as_ref())).collect()
    }
}
