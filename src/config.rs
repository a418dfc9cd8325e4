//! Matcher and scan configuration.
//!
//! [`MatcherConfig`] is fixed when a matcher is constructed and carries the
//! default scan modes plus the build-time duplicate policy. [`ScanOptions`] is
//! a per-call override of the scan modes.
//!
//! Both types are serializable so callers can keep matcher settings next to
//! their vocabulary files:
//!
//! ```
//! use termtrie::{Boundary, MatchMode, MatcherConfig};
//!
//! let config: MatcherConfig = serde_json::from_str(r#"{"mode": "all", "boundary": "non_word"}"#).unwrap();
//! assert_eq!(config.mode, MatchMode::All);
//! assert_eq!(config.boundary, Boundary::NonWord);
//! ```

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Which candidate end points of a descent are reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Only the candidate with the greatest end offset.
    #[default]
    Longest,
    /// Every complete entry found along the descent, shortest first.
    All,
}

/// How the scan cursor advances after a start position was tried.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Continuation {
    /// Jump to the end of the last emitted match; matches never overlap.
    #[default]
    Skip,
    /// Always advance by one symbol; overlapping matches are reported.
    NoSkip,
}

/// Word-boundary constraint (string engine only).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Boundary {
    /// Matches may start and end anywhere.
    #[default]
    Any,
    /// Matches must be preceded and followed by a non-word character or the
    /// edge of the input.
    NonWord,
}

/// What happens when an entry's canonical form is already present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Keep every payload, in insertion order.
    #[default]
    Append,
    /// Last write wins: the new payload replaces all previous ones.
    Replace,
    /// Fail with [`MatchError::DuplicateEntry`](crate::MatchError::DuplicateEntry).
    Reject,
}

/// Construction-time matcher settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Default match selection for [`find`](crate::StringMatcher::find).
    pub mode: MatchMode,
    /// Default cursor advance for [`find`](crate::StringMatcher::find).
    pub continuation: Continuation,
    /// Word-boundary constraint. Only the string engine supports
    /// [`Boundary::NonWord`].
    pub boundary: Boundary,
    /// Policy applied by `insert`.
    pub duplicates: DuplicatePolicy,
    /// Matcher-level data attached to every match.
    pub tag: Option<String>,
}

impl MatcherConfig {
    pub fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_continuation(mut self, continuation: Continuation) -> Self {
        self.continuation = continuation;
        self
    }

    pub fn with_boundary(mut self, boundary: Boundary) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn with_duplicates(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = duplicates;
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Scan options matching this config's defaults.
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions { mode: self.mode, continuation: self.continuation, window: None }
    }
}

/// Per-call scan settings.
///
/// `window` limits scanning to part of the input: a byte range for strings,
/// a token index range for token sequences. Symbols outside the window are
/// never consumed by a match; a char straddling a byte edge counts as outside.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanOptions {
    pub mode: MatchMode,
    pub continuation: Continuation,
    pub window: Option<Range<usize>>,
}

impl ScanOptions {
    pub fn new(mode: MatchMode, continuation: Continuation) -> Self {
        Self { mode, continuation, window: None }
    }

    pub fn with_window(mut self, window: Range<usize>) -> Self {
        self.window = Some(window);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_longest_skip_any_append() {
        let config = MatcherConfig::default();
        assert_eq!(config.mode, MatchMode::Longest);
        assert_eq!(config.continuation, Continuation::Skip);
        assert_eq!(config.boundary, Boundary::Any);
        assert_eq!(config.duplicates, DuplicatePolicy::Append);
        assert!(config.tag.is_none());
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = MatcherConfig::default()
            .with_mode(MatchMode::All)
            .with_continuation(Continuation::NoSkip)
            .with_duplicates(DuplicatePolicy::Replace)
            .with_tag("cities");
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"no_skip\""));
        let back: MatcherConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn scan_options_follow_config() {
        let config = MatcherConfig::default().with_mode(MatchMode::All);
        let opts = config.scan_options().with_window(2..5);
        assert_eq!(opts.mode, MatchMode::All);
        assert_eq!(opts.continuation, Continuation::Skip);
        assert_eq!(opts.window, Some(2..5));
    }
}
