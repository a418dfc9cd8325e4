use thiserror::Error;

/// Errors raised while configuring a matcher or inserting entries.
///
/// Scanning never fails: an input without matches yields an empty result.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// The entry has an empty canonical form (zero length, or every symbol
    /// is ignorable under the active policy).
    #[error("invalid entry: {0}")]
    InvalidEntry(String),
    /// The matcher was asked for a policy or mode it cannot honor.
    #[error("unsupported configuration: {0}")]
    UnsupportedConfiguration(String),
    /// The canonical form is already present and duplicates are rejected.
    #[error("duplicate entry: canonical form already present")]
    DuplicateEntry,
    /// The store ran out of node or entry ids.
    #[error("capacity exceeded: no more {0} ids")]
    CapacityExceeded(&'static str),
}
