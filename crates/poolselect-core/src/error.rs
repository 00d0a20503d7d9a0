//! Error types for pool selection.

use thiserror::Error;

/// A specialized `Result` type for pool selection operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or evaluating a pool selection.
#[derive(Debug, Error)]
pub enum Error {
    /// The injected replica listing capability failed.
    ///
    /// The lister's message is carried verbatim.
    #[error("failed to list replicas for selector '{selector}': {message}")]
    QueryFailed {
        /// The label selector the query was issued with.
        selector: String,
        /// The error reported by the lister.
        message: String,
    },

    /// Hard and preferred anti-affinity were both requested for one selection.
    #[error("conflicting policies: '{hard}' and '{soft}' cannot be used together")]
    ConflictingPolicies {
        /// Name of the hard anti-affinity policy.
        hard: String,
        /// Name of the preferred anti-affinity policy.
        soft: String,
    },

    /// A rule referenced a template function that is not registered.
    #[error("unknown template function '{0}'")]
    UnknownTemplateFunction(String),

    /// A label selector cannot be written unambiguously.
    #[error("invalid label selector: {0}")]
    InvalidSelector(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Creates a query failure for the given selector.
    #[must_use]
    pub fn query_failed(selector: impl Into<String>, message: impl Into<String>) -> Self {
        Self::QueryFailed { selector: selector.into(), message: message.into() }
    }

    /// Returns true if this error came from the replica lister.
    #[must_use]
    pub const fn is_query_failure(&self) -> bool {
        matches!(self, Self::QueryFailed { .. })
    }

    /// Returns true if this error is a policy composition conflict.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::ConflictingPolicies { .. })
    }
}
