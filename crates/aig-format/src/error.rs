use thiserror::Error;

use aig_core::CoreError;

/// Errors raised while decoding an AIGER byte stream (§7).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Header line failed to parse, had a bad separator, or `M != I+L+A`.
    #[error("bad AIGER header: {reason}")]
    BadHeader {
        /// Human-readable reason.
        reason: String,
    },

    /// Fewer AND records were present than the header's `A` promised.
    #[error("truncated AND body: expected {expected} records, got {got}")]
    TruncatedBody {
        /// Records the header promised.
        expected: usize,
        /// Records actually decoded before running out of input.
        got: usize,
    },

    /// A symbol-table record used an unrecognised leading type character.
    #[error("bad symbol type {found:?} (expected one of 'i', 'l', 'o')")]
    BadSymbolType {
        /// The offending character.
        found: char,
    },

    /// A symbol-table record's index was out of range for its vector.
    #[error("symbol index {index} out of range for type {kind:?} (len {len})")]
    BadSymbolIndex {
        /// Symbol type the index was read against.
        kind: char,
        /// The offending index.
        index: usize,
        /// Length of the corresponding terminal vector.
        len: usize,
    },

    /// The post-decode consistency check rejected the network.
    #[error("post-decode consistency check failed")]
    CheckFailed,

    /// Propagated from the shared varint/bounds codec.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result alias for `aig-format`.
pub type FormatResult<T> = Result<T, FormatError>;
