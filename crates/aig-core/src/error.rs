use thiserror::Error;

/// Low-level errors shared by the varint codec and the structural core.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The buffer ended before a varint's terminating byte (high bit clear) was read.
    #[error("truncated varint at offset {at}")]
    TruncatedVarint {
        /// Offset at which the cursor ran out of bytes.
        at: usize,
    },

    /// A literal's variable index falls outside the populated literal table.
    #[error("literal {literal} out of range (table holds {table_len} entries)")]
    BadLiteral {
        /// The offending literal (`2*var + inversion`).
        literal: u32,
        /// Number of entries currently in the literal table.
        table_len: usize,
    },

    /// Requested more bytes than the buffer has left.
    #[error("unexpected end of buffer: need {needed} bytes at offset {at}")]
    UnexpectedEof {
        /// Bytes requested.
        needed: usize,
        /// Offset at which the read was attempted.
        at: usize,
    },
}

/// Result alias for `aig-core`.
pub type CoreResult<T> = Result<T, CoreError>;
