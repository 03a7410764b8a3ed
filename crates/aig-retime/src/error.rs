use thiserror::Error;

/// Errors raised by the retiming engine (§7).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RetimeError {
    /// Retiming was invoked on a network with no registers. Callers are
    /// expected to check `n_regs()` themselves first; this is a caller-input
    /// problem, so it is returned rather than panicking.
    #[error("retiming requires at least one register, network has none")]
    NoRegisters,
}

/// Result alias for `aig-retime`.
pub type RetimeResult<T> = Result<T, RetimeError>;
