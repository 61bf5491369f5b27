//! Error types for ledger interactions.

/// Errors surfaced by a ledger backend or by handle resolution.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// Symbolic name absent from the address registry.
    #[error("unknown address name: {0}")]
    UnknownName(String),

    /// Symbolic contract name absent from a handle set.
    #[error("unknown contract: {0}")]
    UnknownContract(String),

    /// Token contract the ledger has no state for.
    #[error("unknown token at {0}")]
    UnknownToken(String),

    /// Malformed address literal.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Debit larger than the account holds.
    #[error("insufficient balance: {holder} holds {held}, needs {needed}")]
    InsufficientBalance {
        holder: String,
        held: u128,
        needed: u128,
    },

    /// Backend-specific call failure.
    #[error("ledger call failed: {0}")]
    Call(String),
}
