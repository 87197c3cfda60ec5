//! Error types for encode, rebuild, and correction operations

use thiserror::Error;

/// Errors that can occur during Reed-Solomon encode/decode operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FecError {
    /// A parameter or algebraic precondition was violated
    #[error("domain error: {0}")]
    Domain(String),

    /// A buffer shape or share number did not match expectations
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Fewer shares were supplied than the code requires
    #[error("not enough shares")]
    NotEnoughShares,

    /// Corruption exceeds the correction capacity of the code
    #[error("too many errors to reconstruct")]
    TooManyErrors,
}

/// Type alias for Result with FecError
pub type Result<T> = std::result::Result<T, FecError>;
