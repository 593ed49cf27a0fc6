use thiserror::Error;

/// A construction parameter that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum InvalidArgument {
    /// The table was asked for zero buckets.
    #[error("capacity must be a positive number")]
    ZeroCapacity,

    /// The load factor threshold was outside `(0, 1]`.
    #[error("load factor threshold must be in (0, 1], got {0}")]
    LoadFactorThreshold(f64),
}

/// Errors returned by [`HashTable`](crate::HashTable) operations.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum Error {
    /// Rejected construction parameters.
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] InvalidArgument),

    /// The key is not present in the table.
    #[error("key not found")]
    KeyNotFound,
}

/// Shorthand for results carrying this crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;
