//! Error type shared by the list and the table.

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Failure of a list or table operation.
///
/// A call that returns an error leaves the collection exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Front/back access or a pop on an empty list.
    #[error("container is empty")]
    EmptyContainer,

    /// Position outside the valid range for the operation.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// The rejected position.
        index: usize,
        /// Length of the list at the time of the call.
        len: usize,
    },

    /// Attempt to unlink a sentinel or a node that is not in the list.
    #[error("invalid operation: {0}")]
    InvalidOperation(&'static str),

    /// Destination buffer cannot hold the copy.
    #[error("cannot copy {needed} elements at offset {offset} into a buffer of {capacity}")]
    InvalidArgument {
        /// Requested start offset in the destination.
        offset: usize,
        /// Number of elements that had to fit.
        needed: usize,
        /// Length of the destination buffer.
        capacity: usize,
    },

    /// Key argument is the null value of its type.
    #[error("key is null")]
    NullKey,

    /// Value argument is the null value of its type.
    #[error("value is null")]
    NullValue,

    /// Key already bound in the same table.
    #[error("key is already present in this scope")]
    DuplicateKey,
}
