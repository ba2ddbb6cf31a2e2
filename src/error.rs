use thiserror::Error;

/// Alias for `core::result::Result<T, Error>`.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors from incremental commitment tree operations.
///
/// Every variant is a caller contract violation or an integrity failure,
/// never a transient fault. Mutating operations either fully succeed or
/// leave the tree untouched.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[non_exhaustive]
pub enum Error {
    /// `append` was called on a tree already holding `capacity` leaves.
    #[error("tree is full (capacity {capacity})")]
    TreeFull {
        /// Maximum number of leaves the tree can hold (`2^depth`).
        capacity: u64,
    },
    /// `last` or `path` was called on a tree with no leaves appended.
    #[error("tree has no cursor")]
    NoCursor,
    /// A supplied (left, right, parents) triple violates a canonical-form
    /// invariant. The message names the broken invariant.
    #[error("tree has non-canonical representation: {0}")]
    NonCanonical(&'static str),
    /// Invalid input parameters (depth out of range, requested root depth
    /// below the tree depth).
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Invalid serialized tree data (truncation, bad flags, trailing bytes).
    #[error("invalid tree data: {0}")]
    InvalidData(String),
    /// An empty-subtree root was requested past the end of the precomputed
    /// table.
    #[error("empty root for level {level} exceeds table max level {max_level}")]
    EmptyRootOutOfRange {
        /// The level that was requested.
        level: u8,
        /// The highest level the table holds.
        max_level: u8,
    },
    /// The witness has no remaining capacity to the right of the witnessed
    /// leaf.
    #[error("witness cannot be extended")]
    WitnessFull,
}
