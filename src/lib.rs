//! Incremental commitment tree — a fixed-depth, append-only Merkle
//! accumulator for shielded-transaction commitment sets.
//!
//! The tree stores only O(depth) hashes (a compressed frontier) yet
//! supports the three operations a shielded pool needs: append a newly
//! committed note, compute the current anchor root (optionally extended to
//! a larger virtual depth), and produce the authentication path of the
//! last-appended leaf. Absent subtrees are stood in for by precomputed
//! empty-subtree roots, with Blake3 domain-separated hashing per level.
//!
//! # Core types
//!
//! - [`IncrementalMerkleTree`] — the accumulator (append, root, path,
//!   occupancy queries, canonical-form validation, serialization).
//! - [`IncrementalWitness`] — keeps one leaf's path valid as later leaves
//!   arrive.
//! - [`MerklePath`] — sibling hashes plus right-child flags, outermost
//!   level first.
//! - [`EmptyRoots`] — the precomputed empty-subtree root table.
//! - [`PathFiller`] — caller-owned filler cursor (override queue + table
//!   fallback).

#![warn(missing_docs)]

mod empty_roots;
mod error;
mod filler;
mod hash;
mod path;
mod tree;
mod witness;


pub use empty_roots::EmptyRoots;
pub use error::{Error, Result};
pub use filler::PathFiller;
pub use hash::{COMMITMENT_TREE_DEPTH, EMPTY_LEAF, Hash, MAX_TREE_DEPTH, combine};
pub use path::MerklePath;
pub use tree::IncrementalMerkleTree;
pub use witness::IncrementalWitness;
