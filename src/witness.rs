//! Incremental witness: keeps one leaf's authentication path valid as
//! later leaves are appended.
//!
//! A witness snapshots the tree at the moment the interesting leaf was the
//! last one appended, then tracks every subsequent leaf in compressed form:
//! completed sibling subtrees to the right of the witnessed leaf land in
//! `filled`, and the subtree currently being built lives in `cursor` (a
//! small tree of exactly the depth the next gap needs). Root and path
//! queries replay the snapshot with `filled` (plus the cursor's interim
//! root) as the filler override queue, so they reflect the full tree
//! without the witness ever storing it.

use std::collections::VecDeque;

use crate::{
    Error, Result, empty_roots::EmptyRoots, filler::PathFiller, hash::Hash, path::MerklePath,
    tree::IncrementalMerkleTree,
};

/// A membership witness for the last-appended leaf of a snapshotted tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncrementalWitness {
    tree: IncrementalMerkleTree,
    filled: Vec<Hash>,
    cursor: Option<IncrementalMerkleTree>,
}

impl IncrementalWitness {
    /// Create a witness for the last-appended leaf of `tree`.
    ///
    /// Callers snapshot the live accumulator (a cheap clone of at most
    /// depth + 2 hashes) right after appending the leaf to witness.
    pub fn from_tree(tree: IncrementalMerkleTree) -> Self {
        IncrementalWitness {
            tree,
            filled: Vec::new(),
            cursor: None,
        }
    }

    /// The witnessed leaf (the snapshot's last-appended leaf).
    pub fn element(&self) -> Result<Hash> {
        self.tree.last()
    }

    /// The 0-based position of the witnessed leaf.
    pub fn position(&self) -> Result<u64> {
        match self.tree.size() {
            0 => Err(Error::NoCursor),
            size => Ok(size - 1),
        }
    }

    /// Record a leaf appended to the live tree after the snapshot.
    ///
    /// Returns [`Error::WitnessFull`] when no capacity remains to the
    /// right of the witnessed leaf.
    pub fn append(&mut self, leaf: Hash, table: &EmptyRoots) -> Result<()> {
        if let Some(cursor) = self.cursor.as_mut() {
            cursor.append(leaf)?;
            if cursor.is_complete() {
                self.filled.push(cursor.root(table)?);
                self.cursor = None;
            }
            return Ok(());
        }

        // The next gap in the snapshot's occupancy tells us the depth of
        // the sibling subtree this leaf starts filling.
        let next = self.tree.next_depth(self.filled.len() as u64);
        if next >= self.tree.depth() as u64 {
            return Err(Error::WitnessFull);
        }
        if next == 0 {
            // A single-leaf gap: the leaf itself is the filler value.
            self.filled.push(leaf);
        } else {
            let mut cursor = IncrementalMerkleTree::new(next as u8)?;
            cursor.append(leaf)?;
            self.cursor = Some(cursor);
        }
        Ok(())
    }

    /// The root of the full tree (snapshot plus everything appended since).
    ///
    /// Matches the live accumulator's `root()` after the same appends.
    pub fn root(&self, table: &EmptyRoots) -> Result<Hash> {
        let mut filler = self.partial_filler(table)?;
        self.tree.root_with_filler(self.tree.depth(), &mut filler)
    }

    /// The authentication path from the witnessed leaf to the current root.
    pub fn path(&self, table: &EmptyRoots) -> Result<MerklePath> {
        let mut filler = self.partial_filler(table)?;
        self.tree.path_with_filler(&mut filler)
    }

    // Build the filler override queue: completed subtree roots first, then
    // the interim root of the subtree still being filled.
    fn partial_filler<'a>(&self, table: &'a EmptyRoots) -> Result<PathFiller<'a>> {
        let mut overrides: VecDeque<Hash> = self.filled.iter().copied().collect();
        if let Some(cursor) = &self.cursor {
            overrides.push_back(cursor.root(table)?);
        }
        Ok(PathFiller::with_overrides(table, overrides))
    }
}
