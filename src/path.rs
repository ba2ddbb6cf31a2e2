//! Authentication path produced for the last-appended leaf.

use crate::hash::{Hash, combine};

/// An authentication path: sibling hashes plus, per level, whether the
/// focal node is the right child (`true`) or the left child (`false`).
///
/// Both lists are ordered outermost level first — `auth_path[0]` is the
/// sibling directly under the root and the last entry is the sibling
/// adjacent to the leaf. This matches the verifier-side convention; the
/// tree builds both lists bottom-up and reverses them together before
/// returning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerklePath {
    /// Sibling hashes, outermost level first.
    pub auth_path: Vec<Hash>,
    /// Right-child flags, outermost level first, parallel to `auth_path`.
    pub index: Vec<bool>,
}

impl MerklePath {
    /// The number of levels in this path (the tree depth it was taken at).
    pub fn depth(&self) -> usize {
        self.auth_path.len()
    }

    /// The 0-based position of the witnessed leaf, decoded from the
    /// right-child flags.
    pub fn position(&self) -> u64 {
        self.index
            .iter()
            .fold(0u64, |acc, is_right| (acc << 1) | u64::from(*is_right))
    }

    /// Recompute the root by replaying the path from the witnessed leaf.
    ///
    /// Walks the lists innermost-first (they are stored outermost-first),
    /// combining at each level according to the right-child flag. Matching
    /// the tree's own `root()` output verifies the path.
    pub fn root_from(&self, leaf: Hash) -> Hash {
        let mut running = leaf;
        for (level, (sibling, is_right)) in self
            .auth_path
            .iter()
            .rev()
            .zip(self.index.iter().rev())
            .enumerate()
        {
            running = if *is_right {
                combine(sibling, &running, level as u8)
            } else {
                combine(&running, sibling, level as u8)
            };
        }
        running
    }
}
