//! The incremental commitment tree: compressed frontier state, the append
//! carry engine, and root/path reconstruction.
//!
//! The tree stores only O(depth) hashes: the two leaf-level slots plus one
//! collapsed-subtree slot per level. Slot occupancy behaves like a binary
//! counter and `append` ripples a carry of combined hashes upward, so two
//! trees built from the same leaf sequence are bit-identical.

use crate::{
    Error, Result,
    empty_roots::EmptyRoots,
    filler::PathFiller,
    hash::{COMMITMENT_TREE_DEPTH, Hash, combine, validate_depth},
    path::MerklePath,
};

/// A fixed-depth, append-only Merkle accumulator over a shielded commitment
/// set.
///
/// `left` and `right` hold the most recent (not yet combined) leaf pair;
/// `parents[i]` holds the collapsed root of a full subtree at level `i + 1`,
/// or `None` where no such subtree exists yet. Canonical form (checked by
/// [`IncrementalMerkleTree::check_well_formed`]):
///
/// - `parents.len() < depth`
/// - the last `parents` entry, if any, is present
/// - `right` present implies `left` present
/// - `parents` non-empty implies `left` present
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncrementalMerkleTree {
    depth: u8,
    left: Option<Hash>,
    right: Option<Hash>,
    parents: Vec<Option<Hash>>,
}

impl Default for IncrementalMerkleTree {
    fn default() -> Self {
        IncrementalMerkleTree {
            depth: COMMITMENT_TREE_DEPTH,
            left: None,
            right: None,
            parents: Vec::new(),
        }
    }
}

impl IncrementalMerkleTree {
    /// Create a new empty tree with the given depth.
    ///
    /// Depth must be between 1 and [`crate::MAX_TREE_DEPTH`] inclusive.
    pub fn new(depth: u8) -> Result<Self> {
        validate_depth(depth)?;
        Ok(IncrementalMerkleTree {
            depth,
            left: None,
            right: None,
            parents: Vec::new(),
        })
    }

    /// Reconstitute a tree from externally supplied state.
    ///
    /// This is the deserialization/network boundary: the canonical-form
    /// check runs before the state is accepted, so a non-canonical triple
    /// is rejected with [`Error::NonCanonical`] rather than silently
    /// repaired.
    pub fn from_parts(
        depth: u8,
        left: Option<Hash>,
        right: Option<Hash>,
        parents: Vec<Option<Hash>>,
    ) -> Result<Self> {
        validate_depth(depth)?;
        let tree = IncrementalMerkleTree {
            depth,
            left,
            right,
            parents,
        };
        tree.check_well_formed()?;
        Ok(tree)
    }

    /// The fixed depth of this tree.
    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Maximum number of leaves this tree can hold (`2^depth`).
    pub fn capacity(&self) -> u64 {
        1u64 << self.depth
    }

    /// The number of leaves appended so far, derived from slot occupancy.
    pub fn size(&self) -> u64 {
        let mut ret = 0u64;
        if self.left.is_some() {
            ret += 1;
        }
        if self.right.is_some() {
            ret += 1;
        }
        // Treat the occupancy of the parents list as a binary number
        // (right-shifted by one).
        for (i, parent) in self.parents.iter().enumerate() {
            if parent.is_some() {
                ret += 1u64 << (i + 1);
            }
        }
        ret
    }

    /// Returns `true` if no leaves have been appended.
    pub fn is_empty(&self) -> bool {
        // In canonical form an absent `left` implies everything is absent.
        self.left.is_none()
    }

    /// Returns `true` if the tree holds exactly `2^depth` leaves.
    pub fn is_complete(&self) -> bool {
        self.is_complete_to_depth(self.depth)
    }

    /// Returns `true` if the tree holds exactly `2^depth` leaves for the
    /// given depth, i.e. no capacity remains below it.
    pub fn is_complete_to_depth(&self, depth: u8) -> bool {
        if depth == 0 {
            return false;
        }
        if self.left.is_none() || self.right.is_none() {
            return false;
        }
        if self.parents.len() != depth as usize - 1 {
            return false;
        }
        self.parents.iter().all(|parent| parent.is_some())
    }

    /// Append a new leaf, rippling combined hashes upward like a
    /// binary-counter carry.
    ///
    /// Returns [`Error::TreeFull`] (with the tree untouched) when the tree
    /// already holds `2^depth` leaves. Amortized O(1) combines per append,
    /// O(depth) for a full carry chain.
    pub fn append(&mut self, leaf: Hash) -> Result<()> {
        if self.is_complete() {
            return Err(Error::TreeFull {
                capacity: self.capacity(),
            });
        }

        if self.left.is_none() {
            self.left = Some(leaf);
            return Ok(());
        }
        if self.right.is_none() {
            self.right = Some(leaf);
            return Ok(());
        }

        // Both leaf slots occupied: combine them, restart the leaf pair
        // with the new leaf, and carry the combined hash upward.
        let left = self.left.expect("checked");
        let right = self.right.expect("checked");
        let mut combined = combine(&left, &right, 0);
        self.left = Some(leaf);
        self.right = None;

        for i in 0..self.parents.len() {
            match self.parents[i] {
                Some(parent) => {
                    combined = combine(&parent, &combined, (i + 1) as u8);
                    self.parents[i] = None;
                }
                None => {
                    self.parents[i] = Some(combined);
                    return Ok(());
                }
            }
        }
        // Every stored level carried; the completeness check above bounds
        // the new slot below the fixed depth.
        self.parents.push(Some(combined));
        Ok(())
    }

    /// Compute the root at the tree's own depth, substituting empty-subtree
    /// roots for absent slots.
    pub fn root(&self, table: &EmptyRoots) -> Result<Hash> {
        self.root_with_filler(self.depth, &mut PathFiller::new(table))
    }

    /// Compute the root extended to `depth >= self.depth()`, for embedding
    /// this subtree inside a larger tree.
    pub fn root_at_depth(&self, depth: u8, table: &EmptyRoots) -> Result<Hash> {
        self.root_with_filler(depth, &mut PathFiller::new(table))
    }

    /// Compute the root at `depth` drawing absent-slot stand-ins from an
    /// explicit filler source.
    ///
    /// An empty tree yields the canonical empty root by pure filler
    /// substitution at every level.
    pub fn root_with_filler(&self, depth: u8, filler: &mut PathFiller) -> Result<Hash> {
        if depth < self.depth {
            return Err(Error::InvalidInput(format!(
                "requested root depth {} is below tree depth {}",
                depth, self.depth
            )));
        }

        let combine_left = match self.left {
            Some(hash) => hash,
            None => filler.next(0)?,
        };
        let combine_right = match self.right {
            Some(hash) => hash,
            None => filler.next(0)?,
        };
        let mut root = combine(&combine_left, &combine_right, 0);

        let mut level = 1u8;
        for parent in &self.parents {
            root = match parent {
                Some(parent) => combine(parent, &root, level),
                None => combine(&root, &filler.next(level)?, level),
            };
            level += 1;
        }

        // The stored parents stop below the requested depth; fill in the
        // ancestors the frontier has no slots for yet.
        while level < depth {
            root = combine(&root, &filler.next(level)?, level);
            level += 1;
        }

        Ok(root)
    }

    /// The authentication path for the most recently appended leaf.
    ///
    /// Returns [`Error::NoCursor`] on an empty tree. The returned lists are
    /// ordered outermost level first; see [`MerklePath`].
    pub fn path(&self, table: &EmptyRoots) -> Result<MerklePath> {
        self.path_with_filler(&mut PathFiller::new(table))
    }

    /// The authentication path drawing absent-slot stand-ins from an
    /// explicit filler source.
    pub fn path_with_filler(&self, filler: &mut PathFiller) -> Result<MerklePath> {
        let Some(left) = self.left else {
            return Err(Error::NoCursor);
        };

        let mut auth_path: Vec<Hash> = Vec::with_capacity(self.depth as usize);
        let mut index: Vec<bool> = Vec::with_capacity(self.depth as usize);

        if self.right.is_some() {
            // The witnessed leaf is `right`, so its sibling is `left`.
            index.push(true);
            auth_path.push(left);
        } else {
            index.push(false);
            auth_path.push(filler.next(0)?);
        }

        let mut level = 1u8;
        for parent in &self.parents {
            match parent {
                Some(parent) => {
                    index.push(true);
                    auth_path.push(*parent);
                }
                None => {
                    index.push(false);
                    auth_path.push(filler.next(level)?);
                }
            }
            level += 1;
        }

        while level < self.depth {
            index.push(false);
            auth_path.push(filler.next(level)?);
            level += 1;
        }

        // Built bottom-up; verifiers expect outermost level first.
        auth_path.reverse();
        index.reverse();

        Ok(MerklePath { auth_path, index })
    }

    /// The most recently appended leaf.
    ///
    /// Returns [`Error::NoCursor`] on an empty tree.
    pub fn last(&self) -> Result<Hash> {
        self.right.or(self.left).ok_or(Error::NoCursor)
    }

    /// The level of the first absent slot, walking occupancy in append
    /// order (left, right, then each parent) and skipping the first `skip`
    /// absences.
    ///
    /// Level 0 is the leaf pair position; level `i` is `parents[i - 1]`.
    /// Used by filler sources to pre-generate the empty-subtree values
    /// upcoming appends will need.
    pub fn next_depth(&self, mut skip: u64) -> u64 {
        if self.left.is_none() {
            if skip != 0 {
                skip -= 1;
            } else {
                return 0;
            }
        }
        if self.right.is_none() {
            if skip != 0 {
                skip -= 1;
            } else {
                return 0;
            }
        }

        let mut d = 1u64;
        for parent in &self.parents {
            if parent.is_none() {
                if skip != 0 {
                    skip -= 1;
                } else {
                    return d;
                }
            }
            d += 1;
        }
        d + skip
    }

    /// Validate the canonical-form invariants.
    ///
    /// Run this on any state received from outside (deserialization,
    /// network) before trusting it. Returns [`Error::NonCanonical`] naming
    /// the broken invariant.
    pub fn check_well_formed(&self) -> Result<()> {
        if self.parents.len() >= self.depth as usize {
            return Err(Error::NonCanonical("too many parents"));
        }
        if matches!(self.parents.last(), Some(None)) {
            return Err(Error::NonCanonical("trailing absent parent slot"));
        }
        if self.left.is_none() && self.right.is_some() {
            return Err(Error::NonCanonical("right is present without left"));
        }
        if self.left.is_none() && !self.parents.is_empty() {
            return Err(Error::NonCanonical("parents are present without left"));
        }
        Ok(())
    }

    /// Heap bytes attributable to stored hashes (`left`, `right`, and the
    /// parents list).
    pub fn dynamic_memory_usage(&self) -> usize {
        32 + 32 + self.parents.len() * 32
    }

    /// The serialized size in bytes.
    ///
    /// Each slot is 1 flag byte plus 32 hash bytes when present; the
    /// parents list adds 1 count byte.
    pub fn serialized_size(&self) -> usize {
        fn slot_size(slot: &Option<Hash>) -> usize {
            if slot.is_some() { 33 } else { 1 }
        }
        slot_size(&self.left)
            + slot_size(&self.right)
            + 1
            + self.parents.iter().map(slot_size).sum::<usize>()
    }

    /// Serialize this tree to bytes.
    ///
    /// Format: `left_flag(1) [+ hash(32)] + right_flag(1) [+ hash(32)] +
    /// parent_count(1) + per parent: flag(1) [+ hash(32)]`
    /// - flag 0x00 = absent slot
    /// - flag 0x01 = present slot, followed by the 32-byte hash
    ///
    /// Two trees built from the same leaf sequence serialize identically.
    pub fn serialize(&self) -> Vec<u8> {
        fn push_slot(buf: &mut Vec<u8>, slot: &Option<Hash>) {
            match slot {
                Some(hash) => {
                    buf.push(0x01);
                    buf.extend_from_slice(hash);
                }
                None => buf.push(0x00),
            }
        }

        let mut buf = Vec::with_capacity(self.serialized_size());
        push_slot(&mut buf, &self.left);
        push_slot(&mut buf, &self.right);
        // parents.len() < depth <= MAX_TREE_DEPTH, so a single byte holds it
        buf.push(self.parents.len() as u8);
        for parent in &self.parents {
            push_slot(&mut buf, parent);
        }
        buf
    }

    /// Deserialize a tree of the given depth from bytes.
    ///
    /// Rejects truncation, unknown flags, trailing bytes, a parent count
    /// not below `depth`, and any non-canonical state (the well-formedness
    /// check runs before the value is accepted).
    pub fn deserialize(depth: u8, data: &[u8]) -> Result<Self> {
        fn read_slot(data: &[u8], cursor: &mut usize) -> Result<Option<Hash>> {
            let flag = *data
                .get(*cursor)
                .ok_or_else(|| Error::InvalidData("truncated slot flag".into()))?;
            *cursor += 1;
            match flag {
                0x00 => Ok(None),
                0x01 => {
                    let end = *cursor + 32;
                    let hash: Hash = data
                        .get(*cursor..end)
                        .ok_or_else(|| Error::InvalidData("truncated slot hash".into()))?
                        .try_into()
                        .map_err(|_| Error::InvalidData("bad hash bytes".into()))?;
                    *cursor = end;
                    Ok(Some(hash))
                }
                _ => Err(Error::InvalidData(format!(
                    "unknown slot flag: 0x{:02x}",
                    flag
                ))),
            }
        }

        validate_depth(depth)?;
        let mut cursor = 0usize;
        let left = read_slot(data, &mut cursor)?;
        let right = read_slot(data, &mut cursor)?;
        let count = *data
            .get(cursor)
            .ok_or_else(|| Error::InvalidData("truncated parent count".into()))?
            as usize;
        cursor += 1;
        if count >= depth as usize {
            return Err(Error::InvalidData(format!(
                "parent count {} is not below depth {}",
                count, depth
            )));
        }
        let mut parents = Vec::with_capacity(count);
        for _ in 0..count {
            parents.push(read_slot(data, &mut cursor)?);
        }
        if cursor != data.len() {
            return Err(Error::InvalidData(format!(
                "{} trailing bytes after tree state",
                data.len() - cursor
            )));
        }
        Self::from_parts(depth, left, right, parents)
    }
}
