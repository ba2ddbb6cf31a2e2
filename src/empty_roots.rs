//! Precomputed table of empty-subtree roots.
//!
//! `roots[k]` is the root of a fully-empty subtree of height `k`:
//! `roots[0] = EMPTY_LEAF` and `roots[k + 1] = combine(roots[k], roots[k], k)`.
//! The root and path reconstructors substitute these values for every
//! absent slot at every level.

use crate::{
    Error, Result,
    hash::{EMPTY_LEAF, Hash, combine},
};

/// Precomputed empty-subtree roots for levels `0..=max_level`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyRoots {
    roots: Vec<Hash>,
}

impl EmptyRoots {
    /// Precompute empty roots up to and including `max_level`.
    ///
    /// A tree of depth `d` needs a table with `max_level >= d` to answer
    /// `root()` at its own depth and to compare against the canonical
    /// empty root.
    pub fn to_level(max_level: u8) -> Self {
        let mut roots = Vec::with_capacity(max_level as usize + 1);
        roots.push(EMPTY_LEAF);
        for level in 0..max_level {
            let prev = roots[level as usize];
            roots.push(combine(&prev, &prev, level));
        }
        EmptyRoots { roots }
    }

    /// The highest level this table holds a root for.
    pub fn max_level(&self) -> u8 {
        (self.roots.len() - 1) as u8
    }

    /// The canonical root of a fully-empty subtree of height `level`.
    ///
    /// Returns [`Error::EmptyRootOutOfRange`] past the end of the table.
    pub fn root(&self, level: u8) -> Result<Hash> {
        self.roots
            .get(level as usize)
            .copied()
            .ok_or(Error::EmptyRootOutOfRange {
                level,
                max_level: self.max_level(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_is_empty_leaf() {
        let table = EmptyRoots::to_level(4);
        assert_eq!(table.root(0).expect("level 0"), EMPTY_LEAF);
    }

    #[test]
    fn test_recursive_definition() {
        let table = EmptyRoots::to_level(8);
        for level in 0..8u8 {
            let child = table.root(level).expect("child level");
            assert_eq!(
                table.root(level + 1).expect("parent level"),
                combine(&child, &child, level),
                "table must satisfy root(k + 1) == combine(root(k), root(k), k)"
            );
        }
    }

    #[test]
    fn test_out_of_range() {
        let table = EmptyRoots::to_level(3);
        assert_eq!(table.max_level(), 3);
        assert_eq!(
            table.root(4),
            Err(Error::EmptyRootOutOfRange {
                level: 4,
                max_level: 3
            })
        );
    }

    #[test]
    fn test_zero_level_table() {
        let table = EmptyRoots::to_level(0);
        assert_eq!(table.max_level(), 0);
        assert_eq!(table.root(0).expect("level 0"), EMPTY_LEAF);
        assert!(table.root(1).is_err());
    }
}
