//! Filler source for absent subtree slots.
//!
//! Root and path reconstruction need a stand-in hash for every absent slot
//! at every level. [`PathFiller`] serves those requests from an optional
//! override queue first (consumed in request order), then falls back to the
//! precomputed [`EmptyRoots`] table. The override queue is how a witness
//! answers queries against an anchor state that already contains leaves
//! appended after the snapshot moment.
//!
//! A `PathFiller` is owned by the caller of `root`/`path` and passed by
//! exclusive reference for the duration of the call; the tree never stores
//! one.

use std::collections::VecDeque;

use crate::{Result, empty_roots::EmptyRoots, hash::Hash};

/// A cursor over filler hashes: an override queue backed by the empty-root
/// table.
#[derive(Debug)]
pub struct PathFiller<'a> {
    queue: VecDeque<Hash>,
    table: &'a EmptyRoots,
}

impl<'a> PathFiller<'a> {
    /// A filler that always answers from the empty-root table.
    pub fn new(table: &'a EmptyRoots) -> Self {
        PathFiller {
            queue: VecDeque::new(),
            table,
        }
    }

    /// A filler that drains `overrides` front-to-back before falling back
    /// to the table.
    pub fn with_overrides(table: &'a EmptyRoots, overrides: VecDeque<Hash>) -> Self {
        PathFiller {
            queue: overrides,
            table,
        }
    }

    /// The next filler hash for an absent slot at `level`.
    ///
    /// Pops the override queue if non-empty, otherwise reads the table.
    pub fn next(&mut self, level: u8) -> Result<Hash> {
        match self.queue.pop_front() {
            Some(hash) => Ok(hash),
            None => self.table.root(level),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::EMPTY_LEAF;

    #[test]
    fn test_table_fallback() {
        let table = EmptyRoots::to_level(4);
        let mut filler = PathFiller::new(&table);
        assert_eq!(filler.next(0).expect("level 0"), EMPTY_LEAF);
        assert_eq!(
            filler.next(3).expect("level 3"),
            table.root(3).expect("table level 3")
        );
    }

    #[test]
    fn test_overrides_consumed_in_request_order() {
        let table = EmptyRoots::to_level(4);
        let overrides: VecDeque<Hash> = VecDeque::from(vec![[0xAAu8; 32], [0xBBu8; 32]]);
        let mut filler = PathFiller::with_overrides(&table, overrides);
        // Two requests at the same level drain two queue entries.
        assert_eq!(filler.next(0).expect("first"), [0xAAu8; 32]);
        assert_eq!(filler.next(0).expect("second"), [0xBBu8; 32]);
        // Exhausted queue falls back to the table.
        assert_eq!(
            filler.next(2).expect("fallback"),
            table.root(2).expect("table level 2")
        );
    }

    #[test]
    fn test_exhausted_queue_out_of_range_level() {
        let table = EmptyRoots::to_level(1);
        let mut filler = PathFiller::new(&table);
        assert!(filler.next(2).is_err());
    }
}
