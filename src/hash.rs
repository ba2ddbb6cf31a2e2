//! Hash type and Blake3 combine implementation.
//!
//! Hash domain separation:
//! - Empty leaf:     the all-zero hash (no real commitment hashes to it
//!   because leaves are themselves Blake3 outputs over tagged input).
//! - Internal nodes: `blake3(0x01 || level || left || right)`
//!
//! Including the tree level in the combine input means the same pair of
//! child hashes produces different parents at different depths, which
//! blocks second-preimage attacks that relocate subtrees across levels.

use crate::{Error, Result};

/// A 256-bit hash value, used for leaves, internal nodes, and roots alike.
pub type Hash = [u8; 32];

/// Domain tag prepended to internal combine inputs.
const INTERNAL_TAG: u8 = 0x01;

/// The canonical value of an empty (uncommitted) leaf position.
pub const EMPTY_LEAF: Hash = [0u8; 32];

/// The deepest tree this crate supports; keeps `2^depth` within `u64`.
pub const MAX_TREE_DEPTH: u8 = 62;

/// The production depth of the shielded commitment tree.
pub const COMMITMENT_TREE_DEPTH: u8 = 29;

/// Combine two sibling hashes into their parent at the given tree level:
/// `blake3(0x01 || level || left || right)`.
///
/// `level` 0 combines two leaves; level `k` combines two roots of height-`k`
/// subtrees.
pub fn combine(left: &Hash, right: &Hash, level: u8) -> Hash {
    let mut input = [0u8; 66];
    input[0] = INTERNAL_TAG;
    input[1] = level;
    input[2..34].copy_from_slice(left);
    input[34..66].copy_from_slice(right);
    *blake3::hash(&input).as_bytes()
}

/// Validate that a tree depth is in the allowed range [1, `MAX_TREE_DEPTH`].
pub(crate) fn validate_depth(depth: u8) -> Result<()> {
    if !(1..=MAX_TREE_DEPTH).contains(&depth) {
        return Err(Error::InvalidInput(format!(
            "depth must be between 1 and {}, got {}",
            MAX_TREE_DEPTH, depth
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine_uses_domain_tag_and_level() {
        let left = [0xAAu8; 32];
        let right = [0xBBu8; 32];
        let merged = combine(&left, &right, 3);

        // Manual domain-tagged hash
        let mut input = [0u8; 66];
        input[0] = 0x01;
        input[1] = 3;
        input[2..34].copy_from_slice(&left);
        input[34..66].copy_from_slice(&right);
        let expected = *blake3::hash(&input).as_bytes();
        assert_eq!(merged, expected, "combine should tag with 0x01 and level");

        // Must NOT equal plain blake3(left || right)
        let mut plain_input = [0u8; 64];
        plain_input[..32].copy_from_slice(&left);
        plain_input[32..].copy_from_slice(&right);
        let plain = *blake3::hash(&plain_input).as_bytes();
        assert_ne!(
            merged, plain,
            "combine must differ from plain blake3(left || right)"
        );
    }

    #[test]
    fn test_combine_level_separation() {
        let left = [0x11u8; 32];
        let right = [0x22u8; 32];
        assert_ne!(
            combine(&left, &right, 0),
            combine(&left, &right, 1),
            "the same children must hash differently at different levels"
        );
    }

    #[test]
    fn test_combine_not_commutative() {
        let a = [0x01u8; 32];
        let b = [0x02u8; 32];
        assert_ne!(combine(&a, &b, 0), combine(&b, &a, 0));
    }

    #[test]
    fn test_validate_depth_bounds() {
        assert!(validate_depth(0).is_err());
        assert!(validate_depth(1).is_ok());
        assert!(validate_depth(COMMITMENT_TREE_DEPTH).is_ok());
        assert!(validate_depth(MAX_TREE_DEPTH).is_ok());
        assert!(validate_depth(MAX_TREE_DEPTH + 1).is_err());
    }
}
