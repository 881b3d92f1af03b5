use crate::hash::{Digest, NodeHasher};

use super::chunks::Chunk;

/// Merkleizes chunks over a virtual tree of `limit` leaves.
///
/// The leaf count is padded to the next power of two of `limit`; absent
/// leaves are all-zero chunks, folded in via per-level zero-subtree digests
/// instead of being materialized. The limit, not the runtime chunk count,
/// fixes the tree depth, so equal-limit values of different lengths share a
/// tree shape.
pub fn merkleize<H: NodeHasher>(chunks: &[Chunk], limit: usize) -> Digest {
    let limit = limit.max(chunks.len()).max(1);
    let depth = limit.next_power_of_two().trailing_zeros();
    let mut zero: Chunk = [0u8; 32];
    let mut level: Vec<Chunk> = chunks.to_vec();
    for _ in 0..depth {
        if level.len() % 2 == 1 {
            level.push(zero);
        }
        let mut next = Vec::with_capacity(level.len() / 2);
        for pair in level.chunks_exact(2) {
            next.push(H::combine(&pair[0], &pair[1]));
        }
        level = next;
        zero = H::combine(&zero, &zero);
    }
    // An empty chunk sequence collapses to the zero subtree of full depth.
    Digest::from_bytes(level.first().copied().unwrap_or(zero))
}

/// Mixes the element or bit count into a list root.
pub fn mix_in_length<H: NodeHasher>(root: &Digest, length: u64) -> Digest {
    let mut chunk = [0u8; 32];
    chunk[..8].copy_from_slice(&length.to_le_bytes());
    Digest::from_bytes(H::combine(root.as_bytes(), &chunk))
}

/// Mixes the variant selector into a union root.
pub fn mix_in_selector<H: NodeHasher>(root: &Digest, selector: u8) -> Digest {
    let mut chunk = [0u8; 32];
    chunk[0] = selector;
    Digest::from_bytes(H::combine(root.as_bytes(), &chunk))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::Sha256NodeHasher;

    #[test]
    fn single_chunk_limit_one_is_identity() {
        let chunk = [7u8; 32];
        let root = merkleize::<Sha256NodeHasher>(&[chunk], 1);
        assert_eq!(root.into_bytes(), chunk);
    }

    #[test]
    fn empty_equals_explicit_zero_leaves() {
        let zero = [0u8; 32];
        let explicit = merkleize::<Sha256NodeHasher>(&[zero, zero, zero, zero], 4);
        let virtual_pad = merkleize::<Sha256NodeHasher>(&[], 4);
        assert_eq!(explicit, virtual_pad);
    }

    #[test]
    fn partial_level_matches_materialized_padding() {
        let leaf = [3u8; 32];
        let zero = [0u8; 32];
        let padded = merkleize::<Sha256NodeHasher>(&[leaf, zero, zero, zero], 4);
        let sparse = merkleize::<Sha256NodeHasher>(&[leaf], 4);
        assert_eq!(padded, sparse);
    }
}
