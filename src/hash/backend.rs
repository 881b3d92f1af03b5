/// Collision-resistant 256-bit hash used to combine Merkle tree nodes.
///
/// The codec treats the digest function as an external collaborator: any
/// standard 256-bit hash yields a consistent engine, and differential tooling
/// can instantiate two engines over the same backend to compare roots.
pub trait NodeHasher {
    /// Hashes an arbitrary byte string to 32 bytes.
    fn hash(data: &[u8]) -> [u8; 32];

    /// Hashes the 64-byte concatenation of two child nodes.
    fn combine(left: &[u8; 32], right: &[u8; 32]) -> [u8; 32] {
        let mut buf = [0u8; 64];
        buf[..32].copy_from_slice(left);
        buf[32..].copy_from_slice(right);
        Self::hash(&buf)
    }
}

/// SHA-256 node hashing, matching the consensus-layer reference roots.
#[derive(Debug, Clone, Copy)]
pub struct Sha256NodeHasher;

impl NodeHasher for Sha256NodeHasher {
    fn hash(data: &[u8]) -> [u8; 32] {
        use sha2::{Digest as _, Sha256};
        Sha256::digest(data).into()
    }
}

/// BLAKE3 node hashing for callers that prefer the faster tree hash.
#[derive(Debug, Clone, Copy)]
pub struct Blake3NodeHasher;

impl NodeHasher for Blake3NodeHasher {
    fn hash(data: &[u8]) -> [u8; 32] {
        *blake3::hash(data).as_bytes()
    }
}

/// Backend used by the convenience entry points.
pub type DefaultNodeHasher = Sha256NodeHasher;
