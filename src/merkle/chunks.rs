use crate::codec::pack_bits;

/// Size of a Merkle tree leaf.
pub const BYTES_PER_CHUNK: usize = 32;

/// Fixed 32-byte unit of data used as a Merkle tree leaf.
pub type Chunk = [u8; BYTES_PER_CHUNK];

/// Splits serialized bytes into 32-byte chunks, zero-padding the final one.
pub fn chunkify(data: &[u8]) -> Vec<Chunk> {
    let mut chunks = Vec::with_capacity(data.len().div_ceil(BYTES_PER_CHUNK));
    for part in data.chunks(BYTES_PER_CHUNK) {
        let mut chunk = [0u8; BYTES_PER_CHUNK];
        chunk[..part.len()].copy_from_slice(part);
        chunks.push(chunk);
    }
    chunks
}

/// Packs raw bits (sentinel excluded) into chunks.
pub fn bits_to_chunks(bits: &[bool]) -> Vec<Chunk> {
    chunkify(&pack_bits(bits))
}
