use core::fmt;

use serde::{Deserialize, Serialize};

/// 32-byte hash-tree-root digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Digest {
    bytes: [u8; 32],
}

impl Digest {
    /// The all-zero digest, also the value of an unused Merkle leaf.
    pub const ZERO: Digest = Digest { bytes: [0u8; 32] };

    /// Constructs a digest from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    /// Returns the canonical byte representation.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    /// Consumes the digest and returns the underlying array.
    pub const fn into_bytes(self) -> [u8; 32] {
        self.bytes
    }

    /// Returns a helper that formats the digest as lowercase hexadecimal.
    pub fn to_hex(&self) -> HexDigest {
        HexDigest(self.bytes)
    }
}

impl From<[u8; 32]> for Digest {
    fn from(bytes: [u8; 32]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<Digest> for [u8; 32] {
    fn from(digest: Digest) -> Self {
        digest.into_bytes()
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest(0x{})", self.to_hex())
    }
}

/// Hexadecimal representation of a digest.
#[derive(Clone, Copy)]
pub struct HexDigest([u8; 32]);

impl fmt::Display for HexDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0.iter() {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl fmt::Debug for HexDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
