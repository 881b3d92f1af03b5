use serde::{Deserialize, Serialize};

/// Switchable canonical validations applied during decoding.
///
/// Each flag guards one independent rule of the canonical format. Disabling a
/// flag reproduces a known decoder defect class on demand, which is how the
/// surrounding ablation tooling compares strict and weakened decoding paths
/// without recompiling anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckFlags {
    /// Reject nonzero padding bits in a bitvector's final byte.
    pub padding: bool,
    /// Require the terminating sentinel bit in bitlists.
    pub sentinel: bool,
    /// Reject trailing bytes after a zero-payload union arm.
    pub trailing: bool,
    /// Enforce offset-table monotonicity and gap-freedom.
    pub offsets: bool,
}

impl CheckFlags {
    /// All canonical checks enabled.
    pub const fn strict() -> Self {
        Self {
            padding: true,
            sentinel: true,
            trailing: true,
            offsets: true,
        }
    }

    /// All switchable checks disabled; every studied defect class at once.
    pub const fn permissive() -> Self {
        Self {
            padding: false,
            sentinel: false,
            trailing: false,
            offsets: false,
        }
    }

    /// Disables the bitvector padding check.
    pub const fn without_padding_check(mut self) -> Self {
        self.padding = false;
        self
    }

    /// Disables the bitlist sentinel check.
    pub const fn without_sentinel_check(mut self) -> Self {
        self.sentinel = false;
        self
    }

    /// Disables the union trailing-data check.
    pub const fn without_trailing_check(mut self) -> Self {
        self.trailing = false;
        self
    }

    /// Disables the offset-gap check.
    pub const fn without_offset_check(mut self) -> Self {
        self.offsets = false;
        self
    }
}

impl Default for CheckFlags {
    fn default() -> Self {
        CheckFlags::strict()
    }
}
