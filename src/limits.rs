//! Platform-dependent Argon2 limits.
//!
//! The largest memory cost a single Argon2 instance may request is half the
//! addressable space, counted in 1 KiB blocks and capped at 2^32 - 1. It is
//! computed once from the pointer width and handed to the validator, so the
//! validator stays a pure function of its inputs.

use std::fmt::{Display, Formatter, Result};

use crate::config::{ADDRESS_RESERVED_BITS, MAX_MEMORY_BITS, MAX_MEMORY_CEILING};

/// Bounds that depend on the platform the process runs on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limits {
    /// Largest accepted memory cost in KiB.
    max_memory: u64,
}

impl Limits {
    /// Computes the limits for a platform whose pointers are `pointer_bytes`
    /// bytes wide.
    #[must_use]
    pub const fn for_pointer_width(pointer_bytes: u32) -> Self {
        let address_bits = pointer_bytes.saturating_mul(8).saturating_sub(ADDRESS_RESERVED_BITS);
        let bits = if address_bits < MAX_MEMORY_BITS { address_bits } else { MAX_MEMORY_BITS };
        let max = 1u64 << bits;
        let max_memory = if max < MAX_MEMORY_CEILING { max } else { MAX_MEMORY_CEILING };

        Self { max_memory }
    }

    /// Computes the limits for the running platform.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn native() -> Self {
        Self::for_pointer_width(size_of::<usize>() as u32)
    }

    /// Largest accepted memory cost in KiB.
    #[inline]
    #[must_use]
    pub const fn max_memory(&self) -> u64 {
        self.max_memory
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::native()
    }
}

impl Display for Limits {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "max memory {} KiB", self.max_memory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_64_bit_platform_is_capped() {
        assert_eq!(Limits::for_pointer_width(8).max_memory(), 0xFFFF_FFFF);
    }

    #[test]
    fn test_32_bit_platform() {
        // 32 - 11 = 21 bits of 1 KiB blocks: 2 GiB.
        assert_eq!(Limits::for_pointer_width(4).max_memory(), 1 << 21);
    }

    #[test]
    fn test_16_bit_platform() {
        assert_eq!(Limits::for_pointer_width(2).max_memory(), 1 << 5);
    }

    #[test]
    fn test_degenerate_width_does_not_underflow() {
        assert_eq!(Limits::for_pointer_width(1).max_memory(), 1);
        assert_eq!(Limits::for_pointer_width(0).max_memory(), 1);
    }

    #[test]
    fn test_native_matches_pointer_width() {
        assert_eq!(Limits::native(), Limits::for_pointer_width(usize::BITS / 8));
    }

    #[test]
    fn test_display() {
        assert_eq!(Limits::for_pointer_width(4).to_string(), "max memory 2097152 KiB");
    }
}
