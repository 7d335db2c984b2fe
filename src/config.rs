//! Global Configuration Constants
//!
//! This module contains the Argon2 bounds enforced by the validator, the
//! algorithm version understood by the credential codec, and the defaults
//! used by the command line front-end.
//!
//! Only values fixed by the Argon2 algorithm live here. The maximum memory
//! cost depends on the address width of the running platform and is computed
//! at runtime by [`crate::limits::Limits`].

/// Application name used in user interfaces.
pub const APP_NAME: &str = "saltline";

// === Argon2 Algorithm Bounds ===
// These values come from the Argon2 definition itself and never change
// between platforms.

/// Number of synchronization points per pass.
///
/// Every lane is split into this many slices; the minimum memory cost is
/// two blocks per slice.
pub const SYNC_POINTS: u32 = 4;

/// Largest byte length representable in the Argon2 length fields.
///
/// Applies to passwords, salts, digests and credential strings.
pub const MAX_LENGTH: u64 = 0xFFFF_FFFF;

/// Minimum salt length in bytes.
pub const MIN_SALT_LEN: usize = 8;

/// Minimum digest (tag) length in bytes.
pub const MIN_OUTPUT_LEN: usize = 1;

/// Minimum memory cost in KiB (two blocks per slice).
pub const MIN_MEMORY: u32 = 2 * SYNC_POINTS;

/// Memory blocks required per lane.
///
/// The memory cost must be at least this multiple of the thread count.
pub const MEMORY_PER_THREAD: u64 = 8;

/// Minimum number of passes over memory.
pub const MIN_TIME: u32 = 1;

/// Maximum number of passes over memory.
pub const MAX_TIME: u32 = 0xFFFF_FFFF;

/// Minimum number of lanes.
pub const MIN_THREADS: u32 = 1;

/// Maximum number of lanes (24-bit field).
pub const MAX_THREADS: u32 = 0x00FF_FFFF;

/// Upper bound of the memory cost in KiB regardless of address width.
pub const MAX_MEMORY_CEILING: u64 = 0xFFFF_FFFF;

/// Bits of the address space not available to a single Argon2 instance.
///
/// Memory is capped at half the addressing space, expressed in 1 KiB blocks.
pub const ADDRESS_RESERVED_BITS: u32 = 11;

/// Ceiling for the exponent of the maximum memory cost.
pub const MAX_MEMORY_BITS: u32 = 32;

/// Argon2 version 1.3, written as `v=19` in credentials.
pub const VERSION: u32 = 0x13;

// === Command Line Defaults ===
// Used by the `hash` sub-command when the corresponding flag is omitted.

/// Default time cost (passes).
pub const DEFAULT_TIME_COST: u32 = 3;

/// Default memory cost in KiB (64 MiB).
pub const DEFAULT_MEMORY_COST: u32 = 64 * 1024;

/// Default parallelism.
pub const DEFAULT_THREADS: u32 = 4;

/// Default digest length in bytes.
pub const DEFAULT_OUTPUT_LEN: usize = 32;

/// Length of randomly generated salts in bytes.
pub const DEFAULT_SALT_LEN: usize = 16;
