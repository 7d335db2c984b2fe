//! Inputs of a single hashing operation.

use std::fmt::{Debug, Formatter, Result};

use rand::Rng;

use crate::config::{DEFAULT_MEMORY_COST, DEFAULT_OUTPUT_LEN, DEFAULT_THREADS, DEFAULT_TIME_COST};
use crate::types::{Variant, Version};

/// Everything the digest engine needs to produce one digest.
///
/// Password and salt are borrowed for the duration of a call only. The
/// `Debug` output reports their lengths, never their contents.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct HashParameters<'a> {
    /// Password bytes.
    pub password: &'a [u8],

    /// Salt bytes, at least 8.
    pub salt: &'a [u8],

    /// Digest length in bytes.
    pub output_len: usize,

    /// Number of passes over memory.
    pub time_cost: u32,

    /// Memory cost in KiB.
    pub memory_cost: u32,

    /// Degree of parallelism.
    pub threads: u32,

    /// Algorithm revision.
    pub version: Version,

    /// Argon2 flavour.
    pub variant: Variant,
}

impl<'a> HashParameters<'a> {
    /// Creates parameters with the default costs, Argon2id and version 1.3.
    #[must_use]
    pub const fn new(password: &'a [u8], salt: &'a [u8]) -> Self {
        Self {
            password,
            salt,
            output_len: DEFAULT_OUTPUT_LEN,
            time_cost: DEFAULT_TIME_COST,
            memory_cost: DEFAULT_MEMORY_COST,
            threads: DEFAULT_THREADS,
            version: Version::V0x13,
            variant: Variant::Argon2id,
        }
    }

    /// Sets time, memory (KiB) and thread costs.
    #[must_use]
    pub const fn with_costs(mut self, time_cost: u32, memory_cost: u32, threads: u32) -> Self {
        self.time_cost = time_cost;
        self.memory_cost = memory_cost;
        self.threads = threads;
        self
    }

    /// Sets the digest length in bytes.
    #[must_use]
    pub const fn with_output_len(mut self, output_len: usize) -> Self {
        self.output_len = output_len;
        self
    }

    /// Sets the Argon2 flavour.
    #[must_use]
    pub const fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }
}

impl Debug for HashParameters<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.debug_struct("HashParameters")
            .field("password", &format_args!("[{} bytes]", self.password.len()))
            .field("salt", &format_args!("[{} bytes]", self.salt.len()))
            .field("output_len", &self.output_len)
            .field("time_cost", &self.time_cost)
            .field("memory_cost", &self.memory_cost)
            .field("threads", &self.threads)
            .field("version", &self.version)
            .field("variant", &self.variant)
            .finish()
    }
}

/// Generates a random salt from the thread-local CSPRNG.
#[must_use]
pub fn generate_salt<const N: usize>() -> [u8; N] {
    let mut salt = [0u8; N];
    rand::rng().fill(&mut salt);
    salt
}
