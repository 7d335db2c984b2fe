//! # Digest Engine
//!
//! The memory-hard mixing function lives behind the [`DigestEngine`] trait.
//! The validator, codec and verify workflow only ever talk to that trait, so
//! the Argon2 backend can be swapped (or instrumented in tests) without
//! touching them.
//!
//! [`Argon2Engine`] is the bundled backend. It delegates to the RustCrypto
//! `argon2` crate and allocates the requested memory for every call. A failed
//! allocation comes back as an [`EngineError`] instead of aborting the
//! process, so a stored credential with an oversized memory cost cannot take
//! down the verifier.
//!
//! ## Cost
//!
//! Runtime grows with `time_cost × memory_cost`; memory usage with
//! `memory_cost`. Callers invoke the engine at most once per hash or verify.

use argon2::{Argon2, Block, Params};

use crate::error::EngineError;
use crate::parameter::HashParameters;
use crate::types::{Variant, Version};

/// A single digest computation.
#[derive(Clone, Copy, Debug)]
pub struct DigestRequest<'a> {
    pub password: &'a [u8],
    pub salt: &'a [u8],
    pub time_cost: u32,
    pub memory_cost: u32,
    pub threads: u32,
    pub output_len: usize,
    pub variant: Variant,
    pub version: Version,
}

impl<'a> From<&HashParameters<'a>> for DigestRequest<'a> {
    fn from(params: &HashParameters<'a>) -> Self {
        Self {
            password: params.password,
            salt: params.salt,
            time_cost: params.time_cost,
            memory_cost: params.memory_cost,
            threads: params.threads,
            output_len: params.output_len,
            variant: params.variant,
            version: params.version,
        }
    }
}

/// Produces a fixed-length digest from a password and salt.
///
/// Implementations must be deterministic: identical requests yield identical
/// output of exactly `output_len` bytes.
pub trait DigestEngine {
    /// Computes the digest.
    ///
    /// # Errors
    ///
    /// Returns an error when the computation cannot be carried out, for
    /// example when memory allocation fails.
    fn digest(&self, request: &DigestRequest<'_>) -> Result<Vec<u8>, EngineError>;
}

impl<T: DigestEngine + ?Sized> DigestEngine for &T {
    #[inline]
    fn digest(&self, request: &DigestRequest<'_>) -> Result<Vec<u8>, EngineError> {
        (**self).digest(request)
    }
}

/// Argon2 backend built on the `argon2` crate.
///
/// The backend needs at least 4 output bytes. Shorter lengths pass
/// validation and are then rejected here with an [`EngineError`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Argon2Engine;

impl DigestEngine for Argon2Engine {
    fn digest(&self, request: &DigestRequest<'_>) -> Result<Vec<u8>, EngineError> {
        let params = Params::new(request.memory_cost, request.time_cost, request.threads, Some(request.output_len))
            .map_err(|e| EngineError(format!("invalid argon2 parameter: {e}")))?;
        let argon2 = Argon2::new(request.variant.into(), request.version.into(), params);
        let mut blocks = allocate_blocks(argon2.params().block_count())?;

        let mut digest = vec![0u8; request.output_len];
        argon2
            .hash_password_into_with_memory(request.password, request.salt, &mut digest, &mut blocks)
            .map_err(|e| EngineError(format!("key derivation failed: {e}")))?;

        Ok(digest)
    }
}

/// Allocates the Argon2 working memory, reporting failure instead of aborting.
fn allocate_blocks(count: usize) -> Result<Vec<Block>, EngineError> {
    let mut blocks = Vec::new();
    blocks.try_reserve_exact(count).map_err(|_| EngineError("memory allocation error".into()))?;
    blocks.resize(count, Block::default());
    Ok(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(variant: Variant, time_cost: u32, memory_cost: u32, threads: u32) -> DigestRequest<'static> {
        DigestRequest { password: b"password", salt: b"somesalt", time_cost, memory_cost, threads, output_len: 24, variant, version: Version::V0x13 }
    }

    #[test]
    fn test_known_answers() {
        let vectors = [
            (Variant::Argon2i, 1, 64, 1, "b9c401d1844a67d50eae3967dc28870b22e508092e861a37"),
            (Variant::Argon2id, 1, 64, 1, "655ad15eac652dc59f7170a7332bf49b8469be1fdb9c28bb"),
            (Variant::Argon2i, 2, 64, 1, "8cf3d8f76a6617afe35fac48eb0b7433a9a670ca4a07ed64"),
            (Variant::Argon2id, 2, 64, 1, "068d62b26455936aa6ebe60060b0a65870dbfa3ddf8d41f7"),
            (Variant::Argon2i, 2, 64, 2, "2089f3e78a799720f80af806553128f29b132cafe40d059f"),
            (Variant::Argon2id, 2, 64, 2, "350ac37222f436ccb5c0972f1ebd3bf6b958bf2071841362"),
            (Variant::Argon2i, 3, 256, 2, "f5bbf5d4c3836af13193053155b73ec7476a6a2eb93fd5e6"),
            (Variant::Argon2id, 3, 256, 2, "4668d30ac4187e6878eedeacf0fd83c5a0a30db2cc16ef0b"),
            (Variant::Argon2i, 2, 64, 3, "5cab452fe6b8479c8661def8cd703b611a3905a6d5477fe6"),
            (Variant::Argon2id, 2, 64, 3, "4a15b31aec7c2590b87d1f520be7d96f56658172deaa3079"),
        ];

        for (variant, time, memory, threads, expected) in vectors {
            let digest = Argon2Engine.digest(&request(variant, time, memory, threads)).unwrap();
            assert_eq!(hex::encode(digest), expected, "{variant} t={time} m={memory} p={threads}");
        }
    }

    #[test]
    fn test_deterministic() {
        let req = request(Variant::Argon2id, 1, 64, 1);
        assert_eq!(Argon2Engine.digest(&req).unwrap(), Argon2Engine.digest(&req).unwrap());
    }

    #[test]
    fn test_argon2d_capability() {
        let d = Argon2Engine.digest(&request(Variant::Argon2d, 1, 64, 1)).unwrap();
        let id = Argon2Engine.digest(&request(Variant::Argon2id, 1, 64, 1)).unwrap();
        assert_eq!(d.len(), 24);
        assert_ne!(d, id);
    }

    #[test]
    fn test_output_length() {
        let req = DigestRequest { output_len: 64, ..request(Variant::Argon2i, 1, 64, 1) };
        assert_eq!(Argon2Engine.digest(&req).unwrap().len(), 64);
    }

    #[test]
    fn test_backend_rejection_is_an_engine_error() {
        // The backend needs at least four output bytes.
        let req = DigestRequest { output_len: 2, ..request(Variant::Argon2id, 1, 64, 1) };
        assert!(Argon2Engine.digest(&req).is_err());
    }

    #[test]
    fn test_allocate_blocks() {
        assert_eq!(allocate_blocks(8).unwrap().len(), 8);
        assert!(allocate_blocks(usize::MAX).is_err());
    }
}
