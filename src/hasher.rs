//! Hash and verify workflows.
//!
//! [`Hasher`] ties the validator, the digest engine and the credential codec
//! together:
//!
//! - `hash`: validate → digest → encode
//! - `verify`: size checks → decode → validate → digest → constant-time compare
//!
//! The engine runs at most once per call and never on parameters that failed
//! validation, including parameters read back from a stored credential.

use strum::Display;
use subtle::ConstantTimeEq;
use tracing::{debug, warn};

use crate::credential::{Codec, Credential};
use crate::encoding::{Base64, TextEncoding};
use crate::engine::{Argon2Engine, DigestEngine, DigestRequest};
use crate::error::{DecodeError, EncodeError, Error, Result, Violation};
use crate::limits::Limits;
use crate::parameter::HashParameters;
use crate::types::Variant;
use crate::validate::{exceeds_max_length, validate};

/// Stages of a verify call, in order. Any stage before `Compared` may end the
/// call with an error instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum VerifyStage {
    Start,
    Decoded,
    Validated,
    Digested,
    Compared,
}

/// Password hasher over a digest engine `D` and a text encoding `E`.
#[derive(Clone, Debug)]
pub struct Hasher<D = Argon2Engine, E = Base64> {
    engine: D,
    limits: Limits,
    codec: Codec<E>,
}

impl Hasher {
    /// Creates a hasher backed by Argon2, base64 credentials and the limits
    /// of the running platform.
    #[must_use]
    pub fn new() -> Self {
        Self::with_engine(Argon2Engine, Limits::native())
    }
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: DigestEngine, E: TextEncoding> Hasher<D, E> {
    /// Creates a hasher from an engine and precomputed limits.
    #[must_use]
    pub fn with_engine(engine: D, limits: Limits) -> Self {
        Self { engine, limits, codec: Codec::new() }
    }

    #[inline]
    #[must_use]
    pub const fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Checks `params` against the Argon2 bounds and this hasher's limits.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule.
    #[inline]
    pub fn validate(&self, params: &HashParameters<'_>) -> std::result::Result<(), Violation> {
        validate(params, &self.limits)
    }

    /// Hashes a password and returns its credential text.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] if a parameter is out of bounds
    /// - [`Error::Encode`] if the variant has no credential tag
    /// - [`Error::Engine`] if the digest could not be computed
    pub fn hash(&self, params: &HashParameters<'_>) -> Result<String> {
        self.validate(params)?;

        // Checked up front so an unencodable request never pays for a digest.
        if params.variant.tag().is_none() {
            return Err(EncodeError::UnsupportedVariant(params.variant).into());
        }

        debug!(variant = %params.variant, m = params.memory_cost, t = params.time_cost, p = params.threads, encoding = E::NAME, "hashing password");

        let digest = self.digest(params)?;
        let credential = self.codec.encode(&Credential::new(params, digest))?;
        debug!(len = credential.len(), "credential encoded");

        Ok(credential)
    }

    /// Verifies `password` against a stored credential of the given variant.
    ///
    /// # Errors
    ///
    /// - [`Error::Decode`] if the credential is malformed or of another variant
    /// - [`Error::Validation`] if the stored parameters are out of bounds
    /// - [`Error::Engine`] if the digest could not be computed
    /// - [`Error::Mismatch`] if the password is wrong
    pub fn verify(&self, credential: &str, password: &[u8], variant: Variant) -> Result<()> {
        debug!(stage = %VerifyStage::Start, %variant, "verifying credential");

        check_input_sizes(password.len(), credential.len())?;

        let stored = self.codec.decode(credential, variant).inspect_err(|e| debug!(error = %e, "credential rejected"))?;
        debug!(stage = %VerifyStage::Decoded, m = stored.memory_cost(), t = stored.time_cost(), p = stored.threads());

        let params = stored.parameters(password);
        self.validate(&params).inspect_err(|e| debug!(error = %e, "stored parameters rejected"))?;
        debug!(stage = %VerifyStage::Validated);

        let computed = self.digest(&params)?;
        debug!(stage = %VerifyStage::Digested);

        let matched = digests_match(&computed, stored.digest());
        debug!(stage = %VerifyStage::Compared, matched);

        if matched { Ok(()) } else { Err(Error::Mismatch) }
    }

    fn digest(&self, params: &HashParameters<'_>) -> Result<Vec<u8>> {
        self.engine.digest(&DigestRequest::from(params)).map_err(|e| {
            warn!(error = %e, "digest engine failed");
            Error::Engine(e)
        })
    }
}

/// Rejects inputs whose sizes rule out a usable verify before anything is
/// parsed or digested.
fn check_input_sizes(password_len: usize, credential_len: usize) -> Result<()> {
    if exceeds_max_length(password_len) {
        return Err(Violation::PasswordTooLong.into());
    }

    if credential_len == 0 {
        return Err(DecodeError::Empty.into());
    }

    if exceeds_max_length(credential_len) {
        return Err(DecodeError::TooLong.into());
    }

    Ok(())
}

/// Compares two digests in constant time.
///
/// Run time does not depend on the position of the first differing byte.
/// Digests of different length never match; only the lengths, which are
/// public, influence the timing.
#[inline]
#[must_use]
pub fn digests_match(computed: &[u8], stored: &[u8]) -> bool {
    bool::from(computed.ct_eq(stored))
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::hint::black_box;
    use std::time::{Duration, Instant};

    use super::*;
    use crate::encoding::Hex;
    use crate::error::EngineError;

    const LIMITS: Limits = Limits::for_pointer_width(8);

    /// Counts engine invocations, delegating to Argon2.
    #[derive(Default)]
    struct CountingEngine {
        calls: Cell<usize>,
    }

    impl DigestEngine for CountingEngine {
        fn digest(&self, request: &DigestRequest<'_>) -> std::result::Result<Vec<u8>, EngineError> {
            self.calls.set(self.calls.get() + 1);
            Argon2Engine.digest(request)
        }
    }

    struct FailingEngine;

    impl DigestEngine for FailingEngine {
        fn digest(&self, _: &DigestRequest<'_>) -> std::result::Result<Vec<u8>, EngineError> {
            Err(EngineError("memory allocation error".into()))
        }
    }

    fn cheap<'a>(password: &'a [u8]) -> HashParameters<'a> {
        HashParameters::new(password, b"somesalt").with_costs(1, 64, 1).with_output_len(32)
    }

    #[test]
    fn test_hash_verify_roundtrip() {
        let hasher = Hasher::new();
        for variant in Variant::ENCODABLE.iter().copied() {
            let credential = hasher.hash(&cheap(b"correct horse").with_variant(variant)).unwrap();
            assert_eq!(hasher.verify(&credential, b"correct horse", variant), Ok(()));
        }
    }

    #[test]
    fn test_wrong_password_is_mismatch() {
        let hasher = Hasher::new();
        let credential = hasher.hash(&cheap(b"correct horse")).unwrap();

        for wrong in [&b"correct horsf"[..], b"Correct horse", b"correct horse ", b"x"] {
            assert_eq!(hasher.verify(&credential, wrong, Variant::Argon2id), Err(Error::Mismatch));
        }
    }

    #[test]
    fn test_hex_hasher_roundtrip() {
        let hasher: Hasher<Argon2Engine, Hex> = Hasher::with_engine(Argon2Engine, LIMITS);
        let credential = hasher.hash(&cheap(b"password")).unwrap();

        assert!(credential.starts_with("$argon2id$v=19$m=64,t=1,p=1$736f6d6573616c74$"));
        assert_eq!(hasher.verify(&credential, b"password", Variant::Argon2id), Ok(()));
        assert_eq!(hasher.verify(&credential, b"Password", Variant::Argon2id), Err(Error::Mismatch));
    }

    #[test]
    fn test_reference_scenario() {
        let hasher = Hasher::new();
        let params = HashParameters::new(b"password", b"somesalt").with_costs(2, 65536, 1).with_output_len(32).with_variant(Variant::Argon2id);

        let credential = hasher.hash(&params).unwrap();
        assert!(credential.starts_with("$argon2id$v=19$m=65536,t=2,p=1$c29tZXNhbHQ$"));
        assert_eq!(hasher.verify(&credential, b"password", Variant::Argon2id), Ok(()));
        assert_eq!(hasher.verify(&credential, b"Password", Variant::Argon2id), Err(Error::Mismatch));
    }

    #[test]
    fn test_verify_reference_credential() {
        let credential = "$argon2i$v=19$m=65536,t=2,p=4$c29tZXNhbHQ$RdescudvJCsgt3ub+b+dWRWJTmaaJObG";
        let hasher = Hasher::new();

        assert_eq!(hasher.verify(credential, b"password", Variant::Argon2i), Ok(()));
        assert_eq!(hasher.verify(credential, b"password", Variant::Argon2id), Err(DecodeError::VariantMismatch { expected: Variant::Argon2id, found: "argon2i".into() }.into()));
    }

    #[test]
    fn test_hash_rejects_invalid_parameters_without_digest() {
        let hasher = Hasher::<_, Base64>::with_engine(CountingEngine::default(), LIMITS);

        let result = hasher.hash(&cheap(b"password").with_costs(1, 8 * 4 - 1, 4));
        assert_eq!(result, Err(Error::Validation(Violation::MemoryTooLittle)));

        let short_salt = HashParameters { salt: b"1234567", ..cheap(b"password") };
        assert_eq!(hasher.hash(&short_salt), Err(Error::Validation(Violation::SaltTooShort)));

        assert_eq!(hasher.engine.calls.get(), 0);
    }

    #[test]
    fn test_hash_rejects_argon2d_without_digest() {
        let hasher = Hasher::<_, Base64>::with_engine(CountingEngine::default(), LIMITS);

        let result = hasher.hash(&cheap(b"password").with_variant(Variant::Argon2d));
        assert_eq!(result, Err(Error::Encode(EncodeError::UnsupportedVariant(Variant::Argon2d))));
        assert_eq!(hasher.engine.calls.get(), 0);
    }

    #[test]
    fn test_single_engine_call_per_operation() {
        let hasher = Hasher::<_, Base64>::with_engine(CountingEngine::default(), LIMITS);

        let credential = hasher.hash(&cheap(b"password")).unwrap();
        assert_eq!(hasher.engine.calls.get(), 1);

        hasher.verify(&credential, b"password", Variant::Argon2id).unwrap();
        assert_eq!(hasher.engine.calls.get(), 2);

        let _ = hasher.verify(&credential, b"wrong", Variant::Argon2id);
        assert_eq!(hasher.engine.calls.get(), 3);
    }

    #[test]
    fn test_tampered_costs_fail_validation() {
        let hasher = Hasher::<_, Base64>::with_engine(CountingEngine::default(), LIMITS);
        let credential = "$argon2i$v=19$m=4,t=1,p=1$AAAAAAAAAAA$AAAAAAAAAAAAAAAAAAAAAA";

        assert_eq!(hasher.verify(credential, b"password", Variant::Argon2i), Err(Error::Validation(Violation::MemoryTooLittle)));
        assert_eq!(hasher.engine.calls.get(), 0);
    }

    #[test]
    fn test_tampered_costs_exceed_platform_limits() {
        let hasher = Hasher::<_, Base64>::with_engine(CountingEngine::default(), Limits::for_pointer_width(4));
        let credential = "$argon2id$v=19$m=4194304,t=1,p=1$c29tZXNhbHQ$AAAAAAAAAAAAAAAAAAAAAA";

        assert_eq!(hasher.verify(credential, b"password", Variant::Argon2id), Err(Error::Validation(Violation::MemoryTooMuch)));
        assert_eq!(hasher.engine.calls.get(), 0);
    }

    #[test]
    fn test_verify_structural_errors() {
        let hasher = Hasher::<_, Base64>::with_engine(CountingEngine::default(), LIMITS);

        assert_eq!(hasher.verify("", b"password", Variant::Argon2id), Err(Error::Decode(DecodeError::Empty)));
        assert_eq!(hasher.verify("$argon2id$v=19", b"password", Variant::Argon2id), Err(Error::Decode(DecodeError::FieldCount(3))));
        assert_eq!(
            hasher.verify("$argon2id$v=19$m=8,t=1,p=1$c29t$ZXNhbHQ$AAAAAAAAAAAAAAAAAAAAAA", b"password", Variant::Argon2id),
            Err(Error::Decode(DecodeError::FieldCount(7)))
        );
        assert_eq!(hasher.engine.calls.get(), 0);
    }

    #[test]
    fn test_empty_password_on_verify() {
        let hasher = Hasher::new();
        let credential = hasher.hash(&cheap(b"password")).unwrap();

        assert_eq!(hasher.verify(&credential, b"", Variant::Argon2id), Err(Error::Validation(Violation::PasswordTooShort)));
    }

    #[test]
    fn test_engine_failure_is_not_a_mismatch() {
        let hasher = Hasher::<_, Base64>::with_engine(FailingEngine, LIMITS);
        let credential = Hasher::new().hash(&cheap(b"password")).unwrap();

        let err = hasher.verify(&credential, b"password", Variant::Argon2id).unwrap_err();
        assert!(matches!(err, Error::Engine(_)));
        assert!(!err.is_mismatch());

        assert!(matches!(hasher.hash(&cheap(b"password")), Err(Error::Engine(_))));
    }

    #[test]
    fn test_engine_by_reference() {
        let engine = CountingEngine::default();
        let hasher = Hasher::<_, Base64>::with_engine(&engine, LIMITS);

        hasher.hash(&cheap(b"password")).unwrap();
        assert_eq!(engine.calls.get(), 1);
    }

    #[test]
    fn test_oversized_memory_cost_is_an_engine_error() {
        // 2^32-1 KiB is within the 64-bit limits but cannot be allocated.
        #[cfg(target_pointer_width = "64")]
        {
            let credential = "$argon2id$v=19$m=4294967295,t=1,p=1$c29tZXNhbHQ$AAAAAAAAAAAAAAAAAAAAAA";
            let err = Hasher::new().verify(credential, b"password", Variant::Argon2id).unwrap_err();

            assert!(matches!(err, Error::Engine(_)));
            assert!(!err.is_mismatch());
        }
    }

    #[test]
    fn test_output_shorter_than_backend_minimum() {
        let hasher = Hasher::new();

        for len in 1..4 {
            let params = cheap(b"password").with_output_len(len);
            assert_eq!(hasher.validate(&params), Ok(()));
            assert!(matches!(hasher.hash(&params), Err(Error::Engine(_))));
        }

        let credential = hasher.hash(&cheap(b"password").with_output_len(4)).unwrap();
        assert_eq!(hasher.verify(&credential, b"password", Variant::Argon2id), Ok(()));
    }

    #[test]
    fn test_check_input_sizes() {
        assert_eq!(check_input_sizes(8, 90), Ok(()));
        assert_eq!(check_input_sizes(0xFFFF_FFFF, 0xFFFF_FFFF), Ok(()));
        assert_eq!(check_input_sizes(8, 0), Err(Error::Decode(DecodeError::Empty)));

        #[cfg(target_pointer_width = "64")]
        {
            assert_eq!(check_input_sizes(0x1_0000_0000, 90), Err(Error::Validation(Violation::PasswordTooLong)));
            assert_eq!(check_input_sizes(8, 0x1_0000_0000), Err(Error::Decode(DecodeError::TooLong)));
            assert_eq!(check_input_sizes(0x1_0000_0000, 0), Err(Error::Validation(Violation::PasswordTooLong)));
        }
    }

    #[test]
    fn test_digests_match() {
        assert!(digests_match(b"abcd", b"abcd"));
        assert!(!digests_match(b"abcd", b"abce"));
        assert!(!digests_match(b"abcd", b"abc"));
        assert!(!digests_match(b"", b"a"));
    }

    fn fastest_batch(stored: &[u8; 32], candidate: &[u8; 32]) -> Duration {
        (0..64)
            .map(|_| {
                let start = Instant::now();
                for _ in 0..2_000 {
                    black_box(digests_match(black_box(stored), black_box(candidate)));
                }
                start.elapsed()
            })
            .min()
            .unwrap_or_default()
    }

    #[test]
    fn test_compare_time_independent_of_mismatch_position() {
        let stored = [0x5au8; 32];
        let mut first = stored;
        first[0] ^= 1;
        let mut last = stored;
        last[31] ^= 1;

        let early = fastest_batch(&stored, &first).as_secs_f64();
        let late = fastest_batch(&stored, &last).as_secs_f64();

        let ratio = early.max(late) / early.min(late).max(f64::MIN_POSITIVE);
        assert!(ratio < 2.0, "early {early:e}s late {late:e}s");
    }
}
