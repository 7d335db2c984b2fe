//! Error kinds reported by validation, the credential codec, the digest
//! engine and the verify workflow.
//!
//! Every cause has its own variant so callers can branch on it. None of the
//! messages include passwords, salts or digests.

use thiserror::Error;

use crate::types::Variant;

/// A parameter rejected by the validator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("password is too short")]
    PasswordTooShort,

    #[error("password is too long")]
    PasswordTooLong,

    #[error("salt is too short")]
    SaltTooShort,

    #[error("salt is too long")]
    SaltTooLong,

    #[error("output length is too short")]
    SecretTooShort,

    #[error("output length is too long")]
    SecretTooLong,

    #[error("memory cost is too small")]
    MemoryTooLittle,

    #[error("memory cost is too large")]
    MemoryTooMuch,

    #[error("time cost is too small")]
    TimeTooSmall,

    #[error("time cost is too large")]
    TimeTooLarge,

    #[error("not enough threads")]
    ThreadsTooFew,

    #[error("too many threads")]
    ThreadsTooMany,
}

/// A credential string that could not be parsed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("credential is empty")]
    Empty,

    #[error("credential is too long")]
    TooLong,

    #[error("credential does not start with '$'")]
    MissingLeadingSeparator,

    #[error("credential has {0} fields, expected 6")]
    FieldCount(usize),

    #[error("{0} has no credential encoding")]
    UnsupportedVariant(Variant),

    #[error("credential variant mismatch: expected {expected}")]
    VariantMismatch { expected: Variant, found: String },

    #[error("malformed version field")]
    MalformedVersion,

    #[error("unsupported version {found}")]
    VersionMismatch { found: u32 },

    #[error("malformed cost field")]
    MalformedCosts,

    #[error("salt is not validly encoded")]
    InvalidSalt,

    #[error("digest is not validly encoded")]
    InvalidDigest,
}

/// A credential that could not be rendered as text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("{0} has no credential encoding")]
    UnsupportedVariant(Variant),

    #[error("encoded {0} contains a reserved character")]
    ForbiddenCharacter(&'static str),
}

/// The digest engine failed to produce output.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("digest engine failure: {0}")]
pub struct EngineError(pub String);

/// Any failure of a hash or verify call.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid parameters: {0}")]
    Validation(#[from] Violation),

    #[error("malformed credential: {0}")]
    Decode(#[from] DecodeError),

    #[error("cannot encode credential: {0}")]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("the password does not match the supplied hash")]
    Mismatch,
}

impl Error {
    /// `true` when verification ran to completion and the password was wrong.
    #[inline]
    #[must_use]
    pub const fn is_mismatch(&self) -> bool {
        matches!(self, Self::Mismatch)
    }

    /// `true` when the stored record itself is unusable.
    ///
    /// Covers decode failures and parameters that a tampered record pushed
    /// out of bounds. Present these to users as "cannot verify", never as a
    /// wrong password.
    #[inline]
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(self, Self::Decode(_) | Self::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
