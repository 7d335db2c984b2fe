//! Canonical credential text.
//!
//! A credential records everything needed to recompute a digest except the
//! password:
//!
//! ```text
//! $<variant>$v=<version>$m=<memory>,t=<time>,p=<threads>$<salt>$<digest>
//! ```
//!
//! Salt and digest use the codec's [`TextEncoding`]. Decoding is strict:
//! exactly six `$`-separated fields, the expected variant tag, the supported
//! version, the exact cost syntax and a canonical salt/digest encoding. The
//! digest length is taken from the decoded digest bytes.

use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;

use crate::encoding::TextEncoding;
use crate::error::{DecodeError, EncodeError};
use crate::parameter::HashParameters;
use crate::types::{Variant, Version};

const SEPARATOR: char = '$';
const FIELD_COUNT: usize = 6;
const RESERVED: &[char] = &['$', '\n', '\r'];

/// One completed hash, minus the password.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    variant: Variant,
    version: Version,
    memory_cost: u32,
    time_cost: u32,
    threads: u32,
    salt: Vec<u8>,
    digest: Vec<u8>,
}

impl Credential {
    /// Assembles a credential from the parameters that produced `digest`.
    #[must_use]
    pub fn new(params: &HashParameters<'_>, digest: Vec<u8>) -> Self {
        Self {
            variant: params.variant,
            version: params.version,
            memory_cost: params.memory_cost,
            time_cost: params.time_cost,
            threads: params.threads,
            salt: params.salt.to_vec(),
            digest,
        }
    }

    /// Rebuilds the hashing parameters with the supplied `password`.
    ///
    /// The output length is the length of the stored digest.
    #[must_use]
    pub fn parameters<'a>(&'a self, password: &'a [u8]) -> HashParameters<'a> {
        HashParameters {
            password,
            salt: &self.salt,
            output_len: self.digest.len(),
            time_cost: self.time_cost,
            memory_cost: self.memory_cost,
            threads: self.threads,
            version: self.version,
            variant: self.variant,
        }
    }

    #[inline]
    #[must_use]
    pub const fn variant(&self) -> Variant {
        self.variant
    }

    #[inline]
    #[must_use]
    pub const fn version(&self) -> Version {
        self.version
    }

    #[inline]
    #[must_use]
    pub const fn memory_cost(&self) -> u32 {
        self.memory_cost
    }

    #[inline]
    #[must_use]
    pub const fn time_cost(&self) -> u32 {
        self.time_cost
    }

    #[inline]
    #[must_use]
    pub const fn threads(&self) -> u32 {
        self.threads
    }

    #[inline]
    #[must_use]
    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    #[inline]
    #[must_use]
    pub fn digest(&self) -> &[u8] {
        &self.digest
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("variant", &self.variant)
            .field("version", &self.version)
            .field("memory_cost", &self.memory_cost)
            .field("time_cost", &self.time_cost)
            .field("threads", &self.threads)
            .field("salt", &format_args!("[{} bytes]", self.salt.len()))
            .field("digest", &format_args!("[{} bytes]", self.digest.len()))
            .finish()
    }
}

/// Encodes and decodes credentials with the text scheme `E`.
pub struct Codec<E> {
    encoding: PhantomData<E>,
}

impl<E: TextEncoding> Default for Codec<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for Codec<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Codec<E> {}

impl<E> Debug for Codec<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("Codec")
    }
}

impl<E: TextEncoding> Codec<E> {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { encoding: PhantomData }
    }

    /// Renders `credential` as text.
    ///
    /// # Errors
    ///
    /// Fails when the variant has no credential tag, or when the encoding
    /// produced a reserved character.
    pub fn encode(&self, credential: &Credential) -> Result<String, EncodeError> {
        let tag = credential.variant.tag().ok_or(EncodeError::UnsupportedVariant(credential.variant))?;

        let salt = Self::encode_field(&credential.salt, "salt")?;
        let digest = Self::encode_field(&credential.digest, "digest")?;

        Ok(format!(
            "${tag}$v={}$m={},t={},p={}${salt}${digest}",
            credential.version.number(),
            credential.memory_cost,
            credential.time_cost,
            credential.threads
        ))
    }

    /// Parses `text`, which must carry the `expected` variant tag.
    ///
    /// # Errors
    ///
    /// Returns the first structural problem found, in field order.
    pub fn decode(&self, text: &str, expected: Variant) -> Result<Credential, DecodeError> {
        let expected_tag = expected.tag().ok_or(DecodeError::UnsupportedVariant(expected))?;

        let fields: Vec<&str> = text.split(SEPARATOR).collect();
        if fields.len() != FIELD_COUNT {
            return Err(DecodeError::FieldCount(fields.len()));
        }

        if !fields[0].is_empty() {
            return Err(DecodeError::MissingLeadingSeparator);
        }

        if fields[1] != expected_tag {
            return Err(DecodeError::VariantMismatch { expected, found: fields[1].to_owned() });
        }

        let version = Self::parse_version(fields[2])?;
        let (memory_cost, time_cost, threads) = Self::parse_costs(fields[3])?;
        let salt = E::decode(fields[4]).ok_or(DecodeError::InvalidSalt)?;
        let digest = E::decode(fields[5]).ok_or(DecodeError::InvalidDigest)?;

        Ok(Credential { variant: expected, version, memory_cost, time_cost, threads, salt, digest })
    }

    fn encode_field(bytes: &[u8], field: &'static str) -> Result<String, EncodeError> {
        let encoded = E::encode(bytes);
        if encoded.contains(RESERVED) {
            return Err(EncodeError::ForbiddenCharacter(field));
        }

        Ok(encoded)
    }

    fn parse_version(field: &str) -> Result<Version, DecodeError> {
        let number = field.strip_prefix("v=").and_then(parse_decimal).ok_or(DecodeError::MalformedVersion)?;

        Version::from_number(number).ok_or(DecodeError::VersionMismatch { found: number })
    }

    fn parse_costs(field: &str) -> Result<(u32, u32, u32), DecodeError> {
        let mut parts = field.split(',');

        let mut next = |key: &str| parts.next().and_then(|part| part.strip_prefix(key)).and_then(parse_decimal).ok_or(DecodeError::MalformedCosts);

        let memory_cost = next("m=")?;
        let time_cost = next("t=")?;
        let threads = next("p=")?;

        if parts.next().is_some() {
            return Err(DecodeError::MalformedCosts);
        }

        Ok((memory_cost, time_cost, threads))
    }
}

/// Parses a non-empty run of ASCII digits into a `u32`.
///
/// `u32::from_str` alone would also accept a leading `+`.
fn parse_decimal(text: &str) -> Option<u32> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    text.parse().ok()
}
