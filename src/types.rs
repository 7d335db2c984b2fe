//! Common type definitions for saltline.
//!
//! - [`Variant`]: Argon2 flavour (data-dependent, data-independent, hybrid)
//! - [`Version`]: Argon2 algorithm revision written into credentials

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::config::VERSION;

/// The Argon2 flavour used to fill memory.
///
/// Parses from and displays as the lowercase algorithm name (`argon2id`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Variant {
    /// Data-dependent addressing. Engine capability only, no credential tag.
    Argon2d,

    /// Data-independent addressing.
    Argon2i,

    /// Hybrid: data-independent first half pass, data-dependent afterwards.
    #[default]
    Argon2id,
}

impl Variant {
    /// Variants that can be written to and read from credentials.
    pub const ENCODABLE: &'static [Self] = &[Self::Argon2i, Self::Argon2id];

    /// Returns the canonical credential tag, or `None` when the variant has
    /// no text representation.
    #[inline]
    #[must_use]
    pub fn tag(self) -> Option<&'static str> {
        match self {
            Self::Argon2d => None,
            Self::Argon2i | Self::Argon2id => Some(self.into()),
        }
    }
}

impl From<Variant> for argon2::Algorithm {
    fn from(variant: Variant) -> Self {
        match variant {
            Variant::Argon2d => Self::Argon2d,
            Variant::Argon2i => Self::Argon2i,
            Variant::Argon2id => Self::Argon2id,
        }
    }
}

/// Argon2 algorithm revision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Version {
    /// Version 1.3 (`v=19`).
    #[default]
    V0x13,
}

impl Version {
    /// Returns the numeric value written after `v=`.
    #[inline]
    #[must_use]
    pub const fn number(self) -> u32 {
        match self {
            Self::V0x13 => VERSION,
        }
    }

    /// Maps a numeric version back to a known revision.
    #[inline]
    #[must_use]
    pub const fn from_number(number: u32) -> Option<Self> {
        match number {
            VERSION => Some(Self::V0x13),
            _ => None,
        }
    }
}

impl From<Version> for argon2::Version {
    fn from(version: Version) -> Self {
        match version {
            Version::V0x13 => Self::V0x13,
        }
    }
}
