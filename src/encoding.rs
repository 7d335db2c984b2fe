//! Byte-to-text schemes for the salt and digest fields of a credential.
//!
//! A scheme is selected at the type level through marker types, the same
//! way for salt and digest, so one credential never mixes encodings.

use base64::Engine;
use base64::engine::general_purpose::STANDARD_NO_PAD;

/// A reversible, strict byte-to-text encoding.
pub trait TextEncoding {
    /// Short name, used in logs and the command line.
    const NAME: &'static str;

    /// Encodes `bytes` into text.
    fn encode(bytes: &[u8]) -> String;

    /// Decodes `text`, rejecting anything `encode` would not have produced.
    fn decode(text: &str) -> Option<Vec<u8>>;
}

/// Standard base64 alphabet without padding.
///
/// Decoding refuses padding characters and non-zero trailing bits.
#[derive(Clone, Copy, Debug, Default)]
pub struct Base64;

impl TextEncoding for Base64 {
    const NAME: &'static str = "base64";

    #[inline]
    fn encode(bytes: &[u8]) -> String {
        STANDARD_NO_PAD.encode(bytes)
    }

    #[inline]
    fn decode(text: &str) -> Option<Vec<u8>> {
        STANDARD_NO_PAD.decode(text).ok()
    }
}

/// Lowercase hexadecimal.
#[derive(Clone, Copy, Debug, Default)]
pub struct Hex;

impl TextEncoding for Hex {
    const NAME: &'static str = "hex";

    #[inline]
    fn encode(bytes: &[u8]) -> String {
        hex::encode(bytes)
    }

    fn decode(text: &str) -> Option<Vec<u8>> {
        // hex::decode accepts both cases; only the canonical form is valid here.
        if !text.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
            return None;
        }

        hex::decode(text).ok()
    }
}
