//! saltline - Argon2 password credentials.
//!
//! Validates Argon2 parameters, computes digests through a pluggable engine,
//! and stores the result as a self-describing credential:
//!
//! ```text
//! $argon2id$v=19$m=65536,t=2,p=1$c29tZXNhbHQ$<digest>
//! ```
//!
//! - [`Hasher`]: hash and verify workflows
//! - [`validate()`]: parameter validation against [`Limits`]
//! - [`Codec`]: strict credential encoding and decoding over a [`TextEncoding`]
//! - [`DigestEngine`]: the memory-hard function, [`Argon2Engine`] by default

pub mod config;
pub mod credential;
pub mod encoding;
pub mod engine;
pub mod error;
pub mod hasher;
pub mod limits;
pub mod parameter;
pub mod types;
pub mod validate;

pub use credential::{Codec, Credential};
pub use encoding::{Base64, Hex, TextEncoding};
pub use engine::{Argon2Engine, DigestEngine, DigestRequest};
pub use error::{DecodeError, EncodeError, EngineError, Error, Result, Violation};
pub use hasher::{Hasher, VerifyStage, digests_match};
pub use limits::Limits;
pub use parameter::{HashParameters, generate_salt};
pub use types::{Variant, Version};
pub use validate::validate;
