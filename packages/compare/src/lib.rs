//! Password verification against stored hashes of several schemes
//!
//! Supported encodings: bcrypt (`$2a$`, `$2b$`, `$2y$`, `$2z$`), Argon2id and
//! Argon2i, PBKDF2 over SHA-1/SHA-2, scrypt and the salted SHA family
//! (`{SSHA}`, `{SSHA256}`, `{SSHA512}`).
//!
//! ```no_run
//! use credhash_compare::{compare, CompareError};
//!
//! match compare(b"test", b"$2a$12$o6hx.Wog/wvFSkT/Bp/6DOxCtLRTDj7lm9on9suF/WaCGNVHbkfL6") {
//!     Ok(()) => println!("accepted"),
//!     Err(e) if e.is_mismatch() => println!("wrong password"),
//!     Err(e) => eprintln!("unusable hash: {e}"),
//! }
//! # Ok::<(), CompareError>(())
//! ```

#![forbid(unsafe_code)]

pub mod algorithms;
pub mod api;
pub mod async_result;
pub mod comparator;
pub mod config;
pub mod error;
pub mod scheme;

pub(crate) mod encoding;

pub use algorithms::{
    Argon2Params, Argon2Variant, Decoded, DigestValidator, Pbkdf2Digest, Pbkdf2Params,
    SaltedDigestValidator, ScryptParams, SshaVariant,
};
pub use api::{Compare, CompareBuilder, CompareBuilderWithError, CompareBuilderWithHandler};
pub use async_result::{
    AsyncCompareResult, AsyncCompareResultWithError, AsyncCompareResultWithHandler,
};
pub use comparator::Comparator;
pub use config::CompareConfig;
pub use error::{CompareError, Result};
pub use scheme::{classify, is_valid_hash_format, SchemeTag};

pub use credhash_common::{on_error, on_result};

use once_cell::sync::Lazy;

static DEFAULT_COMPARATOR: Lazy<Comparator> = Lazy::new(Comparator::default);

/// Compare a password against a hash of any supported scheme
///
/// # Errors
///
/// `UnknownScheme` when the hash matches no scheme, `Mismatch` for a wrong
/// password, or the decode/computation error of the selected scheme.
pub fn compare(password: &[u8], encoded: &[u8]) -> Result<()> {
    DEFAULT_COMPARATOR.compare(password, encoded)
}

/// Compare against a bcrypt hash
///
/// # Errors
///
/// See [`algorithms::bcrypt::compare`].
pub fn compare_bcrypt(password: &[u8], encoded: &[u8]) -> Result<()> {
    DEFAULT_COMPARATOR.compare_as(SchemeTag::Bcrypt, password, encoded)
}

/// Compare against an Argon2id hash
///
/// # Errors
///
/// See [`algorithms::argon2::compare`].
pub fn compare_argon2id(password: &[u8], encoded: &[u8]) -> Result<()> {
    DEFAULT_COMPARATOR.compare_as(SchemeTag::Argon2id, password, encoded)
}

/// Compare against an Argon2i hash
///
/// # Errors
///
/// See [`algorithms::argon2::compare`].
pub fn compare_argon2i(password: &[u8], encoded: &[u8]) -> Result<()> {
    DEFAULT_COMPARATOR.compare_as(SchemeTag::Argon2i, password, encoded)
}

/// Compare against a PBKDF2 hash
///
/// # Errors
///
/// See [`algorithms::pbkdf2::compare`].
pub fn compare_pbkdf2(password: &[u8], encoded: &[u8]) -> Result<()> {
    DEFAULT_COMPARATOR.compare_as(SchemeTag::Pbkdf2, password, encoded)
}

/// Compare against a scrypt hash
///
/// # Errors
///
/// See [`algorithms::scrypt::compare`].
pub fn compare_scrypt(password: &[u8], encoded: &[u8]) -> Result<()> {
    DEFAULT_COMPARATOR.compare_as(SchemeTag::Scrypt, password, encoded)
}

/// Compare against an `{SSHA}` hash
///
/// # Errors
///
/// `Mismatch` whenever the validator rejects.
pub fn compare_ssha(password: &[u8], encoded: &[u8]) -> Result<()> {
    DEFAULT_COMPARATOR.compare_as(SchemeTag::Ssha, password, encoded)
}

/// Compare against an `{SSHA256}` hash
///
/// # Errors
///
/// `Mismatch` whenever the validator rejects.
pub fn compare_ssha256(password: &[u8], encoded: &[u8]) -> Result<()> {
    DEFAULT_COMPARATOR.compare_as(SchemeTag::Ssha256, password, encoded)
}

/// Compare against an `{SSHA512}` hash
///
/// # Errors
///
/// `Mismatch` whenever the validator rejects.
pub fn compare_ssha512(password: &[u8], encoded: &[u8]) -> Result<()> {
    DEFAULT_COMPARATOR.compare_as(SchemeTag::Ssha512, password, encoded)
}
