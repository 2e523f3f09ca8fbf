//! Per-scheme decoders and comparators
//!
//! - bcrypt.rs - bcrypt envelope and comparison
//! - argon2.rs - Argon2id / Argon2i
//! - pbkdf2.rs - PBKDF2 with the SHA-1 and SHA-2 family
//! - scrypt.rs - scrypt
//! - ssha.rs - salted SHA digests behind a validator capability

pub mod argon2;
pub mod bcrypt;
pub mod pbkdf2;
pub mod scrypt;
pub mod ssha;

pub use self::argon2::{Argon2Params, Argon2Variant};
pub use self::pbkdf2::{Pbkdf2Digest, Pbkdf2Params};
pub use self::scrypt::ScryptParams;
pub use self::ssha::{DigestValidator, SaltedDigestValidator, SshaVariant};

use crate::{CompareError, Result};
use subtle::ConstantTimeEq;

/// A decoded hash: typed parameters plus raw salt and target digest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded<P> {
    /// Scheme parameters; lengths are derived from the decoded bytes
    pub params: P,
    /// Raw salt
    pub salt: Vec<u8>,
    /// Raw digest the password must reproduce
    pub digest: Vec<u8>,
}

/// Timing-safe digest comparison; unequal lengths are a mismatch
pub(crate) fn verify_digest(derived: &[u8], target: &[u8]) -> Result<()> {
    if derived.len() == target.len() && bool::from(derived.ct_eq(target)) {
        Ok(())
    } else {
        Err(CompareError::Mismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_digest() {
        assert!(verify_digest(b"abc", b"abc").is_ok());
        assert_eq!(verify_digest(b"abc", b"abd"), Err(CompareError::Mismatch));
        assert_eq!(verify_digest(b"abc", b"abcd"), Err(CompareError::Mismatch));
    }
}
