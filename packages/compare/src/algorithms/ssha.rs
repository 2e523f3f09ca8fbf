//! Salted SHA digests: `{SSHA}`, `{SSHA256}`, `{SSHA512}`
//!
//! The encoding carries no parameter section, only `base64(digest ‖ salt)`.
//! Parsing and hashing sit behind [`SaltedDigestValidator`] so callers can plug
//! in another implementation; [`DigestValidator`] is the built-in one.

use crate::encoding::B64;
use crate::{CompareError, Result};
use digest::Digest;
use sha1::Sha1;
use sha2::{Sha256, Sha512};
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

/// Member of the salted-SHA family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SshaVariant {
    /// `{SSHA}`, SHA-1
    Sha1,
    /// `{SSHA256}`, SHA-256
    Sha256,
    /// `{SSHA512}`, SHA-512
    Sha512,
}

impl SshaVariant {
    /// All variants
    pub const ALL: [SshaVariant; 3] = [Self::Sha1, Self::Sha256, Self::Sha512];

    /// Scheme marker including braces
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Sha1 => "{SSHA}",
            Self::Sha256 => "{SSHA256}",
            Self::Sha512 => "{SSHA512}",
        }
    }

    /// Digest size in bytes
    #[must_use]
    pub fn digest_len(self) -> usize {
        match self {
            Self::Sha1 => 20,
            Self::Sha256 => 32,
            Self::Sha512 => 64,
        }
    }
}

/// Capability that checks a password against a complete salted-digest encoding
///
/// Implementations do their own parsing, salting and hashing; any failure,
/// including a malformed encoding, is reported as `false`.
pub trait SaltedDigestValidator: Send + Sync {
    /// Whether `password` matches `encoded`
    fn validate(&self, password: &[u8], encoded: &str) -> bool;
}

/// Built-in validator using the `sha1` and `sha2` crates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigestValidator {
    variant: SshaVariant,
}

impl DigestValidator {
    /// Validator for one variant
    #[must_use]
    pub fn new(variant: SshaVariant) -> Self {
        Self { variant }
    }

    /// The variant this validator accepts
    #[must_use]
    pub fn variant(&self) -> SshaVariant {
        self.variant
    }

    fn matches(&self, password: &[u8], encoded: &str) -> Option<bool> {
        let body = encoded.strip_prefix(self.variant.prefix())?;
        let raw = Zeroizing::new(B64::Padded.decode(body, "salted digest").ok()?);
        let matched = match self.variant {
            SshaVariant::Sha1 => salted_digest_matches::<Sha1>(password, &raw),
            SshaVariant::Sha256 => salted_digest_matches::<Sha256>(password, &raw),
            SshaVariant::Sha512 => salted_digest_matches::<Sha512>(password, &raw),
        };
        Some(matched)
    }
}

impl SaltedDigestValidator for DigestValidator {
    fn validate(&self, password: &[u8], encoded: &str) -> bool {
        self.matches(password, encoded).unwrap_or(false)
    }
}

/// `raw` is `H(password ‖ salt) ‖ salt` with a non-empty salt
fn salted_digest_matches<D: Digest>(password: &[u8], raw: &[u8]) -> bool {
    let size = <D as Digest>::output_size();
    if raw.len() <= size {
        return false;
    }
    let (expected, salt) = raw.split_at(size);

    let mut hasher = D::new();
    hasher.update(password);
    hasher.update(salt);
    let actual = hasher.finalize();

    actual.as_slice().ct_eq(expected).into()
}

/// Compare through a validator, mapping rejection to `Mismatch`
///
/// # Errors
///
/// `Mismatch` whenever the validator rejects, including non-UTF-8 input.
pub fn compare(
    validator: &dyn SaltedDigestValidator,
    password: &[u8],
    encoded: &[u8],
) -> Result<()> {
    let encoded = std::str::from_utf8(encoded).map_err(|_| CompareError::Mismatch)?;
    if validator.validate(password, encoded) {
        Ok(())
    } else {
        Err(CompareError::Mismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_vectors() {
        let cases = [
            (SshaVariant::Sha1, "{SSHA}JFZFs0oHzxbMwkSJmYVeI8MnTDy/276a"),
            (SshaVariant::Sha256, "{SSHA256}czO44OTV17PcF1cRxWrLZLy9xHd7CWyVYplr1rOhuMlx/7IK"),
            (
                SshaVariant::Sha512,
                "{SSHA512}xPUl/px+1cG55rUH4rzcwxdOIPSB2TingLpiJJumN2xyDWN4Ix1WQG3ihnvHaWUE8MYNkvMi5rf0C9NYixHsE6Yh59M=",
            ),
        ];
        for (variant, encoded) in cases {
            let validator = DigestValidator::new(variant);
            assert!(validator.validate(b"test123", encoded), "{encoded}");
            assert!(!validator.validate(b"badtest", encoded), "{encoded}");
        }
    }

    #[test]
    fn test_wrong_prefix_is_rejected() {
        let validator = DigestValidator::new(SshaVariant::Sha1);
        assert!(!validator.validate(
            b"test123",
            "{SSHA256}czO44OTV17PcF1cRxWrLZLy9xHd7CWyVYplr1rOhuMlx/7IK",
        ));
        assert!(!validator.validate(
            b"test123",
            "{SSHAnotExistent}JFZFs0oHzxbMwkSJmYVeI8MnTDy/276a",
        ));
    }

    #[test]
    fn test_digest_without_salt_is_rejected() {
        // SHA-1("") with no salt appended
        let validator = DigestValidator::new(SshaVariant::Sha1);
        assert!(!validator.validate(b"", "{SSHA}2jmj7l5rSw0yVb/vlWAYkK/YBwk="));
        assert!(!validator.validate(b"", "{SSHA}!!!"));
    }

    #[test]
    fn test_digest_lengths_match_hashers() {
        assert_eq!(SshaVariant::Sha1.digest_len(), <Sha1 as Digest>::output_size());
        assert_eq!(SshaVariant::Sha256.digest_len(), <Sha256 as Digest>::output_size());
        assert_eq!(SshaVariant::Sha512.digest_len(), <Sha512 as Digest>::output_size());
    }
}
