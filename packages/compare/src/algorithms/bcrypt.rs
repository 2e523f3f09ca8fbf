//! bcrypt
//!
//! Format: `$2[a|b|y|z]$<cost>$<22-char salt><31-char digest>`, 60 bytes in
//! the bcrypt base64 alphabet. The digest is compared as text and never decoded.

use crate::encoding::{self, BCRYPT_B64};
use crate::{CompareConfig, CompareError, Result};
use ::bcrypt::{hash_with_salt, Version};
use base64::Engine as _;
use subtle::ConstantTimeEq;

/// Inputs beyond this many bytes are silently truncated by bcrypt
pub const MAX_PASSWORD_LENGTH: usize = 72;

const ENCODED_LENGTH: usize = 60;
const SALT_CHARS: usize = 22;
const DIGEST_CHARS: usize = 31;

/// Parsed bcrypt envelope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BcryptHash<'a> {
    /// Minor version letter after `$2`
    pub minor: char,
    /// Log2 of the round count
    pub cost: u32,
    /// Raw 16-byte salt
    pub salt: [u8; 16],
    /// The 31-character encoded digest
    pub digest: &'a str,
}

/// Parse the bcrypt envelope
///
/// # Errors
///
/// `MalformedEncoding` for a wrong length, field count, cost or salt.
pub fn decode(encoded: &str) -> Result<BcryptHash<'_>> {
    if encoded.len() != ENCODED_LENGTH {
        return Err(CompareError::malformed(format!(
            "bcrypt hash must be {ENCODED_LENGTH} bytes, found {}",
            encoded.len()
        )));
    }

    let [_, version, cost, payload] = encoding::split_fields::<4>(encoded)?;

    let minor = match version.as_bytes() {
        [b'2', minor @ (b'a' | b'b' | b'y' | b'z')] => char::from(*minor),
        _ => {
            return Err(CompareError::malformed(format!(
                "unsupported bcrypt version `{version}`"
            )))
        }
    };

    if cost.len() != 2 || !cost.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CompareError::malformed("bcrypt cost must be two digits"));
    }
    let cost = cost
        .parse::<u32>()
        .map_err(|_| CompareError::malformed("bcrypt cost must be two digits"))?;

    if payload.len() != SALT_CHARS + DIGEST_CHARS {
        return Err(CompareError::malformed("bcrypt salt and digest have the wrong length"));
    }
    let (salt, digest) = payload.split_at(SALT_CHARS);

    if !digest
        .bytes()
        .all(|b| b == b'.' || b == b'/' || b.is_ascii_alphanumeric())
    {
        return Err(CompareError::malformed("invalid character in bcrypt digest"));
    }

    let salt: [u8; 16] = BCRYPT_B64
        .decode(salt)
        .map_err(|e| CompareError::malformed(format!("invalid base64 in salt: {e}")))?
        .try_into()
        .map_err(|_| CompareError::malformed("bcrypt salt must decode to 16 bytes"))?;

    Ok(BcryptHash {
        minor,
        cost,
        salt,
        digest,
    })
}

/// Compare a password against a bcrypt hash
///
/// # Errors
///
/// `PasswordTooLong` for inputs over [`MAX_PASSWORD_LENGTH`] bytes (checked
/// first), `MalformedEncoding` for a bad envelope, `ComputationFailure` when
/// the cost is out of range, `Mismatch` when the digests differ.
pub fn compare(config: &CompareConfig, password: &[u8], encoded: &[u8]) -> Result<()> {
    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(CompareError::PasswordTooLong {
            length: password.len(),
            max: MAX_PASSWORD_LENGTH,
        });
    }

    let parsed = decode(encoding::ascii(encoded)?)?;

    if parsed.cost > config.max_bcrypt_cost {
        return Err(CompareError::computation(format!(
            "bcrypt cost {} exceeds the configured ceiling of {}",
            parsed.cost, config.max_bcrypt_cost
        )));
    }

    let recomputed = hash_with_salt(password, parsed.cost, parsed.salt)
        .map_err(|e| CompareError::computation(format!("bcrypt hashing failed: {e}")))?
        .format_for_version(Version::TwoB);

    // Salt text is normalised by re-encoding, so only the digests are compared
    let derived = recomputed
        .get(ENCODED_LENGTH - DIGEST_CHARS..)
        .ok_or_else(|| CompareError::computation("bcrypt produced a short hash"))?;

    if bool::from(derived.as_bytes().ct_eq(parsed.digest.as_bytes())) {
        Ok(())
    } else {
        Err(CompareError::Mismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VECTOR: &str = "$2a$12$o6hx.Wog/wvFSkT/Bp/6DOxCtLRTDj7lm9on9suF/WaCGNVHbkfL6";

    #[test]
    fn test_decode_reference_vector() {
        let parsed = decode(VECTOR).expect("valid bcrypt hash");
        assert_eq!(parsed.minor, 'a');
        assert_eq!(parsed.cost, 12);
        assert_eq!(parsed.digest, "xCtLRTDj7lm9on9suF/WaCGNVHbkfL6");
    }

    #[test]
    fn test_decode_malformed() {
        let cases = [
            "$2a$12$o6hx.Wog/wvFSkT/Bp/6DOxCtLRTDj7lm9on9suF/WaCGNVHbkfL",
            "$2a$12$o6hx.Wog/wvFSkT/Bp/6DOxCtLRTDj7lm9on9suF/WaCGNVHbkfL6x",
            "$2a$1x$o6hx.Wog/wvFSkT/Bp/6DOxCtLRTDj7lm9on9suF/WaCGNVHbkfL6",
            "$2a$12$o6hx.Wog/wvFSkT/Bp/6DOxCtLRTDj7lm9on9suF/WaCGNVHbkfL!",
            "$2x$12$o6hx.Wog/wvFSkT/Bp/6DOxCtLRTDj7lm9on9suF/WaCGNVHbkfL6",
            "$2a$12$o6hx.Wog/wvFSkT/Bp/6DOxCtLRTDj7lm9on9suF/WaCGNVH$kfL6",
        ];
        for encoded in cases {
            assert!(
                matches!(decode(encoded), Err(CompareError::MalformedEncoding(_))),
                "{encoded}"
            );
        }
    }

    #[test]
    fn test_password_too_long_checked_first() {
        let password = [b'a'; MAX_PASSWORD_LENGTH + 1];
        assert_eq!(
            compare(&CompareConfig::default(), &password, b"not even a hash"),
            Err(CompareError::PasswordTooLong {
                length: 73,
                max: 72
            })
        );
    }

    #[test]
    fn test_cost_ceiling() {
        let config = CompareConfig {
            max_bcrypt_cost: 10,
            ..CompareConfig::default()
        };
        assert!(matches!(
            compare(&config, b"test", VECTOR.as_bytes()),
            Err(CompareError::ComputationFailure(_))
        ));
    }
}
