//! PBKDF2 with HMAC-SHA1 / SHA-224 / SHA-256 / SHA-384 / SHA-512
//!
//! Format: `$pbkdf2-<digest>$i=<iterations>,l=<keyLen>$<salt>$<digest>`
//! with salt and digest in unpadded standard base64.

use super::{verify_digest, Decoded};
use crate::encoding::{self, B64};
use crate::{CompareConfig, CompareError, Result};
use ::pbkdf2::pbkdf2_hmac;
use sha1::Sha1;
use sha2::{Sha224, Sha256, Sha384, Sha512};
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;
use zeroize::Zeroizing;

/// Pseudorandom function underlying PBKDF2
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pbkdf2Digest {
    /// HMAC-SHA1
    Sha1,
    /// HMAC-SHA224
    Sha224,
    /// HMAC-SHA256
    Sha256,
    /// HMAC-SHA384
    Sha384,
    /// HMAC-SHA512
    Sha512,
}

impl Pbkdf2Digest {
    /// Name as written after `pbkdf2-`
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Sha1 => "sha1",
            Self::Sha224 => "sha224",
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
        }
    }

    /// PRF output size in bytes; PBKDF2 runs one pass of `i` rounds per block
    #[must_use]
    pub fn output_len(self) -> usize {
        match self {
            Self::Sha1 => 20,
            Self::Sha224 => 28,
            Self::Sha256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }

    fn derive(self, password: &[u8], salt: &[u8], rounds: NonZeroU32, out: &mut [u8]) {
        let rounds = rounds.get();
        match self {
            Self::Sha1 => pbkdf2_hmac::<Sha1>(password, salt, rounds, out),
            Self::Sha224 => pbkdf2_hmac::<Sha224>(password, salt, rounds, out),
            Self::Sha256 => pbkdf2_hmac::<Sha256>(password, salt, rounds, out),
            Self::Sha384 => pbkdf2_hmac::<Sha384>(password, salt, rounds, out),
            Self::Sha512 => pbkdf2_hmac::<Sha512>(password, salt, rounds, out),
        }
    }
}

impl FromStr for Pbkdf2Digest {
    type Err = CompareError;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "sha1" => Ok(Self::Sha1),
            "sha224" => Ok(Self::Sha224),
            "sha256" => Ok(Self::Sha256),
            "sha384" => Ok(Self::Sha384),
            "sha512" => Ok(Self::Sha512),
            other => Err(CompareError::UnsupportedDigestAlgorithm(other.to_string())),
        }
    }
}

impl fmt::Display for Pbkdf2Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decoded PBKDF2 parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pbkdf2Params {
    /// Underlying digest
    pub digest: Pbkdf2Digest,
    /// Iteration count (`i`)
    pub iterations: u32,
    /// Length of the decoded salt
    pub salt_length: u32,
    /// Length of the decoded digest; the wire `l` value is not trusted
    pub key_length: u32,
}

/// Decode a PBKDF2 hash
///
/// # Errors
///
/// `UnsupportedDigestAlgorithm` for digest names outside the supported set,
/// `MalformedEncoding` for any structural problem.
pub fn decode(encoded: &str) -> Result<Decoded<Pbkdf2Params>> {
    let [_, name, costs, salt, digest] = encoding::split_fields::<5>(encoded)?;

    let digest_name = match name.split_once('-') {
        Some(("pbkdf2", digest_name)) => digest_name,
        _ => {
            return Err(CompareError::malformed(format!(
                "expected `pbkdf2-<digest>`, found `{name}`"
            )))
        }
    };

    // `l` must be well-formed but the digest length comes from the decoded bytes
    let [iterations, _] = encoding::parse_param_list(costs, ["i", "l"])?;

    let algorithm = digest_name.parse::<Pbkdf2Digest>()?;
    let salt = B64::Raw.decode(salt, "salt")?;
    let digest = B64::Raw.decode(digest, "digest")?;

    let params = Pbkdf2Params {
        digest: algorithm,
        iterations,
        salt_length: encoding::len_u32(&salt, "salt")?,
        key_length: encoding::len_u32(&digest, "digest")?,
    };

    Ok(Decoded {
        params,
        salt,
        digest,
    })
}

/// Compare a password against a PBKDF2 hash
///
/// # Errors
///
/// Decode errors as for [`decode`], `ComputationFailure` for zero iterations
/// or when iterations times output blocks exceeds the ceiling, `Mismatch`
/// when the digests differ.
pub fn compare(config: &CompareConfig, password: &[u8], encoded: &[u8]) -> Result<()> {
    let decoded = decode(encoding::ascii(encoded)?)?;
    let p = &decoded.params;

    let rounds = NonZeroU32::new(p.iterations)
        .ok_or_else(|| CompareError::computation("PBKDF2 iterations must be non-zero"))?;
    // Each PRF-sized block of the digest costs a full run of `i` rounds
    let blocks = decoded.digest.len().div_ceil(p.digest.output_len());
    let work = u64::from(p.iterations).saturating_mul(blocks as u64);
    if work > u64::from(config.max_pbkdf2_iterations) {
        return Err(CompareError::computation(format!(
            "PBKDF2 work of {} iterations over {blocks} blocks exceeds the configured ceiling of {}",
            p.iterations, config.max_pbkdf2_iterations
        )));
    }

    let mut derived = Zeroizing::new(vec![0u8; decoded.digest.len()]);
    p.digest.derive(password, &decoded.salt, rounds, &mut derived);

    verify_digest(&derived, &decoded.digest)
}
