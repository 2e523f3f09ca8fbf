//! Argon2id / Argon2i
//!
//! Format: `$argon2i[d]$v=<version>$m=<memoryKiB>,t=<iterations>,p=<parallelism>$<salt>$<digest>`
//! with salt and digest in unpadded standard base64.

use super::{verify_digest, Decoded};
use crate::encoding::{self, B64};
use crate::{CompareConfig, CompareError, Result};
use ::argon2::{Algorithm, Argon2, Params, Version};
use zeroize::Zeroizing;

/// The only Argon2 version accepted (0x13)
pub const SUPPORTED_VERSION: u32 = 0x13;

/// Argon2 variant selected by the encoding's name field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Argon2Variant {
    /// Hybrid variant, `$argon2id$`
    Argon2id,
    /// Data-independent variant, `$argon2i$`
    Argon2i,
}

impl Argon2Variant {
    /// Name as written in the encoding
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Argon2id => "argon2id",
            Self::Argon2i => "argon2i",
        }
    }

    fn algorithm(self) -> Algorithm {
        match self {
            Self::Argon2id => Algorithm::Argon2id,
            Self::Argon2i => Algorithm::Argon2i,
        }
    }
}

/// Decoded Argon2 parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argon2Params {
    /// Memory cost in KiB (`m`)
    pub memory_kib: u32,
    /// Time cost (`t`)
    pub iterations: u32,
    /// Lanes (`p`)
    pub parallelism: u32,
    /// Length of the decoded salt
    pub salt_length: u32,
    /// Length of the decoded digest
    pub key_length: u32,
}

/// Decode an Argon2 hash of the given variant
///
/// # Errors
///
/// `IncompatibleVersion` when `v=` is not 19, `MalformedEncoding` for any
/// other structural problem.
pub fn decode(variant: Argon2Variant, encoded: &str) -> Result<Decoded<Argon2Params>> {
    let [_, name, version, costs, salt, digest] = encoding::split_fields::<6>(encoded)?;

    if name != variant.name() {
        return Err(CompareError::malformed(format!(
            "expected `{}` hash, found `{name}`",
            variant.name()
        )));
    }

    let version = encoding::parse_param(version, "v")?;
    if version != SUPPORTED_VERSION {
        return Err(CompareError::IncompatibleVersion {
            expected: SUPPORTED_VERSION,
            found: version,
        });
    }

    let [memory_kib, iterations, parallelism] =
        encoding::parse_param_list(costs, ["m", "t", "p"])?;

    let salt = B64::Raw.decode(salt, "salt")?;
    let digest = B64::Raw.decode(digest, "digest")?;

    let params = Argon2Params {
        memory_kib,
        iterations,
        parallelism,
        salt_length: encoding::len_u32(&salt, "salt")?,
        key_length: encoding::len_u32(&digest, "digest")?,
    };

    Ok(Decoded {
        params,
        salt,
        digest,
    })
}

/// Compare a password against an Argon2 hash
///
/// # Errors
///
/// Decode errors as for [`decode`], `ComputationFailure` when the parameters
/// exceed the configured ceilings or Argon2 rejects them, `Mismatch` when the
/// recomputed digest differs.
pub fn compare(
    variant: Argon2Variant,
    config: &CompareConfig,
    password: &[u8],
    encoded: &[u8],
) -> Result<()> {
    let decoded = decode(variant, encoding::ascii(encoded)?)?;
    let p = &decoded.params;

    if p.memory_kib > config.max_argon2_memory_kib {
        return Err(CompareError::computation(format!(
            "argon2 memory cost {} KiB exceeds the configured ceiling of {} KiB",
            p.memory_kib, config.max_argon2_memory_kib
        )));
    }
    if p.iterations > config.max_argon2_iterations {
        return Err(CompareError::computation(format!(
            "argon2 time cost {} exceeds the configured ceiling of {}",
            p.iterations, config.max_argon2_iterations
        )));
    }

    let params = Params::new(
        p.memory_kib,
        p.iterations,
        p.parallelism,
        Some(decoded.digest.len()),
    )
    .map_err(|e| CompareError::computation(format!("Invalid Argon2 parameters: {e}")))?;

    let argon2 = Argon2::new(variant.algorithm(), Version::V0x13, params);

    let mut derived = Zeroizing::new(vec![0u8; decoded.digest.len()]);
    argon2
        .hash_password_into(password, &decoded.salt, &mut derived)
        .map_err(|e| CompareError::computation(format!("Argon2 key derivation failed: {e}")))?;

    verify_digest(&derived, &decoded.digest)
}
