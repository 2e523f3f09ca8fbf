//! scrypt
//!
//! Format: `$scrypt$ln=<N>,r=<blockSize>,p=<parallelization>$<salt>$<digest>`
//! with salt and digest in padded standard base64. The `ln` field carries the
//! cost N itself (e.g. `ln=16384`), not its logarithm.

use super::{verify_digest, Decoded};
use crate::encoding::{self, B64};
use crate::{CompareConfig, CompareError, Result};
use ::scrypt::{scrypt, Params};
use zeroize::Zeroizing;

/// Decoded scrypt parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScryptParams {
    /// CPU/memory cost N (`ln`)
    pub cost: u32,
    /// Block size (`r`)
    pub block_size: u32,
    /// Parallelization (`p`)
    pub parallelization: u32,
    /// Length of the decoded salt
    pub salt_length: u32,
    /// Length of the decoded digest
    pub key_length: u32,
}

impl ScryptParams {
    /// log2(N), if N is a power of two greater than one
    #[must_use]
    pub fn log_n(&self) -> Option<u8> {
        if self.cost > 1 && self.cost.is_power_of_two() {
            u8::try_from(self.cost.trailing_zeros()).ok()
        } else {
            None
        }
    }

    /// Approximate working set of one derivation in bytes, `None` on overflow
    #[must_use]
    pub fn memory_bytes(&self) -> Option<u64> {
        let block = 128u64.checked_mul(u64::from(self.block_size))?;
        let blocks = u64::from(self.cost).checked_add(u64::from(self.parallelization))?;
        block.checked_mul(blocks)
    }
}

/// Decode a scrypt hash
///
/// # Errors
///
/// `MalformedEncoding` for any structural problem.
pub fn decode(encoded: &str) -> Result<Decoded<ScryptParams>> {
    let [_, name, costs, salt, digest] = encoding::split_fields::<5>(encoded)?;

    if name != "scrypt" {
        return Err(CompareError::malformed(format!(
            "expected `scrypt` hash, found `{name}`"
        )));
    }

    let [cost, block_size, parallelization] =
        encoding::parse_param_list(costs, ["ln", "r", "p"])?;

    let salt = B64::Padded.decode(salt, "salt")?;
    let digest = B64::Padded.decode(digest, "digest")?;

    let params = ScryptParams {
        cost,
        block_size,
        parallelization,
        salt_length: encoding::len_u32(&salt, "salt")?,
        key_length: encoding::len_u32(&digest, "digest")?,
    };

    Ok(Decoded {
        params,
        salt,
        digest,
    })
}

/// Compare a password against a scrypt hash
///
/// # Errors
///
/// Decode errors as for [`decode`], `ComputationFailure` when scrypt rejects
/// the parameters or they exceed the memory ceiling, `Mismatch` when the
/// digests differ.
pub fn compare(config: &CompareConfig, password: &[u8], encoded: &[u8]) -> Result<()> {
    let decoded = decode(encoding::ascii(encoded)?)?;
    let p = &decoded.params;

    let log_n = p.log_n().ok_or_else(|| {
        CompareError::computation(format!(
            "scrypt cost {} is not a power of two greater than 1",
            p.cost
        ))
    })?;

    match p.memory_bytes() {
        Some(bytes) if bytes <= config.max_scrypt_memory_bytes => {}
        _ => {
            return Err(CompareError::computation(format!(
                "scrypt parameters ln={},r={},p={} exceed the configured memory ceiling of {} bytes",
                p.cost, p.block_size, p.parallelization, config.max_scrypt_memory_bytes
            )))
        }
    }

    // The output length is taken from the buffer; `len` only matters for PHC strings
    let params = Params::new(log_n, p.block_size, p.parallelization, Params::RECOMMENDED_LEN)
        .map_err(|e| CompareError::computation(format!("Invalid scrypt parameters: {e}")))?;

    let mut derived = Zeroizing::new(vec![0u8; decoded.digest.len()]);
    scrypt(password, &decoded.salt, &params, &mut derived)
        .map_err(|e| CompareError::computation(format!("scrypt key derivation failed: {e}")))?;

    verify_digest(&derived, &decoded.digest)
}
