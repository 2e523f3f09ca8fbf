//! Resource ceilings applied to parameters read from stored hashes
//!
//! Stored hashes are data, not trusted configuration: a corrupted or hostile
//! record could otherwise ask the KDF for gigabytes of memory or billions of
//! iterations. Exceeding a ceiling is reported as a computation failure
//! before anything is allocated.

use serde::{Deserialize, Serialize};

/// Limits for one [`Comparator`](crate::Comparator)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareConfig {
    /// Largest Argon2 memory cost accepted, in KiB
    #[serde(default = "default_max_argon2_memory_kib")]
    pub max_argon2_memory_kib: u32,
    /// Largest Argon2 time cost accepted
    #[serde(default = "default_max_argon2_iterations")]
    pub max_argon2_iterations: u32,
    /// Largest PBKDF2 work accepted: iterations times PRF-sized digest blocks
    #[serde(default = "default_max_pbkdf2_iterations")]
    pub max_pbkdf2_iterations: u32,
    /// Largest scrypt working set accepted, in bytes
    #[serde(default = "default_max_scrypt_memory_bytes")]
    pub max_scrypt_memory_bytes: u64,
    /// Largest bcrypt cost accepted
    #[serde(default = "default_max_bcrypt_cost")]
    pub max_bcrypt_cost: u32,
}

fn default_max_argon2_memory_kib() -> u32 {
    4 * 1024 * 1024 // 4 GiB
}

fn default_max_argon2_iterations() -> u32 {
    1024
}

fn default_max_pbkdf2_iterations() -> u32 {
    10_000_000
}

fn default_max_scrypt_memory_bytes() -> u64 {
    2 * 1024 * 1024 * 1024 // 2 GiB
}

fn default_max_bcrypt_cost() -> u32 {
    31
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            max_argon2_memory_kib: default_max_argon2_memory_kib(),
            max_argon2_iterations: default_max_argon2_iterations(),
            max_pbkdf2_iterations: default_max_pbkdf2_iterations(),
            max_scrypt_memory_bytes: default_max_scrypt_memory_bytes(),
            max_bcrypt_cost: default_max_bcrypt_cost(),
        }
    }
}

impl CompareConfig {
    /// Load limits from JSON; missing fields fall back to their defaults
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the document is not valid JSON or a
    /// field has the wrong type.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
