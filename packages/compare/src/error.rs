//! Error handling for hash comparison
//!
//! Format errors (the stored hash is corrupted or foreign) are kept apart from
//! [`CompareError::Mismatch`] (the password is simply wrong) so callers can
//! alert on the former and rate-limit the latter.

use thiserror::Error;

/// Comparison-specific errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompareError {
    /// No known scheme matched the encoded hash
    #[error("Unknown hash algorithm")]
    UnknownScheme,

    /// Wrong field count, unparsable parameter segment or invalid base64
    #[error("Malformed hash encoding: {0}")]
    MalformedEncoding(String),

    /// Argon2 version field is present but unsupported
    #[error("Incompatible Argon2 version: expected {expected}, got {found}")]
    IncompatibleVersion {
        /// Supported version
        expected: u32,
        /// Version found in the encoding
        found: u32,
    },

    /// PBKDF2 digest name outside the supported set
    #[error("Unsupported PBKDF2 digest algorithm: {0}")]
    UnsupportedDigestAlgorithm(String),

    /// Bcrypt input exceeds the fixed byte bound
    #[error("Password too long: {length} bytes exceeds the {max}-byte limit")]
    PasswordTooLong {
        /// Length of the supplied password in bytes
        length: usize,
        /// Maximum accepted length in bytes
        max: usize,
    },

    /// The key derivation function refused the parameters or failed
    #[error("Key derivation failed: {0}")]
    ComputationFailure(String),

    /// Decoding and computation succeeded but the digests differ
    #[error("Password does not match hash")]
    Mismatch,

    /// The comparison task was lost before producing a result
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CompareError {
    /// Create a `MalformedEncoding` error
    #[must_use]
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedEncoding(msg.into())
    }

    /// Create a `ComputationFailure` error
    #[must_use]
    pub fn computation(msg: impl Into<String>) -> Self {
        Self::ComputationFailure(msg.into())
    }

    /// Create an internal error
    #[must_use]
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Stable class name without the detail message, safe for log lines
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnknownScheme => "unknown_scheme",
            Self::MalformedEncoding(_) => "malformed_encoding",
            Self::IncompatibleVersion { .. } => "incompatible_version",
            Self::UnsupportedDigestAlgorithm(_) => "unsupported_digest",
            Self::PasswordTooLong { .. } => "password_too_long",
            Self::ComputationFailure(_) => "computation_failure",
            Self::Mismatch => "mismatch",
            Self::Internal(_) => "internal",
        }
    }

    /// True when the password was simply wrong
    #[must_use]
    pub fn is_mismatch(&self) -> bool {
        matches!(self, Self::Mismatch)
    }

    /// True when the stored hash itself is unusable (corrupted or foreign data)
    #[must_use]
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownScheme
                | Self::MalformedEncoding(_)
                | Self::IncompatibleVersion { .. }
                | Self::UnsupportedDigestAlgorithm(_)
        )
    }
}

/// Result type for comparison operations
pub type Result<T> = std::result::Result<T, CompareError>;
