//! Production-grade structured logging infrastructure
//!
//! Provides env_logger-based logging with secure handling of credential data.
//! Stored hashes are only ever referenced through a truncated SHA-256
//! fingerprint; passwords, salts and digests are never logged.

use log::{debug, info, warn};
use sha2::{Digest, Sha256};
use std::sync::Once;
use std::time::Duration;

static INIT_LOGGER: Once = Once::new();

/// Coarse classification of a comparison result for logging purposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOutcome {
    /// Password matched the stored hash
    Matched,
    /// Password did not match; routine
    Mismatched,
    /// Stored hash looks corrupted or foreign
    Rejected,
    /// Key derivation or runtime failure
    Failed,
}

impl CompareOutcome {
    /// Short label used in log lines
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Matched => "matched",
            Self::Mismatched => "mismatched",
            Self::Rejected => "rejected",
            Self::Failed => "failed",
        }
    }
}

/// Production logging infrastructure using `env_logger`
pub struct LoggingTransformer;

impl LoggingTransformer {
    /// Initialize logging system (should be called once at application startup)
    ///
    /// Configure logging levels via `RUST_LOG` environment variable:
    /// - `RUST_LOG=debug` - Enable per-comparison outcomes
    /// - `RUST_LOG=warn` - Only corrupted or foreign hashes (recommended for production)
    /// - `RUST_LOG=credhash_compare=debug` - Module-specific levels
    pub fn init() {
        INIT_LOGGER.call_once(|| {
            env_logger::Builder::from_default_env()
                .format_timestamp_micros()
                .init();

            info!("Structured logging initialized");
        });
    }

    /// Initialize logging for test environments
    ///
    /// Use this in test modules to avoid initialization conflicts
    pub fn init_test() {
        let _ = env_logger::Builder::from_default_env()
            .is_test(true)
            .try_init();
    }

    /// Log the outcome of one comparison
    ///
    /// `encoded` is fingerprinted, never written out. `kind` is a fixed error
    /// class name; error details derived from the hash are not accepted.
    pub fn log_compare_outcome(
        scheme: &str,
        encoded: &[u8],
        outcome: CompareOutcome,
        kind: Option<&'static str>,
        elapsed: Duration,
    ) {
        let elapsed_ms = elapsed.as_millis();
        let kind = kind.unwrap_or("none");
        match outcome {
            CompareOutcome::Matched | CompareOutcome::Mismatched => debug!(
                "Hash comparison {}: scheme={scheme} elapsed_ms={elapsed_ms}",
                outcome.label()
            ),
            CompareOutcome::Rejected | CompareOutcome::Failed => warn!(
                "Hash comparison {}: scheme={scheme} kind={kind} hash={} elapsed_ms={elapsed_ms}",
                outcome.label(),
                Self::fingerprint(encoded)
            ),
        }
    }

    /// Short one-way fingerprint of a stored value for correlating log lines
    ///
    /// Returns `#` followed by the first 12 hex characters of its SHA-256.
    #[must_use]
    pub fn fingerprint(value: &[u8]) -> String {
        let hash = Sha256::digest(value);
        let hex_hash = hex::encode(hash);
        format!("#{}", &hex_hash[..12])
    }
}
