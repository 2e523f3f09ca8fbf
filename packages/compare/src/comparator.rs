//! Scheme dispatch over a configured set of comparators

use crate::algorithms::{self, Argon2Variant, DigestValidator, SaltedDigestValidator, SshaVariant};
use crate::scheme::{classify, SchemeTag};
use crate::{CompareConfig, CompareError, Result};
use credhash_common::{CompareOutcome, LoggingTransformer};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

/// Compares passwords against encoded hashes of any supported scheme
///
/// Holds resource ceilings and the salted-digest validators. Cloning is cheap
/// and the value is safe to share across threads.
#[derive(Clone)]
pub struct Comparator {
    config: CompareConfig,
    ssha: Arc<dyn SaltedDigestValidator>,
    ssha256: Arc<dyn SaltedDigestValidator>,
    ssha512: Arc<dyn SaltedDigestValidator>,
}

impl Default for Comparator {
    fn default() -> Self {
        Self::new(CompareConfig::default())
    }
}

impl fmt::Debug for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Comparator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Comparator {
    /// Comparator with the built-in SSHA validators
    #[must_use]
    pub fn new(config: CompareConfig) -> Self {
        Self {
            config,
            ssha: Arc::new(DigestValidator::new(SshaVariant::Sha1)),
            ssha256: Arc::new(DigestValidator::new(SshaVariant::Sha256)),
            ssha512: Arc::new(DigestValidator::new(SshaVariant::Sha512)),
        }
    }

    /// Replace the validator used for one SSHA variant
    #[must_use]
    pub fn with_salted_validator<V>(mut self, variant: SshaVariant, validator: V) -> Self
    where
        V: SaltedDigestValidator + 'static,
    {
        self.set_salted_validator(variant, Arc::new(validator));
        self
    }

    pub(crate) fn set_salted_validator(
        &mut self,
        variant: SshaVariant,
        validator: Arc<dyn SaltedDigestValidator>,
    ) {
        match variant {
            SshaVariant::Sha1 => self.ssha = validator,
            SshaVariant::Sha256 => self.ssha256 = validator,
            SshaVariant::Sha512 => self.ssha512 = validator,
        }
    }

    pub(crate) fn set_config(&mut self, config: CompareConfig) {
        self.config = config;
    }

    /// Active resource ceilings
    #[must_use]
    pub fn config(&self) -> &CompareConfig {
        &self.config
    }

    /// Classify `encoded` and compare with the matching scheme
    ///
    /// # Errors
    ///
    /// `UnknownScheme` when no scheme matches, otherwise whatever the selected
    /// comparator reports.
    pub fn compare(&self, password: &[u8], encoded: &[u8]) -> Result<()> {
        self.compare_as(classify(encoded), password, encoded)
    }

    /// Compare with an explicitly chosen scheme, skipping classification
    ///
    /// # Errors
    ///
    /// `UnknownScheme` for [`SchemeTag::Unknown`], otherwise whatever the
    /// scheme's comparator reports.
    pub fn compare_as(&self, scheme: SchemeTag, password: &[u8], encoded: &[u8]) -> Result<()> {
        let started = Instant::now();

        let result = match scheme {
            SchemeTag::Bcrypt => algorithms::bcrypt::compare(&self.config, password, encoded),
            SchemeTag::Argon2id => algorithms::argon2::compare(
                Argon2Variant::Argon2id,
                &self.config,
                password,
                encoded,
            ),
            SchemeTag::Argon2i => algorithms::argon2::compare(
                Argon2Variant::Argon2i,
                &self.config,
                password,
                encoded,
            ),
            SchemeTag::Pbkdf2 => algorithms::pbkdf2::compare(&self.config, password, encoded),
            SchemeTag::Scrypt => algorithms::scrypt::compare(&self.config, password, encoded),
            SchemeTag::Ssha => algorithms::ssha::compare(self.ssha.as_ref(), password, encoded),
            SchemeTag::Ssha256 => {
                algorithms::ssha::compare(self.ssha256.as_ref(), password, encoded)
            }
            SchemeTag::Ssha512 => {
                algorithms::ssha::compare(self.ssha512.as_ref(), password, encoded)
            }
            SchemeTag::Unknown => Err(CompareError::UnknownScheme),
        };

        let outcome = match &result {
            Ok(()) => CompareOutcome::Matched,
            Err(e) if e.is_mismatch() => CompareOutcome::Mismatched,
            Err(e) if e.is_format_error() => CompareOutcome::Rejected,
            Err(_) => CompareOutcome::Failed,
        };
        LoggingTransformer::log_compare_outcome(
            scheme.name(),
            encoded,
            outcome,
            result.as_ref().err().map(CompareError::kind),
            started.elapsed(),
        );

        result
    }
}
