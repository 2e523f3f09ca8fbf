//! Shared parsing helpers for `$`-delimited hash encodings

use crate::{CompareError, Result};
use base64::{
    alphabet,
    engine::{general_purpose, DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine as _,
};

/// Bcrypt alphabet without padding; salts may carry trailing bits
pub(crate) const BCRYPT_B64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::BCRYPT,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::RequireNone),
);

/// Base64 variant used for salt and digest segments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum B64 {
    /// Standard alphabet, no padding (Argon2, PBKDF2)
    Raw,
    /// Standard alphabet, canonical padding (scrypt, SSHA)
    Padded,
}

impl B64 {
    /// Strictly decode a segment: invalid symbols, wrong padding and
    /// non-canonical trailing bits are all rejected
    pub(crate) fn decode(self, segment: &str, what: &str) -> Result<Vec<u8>> {
        let engine = match self {
            Self::Raw => &general_purpose::STANDARD_NO_PAD,
            Self::Padded => &general_purpose::STANDARD,
        };
        engine
            .decode(segment)
            .map_err(|e| CompareError::malformed(format!("invalid base64 in {what}: {e}")))
    }
}

/// View the encoded hash as ASCII text
pub(crate) fn ascii(encoded: &[u8]) -> Result<&str> {
    if !encoded.is_ascii() {
        return Err(CompareError::malformed("encoded hash is not ASCII"));
    }
    std::str::from_utf8(encoded).map_err(|_| CompareError::malformed("encoded hash is not ASCII"))
}

/// Split on `$` and require exactly `N` fields
///
/// The first field must be empty (the leading delimiter) and every other
/// field non-empty.
pub(crate) fn split_fields<const N: usize>(encoded: &str) -> Result<[&str; N]> {
    let fields: Vec<&str> = encoded.split('$').collect();
    let found = fields.len();
    let fields: [&str; N] = fields.try_into().map_err(|_| {
        CompareError::malformed(format!("expected {N} `$`-delimited fields, found {found}"))
    })?;

    if !fields[0].is_empty() {
        return Err(CompareError::malformed("encoded hash must start with `$`"));
    }
    if let Some(position) = fields.iter().skip(1).position(|field| field.is_empty()) {
        return Err(CompareError::malformed(format!(
            "field {} is empty",
            position + 1
        )));
    }
    Ok(fields)
}

/// Parse `key=value` pairs in exactly the given order, e.g. `m=32,t=2,p=4`
pub(crate) fn parse_param_list<const N: usize>(segment: &str, keys: [&str; N]) -> Result<[u32; N]> {
    let mut values = [0u32; N];
    let mut pairs = segment.split(',');

    for (slot, key) in values.iter_mut().zip(keys) {
        let pair = pairs.next().ok_or_else(|| {
            CompareError::malformed(format!("parameter `{key}` missing from `{segment}`"))
        })?;
        *slot = parse_param(pair, key)?;
    }

    if pairs.next().is_some() {
        return Err(CompareError::malformed(format!(
            "unexpected trailing parameters in `{segment}`"
        )));
    }
    Ok(values)
}

/// Parse a single `key=value` pair with an unsigned decimal value
pub(crate) fn parse_param(pair: &str, key: &str) -> Result<u32> {
    let value = pair
        .split_once('=')
        .filter(|(name, _)| *name == key)
        .map(|(_, value)| value)
        .ok_or_else(|| CompareError::malformed(format!("expected `{key}=<int>`, found `{pair}`")))?;
    parse_u32(value, key)
}

fn parse_u32(value: &str, key: &str) -> Result<u32> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CompareError::malformed(format!(
            "parameter `{key}` is not an unsigned integer"
        )));
    }
    value
        .parse::<u32>()
        .map_err(|_| CompareError::malformed(format!("parameter `{key}` is out of range")))
}

/// Length of a decoded buffer as the `u32` recorded in parameter records
pub(crate) fn len_u32(bytes: &[u8], what: &str) -> Result<u32> {
    u32::try_from(bytes.len()).map_err(|_| CompareError::malformed(format!("{what} is too long")))
}
