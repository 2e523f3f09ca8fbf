//! Structural scheme detection
//!
//! Classification only looks at fixed prefixes; it never parses parameters.

use std::fmt;

const ARGON2ID_PREFIX: &[u8] = b"$argon2id$";
const ARGON2I_PREFIX: &[u8] = b"$argon2i$";
const PBKDF2_PREFIX: &[u8] = b"$pbkdf2-sha";
const SCRYPT_PREFIX: &[u8] = b"$scrypt$";
const SSHA_PREFIX: &[u8] = b"{SSHA}";
const SSHA256_PREFIX: &[u8] = b"{SSHA256}";
const SSHA512_PREFIX: &[u8] = b"{SSHA512}";

/// Bcrypt minor versions accepted after `$2`
const BCRYPT_MINORS: &[u8] = b"abyz";

/// Hash scheme derived from an encoded hash
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemeTag {
    /// `$2a$`, `$2b$`, `$2y$`, `$2z$`
    Bcrypt,
    /// `$argon2id$`
    Argon2id,
    /// `$argon2i$`
    Argon2i,
    /// `$pbkdf2-sha<digits>$`
    Pbkdf2,
    /// `$scrypt$`
    Scrypt,
    /// `{SSHA}`
    Ssha,
    /// `{SSHA256}`
    Ssha256,
    /// `{SSHA512}`
    Ssha512,
    /// None of the above
    Unknown,
}

impl SchemeTag {
    /// Known schemes in dispatch priority order
    pub const PRIORITY: [SchemeTag; 8] = [
        Self::Bcrypt,
        Self::Argon2id,
        Self::Argon2i,
        Self::Pbkdf2,
        Self::Scrypt,
        Self::Ssha,
        Self::Ssha256,
        Self::Ssha512,
    ];

    /// Stable lowercase name
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Bcrypt => "bcrypt",
            Self::Argon2id => "argon2id",
            Self::Argon2i => "argon2i",
            Self::Pbkdf2 => "pbkdf2",
            Self::Scrypt => "scrypt",
            Self::Ssha => "ssha",
            Self::Ssha256 => "ssha256",
            Self::Ssha512 => "ssha512",
            Self::Unknown => "unknown",
        }
    }

    /// Whether `encoded` carries this scheme's signature
    ///
    /// `Unknown` never matches.
    #[must_use]
    pub fn matches(self, encoded: &[u8]) -> bool {
        match self {
            Self::Bcrypt => is_bcrypt_hash(encoded),
            Self::Argon2id => is_argon2id_hash(encoded),
            Self::Argon2i => is_argon2i_hash(encoded),
            Self::Pbkdf2 => is_pbkdf2_hash(encoded),
            Self::Scrypt => is_scrypt_hash(encoded),
            Self::Ssha => is_ssha_hash(encoded),
            Self::Ssha256 => is_ssha256_hash(encoded),
            Self::Ssha512 => is_ssha512_hash(encoded),
            Self::Unknown => false,
        }
    }

    /// Anything but `Unknown`
    #[must_use]
    pub fn is_known(self) -> bool {
        self != Self::Unknown
    }
}

impl fmt::Display for SchemeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classify an encoded hash by structural signature
#[must_use]
pub fn classify(encoded: &[u8]) -> SchemeTag {
    SchemeTag::PRIORITY
        .into_iter()
        .find(|scheme| scheme.matches(encoded))
        .unwrap_or(SchemeTag::Unknown)
}

/// True iff `encoded` belongs to some known scheme
#[must_use]
pub fn is_valid_hash_format(encoded: &[u8]) -> bool {
    classify(encoded).is_known()
}

/// `$2a$`, `$2b$`, `$2y$` or `$2z$`
#[must_use]
pub fn is_bcrypt_hash(encoded: &[u8]) -> bool {
    matches!(encoded, [b'$', b'2', minor, b'$', ..] if BCRYPT_MINORS.contains(minor))
}

/// `$argon2id$`
#[must_use]
pub fn is_argon2id_hash(encoded: &[u8]) -> bool {
    encoded.starts_with(ARGON2ID_PREFIX)
}

/// `$argon2i$`
#[must_use]
pub fn is_argon2i_hash(encoded: &[u8]) -> bool {
    encoded.starts_with(ARGON2I_PREFIX)
}

/// `$pbkdf2-sha` followed by one to three digits and `$`
#[must_use]
pub fn is_pbkdf2_hash(encoded: &[u8]) -> bool {
    let Some(rest) = encoded.strip_prefix(PBKDF2_PREFIX) else {
        return false;
    };
    let digits = rest.iter().take_while(|b| b.is_ascii_digit()).count();
    (1..=3).contains(&digits) && rest.get(digits) == Some(&b'$')
}

/// `$scrypt$`
#[must_use]
pub fn is_scrypt_hash(encoded: &[u8]) -> bool {
    encoded.starts_with(SCRYPT_PREFIX)
}

/// `{SSHA}`
#[must_use]
pub fn is_ssha_hash(encoded: &[u8]) -> bool {
    encoded.starts_with(SSHA_PREFIX)
}

/// `{SSHA256}`
#[must_use]
pub fn is_ssha256_hash(encoded: &[u8]) -> bool {
    encoded.starts_with(SSHA256_PREFIX)
}

/// `{SSHA512}`
#[must_use]
pub fn is_ssha512_hash(encoded: &[u8]) -> bool {
    encoded.starts_with(SSHA512_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_prefixes() {
        let cases: &[(&[u8], SchemeTag)] = &[
            (b"$2a$12$abc", SchemeTag::Bcrypt),
            (b"$2b$04$abc", SchemeTag::Bcrypt),
            (b"$2y$10$abc", SchemeTag::Bcrypt),
            (b"$2z$10$abc", SchemeTag::Bcrypt),
            (b"$argon2id$v=19$m=32,t=2,p=4$a$b", SchemeTag::Argon2id),
            (b"$argon2i$v=19$m=32,t=2,p=4$a$b", SchemeTag::Argon2i),
            (b"$pbkdf2-sha1$i=1,l=20$a$b", SchemeTag::Pbkdf2),
            (b"$pbkdf2-sha256$i=1,l=32$a$b", SchemeTag::Pbkdf2),
            (b"$pbkdf2-sha999$i=1,l=32$a$b", SchemeTag::Pbkdf2),
            (b"$scrypt$ln=16384,r=8,p=1$a$b", SchemeTag::Scrypt),
            (b"{SSHA}abc", SchemeTag::Ssha),
            (b"{SSHA256}abc", SchemeTag::Ssha256),
            (b"{SSHA512}abc", SchemeTag::Ssha512),
        ];

        for (encoded, expected) in cases {
            assert_eq!(classify(encoded), *expected, "{}", String::from_utf8_lossy(encoded));
        }
    }

    #[test]
    fn test_classify_unknown() {
        let cases: &[&[u8]] = &[
            b"",
            b"$",
            b"$2$12$abc",
            b"$2x$12$abc",
            b"$argon2d$v=19$m=32,t=2,p=4$a$b",
            b"$argon2$v=19",
            b"$pbkdf2-sha$i=1,l=32$a$b",
            b"$pbkdf2-sha2560$i=1,l=32$a$b",
            b"$pbkdf2-md5$i=1,l=32$a$b",
            b"$unknown$12$o6hx.Wog/wvFSkT/Bp/6DOxCtLRTDj7lm9on9suF/WaCGNVHbkfL6",
            b"{SSHAnotExistent}xPUl",
            b"{SSHA1}abc",
            b"$sha1$pf=e1NBTFR9e1BBU1NXT1JEfQ==$NW9wbWtnejAzcg==$2qU2SGWP8viTM1md3FiI3+rjWXQ=",
        ];

        for encoded in cases {
            assert_eq!(
                classify(encoded),
                SchemeTag::Unknown,
                "{}",
                String::from_utf8_lossy(encoded)
            );
            assert!(!is_valid_hash_format(encoded));
        }
    }

    #[test]
    fn test_argon2_prefixes_do_not_overlap() {
        assert!(is_argon2id_hash(b"$argon2id$"));
        assert!(!is_argon2i_hash(b"$argon2id$"));
        assert!(is_argon2i_hash(b"$argon2i$"));
        assert!(!is_argon2id_hash(b"$argon2i$"));
    }

    #[test]
    fn test_unknown_never_matches() {
        assert!(!SchemeTag::Unknown.matches(b"$2a$12$abc"));
        assert!(!SchemeTag::Unknown.is_known());
        assert_eq!(SchemeTag::Pbkdf2.to_string(), "pbkdf2");
    }
}
