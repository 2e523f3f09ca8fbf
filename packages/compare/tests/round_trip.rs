//! Hashes produced by each scheme's own implementation verify with their password

mod common;

use ::bcrypt::Version;
use credhash_compare::{classify, compare, Comparator, CompareError, SchemeTag};

const PASSWORDS: [&[u8]; 4] = [
    b"test",
    b"correct horse battery staple",
    b"p\xc3\xa4ssw\xc3\xb6rd",
    b"\x00\x01binary",
];

#[test]
fn test_generated_hashes_verify() {
    for (label, generate) in common::all_generators() {
        for password in PASSWORDS {
            let encoded = generate(password);
            assert_eq!(compare(password, encoded.as_bytes()), Ok(()), "{label}: {encoded}");
        }
    }
}

#[test]
fn test_last_byte_flip_is_mismatch() {
    for (label, generate) in common::all_generators() {
        for password in PASSWORDS {
            let encoded = generate(password);
            assert_eq!(
                compare(&common::flip_last(password), encoded.as_bytes()),
                Err(CompareError::Mismatch),
                "{label}: {encoded}"
            );
        }
    }
}

#[test]
fn test_dispatcher_agrees_with_forced_scheme() {
    let comparator = Comparator::default();
    for (label, generate) in common::all_generators() {
        let encoded = generate(b"test");
        let scheme = classify(encoded.as_bytes());
        assert!(scheme.is_known(), "{label}");
        assert_eq!(
            comparator.compare(b"test", encoded.as_bytes()),
            comparator.compare_as(scheme, b"test", encoded.as_bytes()),
            "{label}"
        );
        assert_eq!(
            comparator.compare(b"tesT", encoded.as_bytes()),
            comparator.compare_as(scheme, b"tesT", encoded.as_bytes()),
            "{label}"
        );
    }
}

#[test]
fn test_bcrypt_minor_versions() {
    for version in [Version::TwoA, Version::TwoB, Version::TwoY] {
        let encoded = common::bcrypt_with_version(b"test", version);
        assert_eq!(classify(encoded.as_bytes()), SchemeTag::Bcrypt, "{encoded}");
        assert_eq!(compare(b"test", encoded.as_bytes()), Ok(()), "{encoded}");
    }

    let encoded = common::bcrypt_with_version(b"test", Version::TwoX);
    assert_eq!(compare(b"test", encoded.as_bytes()), Err(CompareError::UnknownScheme));
}

#[test]
fn test_bcrypt_at_length_limit() {
    let password = [b'x'; 72];
    let encoded = common::bcrypt(&password);
    assert_eq!(compare(&password, encoded.as_bytes()), Ok(()));
    assert_eq!(
        compare(&common::flip_last(&password), encoded.as_bytes()),
        Err(CompareError::Mismatch)
    );
}

#[test]
fn test_empty_password() {
    for (label, generate) in common::all_generators() {
        let encoded = generate(b"");
        assert_eq!(compare(b"", encoded.as_bytes()), Ok(()), "{label}");
        assert_eq!(compare(b"x", encoded.as_bytes()), Err(CompareError::Mismatch), "{label}");
    }
}
