//! Hash generators for round-trip tests
//!
//! Each produces an encoding the way a password store would, using cheap
//! parameters so tests stay fast.

#![allow(dead_code)]

use ::argon2::{Algorithm, Argon2, Params, Version};
use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD};
use base64::Engine as _;
use ::bcrypt::{hash_with_salt, Version as BcryptVersion};
use pbkdf2::pbkdf2_hmac;
use sha1::{Digest, Sha1};
use sha2::{Sha256, Sha512};

pub const SALT: [u8; 16] = *b"0123456789abcdef";

pub const PBKDF2_ROUNDS: u32 = 1000;

pub fn argon2id(password: &[u8]) -> String {
    argon2(Algorithm::Argon2id, "argon2id", password)
}

pub fn argon2i(password: &[u8]) -> String {
    argon2(Algorithm::Argon2i, "argon2i", password)
}

fn argon2(algorithm: Algorithm, name: &str, password: &[u8]) -> String {
    let params = Params::new(64, 1, 1, Some(32)).expect("valid argon2 params");
    let mut out = [0u8; 32];
    Argon2::new(algorithm, Version::V0x13, params)
        .hash_password_into(password, &SALT, &mut out)
        .expect("argon2 hashing should succeed");
    format!(
        "${name}$v=19$m=64,t=1,p=1${}${}",
        STANDARD_NO_PAD.encode(SALT),
        STANDARD_NO_PAD.encode(out)
    )
}

pub fn pbkdf2_sha1(password: &[u8]) -> String {
    let mut out = [0u8; 20];
    pbkdf2_hmac::<Sha1>(password, &SALT, PBKDF2_ROUNDS, &mut out);
    pbkdf2_encoding("sha1", &out)
}

pub fn pbkdf2_sha256(password: &[u8]) -> String {
    let mut out = [0u8; 32];
    pbkdf2_hmac::<Sha256>(password, &SALT, PBKDF2_ROUNDS, &mut out);
    pbkdf2_encoding("sha256", &out)
}

pub fn pbkdf2_sha512(password: &[u8]) -> String {
    let mut out = [0u8; 64];
    pbkdf2_hmac::<Sha512>(password, &SALT, PBKDF2_ROUNDS, &mut out);
    pbkdf2_encoding("sha512", &out)
}

/// SHA-256 PBKDF2 with a digest of `len` bytes, possibly spanning several blocks
pub fn pbkdf2_sha256_with_len(password: &[u8], len: usize) -> String {
    let mut out = vec![0u8; len];
    pbkdf2_hmac::<Sha256>(password, &SALT, PBKDF2_ROUNDS, &mut out);
    pbkdf2_encoding("sha256", &out)
}

fn pbkdf2_encoding(name: &str, digest: &[u8]) -> String {
    format!(
        "$pbkdf2-{name}$i={PBKDF2_ROUNDS},l={}${}${}",
        digest.len(),
        STANDARD_NO_PAD.encode(SALT),
        STANDARD_NO_PAD.encode(digest)
    )
}

/// N = 16, r = 8, p = 1
pub fn scrypt(password: &[u8]) -> String {
    let params = ::scrypt::Params::new(4, 8, 1, 32).expect("valid scrypt params");
    let mut out = [0u8; 32];
    ::scrypt::scrypt(password, &SALT, &params, &mut out).expect("scrypt should succeed");
    format!(
        "$scrypt$ln=16,r=8,p=1${}${}",
        STANDARD.encode(SALT),
        STANDARD.encode(out)
    )
}

pub fn bcrypt(password: &[u8]) -> String {
    bcrypt_with_version(password, BcryptVersion::TwoB)
}

pub fn bcrypt_with_version(password: &[u8], version: BcryptVersion) -> String {
    hash_with_salt(password, 4, SALT)
        .expect("bcrypt hashing should succeed")
        .format_for_version(version)
}

pub fn ssha(password: &[u8]) -> String {
    salted::<Sha1>("{SSHA}", password)
}

pub fn ssha256(password: &[u8]) -> String {
    salted::<Sha256>("{SSHA256}", password)
}

pub fn ssha512(password: &[u8]) -> String {
    salted::<Sha512>("{SSHA512}", password)
}

fn salted<D: Digest>(prefix: &str, password: &[u8]) -> String {
    let salt = &SALT[..8];
    let mut hasher = D::new();
    hasher.update(password);
    hasher.update(salt);
    let mut raw = hasher.finalize().to_vec();
    raw.extend_from_slice(salt);
    format!("{prefix}{}", STANDARD.encode(raw))
}

pub type Generator = fn(&[u8]) -> String;

/// Every generator paired with a label, for table-driven tests
pub fn all_generators() -> [(&'static str, Generator); 10] {
    [
        ("argon2id", argon2id),
        ("argon2i", argon2i),
        ("pbkdf2-sha1", pbkdf2_sha1),
        ("pbkdf2-sha256", pbkdf2_sha256),
        ("pbkdf2-sha512", pbkdf2_sha512),
        ("scrypt", scrypt),
        ("bcrypt", bcrypt),
        ("ssha", ssha),
        ("ssha256", ssha256),
        ("ssha512", ssha512),
    ]
}

/// Copy of `password` with its last byte altered
pub fn flip_last(password: &[u8]) -> Vec<u8> {
    let mut flipped = password.to_vec();
    if let Some(last) = flipped.last_mut() {
        *last ^= 0x01;
    }
    flipped
}
