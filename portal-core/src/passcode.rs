//! Portal passcode hashing
//!
//! Passcodes are stretched with PBKDF2-HMAC. The hex-encoded salt string
//! itself (not its decoded bytes) is fed to PBKDF2, which keeps existing
//! rows verifiable.

use pbkdf2::pbkdf2_hmac;
use rand::Rng;
use sha2::{Sha256, Sha512};
use subtle::ConstantTimeEq;
use thiserror::Error;

use crate::domain::portal::PassMeta;

pub const DEFAULT_ITERATIONS: u32 = 200_000;
pub const KEY_LEN: usize = 32;
pub const SALT_LEN: usize = 16;
pub const DEFAULT_DIGEST: &str = "sha256";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PasscodeError {
    #[error("stored passcode has no salt")]
    MissingSalt,

    #[error("unsupported digest: {0}")]
    UnsupportedDigest(String),

    #[error("iteration count must be greater than 0")]
    ZeroIterations,
}

/// Hash a passcode, generating a fresh random salt when none is given
pub fn hash_passcode(passcode: &str, salt: Option<&str>) -> PassMeta {
    let salt = salt.map(str::to_string).unwrap_or_else(random_salt);
    let hash = derive_sha256(passcode, &salt, DEFAULT_ITERATIONS);

    PassMeta {
        salt: Some(salt),
        hash,
        iterations: Some(DEFAULT_ITERATIONS),
        digest: Some(DEFAULT_DIGEST.to_string()),
    }
}

/// Check a passcode against stored metadata
///
/// Uses the stored iteration count and digest, falling back to the defaults
/// for rows written before those columns were populated.
pub fn verify_passcode(passcode: &str, meta: &PassMeta) -> Result<bool, PasscodeError> {
    let salt = meta.salt.as_deref().ok_or(PasscodeError::MissingSalt)?;
    let iterations = meta.iterations.unwrap_or(DEFAULT_ITERATIONS);
    if iterations == 0 {
        return Err(PasscodeError::ZeroIterations);
    }

    let digest = meta.digest.as_deref().unwrap_or(DEFAULT_DIGEST);
    let candidate = match digest.to_ascii_lowercase().as_str() {
        "sha256" => derive_sha256(passcode, salt, iterations),
        "sha512" => derive_sha512(passcode, salt, iterations),
        other => return Err(PasscodeError::UnsupportedDigest(other.to_string())),
    };

    let expected = meta.hash.to_ascii_lowercase();
    Ok(candidate.as_bytes().ct_eq(expected.as_bytes()).into())
}

fn derive_sha256(passcode: &str, salt: &str, iterations: u32) -> String {
    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(passcode.as_bytes(), salt.as_bytes(), iterations, &mut key);
    hex::encode(key)
}

fn derive_sha512(passcode: &str, salt: &str, iterations: u32) -> String {
    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha512>(passcode.as_bytes(), salt.as_bytes(), iterations, &mut key);
    hex::encode(key)
}

fn random_salt() -> String {
    let mut bytes = [0u8; SALT_LEN];
    rand::rng().fill(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_generates_salt() {
        let meta = hash_passcode("secret", None);
        let salt = meta.salt.clone().unwrap();
        assert_eq!(salt.len(), SALT_LEN * 2);
        assert_eq!(meta.hash.len(), KEY_LEN * 2);
        assert_eq!(meta.iterations, Some(DEFAULT_ITERATIONS));
        assert_eq!(meta.digest.as_deref(), Some("sha256"));
    }

    #[test]
    fn test_known_sha256_vector() {
        assert_eq!(
            derive_sha256("password", "salt", 1),
            "120fb6cffcf8b32c43e7225256c4f837a86548c92ccc35480805987cb70be17b"
        );
    }

    #[test]
    fn test_same_salt_same_hash() {
        let a = hash_passcode("secret", Some("abcd"));
        let b = hash_passcode("secret", Some("abcd"));
        assert_eq!(a.hash, b.hash);

        let c = hash_passcode("other", Some("abcd"));
        assert_ne!(a.hash, c.hash);
    }

    #[test]
    fn test_verify_roundtrip() {
        let meta = hash_passcode("let-me-in", None);
        assert_eq!(verify_passcode("let-me-in", &meta), Ok(true));
        assert_eq!(verify_passcode("let-me-out", &meta), Ok(false));
    }

    #[test]
    fn test_verify_respects_stored_iterations() {
        let mut meta = PassMeta {
            salt: Some("salty".to_string()),
            hash: derive_sha256("pw", "salty", 1000),
            iterations: Some(1000),
            digest: Some("sha256".to_string()),
        };
        assert_eq!(verify_passcode("pw", &meta), Ok(true));

        meta.iterations = None;
        assert_eq!(verify_passcode("pw", &meta), Ok(false));
    }

    #[test]
    fn test_verify_sha512() {
        let meta = PassMeta {
            salt: Some("salty".to_string()),
            hash: derive_sha512("pw", "salty", 10),
            iterations: Some(10),
            digest: Some("SHA512".to_string()),
        };
        assert_eq!(verify_passcode("pw", &meta), Ok(true));
    }

    #[test]
    fn test_verify_rejects_broken_meta() {
        let meta = PassMeta {
            salt: None,
            hash: "00".to_string(),
            iterations: None,
            digest: None,
        };
        assert_eq!(verify_passcode("pw", &meta), Err(PasscodeError::MissingSalt));

        let meta = PassMeta {
            salt: Some("s".to_string()),
            hash: "00".to_string(),
            iterations: Some(10),
            digest: Some("md5".to_string()),
        };
        assert_eq!(
            verify_passcode("pw", &meta),
            Err(PasscodeError::UnsupportedDigest("md5".to_string()))
        );
    }
}
