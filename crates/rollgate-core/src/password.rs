//! Password hashing and verification using bcrypt.

use bcrypt::{DEFAULT_COST, hash, verify};
use regex::Regex;

use crate::errors::AppError;

/// Four `$`-delimited segments, the shape of `$id$params$salt$hash` encodings.
const DOLLAR_SEGMENTS: &str = r"\$[^$]+\$[^$]+\$[^$]+\$[^$]+";

/// bcrypt modular-crypt output: `$2b$12$` followed by 22 salt and 31 hash chars.
const BCRYPT_SHAPE: &str = r"^\$2[abxy]?\$\d{2}\$[./A-Za-z0-9]{53}$";

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash_password_with_cost(password, DEFAULT_COST)
}

/// Hashes with an explicit bcrypt cost (4..=31). Low costs are for tests only.
pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, AppError> {
    hash(password, cost)
        .map_err(|e| AppError::internal_error(format!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    verify(password, hash)
        .map_err(|e| AppError::internal_error(format!("Failed to verify password: {}", e)))
}

/// Returns true when a plaintext secret looks like an already-encoded hash.
///
/// Such a value would be hashed again and leave the account with a credential
/// nobody can type. This is a shape heuristic, not a cryptographic check.
pub fn looks_already_hashed(secret: &str) -> bool {
    Regex::new(DOLLAR_SEGMENTS).is_ok_and(|re| re.is_match(secret))
        || Regex::new(BCRYPT_SHAPE).is_ok_and(|re| re.is_match(secret))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("correct horse").unwrap();
        assert_ne!(hash, "correct horse");
        assert!(verify_password("correct horse", &hash).unwrap());
        assert!(!verify_password("wrong horse", &hash).unwrap());
    }

    #[test]
    fn test_verify_invalid_hash_errors() {
        assert!(verify_password("whatever", "not_a_valid_bcrypt_hash").is_err());
    }

    #[test]
    fn test_four_segments_look_hashed() {
        assert!(looks_already_hashed("$2b$10$abc$def"));
        assert!(looks_already_hashed(
            "$argon2id$v=19$m=65536,t=3,p=4$c2FsdHNhbHQ$aGFzaGhhc2g"
        ));
        assert!(looks_already_hashed("prefix $a$b$c$d suffix"));
    }

    #[test]
    fn test_real_bcrypt_output_looks_hashed() {
        let hash = hash_password("secret123").unwrap();
        assert!(looks_already_hashed(&hash));
    }

    #[test]
    fn test_ordinary_passwords_pass() {
        assert!(!looks_already_hashed("hunter2"));
        assert!(!looks_already_hashed("pa$$word"));
        assert!(!looks_already_hashed("$one$two$three"));
        assert!(!looks_already_hashed(""));
    }
}
