//! Argon2 password hashing.
//!
//! Credentials are stored as PHC strings (`$argon2id$v=19$...`), which carry
//! the algorithm, parameters and salt alongside the digest.

use argon2::Argon2;
use argon2::password_hash::{self, PasswordHasher, PasswordVerifier, SaltString};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{ChoresError, Result};

const SALT_LEN: usize = 16;

/// Stored credential in PHC string format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordHash {
    phc: String,
}

impl PasswordHash {
    /// Hash `password` with Argon2id under a fresh salt drawn from `rng`.
    pub fn new<R: Rng + ?Sized>(password: &str, rng: &mut R) -> Result<Self> {
        let mut salt_bytes = [0u8; SALT_LEN];
        rng.fill_bytes(&mut salt_bytes);
        let salt = SaltString::encode_b64(&salt_bytes).map_err(credential_error)?;
        let phc = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(credential_error)?
            .to_string();
        Ok(Self { phc })
    }

    /// The PHC string as persisted.
    pub fn as_str(&self) -> &str {
        &self.phc
    }

    /// Check `password` against this credential.
    ///
    /// A malformed stored hash never verifies.
    pub fn verify(&self, password: &str) -> bool {
        match password_hash::PasswordHash::new(&self.phc) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                tracing::warn!(error = %e, "stored password hash is malformed");
                false
            }
        }
    }
}

fn credential_error(e: password_hash::Error) -> ChoresError {
    ChoresError::Credential(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_verify_accepts_original_password() {
        let mut rng = StdRng::seed_from_u64(1);
        let hash = PasswordHash::new("hunter22", &mut rng).unwrap();
        assert!(hash.verify("hunter22"));
        assert!(!hash.verify("hunter23"));
        assert!(!hash.verify(""));
    }

    #[test]
    fn test_same_password_gets_distinct_salts() {
        let mut rng = StdRng::seed_from_u64(1);
        let a = PasswordHash::new("secret", &mut rng).unwrap();
        let b = PasswordHash::new("secret", &mut rng).unwrap();
        assert_ne!(a, b);
        assert!(a.verify("secret") && b.verify("secret"));
    }

    #[test]
    fn test_stored_as_argon2_phc_string() {
        let mut rng = StdRng::seed_from_u64(9);
        let hash = PasswordHash::new("plaintext-pw", &mut rng).unwrap();

        assert!(hash.as_str().starts_with("$argon2id$"));
        let json = serde_json::to_string(&hash).unwrap();
        assert!(!json.contains("plaintext-pw"));
        assert_eq!(json, format!("\"{}\"", hash.as_str()));
    }

    #[test]
    fn test_malformed_hash_never_verifies() {
        let hash: PasswordHash = serde_json::from_str("\"not-a-phc-string\"").unwrap();
        assert!(!hash.verify("anything"));
        assert!(!hash.verify(""));
    }
}
