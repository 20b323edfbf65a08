use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use password_hash::rand_core::OsRng;

use crate::application::ports::password_hasher::PasswordHashPort;

const DECOY_PASSWORD: &str = "decoy-credential-for-unknown-users";

/// Argon2 cost parameters. Fixed at startup from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashingParams {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl HashingParams {
    pub const fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> Self {
        Self {
            memory_kib,
            iterations,
            parallelism,
        }
    }
}

impl Default for HashingParams {
    fn default() -> Self {
        Self::new(
            Params::DEFAULT_M_COST,
            Params::DEFAULT_T_COST,
            Params::DEFAULT_P_COST,
        )
    }
}

/// Argon2id hasher producing PHC strings (`$argon2id$v=19$m=...`).
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
    decoy_hash: String,
}

impl Argon2PasswordHasher {
    pub fn new(params: HashingParams) -> anyhow::Result<Self> {
        let params = Params::new(
            params.memory_kib,
            params.iterations,
            params.parallelism,
            None,
        )
        .map_err(|e| anyhow::anyhow!("invalid argon2 parameters: {}", e))?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        let decoy_hash = hash_with(&argon2, DECOY_PASSWORD)?;
        Ok(Self { argon2, decoy_hash })
    }
}

fn hash_with(argon2: &Argon2<'_>, plaintext: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(argon2
        .hash_password(plaintext.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("hash failed: {}", e))?
        .to_string())
}

impl PasswordHashPort for Argon2PasswordHasher {
    fn hash(&self, plaintext: &str) -> anyhow::Result<String> {
        hash_with(&self.argon2, plaintext)
    }

    fn verify(&self, hash: &str, plaintext: &str) -> anyhow::Result<bool> {
        let parsed =
            PasswordHash::new(hash).map_err(|e| anyhow::anyhow!("invalid stored hash: {}", e))?;
        Ok(self
            .argon2
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok())
    }

    fn verify_decoy(&self, plaintext: &str) {
        let _ = self.verify(&self.decoy_hash, plaintext);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> Argon2PasswordHasher {
        Argon2PasswordHasher::new(HashingParams::new(1024, 1, 1)).unwrap()
    }

    #[test]
    fn verifies_only_the_original_password() {
        let h = hasher();
        let hash = h.hash("secret123").unwrap();
        assert!(hash.starts_with("$argon2id$v=19$m=1024,t=1,p=1$"));
        assert!(h.verify(&hash, "secret123").unwrap());
        assert!(!h.verify(&hash, "secret124").unwrap());
    }

    #[test]
    fn hashes_from_other_parameters_still_verify() {
        let old = hasher().hash("secret123").unwrap();
        let stronger = Argon2PasswordHasher::new(HashingParams::new(2048, 2, 1)).unwrap();
        assert!(stronger.verify(&old, "secret123").unwrap());
    }

    #[test]
    fn malformed_stored_hash_is_an_error() {
        assert!(hasher().verify("secret123", "secret123").is_err());
    }

    #[test]
    fn rejects_impossible_parameters() {
        assert!(Argon2PasswordHasher::new(HashingParams::new(1, 1, 1)).is_err());
        assert!(Argon2PasswordHasher::new(HashingParams::new(1024, 0, 1)).is_err());
    }

    #[test]
    fn default_parameters_match_argon2_recommendation() {
        assert_eq!(HashingParams::default(), HashingParams::new(19456, 2, 1));
    }
}
