/// One-way credential hashing. Implementations salt every hash and compare in
/// constant time.
pub trait PasswordHashPort: Send + Sync {
    fn hash(&self, plaintext: &str) -> anyhow::Result<String>;
    /// `Ok(false)` on mismatch; `Err` only when `hash` is not a valid credential.
    fn verify(&self, hash: &str, plaintext: &str) -> anyhow::Result<bool>;
    /// Runs a full verification against a decoy credential and discards the
    /// result, so a lookup miss costs as much as a wrong password.
    fn verify_decoy(&self, plaintext: &str);
}
