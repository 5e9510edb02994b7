use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHashString, PasswordHasher, PasswordVerifier, SaltString,
    },
    Algorithm, Argon2, Params, Version,
};

/// Argon2id, 19 MiB memory, 2 passes, 1 lane.
fn hasher() -> Result<Argon2<'static>, String> {
    let params = Params::new(19 * 1024, 2, 1, None).map_err(|e| format!("Invalid params: {e}"))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// PHC string for `ROSTER_AUTH_PASSWORD_HASH`.
pub fn hash(password: &str) -> Result<String, String> {
    let salt = SaltString::generate(&mut OsRng);
    hasher()?
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| format!("Hashing failed: {e}"))
}

/// Owned, already-validated form of a PHC string.
pub fn parse(hash: &str) -> Result<PasswordHashString, String> {
    PasswordHashString::new(hash).map_err(|e| format!("Invalid password hash: {e}"))
}

/// Parameters come from the stored hash, not from `hasher()`.
pub fn matches(password: &str, hash: &PasswordHashString) -> bool {
    Argon2::default()
        .verify_password(password.as_bytes(), &hash.password_hash())
        .is_ok()
}
