use argon2::password_hash::PasswordHashString;

use crate::auth::password;
use crate::config::AuthConfig;

/// Decides whether a username/password pair may use the API.
pub trait CredentialCheck: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// One configured account with an Argon2 password hash.
pub struct StaticCredentials {
    username: String,
    password_hash: PasswordHashString,
}

impl StaticCredentials {
    /// Fails on an unparseable hash, so startup rejects a bad config.
    pub fn new(config: &AuthConfig) -> Result<Self, String> {
        Ok(StaticCredentials {
            username: config.username.clone(),
            password_hash: password::parse(&config.password_hash)?,
        })
    }
}

impl CredentialCheck for StaticCredentials {
    fn verify(&self, username: &str, candidate: &str) -> bool {
        username == self.username && password::matches(candidate, &self.password_hash)
    }
}
