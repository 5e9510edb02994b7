use std::net::IpAddr;

#[derive(Debug, Clone)]
pub struct Config {
    pub store: StoreBackend,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub host: IpAddr,
    pub port: u16,
    pub default_page_size: u32,
    pub max_page_size: u32,
    pub max_body_size: usize,
    pub log_level: String,
    pub auth: Option<AuthConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

/// Single operator account checked with HTTP Basic auth.
#[derive(Clone)]
pub struct AuthConfig {
    pub username: String,
    /// Argon2 PHC string, e.g. from `roster hash-password`.
    pub password_hash: String,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let store = match env_or("ROSTER_STORE", "postgres").as_str() {
            "postgres" => StoreBackend::Postgres,
            "memory" => StoreBackend::Memory,
            other => return Err(format!("Invalid ROSTER_STORE: {other}")),
        };

        let database_url = std::env::var("DATABASE_URL").ok();
        if store == StoreBackend::Postgres && database_url.is_none() {
            return Err("Missing required environment variable: DATABASE_URL".to_string());
        }

        let db_max_connections: u32 = env_or("ROSTER_DB_MAX_CONNECTIONS", "10")
            .parse()
            .map_err(|e| format!("Invalid ROSTER_DB_MAX_CONNECTIONS: {e}"))?;

        let host: IpAddr = env_or("ROSTER_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid ROSTER_HOST: {e}"))?;

        let port: u16 = env_or("ROSTER_PORT", "8080")
            .parse()
            .map_err(|e| format!("Invalid ROSTER_PORT: {e}"))?;

        let default_page_size: u32 = env_or("ROSTER_DEFAULT_PAGE_SIZE", "10")
            .parse()
            .map_err(|e| format!("Invalid ROSTER_DEFAULT_PAGE_SIZE: {e}"))?;

        let max_page_size: u32 = env_or("ROSTER_MAX_PAGE_SIZE", "100")
            .parse()
            .map_err(|e| format!("Invalid ROSTER_MAX_PAGE_SIZE: {e}"))?;

        if default_page_size == 0 || max_page_size == 0 {
            return Err("Page sizes must be greater than zero".to_string());
        }

        let max_body_size: usize = env_or("ROSTER_MAX_BODY_SIZE", "65536")
            .parse()
            .map_err(|e| format!("Invalid ROSTER_MAX_BODY_SIZE: {e}"))?;

        let log_level = env_or("ROSTER_LOG_LEVEL", "info");

        let auth = match (
            std::env::var("ROSTER_AUTH_USER").ok(),
            std::env::var("ROSTER_AUTH_PASSWORD_HASH").ok(),
        ) {
            (Some(username), Some(password_hash)) => Some(AuthConfig {
                username,
                password_hash,
            }),
            (None, None) => None,
            _ => {
                return Err(
                    "ROSTER_AUTH_USER and ROSTER_AUTH_PASSWORD_HASH must be set together"
                        .to_string(),
                );
            }
        };

        Ok(Config {
            store,
            database_url,
            db_max_connections,
            host,
            port,
            default_page_size,
            max_page_size,
            max_body_size,
            log_level,
            auth,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
