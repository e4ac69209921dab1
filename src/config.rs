use std::env;
use std::time::Duration;

/// Default base URL of the ViaCEP-compatible postal-code API.
pub const DEFAULT_POSTAL_LOOKUP_URL: &str = "https://viacep.com.br/ws";

const DEFAULT_DATABASE_URL: &str = "app.db";
const DEFAULT_ADDRESS: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_LOOKUP_TIMEOUT_SECS: u64 = 10;

/// Runtime settings read from the process environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub address: String,
    pub port: u16,
    /// Base URL used for postal-code and address lookups.
    pub postal_lookup_url: String,
    /// Upper bound for a single outbound lookup request.
    pub lookup_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            address: DEFAULT_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            postal_lookup_url: DEFAULT_POSTAL_LOOKUP_URL.to_string(),
            lookup_timeout: Duration::from_secs(DEFAULT_LOOKUP_TIMEOUT_SECS),
        }
    }
}

impl ServerConfig {
    /// Read the configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(defaults.port);

        let lookup_timeout = lookup("LOOKUP_TIMEOUT_SECS")
            .and_then(|value| value.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.lookup_timeout);

        Self {
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            address: lookup("ADDRESS").unwrap_or(defaults.address),
            port,
            postal_lookup_url: lookup("POSTAL_LOOKUP_URL").unwrap_or(defaults.postal_lookup_url),
            lookup_timeout,
        }
    }
}
