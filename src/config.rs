use std::env;
use std::time::Duration;

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub host: String,
    pub port: u16,

    /// Directory served for paths that match no API route.
    pub static_dir: String,

    /// Upper bound on a single request, including the store round-trip.
    /// `None` leaves requests unbounded.
    pub request_timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "20".into())
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a number")?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".into())
                .parse()
                .context("PORT must be a number")?,

            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "public".into()),

            request_timeout: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .filter(|s| !s.is_empty())
                .map(|s| s.parse::<u64>())
                .transpose()
                .context("REQUEST_TIMEOUT_SECS must be a number")?
                .map(Duration::from_secs),
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The in-memory store is selected with a `memory://` database URL.
    pub fn uses_memory_store(&self) -> bool {
        self.database_url.starts_with("memory:")
    }
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Self {
        Self {
            database_url: "memory://".into(),
            database_max_connections: 1,
            host: "127.0.0.1".into(),
            port: 0,
            static_dir: "public".into(),
            request_timeout: None,
        }
    }
}
