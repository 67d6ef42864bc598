//! Runtime configuration for the service binary.

use std::env;

/// Settings the binary needs to come up: where to listen and which
/// database to open.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to
    pub listen_addr: String,
    /// sqlx SQLite URL of the durable store
    pub database_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8787".to_string(),
            database_url: "sqlite:hypeboard.db?mode=rwc".to_string(),
        }
    }
}

impl Config {
    /// Reads the configuration from the environment, falling back to
    /// defaults. `HYPEBOARD_LISTEN` overrides the bind address and
    /// `HYPEBOARD_DB` the database URL.
    pub fn from_env() -> Self {
        let defaults = Config::default();
        Self {
            listen_addr: env::var("HYPEBOARD_LISTEN").unwrap_or(defaults.listen_addr),
            database_url: env::var("HYPEBOARD_DB").unwrap_or(defaults.database_url),
        }
    }
}
