use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable names - single source of truth
pub mod env_vars {
    pub const PORT: &str = "PORT";
    pub const BIND_ADDRESS: &str = "BIND_ADDRESS";
    /// Path of the SQLite database file
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// Maximum number of pooled database connections
    pub const DB_POOL_SIZE: &str = "DB_POOL_SIZE";
    /// How long a request waits for a free connection before failing
    pub const DB_POOL_TIMEOUT_SECS: &str = "DB_POOL_TIMEOUT_SECS";
}

/// Default values
pub mod defaults {
    pub const PORT: u16 = 8080;
    pub const BIND_ADDRESS: &str = "0.0.0.0";
    pub const DATABASE_URL: &str = "./.db/notes.db";
    pub const DB_POOL_SIZE: u32 = 5;
    pub const DB_POOL_TIMEOUT_SECS: u64 = 5;
}

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub bind_address: String,
    pub database_url: String,
    pub db_pool_size: u32,
    pub db_pool_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source. Unparseable values fall
    /// back to the defaults with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = parse_or_default(&lookup, env_vars::PORT, defaults::PORT);

        let db_pool_size =
            parse_or_default(&lookup, env_vars::DB_POOL_SIZE, defaults::DB_POOL_SIZE).max(1);

        let db_pool_timeout_secs = match parse_or_default(
            &lookup,
            env_vars::DB_POOL_TIMEOUT_SECS,
            defaults::DB_POOL_TIMEOUT_SECS,
        ) {
            // r2d2 requires a positive acquisition timeout
            0 => {
                log::warn!(
                    "{} must be positive, using {}",
                    env_vars::DB_POOL_TIMEOUT_SECS,
                    defaults::DB_POOL_TIMEOUT_SECS
                );
                defaults::DB_POOL_TIMEOUT_SECS
            }
            secs => secs,
        };

        Self {
            port,
            bind_address: lookup(env_vars::BIND_ADDRESS)
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| defaults::BIND_ADDRESS.to_string()),
            database_url: lookup(env_vars::DATABASE_URL)
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| defaults::DATABASE_URL.to_string()),
            db_pool_size,
            db_pool_timeout: Duration::from_secs(db_pool_timeout_secs),
        }
    }

    /// Directory holding the database file, if it has one
    pub fn database_dir(&self) -> Option<PathBuf> {
        Path::new(&self.database_url)
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| p.to_path_buf())
    }
}

fn parse_or_default<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display + Copy,
{
    match lookup(key) {
        Some(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                log::warn!("{} must be a valid number (got {:?}), using {}", key, raw, default);
                default
            }
        },
        None => default,
    }
}

/// Create the directory for the database file if it does not exist yet
pub fn initialize_database_dir(config: &Config) -> std::io::Result<()> {
    if let Some(dir) = config.database_dir() {
        std::fs::create_dir_all(&dir)?;
        log::info!("[DB] Database directory: {:?}", dir);
    }
    Ok(())
}
