//! Configuration types for druglist.
//!
//! [`Config::load`] layers, lowest precedence first:
//!
//! 1. the embedded defaults below,
//! 2. `~/.config/druglist/config.toml` (created with the defaults if it does
//!    not exist yet),
//! 3. an explicit file passed with `--config`,
//! 4. `DRUGLIST_*` environment variables, `__` between section and key
//!    (`DRUGLIST_SERVER__PORT=8080`).
//!
//! [`Config::defaults`] returns the embedded defaults without touching the
//! filesystem (useful in tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[server]
host           = "127.0.0.1"
port           = 5000
max_body_bytes = 52428800

[database]
path = "drugs.db"

[ingest]
source                   = "drugData.json"
seed_sample_when_missing = true

[client]
base_url   = "http://127.0.0.1:5000"
timeout_ms = 5000

[ui]
page_size   = 10
date_format = "%Y-%m-%d"
theme       = "default"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub ingest: IngestConfig,
    pub client: ClientConfig,
    pub ui: UiConfig,
}

/// `[server]`: where the HTTP API listens.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Largest request body the API accepts, in bytes.
    pub max_body_bytes: usize,
}

impl ServerConfig {
    /// `host:port`, suitable for `TcpListener::bind`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// `[database]`: SQLite file backing the drug table.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

/// `[ingest]`: default source for `druglist ingest`.
#[derive(Debug, Clone, Deserialize)]
pub struct IngestConfig {
    pub source: PathBuf,
    /// Load the built-in sample records when `source` does not exist.
    pub seed_sample_when_missing: bool,
}

/// `[client]`: how the terminal browser reaches the API.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_ms: u64,
}

/// `[ui]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    /// Initial rows per page (10, 25, 50 or 100).
    pub page_size: u32,
    /// `chrono` format string for the launch date column.
    pub date_format: String,
    /// `default` or `gruvbox`.
    pub theme: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from the user config file plus `explicit` (if any) and the
    /// environment, layered on top of the built-in defaults. Creates the user
    /// config file with defaults if it does not exist.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        Self::layered(Some(&path), explicit)
    }

    /// Build from the defaults, the optional `user` and `explicit` files and
    /// the environment. Neither file is required to exist.
    pub fn layered(user: Option<&Path>, explicit: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml));
        if let Some(path) = user {
            builder = builder.add_source(config::File::from(path).required(false));
        }
        if let Some(path) = explicit {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        builder
            .add_source(
                config::Environment::with_prefix("DRUGLIST")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("druglist")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
