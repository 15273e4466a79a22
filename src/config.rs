//! Service configuration
//!
//! Both binaries read optional environment variables and fall back to the
//! addresses and paths the services have always used.

use std::env;
use std::path::PathBuf;

/// Default port shared by both services
pub const DEFAULT_PORT: u16 = 8080;

/// Server bind configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host address to bind to
    pub host: String,
}

impl ServerConfig {
    fn from_env(default_host: &str) -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            host: env::var("HOST").unwrap_or_else(|_| default_host.to_string()),
        }
    }

    /// Get the server address as a string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Wiki service configuration
#[derive(Debug, Clone)]
pub struct WikiConfig {
    /// Server configuration
    pub server: ServerConfig,
    /// Directory holding the `<name>.txt` page files
    pub data_dir: PathBuf,
}

impl WikiConfig {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env("0.0.0.0"),
            data_dir: env::var_os("WIKI_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}

/// Catalog service configuration
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Server configuration
    pub server: ServerConfig,
    /// Whether `GET /items/:id` is mounted
    pub item_lookup: bool,
}

impl CatalogConfig {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env("localhost"),
            item_lookup: env::var("CATALOG_ITEM_LOOKUP")
                .ok()
                .and_then(|v| parse_flag(&v))
                .unwrap_or(true),
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
