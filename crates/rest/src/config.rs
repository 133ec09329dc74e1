//! Server configuration for the clinic HTTP API.
//!
//! Configuration comes from command line arguments, `CLINIC_*` environment
//! variables, or is built programmatically.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `CLINIC_SERVER_PORT` | 8080 | Server port |
//! | `CLINIC_SERVER_HOST` | 127.0.0.1 | Host to bind |
//! | `CLINIC_LOG_LEVEL` | info | Log level |
//! | `CLINIC_MAX_BODY_SIZE` | 1048576 | Max request body (bytes) |
//! | `CLINIC_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `CLINIC_ENABLE_CORS` | true | Enable CORS |
//! | `CLINIC_CORS_ORIGINS` | * | Allowed origins |
//! | `CLINIC_CORS_METHODS` | GET,POST,PUT,OPTIONS | Allowed methods |
//! | `CLINIC_CORS_HEADERS` | Content-Type,Authorization,Accept | Allowed headers |
//! | `CLINIC_DATA_DIR` | (unset) | Directory for client databases; unset keeps them in memory |
//! | `CLINIC_DATABASE_PREFIX` | client_ | File name prefix of client databases |
//! | `CLINIC_MAX_CONNECTIONS` | 10 | Pool size per client database |
//!
//! # Example
//!
//! ```rust
//! use clinic_rest::ServerConfig;
//!
//! let config = ServerConfig {
//!     port: 3000,
//!     host: "0.0.0.0".to_string(),
//!     ..Default::default()
//! };
//! assert_eq!(config.socket_addr(), "0.0.0.0:3000");
//! ```

use std::path::PathBuf;

use clap::Parser;
use clinic_persistence::backends::sqlite::SqliteBackendConfig;

/// Server configuration for the clinic HTTP API.
#[derive(Debug, Clone, Parser)]
#[command(name = "clinic-server")]
#[command(about = "Clinic appointment and department API")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "CLINIC_SERVER_PORT", default_value = "8080")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "CLINIC_SERVER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "CLINIC_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Maximum request body size in bytes.
    #[arg(long, env = "CLINIC_MAX_BODY_SIZE", default_value = "1048576")]
    pub max_body_size: usize,

    /// Request timeout in seconds.
    #[arg(long, env = "CLINIC_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Enable CORS.
    #[arg(long, env = "CLINIC_ENABLE_CORS", default_value = "true")]
    pub enable_cors: bool,

    /// Allowed CORS origins (comma-separated, or * for all).
    #[arg(long, env = "CLINIC_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// Allowed CORS methods (comma-separated, or * for all).
    #[arg(long, env = "CLINIC_CORS_METHODS", default_value = "GET,POST,PUT,OPTIONS")]
    pub cors_methods: String,

    /// Allowed CORS headers (comma-separated, or * for all).
    #[arg(
        long,
        env = "CLINIC_CORS_HEADERS",
        default_value = "Content-Type,Authorization,Accept"
    )]
    pub cors_headers: String,

    /// Directory holding one database file per client.
    ///
    /// When unset, every client gets an in-memory database that lives as
    /// long as the process.
    #[arg(long, env = "CLINIC_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// File name prefix for client databases.
    #[arg(long, env = "CLINIC_DATABASE_PREFIX", default_value = "client_")]
    pub database_prefix: String,

    /// Maximum pooled connections per client database.
    #[arg(long, env = "CLINIC_MAX_CONNECTIONS", default_value = "10")]
    pub max_connections: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            max_body_size: 1024 * 1024, // 1MB
            request_timeout: 30,
            enable_cors: true,
            cors_origins: "*".to_string(),
            cors_methods: "GET,POST,PUT,OPTIONS".to_string(),
            cors_headers: "Content-Type,Authorization,Accept".to_string(),
            data_dir: None,
            database_prefix: "client_".to_string(),
            max_connections: 10,
        }
    }
}

impl ServerConfig {
    /// Creates a configuration from environment variables, falling back to
    /// defaults when parsing fails.
    pub fn from_env() -> Self {
        Self::try_parse().unwrap_or_default()
    }

    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Builds the storage backend configuration.
    pub fn backend_config(&self) -> SqliteBackendConfig {
        SqliteBackendConfig {
            data_dir: self.data_dir.clone(),
            database_prefix: self.database_prefix.clone(),
            max_connections: self.max_connections,
            ..Default::default()
        }
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.max_body_size == 0 {
            errors.push("Max body size cannot be 0".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if self.max_connections == 0 {
            errors.push("Max connections cannot be 0".to_string());
        }

        if self.database_prefix.contains(['/', '\\']) {
            errors.push("Database prefix cannot contain path separators".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing.
    ///
    /// Uses an OS-assigned port, in-memory databases and no CORS.
    pub fn for_testing() -> Self {
        Self {
            port: 0,
            log_level: "debug".to_string(),
            request_timeout: 5,
            enable_cors: false,
            cors_methods: "*".to_string(),
            cors_headers: "*".to_string(),
            ..Self::default()
        }
    }
}
