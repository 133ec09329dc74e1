//! SQLite backend with one database per client.

use std::collections::HashMap;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::time::Duration;

use parking_lot::RwLock;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{BackendError, StorageError, StorageResult, TenantError};
use crate::tenant::ClientId;

use super::{functions, schema};

type ClientPool = Pool<SqliteConnectionManager>;

/// A pooled connection to one client's database.
pub type ClientConnection = PooledConnection<SqliteConnectionManager>;

/// SQLite backend for the clinic collections.
///
/// Each client gets its own database: a file under
/// [`data_dir`](SqliteBackendConfig::data_dir), or a private in-memory
/// database when no directory is configured. Pools are opened on first use
/// and cached for the life of the backend.
pub struct SqliteBackend {
    config: SqliteBackendConfig,
    client_pattern: Regex,
    pools: RwLock<HashMap<String, ClientPool>>,
}

impl Debug for SqliteBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteBackend")
            .field("config", &self.config)
            .field("open_clients", &self.pools.read().len())
            .finish_non_exhaustive()
    }
}

/// Configuration for the SQLite backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqliteBackendConfig {
    /// Directory holding one database file per client. `None` keeps every
    /// client database in memory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Prefix of client database file names.
    #[serde(default = "default_database_prefix")]
    pub database_prefix: String,

    /// Maximum number of connections per client pool (file mode only).
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Connection timeout in milliseconds.
    #[serde(default = "default_connection_timeout_ms")]
    pub connection_timeout_ms: u64,

    /// SQLite busy timeout in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u32,

    /// Enable WAL mode for file databases.
    #[serde(default = "default_true")]
    pub enable_wal: bool,

    /// Allowed client ids (regex pattern).
    #[serde(default = "default_client_id_pattern")]
    pub client_id_pattern: String,

    /// Maximum client id length.
    #[serde(default = "default_max_client_id_length")]
    pub max_client_id_length: usize,
}

fn default_database_prefix() -> String {
    "client_".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_connection_timeout_ms() -> u64 {
    30000
}

fn default_busy_timeout_ms() -> u32 {
    5000
}

fn default_true() -> bool {
    true
}

fn default_client_id_pattern() -> String {
    r"^[A-Za-z0-9][A-Za-z0-9_-]*$".to_string()
}

fn default_max_client_id_length() -> usize {
    64
}

impl Default for SqliteBackendConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            database_prefix: default_database_prefix(),
            max_connections: default_max_connections(),
            connection_timeout_ms: default_connection_timeout_ms(),
            busy_timeout_ms: default_busy_timeout_ms(),
            enable_wal: true,
            client_id_pattern: default_client_id_pattern(),
            max_client_id_length: default_max_client_id_length(),
        }
    }
}

impl SqliteBackendConfig {
    /// Stores client databases under `dir`.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    /// Sets the database file prefix.
    pub fn with_database_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.database_prefix = prefix.into();
        self
    }
}

impl SqliteBackend {
    /// Creates a backend that keeps every client database in memory.
    pub fn in_memory() -> StorageResult<Self> {
        Self::with_config(SqliteBackendConfig::default())
    }

    /// Creates a backend storing client databases under `dir`.
    pub fn open<P: AsRef<Path>>(dir: P) -> StorageResult<Self> {
        Self::with_config(SqliteBackendConfig::default().with_data_dir(dir.as_ref()))
    }

    /// Creates a backend with custom configuration.
    pub fn with_config(config: SqliteBackendConfig) -> StorageResult<Self> {
        let client_pattern = Regex::new(&config.client_id_pattern).map_err(|e| {
            StorageError::Backend(BackendError::Internal {
                backend_name: "sqlite".to_string(),
                message: format!("invalid client id pattern: {}", e),
                source: Some(Box::new(e)),
            })
        })?;

        if let Some(dir) = &config.data_dir {
            std::fs::create_dir_all(dir).map_err(|e| {
                StorageError::Backend(BackendError::ConnectionFailed {
                    backend_name: "sqlite".to_string(),
                    message: format!("cannot create {}: {}", dir.display(), e),
                })
            })?;
        }

        Ok(Self {
            config,
            client_pattern,
            pools: RwLock::new(HashMap::new()),
        })
    }

    /// Returns whether client databases live in memory.
    pub fn is_memory(&self) -> bool {
        self.config.data_dir.is_none()
    }

    /// Returns the backend configuration.
    pub fn config(&self) -> &SqliteBackendConfig {
        &self.config
    }

    /// Returns the number of client databases opened so far.
    pub fn open_clients(&self) -> usize {
        self.pools.read().len()
    }

    /// Checks that `client` is usable as a database name.
    pub fn validate_client(&self, client: &ClientId) -> Result<(), TenantError> {
        let invalid = |reason: String| TenantError::InvalidClient {
            client_id: client.to_string(),
            reason,
        };

        if client.is_blank() {
            return Err(invalid("client id is required".to_string()));
        }
        if client.as_str().len() > self.config.max_client_id_length {
            return Err(invalid(format!(
                "exceeds {} characters",
                self.config.max_client_id_length
            )));
        }
        if !self.client_pattern.is_match(client.as_str()) {
            return Err(invalid(format!(
                "does not match pattern {}",
                self.config.client_id_pattern
            )));
        }
        Ok(())
    }

    /// Returns the database file for `client`, or `None` in memory mode.
    pub fn database_path(&self, client: &ClientId) -> Option<PathBuf> {
        self.config.data_dir.as_ref().map(|dir| {
            dir.join(format!(
                "{}{}.db",
                self.config.database_prefix,
                client.as_str()
            ))
        })
    }

    /// Resolves a connection to `client`'s database.
    ///
    /// The first call for a client opens its pool and binds the schema.
    pub fn connection(&self, client: &ClientId) -> StorageResult<ClientConnection> {
        let pool = self.pool_for(client)?;
        pool.get().map_err(|e| {
            StorageError::Tenant(TenantError::DatabaseUnavailable {
                client_id: client.to_string(),
                message: e.to_string(),
            })
        })
    }

    fn pool_for(&self, client: &ClientId) -> StorageResult<ClientPool> {
        // The validated id is already file-safe and is used verbatim, so
        // distinct ids never share a database.
        self.validate_client(client)?;

        if let Some(pool) = self.pools.read().get(client.as_str()) {
            return Ok(pool.clone());
        }

        let mut pools = self.pools.write();
        if let Some(pool) = pools.get(client.as_str()) {
            return Ok(pool.clone());
        }

        let pool = self.open_pool(client)?;
        pools.insert(client.as_str().to_string(), pool.clone());
        Ok(pool)
    }

    fn open_pool(&self, client: &ClientId) -> StorageResult<ClientPool> {
        let path = self.database_path(client);
        let busy_timeout = Duration::from_millis(self.config.busy_timeout_ms as u64);
        let wal = self.config.enable_wal && path.is_some();

        let manager = match &path {
            Some(path) => SqliteConnectionManager::file(path),
            None => SqliteConnectionManager::memory(),
        }
        .with_init(move |conn| {
            conn.busy_timeout(busy_timeout)?;
            conn.execute_batch("PRAGMA foreign_keys = ON;")?;
            functions::register(conn)?;
            if wal {
                conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| {
                    row.get::<_, String>(0)
                })?;
            }
            Ok(())
        });

        let builder = Pool::builder().connection_timeout(Duration::from_millis(
            self.config.connection_timeout_ms,
        ));

        // Every in-memory connection is its own database, so the pool must
        // hold exactly one connection and never recycle it.
        let builder = if path.is_some() {
            builder.max_size(self.config.max_connections)
        } else {
            builder
                .max_size(1)
                .min_idle(Some(1))
                .idle_timeout(None)
                .max_lifetime(None)
        };

        let pool = builder.build(manager).map_err(|e| {
            StorageError::Tenant(TenantError::DatabaseUnavailable {
                client_id: client.to_string(),
                message: e.to_string(),
            })
        })?;

        {
            let conn = pool.get()?;
            schema::initialize_schema(&conn)?;
        }

        match &path {
            Some(path) => tracing::info!(
                client_id = %client,
                path = %path.display(),
                "Opened client database"
            ),
            None => tracing::info!(client_id = %client, "Opened in-memory client database"),
        }

        Ok(pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_client() {
        let backend = SqliteBackend::in_memory().unwrap();

        assert!(backend.validate_client(&ClientId::new("6735e64c5c58f271b1ce1678")).is_ok());
        assert!(backend.validate_client(&ClientId::new("north-clinic_2")).is_ok());

        for bad in ["", "  ", "../etc", "a/b", "a b", "-lead", "a.db"] {
            assert!(
                backend.validate_client(&ClientId::new(bad)).is_err(),
                "{bad:?} should be rejected"
            );
        }

        let long = "a".repeat(65);
        assert!(backend.validate_client(&ClientId::new(long)).is_err());
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let config = SqliteBackendConfig {
            client_id_pattern: "([".to_string(),
            ..Default::default()
        };
        assert!(SqliteBackend::with_config(config).is_err());
    }

    #[test]
    fn test_pool_is_cached_per_client() {
        let backend = SqliteBackend::in_memory().unwrap();
        assert_eq!(backend.open_clients(), 0);

        drop(backend.connection(&ClientId::new("c1")).unwrap());
        drop(backend.connection(&ClientId::new("c1")).unwrap());
        assert_eq!(backend.open_clients(), 1);

        drop(backend.connection(&ClientId::new("c2")).unwrap());
        assert_eq!(backend.open_clients(), 2);

        drop(backend.connection(&ClientId::new("C1")).unwrap());
        assert_eq!(backend.open_clients(), 3);
    }

    #[test]
    fn test_invalid_client_opens_nothing() {
        let backend = SqliteBackend::in_memory().unwrap();
        let err = backend.connection(&ClientId::new("../x")).unwrap_err();
        assert!(matches!(
            err,
            StorageError::Tenant(TenantError::InvalidClient { .. })
        ));
        assert_eq!(backend.open_clients(), 0);
    }

    #[test]
    fn test_database_path() {
        let dir = tempfile::tempdir().unwrap();
        let backend = SqliteBackend::open(dir.path()).unwrap();
        let path = backend.database_path(&ClientId::new("North-Clinic")).unwrap();
        assert_eq!(path, dir.path().join("client_North-Clinic.db"));

        drop(backend.connection(&ClientId::new("North-Clinic")).unwrap());
        assert!(path.exists());

        let other = backend.database_path(&ClientId::new("north_clinic")).unwrap();
        assert_ne!(path, other);
    }

    #[test]
    fn test_memory_has_no_path() {
        let backend = SqliteBackend::in_memory().unwrap();
        assert!(backend.is_memory());
        assert!(backend.database_path(&ClientId::new("c1")).is_none());
    }
}
