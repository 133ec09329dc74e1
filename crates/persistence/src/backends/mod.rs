//! Database backend implementations.
//!
//! | Backend | Description |
//! |---------|-------------|
//! | SQLite | One embedded database per client, file-backed or in-memory |
//!
//! # Example
//!
//! ```no_run
//! use clinic_persistence::backends::sqlite::SqliteBackend;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Every client database lives in memory
//! let backend = SqliteBackend::in_memory()?;
//!
//! // Or one file per client under ./data
//! let backend = SqliteBackend::open("./data")?;
//! # Ok(())
//! # }
//! ```

pub mod sqlite;
