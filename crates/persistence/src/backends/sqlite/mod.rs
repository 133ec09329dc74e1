//! SQLite backend implementation.
//!
//! Every client has its own SQLite database. In file mode each database is
//! `{data_dir}/{prefix}{client}.db`; without a data directory each client
//! gets a private in-memory database (great for testing).
//!
//! # Features
//!
//! - Per-client connection pools, opened lazily and cached
//! - Schema bound to a client database the first time it is opened
//! - Filtered, paginated appointment reads with references populated by
//!   `LEFT JOIN`
//! - Department lookup and upsert primitives
//!
//! # Example
//!
//! ```no_run
//! use clinic_persistence::backends::sqlite::{NewAppointment, ReferenceEntity, SqliteBackend};
//! use clinic_persistence::tenant::ClientId;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = SqliteBackend::open("./data")?;
//! let client = ClientId::new("6735e64c5c58f271b1ce1678");
//!
//! backend.insert_reference(&client, ReferenceEntity::BusinessUnit { id: "b1", name: "Main" })?;
//! backend.insert_appointment(&client, &NewAppointment {
//!     bu_id: Some("b1".into()),
//!     status: Some("Scheduled".into()),
//!     ..Default::default()
//! })?;
//! # Ok(())
//! # }
//! ```
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE appointments (
//!     id TEXT PRIMARY KEY,
//!     display_id TEXT,
//!     bu_id TEXT,            -- business_units.id
//!     branch_id TEXT,        -- branches.id
//!     ...
//!     created_at TEXT NOT NULL,  -- RFC 3339, UTC, millisecond precision
//!     deleted_at TEXT            -- NULL while live
//! );
//! ```

mod backend;
mod functions;
mod query_builder;
mod repository;
mod schema;
mod storage;

pub use backend::{ClientConnection, SqliteBackend, SqliteBackendConfig};
pub use functions::UNICODE_LOWER;
pub use query_builder::{SqlFragment, SqlParam, escape_like, format_timestamp};
pub use repository::{NewAppointment, ReferenceEntity};
pub use schema::SCHEMA_VERSION;
