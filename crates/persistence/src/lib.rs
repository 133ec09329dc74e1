//! # clinic-persistence
//!
//! Multi-tenant data access for the clinic backend: per-client databases,
//! appointment filtering and pagination with populated references, and the
//! department upsert.
//!
//! ## Overview
//!
//! Every clinic organization (a *client*) owns an isolated database. A
//! request names its client with a [`ClientId`]; the backend resolves that
//! id to a connection pool, binding the schema the first time the client is
//! seen. Services take any storage implementation and always answer with a
//! `{ status, message, data }` envelope.
//!
//! ## Modules
//!
//! - [`tenant`] - client identity
//! - [`types`] - query input, records, views, pagination and envelopes
//! - [`filter`] - AND-composed appointment filter clauses
//! - [`populate`] - the references expanded on every read
//! - [`core`] - storage traits
//! - [`backends`] - the SQLite implementation
//! - [`format`] - record to API view
//! - [`services`] - `get_appointment_with_filter` and `edit_department`
//!
//! ## Quick Start
//!
//! ```no_run
//! use clinic_persistence::backends::sqlite::SqliteBackend;
//! use clinic_persistence::services::get_appointment_with_filter;
//! use clinic_persistence::types::AppointmentQuery;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = SqliteBackend::in_memory()?;
//!
//! let mut query = AppointmentQuery::for_client("6735e64c5c58f271b1ce1678")
//!     .with_page(1u64, 10u64)
//!     .with_search_key("root canal");
//! query.bu_id = Some("6736e43eecc4dfe280f90d03".to_string());
//!
//! let response = get_appointment_with_filter(&backend, &query).await;
//! println!("{}: {}", response.status, response.message);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod backends;
pub mod core;
pub mod error;
pub mod filter;
pub mod format;
pub mod populate;
pub mod services;
pub mod tenant;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{StorageError, StorageResult};
pub use tenant::ClientId;
pub use types::{AppointmentQuery, EditDepartmentRequest, ServiceResponse};

// Re-export core traits
pub use core::{AppointmentStorage, DepartmentStorage};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
