//! Storage traits.
//!
//! - [`AppointmentStorage`] - filtered, windowed appointment reads
//! - [`DepartmentStorage`] - department lookup and upsert primitives
//!
//! Services are generic over these traits; [`SqliteBackend`] implements
//! both.
//!
//! [`SqliteBackend`]: crate::backends::sqlite::SqliteBackend

mod storage;

pub use storage::{AppointmentStorage, DepartmentStorage};
