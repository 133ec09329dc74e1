//! HTTP request handlers.
//!
//! - [`appointment`] - filtered appointment listing (GET and POST)
//! - [`department`] - department upsert
//! - [`health`] - health check endpoint

pub mod appointment;
pub mod department;
pub mod health;

// Re-export handlers for convenience
pub use appointment::{appointment_get_handler, appointment_post_handler};
pub use department::edit_department_handler;
pub use health::health_handler;
