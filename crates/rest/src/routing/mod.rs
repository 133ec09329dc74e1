//! Route configuration for the clinic HTTP API.
//!
//! This module maps HTTP paths to handlers.

pub mod clinic_routes;

pub use clinic_routes::create_routes;
