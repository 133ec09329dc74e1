//! Client (tenant) identity.
//!
//! Each clinic organization is a client with its own database. All storage
//! operations take a [`ClientId`]; the backend resolves it to a connection
//! pool for that client's database, so rows from one client are never
//! visible to another.
//!
//! # Examples
//!
//! ```
//! use clinic_persistence::tenant::ClientId;
//!
//! let client = ClientId::new("north-clinic");
//! assert_eq!(client.as_str(), "north-clinic");
//! ```

mod id;

pub use id::ClientId;
