//! Application state shared by all request handlers.

use std::sync::Arc;

use clinic_persistence::core::AppointmentStorage;

use crate::config::ServerConfig;

/// Shared application state.
///
/// Cloned into each handler by axum; the storage backend and configuration
/// sit behind `Arc`s so a clone is two reference-count bumps.
pub struct AppState<S> {
    /// The storage backend.
    storage: Arc<S>,

    /// Server configuration.
    config: Arc<ServerConfig>,
}

// S itself need not be Clone; it is only ever shared through the Arc
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S: AppointmentStorage> AppState<S> {
    /// Creates a new application state.
    pub fn new(storage: Arc<S>, config: ServerConfig) -> Self {
        Self {
            storage,
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns a shared handle to the storage backend.
    pub fn storage_arc(&self) -> Arc<S> {
        Arc::clone(&self.storage)
    }

    /// Returns the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns the storage backend's name.
    pub fn backend_name(&self) -> &'static str {
        self.storage.backend_name()
    }
}
