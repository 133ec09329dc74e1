//! Service operations.
//!
//! Services sit between transport and storage. They never return `Err`:
//! every outcome, including data-layer failures, is rendered into a response
//! envelope whose `message` carries the human-readable reason.

mod appointment;
mod department;

pub use appointment::get_appointment_with_filter;
pub use department::edit_department;

use crate::error::{ResourceError, StorageError};
use crate::types::FailureKind;

/// Classifies a storage error for transport status selection.
pub(crate) fn failure_kind(err: &StorageError) -> FailureKind {
    match err {
        StorageError::Tenant(crate::error::TenantError::InvalidClient { .. })
        | StorageError::Validation(_) => FailureKind::InvalidRequest,
        StorageError::Resource(ResourceError::NotFound { .. }) => FailureKind::NotFound,
        _ => FailureKind::Internal,
    }
}
