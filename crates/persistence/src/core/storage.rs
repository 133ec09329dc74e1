//! Storage traits for the clinic collections.
//!
//! Every operation takes a [`ClientId`] first. Backends resolve it to that
//! client's database, so there is no way to read or write rows without
//! naming the client they belong to.

use async_trait::async_trait;

use crate::error::StorageResult;
use crate::filter::AppointmentFilter;
use crate::tenant::ClientId;
use crate::types::{AppointmentRecord, Department, Window};

/// Read access to appointments with their references populated.
///
/// Implementations must apply every clause of the filter, including the
/// soft-delete exclusion, and return records in insertion order.
///
/// # Example
///
/// ```ignore
/// use clinic_persistence::core::AppointmentStorage;
/// use clinic_persistence::filter::AppointmentFilter;
/// use clinic_persistence::tenant::ClientId;
/// use clinic_persistence::types::Window;
///
/// async fn second_page<S: AppointmentStorage>(storage: &S) -> StorageResult<()> {
///     let client = ClientId::new("c1");
///     let filter = AppointmentFilter::new().search("checkup");
///     let page = storage
///         .find_appointments(&client, &filter, Some(Window { skip: 10, limit: 10 }))
///         .await?;
///     let total = storage.count_appointments(&client, &filter).await?;
///     println!("{} of {}", page.len(), total);
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait AppointmentStorage: Send + Sync {
    /// Returns a human-readable name for this storage backend.
    fn backend_name(&self) -> &'static str;

    /// Returns the first appointment matching `filter`, if any.
    async fn find_appointment(
        &self,
        client: &ClientId,
        filter: &AppointmentFilter,
    ) -> StorageResult<Option<AppointmentRecord>>;

    /// Returns the appointments matching `filter`.
    ///
    /// With `window` set, only that slice of the ordered result is returned.
    async fn find_appointments(
        &self,
        client: &ClientId,
        filter: &AppointmentFilter,
        window: Option<Window>,
    ) -> StorageResult<Vec<AppointmentRecord>>;

    /// Counts the appointments matching `filter`, ignoring any window.
    async fn count_appointments(
        &self,
        client: &ClientId,
        filter: &AppointmentFilter,
    ) -> StorageResult<u64>;
}

/// Read/write access to departments.
#[async_trait]
pub trait DepartmentStorage: Send + Sync {
    /// Looks up a department by id.
    async fn find_department(
        &self,
        client: &ClientId,
        dept_id: &str,
    ) -> StorageResult<Option<Department>>;

    /// Inserts a new department.
    ///
    /// # Errors
    ///
    /// * `StorageError::Resource(AlreadyExists)` - if the id is taken
    async fn insert_department(&self, client: &ClientId, department: &Department)
    -> StorageResult<()>;

    /// Overwrites an existing department.
    ///
    /// # Errors
    ///
    /// * `StorageError::Resource(NotFound)` - if the id is unknown
    async fn update_department(&self, client: &ClientId, department: &Department)
    -> StorageResult<()>;
}
