//! Core types for the clinic persistence layer.
//!
//! - [`AppointmentQuery`] - raw filter input for the appointment listing
//! - [`AppointmentRecord`], [`AppointmentView`] - populated record and its API shape
//! - [`PageRequest`], [`PageMetadata`] - pagination
//! - [`ServiceResponse`] - the `{ status, message, data }` envelope
//! - [`EditDepartmentRequest`], [`DepartmentResponse`] - department upsert
//!
//! # Examples
//!
//! ```
//! use clinic_persistence::types::{AppointmentQuery, PageRequest};
//!
//! let query = AppointmentQuery::for_client("c1").with_page(2u64, 5u64);
//! let page = PageRequest::from_params(query.page.as_ref(), query.per_page.as_ref()).unwrap();
//! assert_eq!(page.skip(), 5);
//! ```

mod appointment;
mod collection;
mod department;
mod pagination;
mod response;

pub(crate) use appointment::present;
pub use appointment::{
    AppointmentQuery, AppointmentRecord, AppointmentView, ChairRef, DisplayRef, NamedRef,
    PersonRef,
};
pub use collection::Collection;
pub use department::{Department, DepartmentPayload, DepartmentResponse, EditDepartmentRequest};
pub use pagination::{AppointmentPage, PageMetadata, PageRequest, PageValue, Window};
pub use response::{FailureKind, ServiceResponse};
