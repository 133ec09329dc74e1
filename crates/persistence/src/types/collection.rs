//! Named entity collections bound to every client database.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The entity collections that exist in each client database.
///
/// This is the registry the schema initializer walks when a client's
/// database is first opened; queries refer to tables through it rather
/// than by literal name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Collection {
    /// Appointments (the queried entity).
    Appointment,
    /// Business units.
    BusinessUnit,
    /// Branches of a business unit.
    Branch,
    /// Staff accounts (doctors, assistants, administrators).
    ClientUser,
    /// Patients.
    Patient,
    /// Case sheets.
    CaseSheet,
    /// Treatment cases.
    Case,
    /// Dental chairs.
    Chair,
    /// Departments.
    Department,
}

impl Collection {
    /// Every collection, in schema creation order.
    pub const ALL: [Collection; 9] = [
        Collection::BusinessUnit,
        Collection::Branch,
        Collection::ClientUser,
        Collection::Patient,
        Collection::CaseSheet,
        Collection::Case,
        Collection::Chair,
        Collection::Department,
        Collection::Appointment,
    ];

    /// Returns the SQL table backing this collection.
    pub fn table(&self) -> &'static str {
        match self {
            Collection::Appointment => "appointments",
            Collection::BusinessUnit => "business_units",
            Collection::Branch => "branches",
            Collection::ClientUser => "client_users",
            Collection::Patient => "patients",
            Collection::CaseSheet => "case_sheets",
            Collection::Case => "cases",
            Collection::Chair => "chairs",
            Collection::Department => "departments",
        }
    }

    /// Returns the model name used in messages and logs.
    pub fn model_name(&self) -> &'static str {
        match self {
            Collection::Appointment => "Appointment",
            Collection::BusinessUnit => "businessUnit",
            Collection::Branch => "branch",
            Collection::ClientUser => "clientUsers",
            Collection::Patient => "patient",
            Collection::CaseSheet => "caseSheet",
            Collection::Case => "case",
            Collection::Chair => "chair",
            Collection::Department => "department",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.model_name())
    }
}
