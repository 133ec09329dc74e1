//! Reference population for appointments.
//!
//! Every read path expands the same set of references. Each entry names the
//! appointment column holding the id, the collection it points at and the
//! target columns projected alongside `id`.

use crate::types::Collection;

/// One populated reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopulatePath {
    /// Wire name of the reference field.
    pub path: &'static str,
    /// Appointment column holding the referenced id.
    pub column: &'static str,
    /// Referenced collection.
    pub target: Collection,
    /// Projected target columns, excluding `id`.
    pub select: &'static [&'static str],
}

const NAME: &[&str] = &["name"];
const PERSON: &[&str] = &["first_name", "last_name"];
const DISPLAY: &[&str] = &["display_id"];
const CHAIR: &[&str] = &["chair_number"];

/// The references expanded on every appointment read.
///
/// `dentalAssistant` is filterable but deliberately absent here; it stays a
/// raw id.
pub const APPOINTMENT_POPULATE: [PopulatePath; 11] = [
    PopulatePath {
        path: "buId",
        column: "bu_id",
        target: Collection::BusinessUnit,
        select: NAME,
    },
    PopulatePath {
        path: "branchId",
        column: "branch_id",
        target: Collection::Branch,
        select: NAME,
    },
    PopulatePath {
        path: "dutyDoctorId",
        column: "duty_doctor_id",
        target: Collection::ClientUser,
        select: PERSON,
    },
    PopulatePath {
        path: "specialistDoctorId",
        column: "specialist_doctor_id",
        target: Collection::ClientUser,
        select: PERSON,
    },
    PopulatePath {
        path: "patientId",
        column: "patient_id",
        target: Collection::Patient,
        select: PERSON,
    },
    PopulatePath {
        path: "caseSheetId",
        column: "case_sheet_id",
        target: Collection::CaseSheet,
        select: DISPLAY,
    },
    PopulatePath {
        path: "chairId",
        column: "chair_id",
        target: Collection::Chair,
        select: CHAIR,
    },
    PopulatePath {
        path: "caseId",
        column: "case_id",
        target: Collection::Case,
        select: DISPLAY,
    },
    PopulatePath {
        path: "createdBy",
        column: "created_by",
        target: Collection::ClientUser,
        select: PERSON,
    },
    PopulatePath {
        path: "updatedBy",
        column: "updated_by",
        target: Collection::ClientUser,
        select: PERSON,
    },
    PopulatePath {
        path: "deletedBy",
        column: "deleted_by",
        target: Collection::ClientUser,
        select: PERSON,
    },
];

impl PopulatePath {
    /// Returns the alias under which the target table is joined.
    pub fn alias(&self) -> String {
        format!("p_{}", self.column)
    }

    /// Returns the result-column name for a projected target column.
    pub fn projected(&self, target_column: &str) -> String {
        format!("{}__{}", self.column, target_column)
    }
}
