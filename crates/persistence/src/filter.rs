//! Appointment filter construction.
//!
//! An [`AppointmentFilter`] is an ordered list of [`FilterClause`]s that a
//! backend combines with AND. The list always starts with
//! [`FilterClause::NotDeleted`]; the constructor seeds it and the list is
//! never exposed mutably, so no caller can build a filter that returns
//! soft-deleted appointments.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::error::{StorageResult, ValidationError};
use crate::types::{AppointmentQuery, present};

/// Appointment fields that filters may refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppointmentField {
    Id,
    DisplayId,
    Status,
    ChiefComplaint,
    BuId,
    BranchId,
    DutyDoctorId,
    SpecialistDoctorId,
    DentalAssistant,
    PatientId,
    CaseSheetId,
    CaseId,
    CreatedBy,
    UpdatedBy,
    CreatedAt,
}

impl AppointmentField {
    /// Fields matched by free-text search.
    pub const SEARCHABLE: [AppointmentField; 3] = [
        AppointmentField::DisplayId,
        AppointmentField::Status,
        AppointmentField::ChiefComplaint,
    ];

    /// Returns the storage column name.
    pub fn column(&self) -> &'static str {
        match self {
            AppointmentField::Id => "id",
            AppointmentField::DisplayId => "display_id",
            AppointmentField::Status => "status",
            AppointmentField::ChiefComplaint => "chief_complaint",
            AppointmentField::BuId => "bu_id",
            AppointmentField::BranchId => "branch_id",
            AppointmentField::DutyDoctorId => "duty_doctor_id",
            AppointmentField::SpecialistDoctorId => "specialist_doctor_id",
            AppointmentField::DentalAssistant => "dental_assistant",
            AppointmentField::PatientId => "patient_id",
            AppointmentField::CaseSheetId => "case_sheet_id",
            AppointmentField::CaseId => "case_id",
            AppointmentField::CreatedBy => "created_by",
            AppointmentField::UpdatedBy => "updated_by",
            AppointmentField::CreatedAt => "created_at",
        }
    }
}

/// One condition of an appointment filter.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterClause {
    /// Excludes soft-deleted records.
    NotDeleted,
    /// Matches when any term occurs, case-insensitively and literally, in
    /// any [`AppointmentField::SEARCHABLE`] field.
    TextSearch { terms: Vec<String> },
    /// Exact equality on a field.
    Equals {
        field: AppointmentField,
        value: String,
    },
    /// Inclusive bounds on `createdAt`.
    CreatedRange {
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    },
}

/// An AND-composed set of clauses over appointments.
///
/// ```
/// use clinic_persistence::filter::{AppointmentField, AppointmentFilter, FilterClause};
///
/// let filter = AppointmentFilter::new()
///     .search("  root   canal ")
///     .equals(AppointmentField::BuId, "b1");
///
/// assert_eq!(filter.clauses()[0], FilterClause::NotDeleted);
/// assert_eq!(filter.clauses().len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentFilter {
    clauses: Vec<FilterClause>,
}

impl Default for AppointmentFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl AppointmentFilter {
    /// Creates a filter matching every non-deleted appointment.
    pub fn new() -> Self {
        Self {
            clauses: vec![FilterClause::NotDeleted],
        }
    }

    /// Creates a filter matching one non-deleted appointment by id.
    pub fn by_id(id: impl Into<String>) -> Self {
        Self::new().equals(AppointmentField::Id, id)
    }

    /// Builds the listing filter for a query.
    ///
    /// `appointmentId` and the pagination fields are not part of the filter.
    /// Fails if `fromDate` or `toDate` is present but not a date.
    pub fn from_query(query: &AppointmentQuery) -> StorageResult<Self> {
        let mut filter = Self::new();

        if let Some(key) = present(&query.search_key) {
            filter = filter.search(key);
        }

        let exact = [
            (AppointmentField::BuId, &query.bu_id),
            (AppointmentField::BranchId, &query.branch_id),
            (AppointmentField::DutyDoctorId, &query.duty_doctor_id),
            (AppointmentField::SpecialistDoctorId, &query.specialist_doctor_id),
            (AppointmentField::PatientId, &query.patient_id),
            (AppointmentField::DentalAssistant, &query.dental_assistant),
            (AppointmentField::CaseSheetId, &query.case_sheet_id),
            (AppointmentField::CaseId, &query.case_id),
            (AppointmentField::CreatedBy, &query.created_user),
            (AppointmentField::UpdatedBy, &query.updated_user),
        ];
        for (field, value) in exact {
            if let Some(value) = present(value) {
                filter = filter.equals(field, value);
            }
        }

        let from = present(&query.from_date)
            .map(|v| parse_date("fromDate", v))
            .transpose()?;
        let to = present(&query.to_date)
            .map(|v| parse_date("toDate", v))
            .transpose()?;

        Ok(filter.created_between(from, to))
    }

    /// Adds a free-text search clause.
    ///
    /// The key is trimmed and split on whitespace; a blank key adds nothing.
    pub fn search(mut self, key: &str) -> Self {
        let terms: Vec<String> = key.split_whitespace().map(str::to_string).collect();
        if !terms.is_empty() {
            self.clauses.push(FilterClause::TextSearch { terms });
        }
        self
    }

    /// Adds an exact-match clause.
    pub fn equals(mut self, field: AppointmentField, value: impl Into<String>) -> Self {
        self.clauses.push(FilterClause::Equals {
            field,
            value: value.into(),
        });
        self
    }

    /// Adds an inclusive `createdAt` range; no-op when both bounds are absent.
    pub fn created_between(mut self, from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> Self {
        if from.is_some() || to.is_some() {
            self.clauses.push(FilterClause::CreatedRange { from, to });
        }
        self
    }

    /// Returns the clauses in the order they were added.
    pub fn clauses(&self) -> &[FilterClause] {
        &self.clauses
    }
}

/// Parses a date filter value.
///
/// Accepts RFC 3339 timestamps, bare dates (UTC midnight) and
/// `YYYY-MM-DDTHH:MM:SS` without an offset (read as UTC).
pub fn parse_date(field: &str, value: &str) -> Result<DateTime<Utc>, ValidationError> {
    let trimmed = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date.and_time(chrono::NaiveTime::MIN).and_utc());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Ok(naive.and_utc());
        }
    }

    Err(ValidationError::InvalidDate {
        field: field.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_new_filter_excludes_deleted() {
        let filter = AppointmentFilter::new();
        assert_eq!(filter.clauses(), &[FilterClause::NotDeleted]);
    }

    #[test]
    fn test_by_id() {
        let filter = AppointmentFilter::by_id("a1");
        assert_eq!(filter.clauses()[0], FilterClause::NotDeleted);
        assert_eq!(
            filter.clauses()[1],
            FilterClause::Equals {
                field: AppointmentField::Id,
                value: "a1".to_string()
            }
        );
    }

    #[test]
    fn test_search_splits_terms() {
        let filter = AppointmentFilter::new().search("  tooth\tache  pain ");
        assert_eq!(
            filter.clauses()[1],
            FilterClause::TextSearch {
                terms: vec!["tooth".into(), "ache".into(), "pain".into()]
            }
        );
    }

    #[test]
    fn test_blank_search_adds_nothing() {
        let filter = AppointmentFilter::new().search("   ");
        assert_eq!(filter.clauses().len(), 1);
    }

    #[test]
    fn test_from_query_maps_audit_filters() {
        let mut query = AppointmentQuery::for_client("c1");
        query.created_user = Some("u1".into());
        query.updated_user = Some("u2".into());
        query.branch_id = Some(String::new());

        let filter = AppointmentFilter::from_query(&query).unwrap();
        assert_eq!(
            &filter.clauses()[1..],
            &[
                FilterClause::Equals {
                    field: AppointmentField::CreatedBy,
                    value: "u1".into()
                },
                FilterClause::Equals {
                    field: AppointmentField::UpdatedBy,
                    value: "u2".into()
                },
            ]
        );
    }

    #[test]
    fn test_from_query_ignores_appointment_id() {
        let mut query = AppointmentQuery::for_client("c1");
        query.appointment_id = Some("a1".into());
        let filter = AppointmentFilter::from_query(&query).unwrap();
        assert_eq!(filter.clauses().len(), 1);
    }

    #[test]
    fn test_from_query_date_range() {
        let mut query = AppointmentQuery::for_client("c1");
        query.from_date = Some("2024-01-01".into());

        let filter = AppointmentFilter::from_query(&query).unwrap();
        assert_eq!(
            filter.clauses()[1],
            FilterClause::CreatedRange {
                from: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
                to: None
            }
        );
    }

    #[test]
    fn test_from_query_rejects_bad_date() {
        let mut query = AppointmentQuery::for_client("c1");
        query.to_date = Some("yesterday".into());
        let err = AppointmentFilter::from_query(&query).unwrap_err();
        assert_eq!(err.to_string(), "invalid date for toDate: 'yesterday'");
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 5, 10, 30, 0).unwrap();
        assert_eq!(parse_date("d", "2024-03-05T10:30:00Z").unwrap(), expected);
        assert_eq!(parse_date("d", "2024-03-05T16:00:00+05:30").unwrap(), expected);
        assert_eq!(parse_date("d", "2024-03-05T10:30:00").unwrap(), expected);
        assert_eq!(parse_date("d", "2024-03-05 10:30:00").unwrap(), expected);
        assert!(parse_date("d", "2024-13-05").is_err());
    }
}
