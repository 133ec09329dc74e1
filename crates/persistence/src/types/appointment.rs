//! Appointment query input, raw populated records and the API view.

// Record fields mirror their wire names and are self-documenting
#![allow(missing_docs)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::pagination::PageValue;

/// Input for [`get_appointment_with_filter`](crate::services::get_appointment_with_filter).
///
/// Every field except `client_id` is optional. Empty strings are treated as
/// absent, so a query string such as `?buId=&page=1` filters nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppointmentQuery {
    /// Selects the client database.
    pub client_id: String,
    /// 1-based page number.
    pub page: Option<PageValue>,
    /// Page size.
    pub per_page: Option<PageValue>,
    /// Free-text search across display id, status and chief complaint.
    pub search_key: Option<String>,
    /// Fetch a single appointment; overrides every other filter.
    pub appointment_id: Option<String>,
    /// Inclusive lower bound on creation time.
    pub from_date: Option<String>,
    /// Inclusive upper bound on creation time.
    pub to_date: Option<String>,
    pub bu_id: Option<String>,
    pub branch_id: Option<String>,
    pub duty_doctor_id: Option<String>,
    pub specialist_doctor_id: Option<String>,
    pub dental_assistant: Option<String>,
    pub patient_id: Option<String>,
    pub case_sheet_id: Option<String>,
    pub case_id: Option<String>,
    /// Matches the `createdBy` audit field.
    pub created_user: Option<String>,
    /// Matches the `updatedBy` audit field.
    pub updated_user: Option<String>,
}

impl AppointmentQuery {
    /// Creates an empty query for the given client.
    pub fn for_client(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            ..Default::default()
        }
    }

    /// Sets both pagination parameters.
    pub fn with_page(mut self, page: impl Into<PageValue>, per_page: impl Into<PageValue>) -> Self {
        self.page = Some(page.into());
        self.per_page = Some(per_page.into());
        self
    }

    /// Sets the free-text search key.
    pub fn with_search_key(mut self, search_key: impl Into<String>) -> Self {
        self.search_key = Some(search_key.into());
        self
    }

    /// Returns the appointment id if one was supplied.
    pub fn appointment_id(&self) -> Option<&str> {
        present(&self.appointment_id)
    }
}

/// Returns the contents of an optional text field unless it is empty.
pub(crate) fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// A populated reference projected to `_id` and `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    pub id: String,
    pub name: Option<String>,
}

/// A populated staff or patient reference projected to id and names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRef {
    pub id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl PersonRef {
    /// Returns `"first last"`, or `None` when both parts are missing.
    pub fn full_name(&self) -> Option<String> {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

/// A populated case or case-sheet reference projected to `_id` and `displayId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRef {
    pub id: String,
    pub display_id: Option<String>,
}

/// A populated chair reference projected to `_id` and `chairNumber`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChairRef {
    pub id: String,
    pub chair_number: Option<String>,
}

/// A lean appointment record with its references expanded.
///
/// A reference is `None` when the appointment holds no id for it or when
/// the referenced row no longer exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentRecord {
    pub id: String,
    pub display_id: Option<String>,
    pub business_unit: Option<NamedRef>,
    pub branch: Option<NamedRef>,
    pub duty_doctor: Option<PersonRef>,
    pub specialist_doctor: Option<PersonRef>,
    pub dental_assistant: Option<String>,
    pub patient: Option<PersonRef>,
    pub case_sheet: Option<DisplayRef>,
    pub case: Option<DisplayRef>,
    pub chair: Option<ChairRef>,
    pub status: Option<String>,
    pub chief_complaint: Option<String>,
    pub appointment_date: Option<DateTime<Utc>>,
    pub slot_from: Option<String>,
    pub slot_to: Option<String>,
    pub is_active: bool,
    pub created_by: Option<PersonRef>,
    pub updated_by: Option<PersonRef>,
    pub deleted_by: Option<PersonRef>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// The API-facing appointment shape produced by
/// [`format_appointment`](crate::format::format_appointment).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentView {
    pub appointment_id: String,
    pub display_id: Option<String>,
    pub bu_id: Option<String>,
    pub bu_name: Option<String>,
    pub branch_id: Option<String>,
    pub branch_name: Option<String>,
    pub duty_doctor_id: Option<String>,
    pub duty_doctor_name: Option<String>,
    pub specialist_doctor_id: Option<String>,
    pub specialist_doctor_name: Option<String>,
    pub dental_assistant: Option<String>,
    pub patient_id: Option<String>,
    pub patient_name: Option<String>,
    pub case_sheet_id: Option<String>,
    pub case_sheet_display_id: Option<String>,
    pub case_id: Option<String>,
    pub case_display_id: Option<String>,
    pub chair_id: Option<String>,
    pub chair_number: Option<String>,
    pub status: Option<String>,
    pub chief_complaint: Option<String>,
    pub appointment_date: Option<String>,
    pub slot_from: Option<String>,
    pub slot_to: Option<String>,
    pub is_active: bool,
    pub created_by: Option<String>,
    pub created_by_name: Option<String>,
    pub updated_by: Option<String>,
    pub updated_by_name: Option<String>,
    pub deleted_by: Option<String>,
    pub deleted_by_name: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub deleted_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_deserialize_camel_case() {
        let query: AppointmentQuery = serde_json::from_value(serde_json::json!({
            "clientId": "c1",
            "buId": "b1",
            "page": 2,
            "perPage": "5",
            "searchKey": "root canal",
            "createdUser": "u1"
        }))
        .unwrap();

        assert_eq!(query.client_id, "c1");
        assert_eq!(query.bu_id.as_deref(), Some("b1"));
        assert_eq!(query.page, Some(PageValue::from(2u64)));
        assert_eq!(query.per_page, Some(PageValue::from("5")));
        assert_eq!(query.created_user.as_deref(), Some("u1"));
        assert!(query.appointment_id.is_none());
    }

    #[test]
    fn test_query_missing_client_defaults_to_empty() {
        let query: AppointmentQuery = serde_json::from_str("{}").unwrap();
        assert!(query.client_id.is_empty());
    }

    #[test]
    fn test_empty_appointment_id_is_absent() {
        let mut query = AppointmentQuery::for_client("c1");
        query.appointment_id = Some(String::new());
        assert_eq!(query.appointment_id(), None);

        query.appointment_id = Some("a1".to_string());
        assert_eq!(query.appointment_id(), Some("a1"));
    }

    #[test]
    fn test_full_name() {
        let person = PersonRef {
            id: "u1".to_string(),
            first_name: Some("Asha".to_string()),
            last_name: Some("Rao".to_string()),
        };
        assert_eq!(person.full_name().as_deref(), Some("Asha Rao"));

        let first_only = PersonRef {
            last_name: None,
            ..person.clone()
        };
        assert_eq!(first_only.full_name().as_deref(), Some("Asha"));

        let nameless = PersonRef {
            id: "u2".to_string(),
            first_name: None,
            last_name: Some("  ".to_string()),
        };
        assert_eq!(nameless.full_name(), None);
    }
}
