//! Department records and the edit (upsert) request/response shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::response::FailureKind;

/// A stored department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    /// Department id.
    pub dept_id: String,
    /// Owning branch.
    pub branch_id: Option<String>,
    /// Display name.
    pub dept_name: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
    /// Whether the department is in use.
    pub is_active: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl Department {
    /// Builds a new department from an edit request, defaulting `isActive`
    /// to `true`.
    pub fn from_request(request: &EditDepartmentRequest, now: DateTime<Utc>) -> Self {
        Self {
            dept_id: request.dept_id.clone().unwrap_or_default(),
            branch_id: request.branch_id.clone(),
            dept_name: request.dept_name.clone(),
            description: request.description.clone(),
            is_active: request.is_active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies the supplied fields of `request`.
    ///
    /// Returns `true` if any stored value changed. Fields the request leaves
    /// out are kept as they are.
    pub fn apply(&mut self, request: &EditDepartmentRequest) -> bool {
        let mut changed = false;

        changed |= merge(&mut self.branch_id, &request.branch_id);
        changed |= merge(&mut self.dept_name, &request.dept_name);
        changed |= merge(&mut self.description, &request.description);

        if let Some(active) = request.is_active
            && active != self.is_active
        {
            self.is_active = active;
            changed = true;
        }

        changed
    }
}

fn merge(slot: &mut Option<String>, incoming: &Option<String>) -> bool {
    match incoming {
        Some(value) if slot.as_deref() != Some(value.as_str()) => {
            *slot = Some(value.clone());
            true
        }
        _ => false,
    }
}

/// Body of `PUT /api/client/bu/department/editDepartment`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditDepartmentRequest {
    /// Selects the client database.
    pub client_id: Option<String>,
    /// The department to edit or create.
    pub dept_id: Option<String>,
    /// New owning branch.
    pub branch_id: Option<String>,
    /// New display name.
    pub dept_name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New activity flag.
    pub is_active: Option<bool>,
}

impl EditDepartmentRequest {
    /// Returns the client and department ids when both are non-blank.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let client = self.client_id.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        let dept = self.dept_id.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        Some((client, dept))
    }
}

/// The department fields echoed back on a successful edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentPayload {
    pub client_id: String,
    pub dept_id: String,
    pub branch_id: Option<String>,
    pub dept_name: Option<String>,
    pub description: Option<String>,
    /// Present only when an existing department was modified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl DepartmentPayload {
    /// Echo for a newly created department.
    pub fn created(client_id: &str, department: &Department) -> Self {
        Self {
            client_id: client_id.to_string(),
            dept_id: department.dept_id.clone(),
            branch_id: department.branch_id.clone(),
            dept_name: department.dept_name.clone(),
            description: department.description.clone(),
            is_active: None,
        }
    }

    /// Echo for a modified department.
    pub fn modified(client_id: &str, department: &Department) -> Self {
        Self {
            is_active: Some(department.is_active),
            ..Self::created(client_id, department)
        }
    }
}

/// Response of the department edit operation.
///
/// Unlike the appointment listing, the echoed fields sit at the top level
/// next to `status` and `message`.
#[derive(Debug, Clone, Serialize)]
pub struct DepartmentResponse {
    pub status: bool,
    pub message: String,
    #[serde(flatten)]
    pub payload: Option<DepartmentPayload>,
    #[serde(skip)]
    pub failure: Option<FailureKind>,
}

impl DepartmentResponse {
    /// A successful outcome, optionally echoing the department.
    pub fn success(message: impl Into<String>, payload: Option<DepartmentPayload>) -> Self {
        Self {
            status: true,
            message: message.into(),
            payload,
            failure: None,
        }
    }

    /// A failed outcome.
    pub fn failure(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            status: false,
            message: message.into(),
            payload: None,
            failure: Some(kind),
        }
    }
}
