//! The `{ status, message, data }` envelope returned by every service.

use serde::{Deserialize, Serialize};

/// Why a service call failed.
///
/// Not serialized; the HTTP layer reads it to choose a status code while the
/// body stays the plain envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The requested record does not exist.
    NotFound,
    /// The request was missing required input or carried malformed values.
    InvalidRequest,
    /// The data layer failed.
    Internal,
}

/// The response envelope shared by all service operations.
///
/// ```
/// use clinic_persistence::types::{FailureKind, ServiceResponse};
///
/// let ok = ServiceResponse::success("done", 42u32);
/// assert!(ok.status);
/// assert_eq!(ok.data, Some(42));
///
/// let err: ServiceResponse<u32> = ServiceResponse::failure(FailureKind::NotFound, "missing");
/// assert!(!err.status);
/// assert_eq!(err.failure, Some(FailureKind::NotFound));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceResponse<T> {
    /// `true` on success.
    pub status: bool,
    /// Human-readable outcome.
    pub message: String,
    /// Payload, omitted on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Failure category, set only when `status` is `false`.
    #[serde(skip)]
    pub failure: Option<FailureKind>,
}

impl<T> ServiceResponse<T> {
    /// Builds a successful response carrying `data`.
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: true,
            message: message.into(),
            data: Some(data),
            failure: None,
        }
    }

    /// Builds a failed response with no payload.
    pub fn failure(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            status: false,
            message: message.into(),
            data: None,
            failure: Some(kind),
        }
    }

    /// Returns `true` if the call succeeded.
    pub fn is_success(&self) -> bool {
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_omits_data() {
        let resp: ServiceResponse<Vec<u8>> =
            ServiceResponse::failure(FailureKind::Internal, "boom");
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json, serde_json::json!({"status": false, "message": "boom"}));
    }

    #[test]
    fn test_success_serializes_data() {
        let resp = ServiceResponse::success("ok", vec![1, 2]);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["status"], true);
        assert_eq!(json["data"], serde_json::json!([1, 2]));
        assert!(json.get("failure").is_none());
    }
}
