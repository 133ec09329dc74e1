//! Client identifier type.
//!
//! This module defines the [`ClientId`] type, the opaque identifier that
//! selects a client organization's isolated database.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// An opaque client (tenant) identifier.
///
/// Every appointment query carries a `ClientId`. The backend maps it to a
/// dedicated database, so two clients never share rows. Construction is
/// infallible; whether an id is usable as a database name is decided by the
/// backend that resolves it.
///
/// # Examples
///
/// ```
/// use clinic_persistence::tenant::ClientId;
///
/// let client = ClientId::new("6735e64c5c58f271b1ce1678");
/// assert_eq!(client.as_str(), "6735e64c5c58f271b1ce1678");
/// assert!(!client.is_blank());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(String);

impl ClientId {
    /// Creates a new client ID from the given string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the client ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the id is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClientId({})", self.0)
    }
}

impl FromStr for ClientId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ClientId::new(s))
    }
}

impl From<&str> for ClientId {
    fn from(s: &str) -> Self {
        ClientId::new(s)
    }
}

impl From<String> for ClientId {
    fn from(s: String) -> Self {
        ClientId::new(s)
    }
}

impl AsRef<str> for ClientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_id_creation() {
        let client = ClientId::new("clinic-a");
        assert_eq!(client.as_str(), "clinic-a");
        assert_eq!(client.to_string(), "clinic-a");
        assert_eq!(format!("{:?}", client), "ClientId(clinic-a)");
    }

    #[test]
    fn test_blank() {
        assert!(ClientId::new("").is_blank());
        assert!(ClientId::new("   ").is_blank());
        assert!(!ClientId::new("c1").is_blank());
    }

    #[test]
    fn test_case_and_separators_are_significant() {
        assert_ne!(ClientId::new("Acme-01"), ClientId::new("acme_01"));
        assert_ne!(ClientId::new("Acme-01"), ClientId::new("ACME-01"));
    }

    #[test]
    fn test_conversions() {
        let from_str: ClientId = "c1".into();
        let from_string: ClientId = String::from("c1").into();
        let parsed: ClientId = "c1".parse().unwrap();
        assert_eq!(from_str, from_string);
        assert_eq!(from_str, parsed);
    }

    #[test]
    fn test_serde_transparent() {
        let client = ClientId::new("c1");
        assert_eq!(serde_json::to_string(&client).unwrap(), "\"c1\"");
        let back: ClientId = serde_json::from_str("\"c1\"").unwrap();
        assert_eq!(back, client);
    }
}
