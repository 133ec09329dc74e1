//! Pagination types for appointment listings.
//!
//! Page parameters arrive either as JSON numbers or as query-string text.
//! [`PageValue`] keeps the raw value so the "was it supplied" decision and
//! the numeric coercion can both follow the request's own representation.

use serde::{Deserialize, Serialize};

use super::appointment::AppointmentView;

/// A raw `page` or `perPage` value as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageValue {
    /// A JSON number.
    Number(serde_json::Number),
    /// Text, typically from a query string.
    Text(String),
}

impl PageValue {
    const MAX_WHOLE: u64 = i64::MAX as u64;

    /// Returns `true` if the value counts as supplied.
    ///
    /// Numeric zero and the empty string count as not supplied.
    pub fn is_present(&self) -> bool {
        match self {
            PageValue::Number(n) => n.as_f64().is_none_or(|v| v != 0.0),
            PageValue::Text(s) => !s.is_empty(),
        }
    }

    /// Coerces the value to a positive whole number.
    ///
    /// Returns `None` for non-numeric text, zero, negatives and fractions.
    /// Whole numbers are accepted up to `i64::MAX`, the largest offset SQLite
    /// can bind.
    pub fn to_positive_integer(&self) -> Option<u64> {
        let (exact, value) = match self {
            PageValue::Number(n) => (n.as_u64(), n.as_f64()?),
            PageValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                (trimmed.parse::<u64>().ok(), trimmed.parse::<f64>().ok()?)
            }
        };

        if let Some(n) = exact {
            return (1..=Self::MAX_WHOLE).contains(&n).then_some(n);
        }

        // 2^63 itself is out of range, hence the strict bound
        if value.is_finite() && value >= 1.0 && value.fract() == 0.0 && value < i64::MAX as f64 {
            Some(value as u64)
        } else {
            None
        }
    }
}

impl From<u64> for PageValue {
    fn from(n: u64) -> Self {
        PageValue::Number(n.into())
    }
}

impl From<i64> for PageValue {
    fn from(n: i64) -> Self {
        PageValue::Number(n.into())
    }
}

impl From<&str> for PageValue {
    fn from(s: &str) -> Self {
        PageValue::Text(s.to_string())
    }
}

impl From<String> for PageValue {
    fn from(s: String) -> Self {
        PageValue::Text(s)
    }
}

/// A normalized page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    page: u64,
    per_page: u64,
}

impl PageRequest {
    /// Page used when the supplied page cannot be coerced.
    pub const DEFAULT_PAGE: u64 = 1;

    /// Page size used when the supplied page size cannot be coerced.
    pub const DEFAULT_PER_PAGE: u64 = 10;

    /// Creates a page request, replacing zero with the defaults.
    pub fn new(page: u64, per_page: u64) -> Self {
        Self {
            page: if page == 0 { Self::DEFAULT_PAGE } else { page },
            per_page: if per_page == 0 {
                Self::DEFAULT_PER_PAGE
            } else {
                per_page
            },
        }
    }

    /// Builds a page request from raw parameters.
    ///
    /// Returns `None` when either parameter is missing, which selects the
    /// unpaginated listing.
    ///
    /// ```
    /// use clinic_persistence::types::{PageRequest, PageValue};
    ///
    /// let page = PageValue::from("abc");
    /// let per_page = PageValue::from(5u64);
    /// let request = PageRequest::from_params(Some(&page), Some(&per_page)).unwrap();
    /// assert_eq!(request.page(), 1);
    /// assert_eq!(request.per_page(), 5);
    ///
    /// assert!(PageRequest::from_params(None, Some(&per_page)).is_none());
    /// ```
    pub fn from_params(page: Option<&PageValue>, per_page: Option<&PageValue>) -> Option<Self> {
        let page = page.filter(|v| v.is_present())?;
        let per_page = per_page.filter(|v| v.is_present())?;

        Some(Self::new(
            page.to_positive_integer().unwrap_or(Self::DEFAULT_PAGE),
            per_page
                .to_positive_integer()
                .unwrap_or(Self::DEFAULT_PER_PAGE),
        ))
    }

    /// Returns the 1-based page number.
    pub fn page(&self) -> u64 {
        self.page
    }

    /// Returns the page size.
    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    /// Returns the number of records skipped before this page.
    pub fn skip(&self) -> u64 {
        (self.page - 1).saturating_mul(self.per_page)
    }

    /// Returns the number of pages needed for `total_count` records.
    pub fn total_pages(&self, total_count: u64) -> u64 {
        total_count.div_ceil(self.per_page)
    }

    /// Builds the metadata block for a page of results.
    pub fn metadata(&self, total_count: u64) -> PageMetadata {
        PageMetadata {
            page: self.page,
            per_page: self.per_page,
            total_count,
            total_pages: self.total_pages(total_count),
        }
    }
}

/// A limit/offset window applied to a listing query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// Records to skip.
    pub skip: u64,
    /// Maximum records to return.
    pub limit: u64,
}

impl From<PageRequest> for Window {
    fn from(request: PageRequest) -> Self {
        Self {
            skip: request.skip(),
            limit: request.per_page(),
        }
    }
}

/// Pagination metadata returned with every listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    /// The 1-based page number.
    pub page: u64,
    /// The page size.
    pub per_page: u64,
    /// Total matching records.
    pub total_count: u64,
    /// Total pages at this page size.
    pub total_pages: u64,
}

impl PageMetadata {
    /// Metadata for a single-record lookup.
    pub fn single() -> Self {
        Self {
            page: 1,
            per_page: 1,
            total_count: 1,
            total_pages: 1,
        }
    }

    /// Metadata for an unpaginated listing of `count` records.
    pub fn unpaginated(count: u64) -> Self {
        Self {
            page: 1,
            per_page: count,
            total_count: count,
            total_pages: 1,
        }
    }
}

/// The `data` payload of an appointment listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentPage {
    /// The formatted appointments.
    pub appointments: Vec<AppointmentView>,
    /// Pagination metadata.
    pub metadata: PageMetadata,
}
