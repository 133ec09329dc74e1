//! SQL query builder for appointment filters.
//!
//! Translates an [`AppointmentFilter`] into a `SELECT` over the
//! `appointments` table with every populated reference joined in. All
//! placeholders are anonymous `?`, so fragments can be combined in any
//! order as long as their parameters are concatenated in the same order.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::ToSql;
use rusqlite::types::ToSqlOutput;

use crate::filter::{AppointmentField, AppointmentFilter, FilterClause};
use crate::populate::APPOINTMENT_POPULATE;
use crate::types::{Collection, Window};

use super::functions::UNICODE_LOWER;

/// Alias of the appointments table in generated queries.
const APPOINTMENT_ALIAS: &str = "a";

/// A fragment of SQL with bound parameters.
#[derive(Debug, Clone)]
pub struct SqlFragment {
    /// The SQL clause.
    pub sql: String,
    /// Bound parameter values.
    pub params: Vec<SqlParam>,
}

/// A bound SQL parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    /// String parameter.
    String(String),
    /// Integer parameter.
    Integer(i64),
}

impl SqlParam {
    /// Creates a string parameter.
    pub fn string(s: impl Into<String>) -> Self {
        SqlParam::String(s.into())
    }

    /// Creates an integer parameter, saturating at `i64::MAX`.
    pub fn count(n: u64) -> Self {
        SqlParam::Integer(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl ToSql for SqlParam {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            SqlParam::String(s) => s.to_sql(),
            SqlParam::Integer(i) => i.to_sql(),
        }
    }
}

impl SqlFragment {
    /// Creates a new SQL fragment.
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Creates a fragment with parameters.
    pub fn with_params(sql: impl Into<String>, params: Vec<SqlParam>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// Combines with another fragment using AND.
    pub fn and(mut self, other: SqlFragment) -> Self {
        if !self.sql.is_empty() && !other.sql.is_empty() {
            self.sql = format!("({}) AND ({})", self.sql, other.sql);
        } else if !other.sql.is_empty() {
            self.sql = other.sql;
        }
        self.params.extend(other.params);
        self
    }

    /// Combines with another fragment using OR.
    pub fn or(mut self, other: SqlFragment) -> Self {
        if !self.sql.is_empty() && !other.sql.is_empty() {
            self.sql = format!("({}) OR ({})", self.sql, other.sql);
        } else if !other.sql.is_empty() {
            self.sql = other.sql;
        }
        self.params.extend(other.params);
        self
    }

    /// Returns true if this fragment is empty.
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }
}

/// Formats a timestamp the way it is stored.
///
/// Fixed-width UTC with millisecond precision, so text comparison orders
/// the same as time.
pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Escapes `\`, `%` and `_` for use in a `LIKE ... ESCAPE '\'` pattern.
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn column(field: AppointmentField) -> String {
    format!("{}.{}", APPOINTMENT_ALIAS, field.column())
}

/// Renders one filter clause.
pub fn clause_fragment(clause: &FilterClause) -> SqlFragment {
    match clause {
        FilterClause::NotDeleted => SqlFragment::new(format!("{}.deleted_at IS NULL", APPOINTMENT_ALIAS)),
        FilterClause::TextSearch { terms } => terms
            .iter()
            .flat_map(|term| {
                AppointmentField::SEARCHABLE.iter().map(move |field| {
                    SqlFragment::with_params(
                        format!(
                            "{lower}({}) LIKE '%' || {lower}(?) || '%' ESCAPE '\\'",
                            column(*field),
                            lower = UNICODE_LOWER
                        ),
                        vec![SqlParam::string(escape_like(term))],
                    )
                })
            })
            .fold(SqlFragment::new(""), SqlFragment::or),
        FilterClause::Equals { field, value } => SqlFragment::with_params(
            format!("{} = ?", column(*field)),
            vec![SqlParam::string(value.clone())],
        ),
        FilterClause::CreatedRange { from, to } => {
            let mut frag = SqlFragment::new("");
            if let Some(from) = from {
                frag = frag.and(SqlFragment::with_params(
                    format!("{} >= ?", column(AppointmentField::CreatedAt)),
                    vec![SqlParam::string(format_timestamp(from))],
                ));
            }
            if let Some(to) = to {
                frag = frag.and(SqlFragment::with_params(
                    format!("{} <= ?", column(AppointmentField::CreatedAt)),
                    vec![SqlParam::string(format_timestamp(to))],
                ));
            }
            frag
        }
    }
}

/// Renders the full `WHERE` condition for a filter.
pub fn where_fragment(filter: &AppointmentFilter) -> SqlFragment {
    filter
        .clauses()
        .iter()
        .map(clause_fragment)
        .fold(SqlFragment::new(""), SqlFragment::and)
}

fn populate_sql() -> (String, String) {
    let mut columns = Vec::new();
    let mut joins = Vec::new();

    for populate in &APPOINTMENT_POPULATE {
        let alias = populate.alias();
        columns.push(format!("{}.id AS {}", alias, populate.projected("id")));
        for target_column in populate.select {
            columns.push(format!(
                "{}.{} AS {}",
                alias,
                target_column,
                populate.projected(target_column)
            ));
        }
        joins.push(format!(
            "LEFT JOIN {} AS {} ON {}.id = {}.{}",
            populate.target.table(),
            alias,
            alias,
            APPOINTMENT_ALIAS,
            populate.column
        ));
    }

    (columns.join(", "), joins.join(" "))
}

/// Builds the populated `SELECT` for a filter, in insertion order.
pub fn select_appointments(filter: &AppointmentFilter, window: Option<Window>) -> SqlFragment {
    let (columns, joins) = populate_sql();
    let condition = where_fragment(filter);

    let mut sql = format!(
        "SELECT {a}.*, {columns} FROM {table} AS {a} {joins} WHERE {where_sql} ORDER BY {a}.rowid",
        a = APPOINTMENT_ALIAS,
        table = Collection::Appointment.table(),
        where_sql = condition.sql,
    );
    let mut params = condition.params;

    if let Some(window) = window {
        sql.push_str(" LIMIT ? OFFSET ?");
        params.push(SqlParam::count(window.limit));
        params.push(SqlParam::count(window.skip));
    }

    SqlFragment::with_params(sql, params)
}

/// Builds the `COUNT(*)` for a filter.
pub fn count_appointments(filter: &AppointmentFilter) -> SqlFragment {
    let condition = where_fragment(filter);
    SqlFragment::with_params(
        format!(
            "SELECT COUNT(*) FROM {} AS {} WHERE {}",
            Collection::Appointment.table(),
            APPOINTMENT_ALIAS,
            condition.sql
        ),
        condition.params,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("50%"), "50\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("c:\\x"), "c:\\\\x");
        assert_eq!(escape_like("(a+b)*"), "(a+b)*");
    }

    #[test]
    fn test_not_deleted_only() {
        let frag = where_fragment(&AppointmentFilter::new());
        assert_eq!(frag.sql, "a.deleted_at IS NULL");
        assert!(frag.params.is_empty());
    }

    #[test]
    fn test_text_search_ors_terms_and_fields() {
        let frag = clause_fragment(&FilterClause::TextSearch {
            terms: vec!["root".into(), "10%".into()],
        });
        assert_eq!(frag.params.len(), 6);
        assert_eq!(frag.sql.matches(" OR ").count(), 5);
        assert!(frag.sql.contains("unicode_lower(a.chief_complaint) LIKE"));
        assert_eq!(frag.params[0], SqlParam::string("root"));
        assert_eq!(frag.params[3], SqlParam::string("10\\%"));
    }

    #[test]
    fn test_created_range() {
        let from = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let frag = clause_fragment(&FilterClause::CreatedRange {
            from: Some(from),
            to: None,
        });
        assert_eq!(frag.sql, "a.created_at >= ?");
        assert_eq!(
            frag.params,
            vec![SqlParam::string("2024-01-01T00:00:00.000Z")]
        );
    }

    #[test]
    fn test_select_joins_every_reference() {
        let frag = select_appointments(&AppointmentFilter::new(), None);
        assert_eq!(frag.sql.matches("LEFT JOIN").count(), APPOINTMENT_POPULATE.len());
        assert!(frag.sql.contains("LEFT JOIN business_units AS p_bu_id ON p_bu_id.id = a.bu_id"));
        assert!(frag.sql.contains("p_chair_id.chair_number AS chair_id__chair_number"));
        assert!(frag.sql.ends_with("ORDER BY a.rowid"));
    }

    #[test]
    fn test_select_with_window() {
        let filter = AppointmentFilter::new().equals(AppointmentField::BuId, "b1");
        let frag = select_appointments(&filter, Some(Window { skip: 5, limit: 5 }));
        assert!(frag.sql.ends_with("LIMIT ? OFFSET ?"));
        assert_eq!(
            frag.params,
            vec![
                SqlParam::string("b1"),
                SqlParam::Integer(5),
                SqlParam::Integer(5)
            ]
        );
    }

    #[test]
    fn test_count_has_no_joins() {
        let frag = count_appointments(&AppointmentFilter::new().search("x"));
        assert!(frag.sql.starts_with("SELECT COUNT(*) FROM appointments AS a WHERE"));
        assert!(!frag.sql.contains("JOIN"));
        assert_eq!(frag.params.len(), 3);
    }
}
