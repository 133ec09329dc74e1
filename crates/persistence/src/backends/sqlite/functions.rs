//! SQL functions registered on every client connection.

use rusqlite::Connection;
use rusqlite::functions::FunctionFlags;

/// Name of the Unicode-aware lower-casing function.
///
/// SQLite's built-in `lower()` and `LIKE` fold ASCII only, so text search
/// compares `unicode_lower(column)` against `unicode_lower(term)`.
pub const UNICODE_LOWER: &str = "unicode_lower";

/// Registers the custom scalar functions on `conn`.
pub(crate) fn register(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        UNICODE_LOWER,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let value: Option<String> = ctx.get(0)?;
            Ok(value.map(|s| s.to_lowercase()))
        },
    )
}
