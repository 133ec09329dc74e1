//! SQLite schema definitions for a client database.

use rusqlite::Connection;

use crate::error::{BackendError, StorageError, StorageResult};
use crate::types::Collection;

/// Current schema version.
pub const SCHEMA_VERSION: i32 = 1;

/// Initialize the database schema.
///
/// Safe to call on every open; tables are only created for a fresh
/// database.
pub fn initialize_schema(conn: &Connection) -> StorageResult<()> {
    let current_version = get_schema_version(conn)?;

    if current_version == 0 {
        create_schema_v1(conn)?;
        set_schema_version(conn, SCHEMA_VERSION)?;
    } else if current_version > SCHEMA_VERSION {
        return Err(StorageError::Backend(BackendError::MigrationError {
            message: format!(
                "database schema version {} is newer than supported version {}",
                current_version, SCHEMA_VERSION
            ),
        }));
    }

    Ok(())
}

fn migration_error(context: &str, e: rusqlite::Error) -> StorageError {
    StorageError::Backend(BackendError::MigrationError {
        message: format!("{}: {}", context, e),
    })
}

/// Get the current schema version.
fn get_schema_version(conn: &Connection) -> StorageResult<i32> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER NOT NULL
        )",
        [],
    )
    .map_err(|e| migration_error("Failed to create schema_version table", e))?;

    let version: Option<i32> = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get(0)
        })
        .ok();

    Ok(version.unwrap_or(0))
}

/// Set the schema version.
fn set_schema_version(conn: &Connection, version: i32) -> StorageResult<()> {
    conn.execute("DELETE FROM schema_version", [])
        .map_err(|e| migration_error("Failed to clear schema_version", e))?;

    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )
    .map_err(|e| migration_error("Failed to set schema_version", e))?;

    Ok(())
}

/// Returns the `CREATE TABLE` statement for a collection.
///
/// Appointment references carry no foreign keys: a reference to a row that
/// no longer exists must still load and populate as absent.
fn table_ddl(collection: Collection) -> &'static str {
    match collection {
        Collection::BusinessUnit => {
            "CREATE TABLE IF NOT EXISTS business_units (
                id TEXT PRIMARY KEY,
                name TEXT,
                is_active INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL
            )"
        }
        Collection::Branch => {
            "CREATE TABLE IF NOT EXISTS branches (
                id TEXT PRIMARY KEY,
                bu_id TEXT,
                name TEXT,
                is_active INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL
            )"
        }
        Collection::ClientUser => {
            "CREATE TABLE IF NOT EXISTS client_users (
                id TEXT PRIMARY KEY,
                first_name TEXT,
                last_name TEXT,
                role TEXT,
                is_active INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL
            )"
        }
        Collection::Patient => {
            "CREATE TABLE IF NOT EXISTS patients (
                id TEXT PRIMARY KEY,
                first_name TEXT,
                last_name TEXT,
                created_at TEXT NOT NULL
            )"
        }
        Collection::CaseSheet => {
            "CREATE TABLE IF NOT EXISTS case_sheets (
                id TEXT PRIMARY KEY,
                display_id TEXT,
                patient_id TEXT,
                created_at TEXT NOT NULL
            )"
        }
        Collection::Case => {
            "CREATE TABLE IF NOT EXISTS cases (
                id TEXT PRIMARY KEY,
                display_id TEXT,
                patient_id TEXT,
                created_at TEXT NOT NULL
            )"
        }
        Collection::Chair => {
            "CREATE TABLE IF NOT EXISTS chairs (
                id TEXT PRIMARY KEY,
                chair_number TEXT,
                branch_id TEXT,
                created_at TEXT NOT NULL
            )"
        }
        Collection::Department => {
            "CREATE TABLE IF NOT EXISTS departments (
                id TEXT PRIMARY KEY,
                branch_id TEXT,
                dept_name TEXT,
                description TEXT,
                is_active INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )"
        }
        Collection::Appointment => {
            "CREATE TABLE IF NOT EXISTS appointments (
                id TEXT PRIMARY KEY,
                display_id TEXT,
                bu_id TEXT,
                branch_id TEXT,
                duty_doctor_id TEXT,
                specialist_doctor_id TEXT,
                dental_assistant TEXT,
                patient_id TEXT,
                case_sheet_id TEXT,
                case_id TEXT,
                chair_id TEXT,
                status TEXT,
                chief_complaint TEXT,
                appointment_date TEXT,
                slot_from TEXT,
                slot_to TEXT,
                is_active INTEGER NOT NULL DEFAULT 1,
                created_by TEXT,
                updated_by TEXT,
                deleted_by TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                deleted_at TEXT
            )"
        }
    }
}

/// Create the version 1 schema.
fn create_schema_v1(conn: &Connection) -> StorageResult<()> {
    for collection in Collection::ALL {
        conn.execute(table_ddl(collection), [])
            .map_err(|e| migration_error(&format!("Failed to create {} table", collection.table()), e))?;
    }

    // Listing filters always include the soft-delete test and usually one
    // of these columns.
    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_appointments_deleted ON appointments(deleted_at);
         CREATE INDEX IF NOT EXISTS idx_appointments_bu ON appointments(bu_id);
         CREATE INDEX IF NOT EXISTS idx_appointments_branch ON appointments(branch_id);
         CREATE INDEX IF NOT EXISTS idx_appointments_patient ON appointments(patient_id);
         CREATE INDEX IF NOT EXISTS idx_appointments_created ON appointments(created_at);",
    )
    .map_err(|e| migration_error("Failed to create appointment indexes", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_names(conn: &Connection) -> Vec<String> {
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .unwrap();
        stmt.query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap()
    }

    #[test]
    fn test_initialize_creates_every_collection() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();

        let tables = table_names(&conn);
        for collection in Collection::ALL {
            assert!(
                tables.iter().any(|t| t == collection.table()),
                "missing {}",
                collection.table()
            );
        }
        assert_eq!(get_schema_version(&conn).unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();
        initialize_schema(&conn).unwrap();
        assert_eq!(get_schema_version(&conn).unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn test_newer_schema_rejected() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();
        set_schema_version(&conn, SCHEMA_VERSION + 1).unwrap();

        let err = initialize_schema(&conn).unwrap_err();
        assert!(err.to_string().contains("newer than supported"));
    }
}
