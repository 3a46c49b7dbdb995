use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Registry of known students, keyed by the id printed on their badge.
fn create_students_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS students (
            student_id TEXT PRIMARY KEY,
            name       TEXT,
            mobile     TEXT
        );
        "#,
    )?;
    Ok(())
}

/// Append-only attendance ledger. Identity columns are copied at scan time.
fn create_attendance_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS attendance (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            student_id TEXT,
            name       TEXT,
            mobile     TEXT,
            status     TEXT,
            scan_time  TEXT
        );
        "#,
    )?;
    Ok(())
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_migration(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

fn migrate_add_attendance_indexes(conn: &Connection) -> Result<()> {
    let version = "20250301_0001_attendance_indexes";

    if migration_applied(conn, version)? {
        return Ok(());
    }

    conn.execute_batch(
        r#"
        BEGIN;
        CREATE INDEX IF NOT EXISTS idx_attendance_scan_time ON attendance(scan_time);
        CREATE INDEX IF NOT EXISTS idx_attendance_student ON attendance(student_id);
        COMMIT;
        "#,
    )?;

    mark_migration(conn, version, "Added scan_time/student_id indexes to attendance")?;

    success(format!(
        "Migration applied: {} → indexed attendance table",
        version
    ));

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Called from db::init_db(). Databases created by earlier releases already
/// have `students` and `attendance` and only gain the `log` table and indexes.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    if !table_exists(conn, "students")? {
        create_students_table(conn)?;
        success("Created students table.");
    }

    if !table_exists(conn, "attendance")? {
        create_attendance_table(conn)?;
        success("Created attendance table.");
    }

    migrate_add_attendance_indexes(conn)?;

    Ok(())
}
