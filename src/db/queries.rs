use crate::models::{
    AttendanceEvent, AttendanceStatus, NewAttendance, SCAN_TIME_FORMAT, StudentRecord,
};
use chrono::NaiveDateTime;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

// ---------------------------
// students
// ---------------------------

pub fn upsert_student(conn: &Connection, s: &StudentRecord) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO students (student_id, name, mobile) VALUES (?1, ?2, ?3)",
        params![s.student_id, s.name, s.mobile],
    )?;
    Ok(())
}

pub fn find_student(conn: &Connection, student_id: &str) -> Result<Option<StudentRecord>> {
    conn.query_row(
        "SELECT student_id, name, mobile FROM students WHERE student_id = ?1",
        [student_id],
        map_student_row,
    )
    .optional()
}

pub fn load_students(conn: &Connection) -> Result<Vec<StudentRecord>> {
    let mut stmt =
        conn.prepare("SELECT student_id, name, mobile FROM students ORDER BY student_id ASC")?;

    let rows = stmt.query_map([], map_student_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

fn map_student_row(row: &Row) -> Result<StudentRecord> {
    Ok(StudentRecord {
        student_id: row.get("student_id")?,
        name: row.get::<_, Option<String>>("name")?.unwrap_or_default(),
        mobile: row.get::<_, Option<String>>("mobile")?.unwrap_or_default(),
    })
}

// ---------------------------
// attendance
// ---------------------------

/// Insert a ledger row and return the id assigned by SQLite.
pub fn insert_attendance(
    conn: &Connection,
    ev: &NewAttendance,
    scan_time: &NaiveDateTime,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO attendance (student_id, name, mobile, status, scan_time)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            ev.student_id,
            ev.name,
            ev.mobile,
            ev.status.to_db_str(),
            scan_time.format(SCAN_TIME_FORMAT).to_string(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Every ledger row, most recent first.
pub fn load_attendance(conn: &Connection) -> Result<Vec<AttendanceEvent>> {
    let mut stmt = conn.prepare(
        "SELECT id, student_id, name, mobile, status, scan_time
         FROM attendance
         ORDER BY scan_time DESC, id DESC",
    )?;

    let rows = stmt.query_map([], map_attendance_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn map_attendance_row(row: &Row) -> Result<AttendanceEvent> {
    let status_str: String = row.get("status")?;
    let status = AttendanceStatus::from_db_str(&status_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            format!("invalid attendance status: {status_str}").into(),
        )
    })?;

    let time_str: String = row.get("scan_time")?;
    let scan_time = NaiveDateTime::parse_from_str(&time_str, SCAN_TIME_FORMAT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(AttendanceEvent {
        id: row.get("id")?,
        student_id: row.get("student_id")?,
        name: row.get::<_, Option<String>>("name")?.unwrap_or_default(),
        mobile: row.get::<_, Option<String>>("mobile")?.unwrap_or_default(),
        status,
        scan_time,
    })
}

// ---------------------------
// counters
// ---------------------------

pub fn count_rows(conn: &Connection, table: &str) -> Result<i64> {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
        row.get(0)
    })
}
