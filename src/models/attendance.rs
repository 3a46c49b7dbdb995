use super::status::AttendanceStatus;
use super::student::StudentIdentity;
use chrono::NaiveDateTime;
use serde::Serialize;

/// Text format of `attendance.scan_time`. Sortable as a plain string.
pub const SCAN_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A ledger row before the store assigned `id` and `scan_time`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAttendance {
    pub student_id: String,
    pub name: String,
    pub mobile: String,
    pub status: AttendanceStatus,
}

impl NewAttendance {
    /// Present entry built from the identity embedded in a scanned payload.
    pub fn present(identity: &StudentIdentity) -> Self {
        Self {
            student_id: identity.student_id.clone(),
            name: identity.name.clone(),
            mobile: identity.mobile.clone(),
            status: AttendanceStatus::Present,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AttendanceEvent {
    pub id: i64,                   // ⇔ attendance.id (AUTOINCREMENT)
    pub student_id: String,        // ⇔ attendance.student_id (copy, not a FK)
    pub name: String,              // ⇔ attendance.name
    pub mobile: String,            // ⇔ attendance.mobile
    pub status: AttendanceStatus,  // ⇔ attendance.status ('Present')
    pub scan_time: NaiveDateTime,  // ⇔ attendance.scan_time (TEXT "YYYY-MM-DD HH:MM:SS")
}

impl AttendanceEvent {
    pub fn scan_time_str(&self) -> String {
        self.scan_time.format(SCAN_TIME_FORMAT).to_string()
    }
}
