use crate::models::AttendanceEvent;
use serde::Serialize;

/// Flat ledger row used by every export format.
#[derive(Serialize, Clone, Debug)]
pub struct AttendanceExport {
    pub id: i64,
    pub student_id: String,
    pub name: String,
    pub mobile: String,
    pub status: String,
    pub scan_time: String,
}

impl From<&AttendanceEvent> for AttendanceExport {
    fn from(ev: &AttendanceEvent) -> Self {
        Self {
            id: ev.id,
            student_id: ev.student_id.clone(),
            name: ev.name.clone(),
            mobile: ev.mobile.clone(),
            status: ev.status.as_str().to_string(),
            scan_time: ev.scan_time_str(),
        }
    }
}

/// Column headers, in field order.
pub(crate) fn get_headers() -> Vec<&'static str> {
    vec!["id", "student_id", "name", "mobile", "status", "scan_time"]
}
