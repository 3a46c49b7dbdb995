use crate::db::log::ttlog_or_warn;
use crate::db::pool::DbPool;
use crate::db::queries::{insert_attendance, load_attendance};
use crate::errors::{AppResult, StoreError};
use crate::models::{AttendanceEvent, NewAttendance};
use chrono::{Local, NaiveDateTime, SubsecRound};

pub struct LedgerLogic;

impl LedgerLogic {
    /// Stamp the entry with the local wall clock (whole seconds) and store it.
    /// Repeated entries for the same student are kept as separate rows.
    pub fn append(pool: &DbPool, ev: &NewAttendance) -> Result<AttendanceEvent, StoreError> {
        let now = Local::now().naive_local().trunc_subsecs(0);
        Self::append_at(pool, ev, now)
    }

    pub fn append_at(
        pool: &DbPool,
        ev: &NewAttendance,
        scan_time: NaiveDateTime,
    ) -> Result<AttendanceEvent, StoreError> {
        let scan_time = scan_time.trunc_subsecs(0);
        let id = insert_attendance(&pool.conn, ev, &scan_time).map_err(StoreError::WriteFailed)?;

        ttlog_or_warn(
            &pool.conn,
            "attendance",
            &ev.student_id,
            &format!("{} marked {}", ev.name, ev.status.as_str()),
        );

        Ok(AttendanceEvent {
            id,
            student_id: ev.student_id.clone(),
            name: ev.name.clone(),
            mobile: ev.mobile.clone(),
            status: ev.status,
            scan_time,
        })
    }

    /// Every entry, newest first.
    pub fn list_all(pool: &DbPool) -> AppResult<Vec<AttendanceEvent>> {
        Ok(load_attendance(&pool.conn)?)
    }
}
