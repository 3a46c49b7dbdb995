use chrono::NaiveDateTime;

/// Excel serial of 1970-01-01 00:00:00.
const UNIX_EPOCH_SERIAL: f64 = 25569.0;
const SECONDS_PER_DAY: f64 = 86400.0;

pub(crate) const SCAN_TIME_NUM_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// Convert a naive local timestamp into an Excel date serial.
pub(crate) fn to_excel_serial(dt: &NaiveDateTime) -> f64 {
    UNIX_EPOCH_SERIAL + dt.and_utc().timestamp() as f64 / SECONDS_PER_DAY
}
