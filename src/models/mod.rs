pub mod attendance;
pub mod status;
pub mod student;

pub use attendance::{AttendanceEvent, NewAttendance, SCAN_TIME_FORMAT};
pub use status::AttendanceStatus;
pub use student::{StudentIdentity, StudentRecord};
