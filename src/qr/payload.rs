//! QR payload codec: `student_id|name|mobile`, no escaping.

use crate::errors::DecodeError;
use crate::models::{StudentIdentity, StudentRecord};

pub const SEPARATOR: char = '|';

/// Build the payload for a student. Fields are joined as-is; a field that
/// already contains [`SEPARATOR`] produces a payload that will not decode.
pub fn encode(student: &StudentRecord) -> String {
    format!(
        "{}{SEPARATOR}{}{SEPARATOR}{}",
        student.student_id, student.name, student.mobile
    )
}

/// Parse a payload. Exactly three fields are accepted, anything else is
/// rejected rather than truncated or padded.
pub fn decode(payload: &str) -> Result<StudentIdentity, DecodeError> {
    let parts: Vec<&str> = payload.split(SEPARATOR).collect();

    match parts.as_slice() {
        [id, name, mobile] => Ok(StudentRecord::new(*id, *name, *mobile)),
        _ => Err(DecodeError::MalformedPayload {
            fields: parts.len(),
        }),
    }
}

/// True when none of the fields would break the payload format.
pub fn is_encodable(student: &StudentRecord) -> bool {
    [&student.student_id, &student.name, &student.mobile]
        .iter()
        .all(|f| !f.contains(SEPARATOR))
}
