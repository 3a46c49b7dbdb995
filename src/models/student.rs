use serde::Serialize;

/// A registered student.
///
/// The same triple is what a QR payload carries, so a decoded payload is
/// represented with this type as well (see [`StudentIdentity`]).
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StudentRecord {
    pub student_id: String, // ⇔ students.student_id (PRIMARY KEY)
    pub name: String,       // ⇔ students.name
    pub mobile: String,     // ⇔ students.mobile (TEXT, never parsed as a number)
}

/// Identity decoded from a QR payload, not yet checked against the registry.
pub type StudentIdentity = StudentRecord;

impl StudentRecord {
    pub fn new(
        student_id: impl Into<String>,
        name: impl Into<String>,
        mobile: impl Into<String>,
    ) -> Self {
        Self {
            student_id: student_id.into(),
            name: name.into(),
            mobile: mobile.into(),
        }
    }
}
