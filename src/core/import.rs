//! Spreadsheet import: rows with `Student ID`, `Name`, `Mobile` headers.
//!
//! Excel workbooks (first sheet) and CSV files are accepted, picked by file
//! extension. Every row is validated before the caller writes anything, so
//! a bad sheet never leaves a half-registered batch behind.

use crate::errors::RegistrationError;
use crate::models::StudentRecord;
use crate::qr::payload;
use crate::qr::render::is_safe_file_stem;
use calamine::{Reader, open_workbook_auto};
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub const COL_STUDENT_ID: &str = "Student ID";
pub const COL_NAME: &str = "Name";
pub const COL_MOBILE: &str = "Mobile";

const WORKBOOK_EXTENSIONS: [&str; 4] = ["xlsx", "xlsm", "xls", "ods"];

pub fn read_students_file(path: &Path) -> Result<Vec<StudentRecord>, RegistrationError> {
    let is_workbook = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| WORKBOOK_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()));

    if is_workbook {
        read_workbook(path)
    } else {
        let file = File::open(path).map_err(|e| RegistrationError::Read(csv::Error::from(e)))?;
        read_students(file)
    }
}

/// Read CSV rows.
pub fn read_students<R: Read>(reader: R) -> Result<Vec<StudentRecord>, RegistrationError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let columns = SheetColumns::locate(&headers)?;

    let mut out = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        let cells: Vec<String> = record.iter().map(str::to_string).collect();
        // Line 1 is the header.
        out.push(columns.student(&cells, i + 2)?);
    }

    Ok(out)
}

/// Read the first worksheet. Numeric cells (a mobile typed as a number)
/// are taken as their displayed text; blank rows are skipped.
pub fn read_workbook(path: &Path) -> Result<Vec<StudentRecord>, RegistrationError> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| RegistrationError::EmptyWorkbook(path.display().to_string()))??;

    // Sheet row of the header, 1-based as shown by spreadsheet apps.
    let header_row = range.start().map(|(r, _)| r as usize + 1).unwrap_or(1);

    let mut rows = range
        .rows()
        .map(|row| row.iter().map(|c| c.to_string().trim().to_string()).collect::<Vec<_>>());

    let Some(headers) = rows.next() else {
        return Err(RegistrationError::EmptyWorkbook(path.display().to_string()));
    };
    let columns = SheetColumns::locate(&headers)?;

    let mut out = Vec::new();
    for (i, cells) in rows.enumerate() {
        if cells.iter().all(String::is_empty) {
            continue;
        }
        out.push(columns.student(&cells, header_row + i + 1)?);
    }

    Ok(out)
}

/// Positions of the required columns in the header row.
struct SheetColumns {
    id: usize,
    name: usize,
    mobile: usize,
}

impl SheetColumns {
    fn locate(headers: &[String]) -> Result<Self, RegistrationError> {
        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| RegistrationError::MissingColumn(name.to_string()))
        };

        Ok(Self {
            id: column(COL_STUDENT_ID)?,
            name: column(COL_NAME)?,
            mobile: column(COL_MOBILE)?,
        })
    }

    fn student(&self, cells: &[String], row: usize) -> Result<StudentRecord, RegistrationError> {
        let field = |idx: usize| cells.get(idx).cloned().unwrap_or_default();
        let student = StudentRecord::new(field(self.id), field(self.name), field(self.mobile));

        validate(&student, row)?;
        Ok(student)
    }
}

fn validate(student: &StudentRecord, row: usize) -> Result<(), RegistrationError> {
    let invalid = |reason: String| RegistrationError::InvalidRow { row, reason };

    if student.student_id.is_empty() {
        return Err(invalid("empty Student ID".to_string()));
    }

    if !payload::is_encodable(student) {
        return Err(invalid(format!(
            "fields must not contain '{}'",
            payload::SEPARATOR
        )));
    }

    if !is_safe_file_stem(&student.student_id) {
        return Err(invalid(format!(
            "Student ID '{}' cannot be used as a QR file name",
            student.student_id
        )));
    }

    Ok(())
}
