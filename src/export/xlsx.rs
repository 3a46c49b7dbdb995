use crate::errors::{AppError, AppResult};
use crate::export::excel_date::{SCAN_TIME_NUM_FORMAT, to_excel_serial};
use crate::export::model::get_headers;
use crate::export::{AttendanceExport, notify_export_success};
use crate::models::SCAN_TIME_FORMAT;
use crate::ui::messages::info;
use chrono::NaiveDateTime;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

/// Cell kinds of the ledger columns. Mobile numbers stay text so leading
/// zeros and `+` prefixes survive.
enum Cell<'a> {
    Number(f64),
    DateTime(f64),
    Text(&'a str),
}

/// Export XLSX with banded rows and auto-sized columns.
pub(crate) fn export_xlsx(rows: &[AttendanceExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Attendance").map_err(to_export_error)?;

    let headers = get_headers();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_with_format(0, col as u16, *header, &header_format)
            .map_err(to_export_error)?;
    }

    worksheet.set_freeze_panes(1, 0).map_err(to_export_error)?;

    let mut col_widths: Vec<usize> = headers.iter().map(|h| UnicodeWidthStr::width(*h)).collect();
    // "yyyy-mm-dd hh:mm:ss"
    col_widths[5] = col_widths[5].max(SCAN_TIME_NUM_FORMAT.len());

    let band1 = Color::RGB(0xEAF3FB);
    let band2 = Color::RGB(0xFFFFFF);

    for (row_index, r) in rows.iter().enumerate() {
        let row = (row_index + 1) as u32;
        let band_color = if row_index % 2 == 0 { band1 } else { band2 };

        let scan_time = NaiveDateTime::parse_from_str(&r.scan_time, SCAN_TIME_FORMAT)
            .map(|dt| Cell::DateTime(to_excel_serial(&dt)))
            .unwrap_or(Cell::Text(&r.scan_time));

        let cells = [
            Cell::Number(r.id as f64),
            Cell::Text(&r.student_id),
            Cell::Text(&r.name),
            Cell::Text(&r.mobile),
            Cell::Text(&r.status),
            scan_time,
        ];

        for (col, cell) in cells.iter().enumerate() {
            write_cell(worksheet, row, col as u16, cell, band_color)?;

            if let Cell::Text(s) = cell {
                col_widths[col] = col_widths[col].max(UnicodeWidthStr::width(*s));
            }
        }
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet
            .set_column_width(c as u16, *w as f64 + 2.0)
            .map_err(to_export_error)?;
    }

    workbook.save(path).map_err(to_export_error)?;

    notify_export_success("XLSX", path);
    Ok(())
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &Cell<'_>,
    bg: Color,
) -> AppResult<()> {
    let base = Format::new()
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    let written = match cell {
        Cell::Number(n) => {
            let fmt = base.set_align(FormatAlign::Right);
            worksheet.write_with_format(row, col, *n, &fmt)
        }
        Cell::DateTime(serial) => {
            let fmt = base.set_num_format(SCAN_TIME_NUM_FORMAT);
            worksheet.write_with_format(row, col, *serial, &fmt)
        }
        Cell::Text(s) => worksheet.write_with_format(row, col, *s, &base),
    };
    written.map_err(to_export_error)?;

    Ok(())
}

fn to_export_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(e.to_string())
}
