use crate::core::ledger::LedgerLogic;
use crate::db::log::ttlog_or_warn;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::AttendanceExport;
use crate::export::xlsx::export_xlsx;
use crate::ui::messages::warning;
use crate::utils::path::is_absolute;
use crate::utils::prompt::confirm_overwrite;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Export the whole attendance ledger, newest first.
    ///
    /// - `file`: absolute output path
    /// - `force`: overwrite an existing file without asking
    ///
    /// Returns the number of exported rows (0 when cancelled or empty).
    pub fn export(
        pool: &DbPool,
        format: ExportFormat,
        file: &str,
        force: bool,
    ) -> AppResult<usize> {
        if !is_absolute(file) {
            return Err(AppError::Export(format!(
                "Output file path must be absolute: {file}"
            )));
        }

        let path = Path::new(file);

        if path.exists() && !force && !confirm_overwrite(path)? {
            warning("Export cancelled: existing file not overwritten.");
            return Ok(0);
        }

        let rows: Vec<AttendanceExport> = LedgerLogic::list_all(pool)?
            .iter()
            .map(AttendanceExport::from)
            .collect();

        if rows.is_empty() {
            warning("No attendance records to export.");
            return Ok(0);
        }

        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
            ExportFormat::Xlsx => export_xlsx(&rows, path)?,
        }

        ttlog_or_warn(
            &pool.conn,
            "export",
            file,
            &format!("Exported {} rows as {}", rows.len(), format.as_str()),
        );

        Ok(rows.len())
    }
}
