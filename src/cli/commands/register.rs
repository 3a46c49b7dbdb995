use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::import::{COL_MOBILE, COL_NAME, COL_STUDENT_ID, read_students_file};
use crate::core::register::RegisterLogic;
use crate::db::initialize::open_db;
use crate::errors::AppResult;
use crate::qr::QrRenderer;
use crate::ui::messages::{info, success};
use crate::utils::table::Table;
use std::path::Path;

/// Handle the `register` command
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Register { file, no_qr } = cmd {
        let path = Path::new(file);
        let records = read_students_file(path)?;

        if records.is_empty() {
            info(format!("No students found in {}", path.display()));
            return Ok(());
        }

        println!("📋 Preview of {}:\n", path.display());
        let mut table = Table::with_headers(&[COL_STUDENT_ID, COL_NAME, COL_MOBILE]);
        for s in records.iter().take(cfg.preview_rows) {
            table.add_row(vec![s.student_id.clone(), s.name.clone(), s.mobile.clone()]);
        }
        print!("{}", table.render());
        if records.len() > cfg.preview_rows {
            println!("… and {} more", records.len() - cfg.preview_rows);
        }
        println!();

        let mut pool = open_db(&cfg.database)?;
        let renderer = QrRenderer::new(cfg.qr_folder_path(), cfg.qr_module_scale);
        let summary = RegisterLogic::apply(
            &mut pool,
            &records,
            (!*no_qr).then_some(&renderer),
            &path.to_string_lossy(),
        )?;

        success(format!(
            "Registered {} students and generated {} QR codes",
            summary.registered,
            summary.qr_files.len()
        ));
        if !summary.qr_files.is_empty() {
            info(format!("QR codes saved in {}", renderer.folder().display()));
        }
    }

    Ok(())
}
