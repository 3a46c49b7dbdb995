use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::register::RegisterLogic;
use crate::db::initialize::open_db;
use crate::errors::AppResult;
use crate::qr::QrRenderer;
use crate::ui::messages::{info, success};

/// Handle the `qr` command
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Qr { ids } = cmd {
        let pool = open_db(&cfg.database)?;
        let renderer = QrRenderer::new(cfg.qr_folder_path(), cfg.qr_module_scale);

        let files = RegisterLogic::regenerate_qr(&pool, &renderer, ids)?;

        if files.is_empty() {
            info("No students registered.");
            return Ok(());
        }

        for f in &files {
            println!("🔳 {}", f.display());
        }
        success(format!("Generated {} QR codes", files.len()));
    }

    Ok(())
}
