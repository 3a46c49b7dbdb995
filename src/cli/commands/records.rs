use crate::config::Config;
use crate::core::ledger::LedgerLogic;
use crate::db::initialize::open_db;
use crate::errors::AppResult;
use crate::utils::table::Table;

/// Handle the `records` command
pub fn handle(cfg: &Config) -> AppResult<()> {
    let pool = open_db(&cfg.database)?;
    let events = LedgerLogic::list_all(&pool)?;

    if events.is_empty() {
        println!("No attendance records.");
        return Ok(());
    }

    let mut table = Table::with_headers(&["ID", "Student ID", "Name", "Mobile", "Status", "Scan Time"]);
    for ev in &events {
        table.add_row(vec![
            ev.id.to_string(),
            ev.student_id.clone(),
            ev.name.clone(),
            ev.mobile.clone(),
            ev.status.as_str().to_string(),
            ev.scan_time_str(),
        ]);
    }

    println!("🗒️  Attendance records:\n");
    print!("{}", table.render());
    Ok(())
}
