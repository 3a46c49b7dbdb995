use crate::config::Config;
use crate::core::import::{COL_MOBILE, COL_NAME, COL_STUDENT_ID};
use crate::core::registry::RegistryLogic;
use crate::db::initialize::open_db;
use crate::errors::AppResult;
use crate::utils::table::Table;

/// Handle the `students` command
pub fn handle(cfg: &Config) -> AppResult<()> {
    let pool = open_db(&cfg.database)?;
    let students = RegistryLogic::list(&pool)?;

    if students.is_empty() {
        println!("No students registered.");
        return Ok(());
    }

    let mut table = Table::with_headers(&[COL_STUDENT_ID, COL_NAME, COL_MOBILE]);
    for s in &students {
        table.add_row(vec![s.student_id.clone(), s.name.clone(), s.mobile.clone()]);
    }

    println!("👥 Registered students:\n");
    print!("{}", table.render());
    println!("\n{} student(s)", students.len());
    Ok(())
}
