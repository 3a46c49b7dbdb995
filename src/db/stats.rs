use crate::db::pool::DbPool;
use crate::db::queries::count_rows;
use crate::models::SCAN_TIME_FORMAT;
use ansi_term::Colour::{Cyan, Fixed, Green, Yellow};
use chrono::NaiveDateTime;
use rusqlite::OptionalExtension;
use std::fs;

/// Print file, registry and ledger statistics for `db --info`.
pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!();
    println!("{} {}", Cyan.paint("• File:"), Yellow.paint(db_path));
    println!("{} {:.2} MB", Cyan.paint("• Size:"), file_mb);

    let students = count_rows(&pool.conn, "students")?;
    let scans = count_rows(&pool.conn, "attendance")?;
    println!(
        "{} {}",
        Cyan.paint("• Registered students:"),
        Green.paint(students.to_string())
    );
    println!(
        "{} {}",
        Cyan.paint("• Attendance rows:"),
        Green.paint(scans.to_string())
    );

    let (first_scan, last_scan): (Option<String>, Option<String>) = pool
        .conn
        .query_row(
            "SELECT MIN(scan_time), MAX(scan_time) FROM attendance",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()?
        .unwrap_or((None, None));

    let dash = || Fixed(8).paint("--").to_string();
    println!("{}", Cyan.paint("• Scan range:"));
    println!("    from: {}", first_scan.clone().unwrap_or_else(dash));
    println!("    to:   {}", last_scan.clone().unwrap_or_else(dash));

    if let (Some(f), Some(l)) = (first_scan, last_scan) {
        let days = (parse_scan_time(&l)?.date() - parse_scan_time(&f)?.date()).num_days() + 1;
        let avg = scans as f64 / days as f64;
        println!("{} {:.2}", Cyan.paint("• Average scans/day:"), avg);
    }

    println!();
    Ok(())
}

fn parse_scan_time(s: &str) -> rusqlite::Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, SCAN_TIME_FORMAT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}
