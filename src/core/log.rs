use crate::db::pool::DbPool;
use crate::errors::AppResult;
use ansi_term::Colour;
use chrono::DateTime;
use unicode_width::UnicodeWidthStr;

/// Longest target shown before it is cut with "...".
const TARGET_MAX: usize = 48;

/// One row of the internal `log` table.
struct LogEntry {
    id: i64,
    date: String,
    operation: String,
    target: String,
    message: String,
}

fn colour_for(operation: &str) -> Colour {
    match operation {
        "attendance" => Colour::Green,
        "register" => Colour::Cyan,
        "export" => Colour::Yellow,
        "migration_applied" => Colour::Purple,
        "backup" | "vacuum" => Colour::Blue,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

/// Cut `s` to `max` display columns, marking the cut with "...".
fn shorten(s: &str, max: usize) -> String {
    if UnicodeWidthStr::width(s) <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for c in s.chars() {
        if UnicodeWidthStr::width(out.as_str()) + 3 >= max {
            break;
        }
        out.push(c);
    }
    out.push_str("...");
    out
}

fn pad(s: &str, width: usize) -> String {
    format!("{s}{}", " ".repeat(width.saturating_sub(UnicodeWidthStr::width(s))))
}

pub struct LogLogic;

impl LogLogic {
    /// Print the audit log oldest first: id, timestamp, operation (coloured),
    /// target and message in aligned columns.
    pub fn print_log(pool: &mut DbPool) -> AppResult<()> {
        let mut stmt = pool.conn.prepare_cached(
            "SELECT id, date, operation, target, message FROM log ORDER BY id ASC",
        )?;

        let entries = stmt
            .query_map([], |row| {
                let raw_date: String = row.get(1)?;
                Ok(LogEntry {
                    id: row.get(0)?,
                    // migrations store SQLite's datetime('now'), others RFC 3339
                    date: DateTime::parse_from_rfc3339(&raw_date)
                        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
                        .unwrap_or(raw_date),
                    operation: row.get(2)?,
                    target: shorten(&row.get::<_, Option<String>>(3)?.unwrap_or_default(), TARGET_MAX),
                    message: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let id_w = entries.iter().map(|e| e.id.to_string().len()).max().unwrap_or(1);
        let op_w = entries.iter().map(|e| e.operation.len()).max().unwrap_or(0);
        let target_w = entries
            .iter()
            .map(|e| UnicodeWidthStr::width(e.target.as_str()))
            .max()
            .unwrap_or(0);

        println!("📜 Internal log:\n");

        for e in &entries {
            // padding is applied before painting so escape codes do not count
            let op = colour_for(&e.operation).paint(pad(&e.operation, op_w));
            println!(
                "{:>id_w$}  {}  {}  {}  {}",
                e.id,
                e.date,
                op,
                pad(&e.target, target_w),
                e.message,
                id_w = id_w,
            );
        }

        Ok(())
    }
}
