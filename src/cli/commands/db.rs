use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::ttlog_or_warn;
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use rusqlite::OptionalExtension;

/// Tables every qrattend database must carry.
const REQUIRED_TABLES: [&str; 3] = ["students", "attendance", "log"];

/// Handle the `db` maintenance command. Actions run in a fixed order:
/// migrate, info, check, vacuum.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Db {
        migrate,
        check,
        vacuum,
        info: show_info,
    } = cmd
    else {
        return Ok(());
    };

    let mut pool = DbPool::new(&cfg.database)?;

    if *migrate {
        info("Running pending migrations…");
        run_pending_migrations(&pool.conn)?;
        success("Schema is up to date.");
    }

    if *show_info {
        stats::print_db_info(&mut pool, &cfg.database)?;
    }

    if *check {
        check_database(&pool)?;
    }

    if *vacuum {
        info("Compacting database…");
        pool.conn.execute_batch("VACUUM;")?;
        ttlog_or_warn(&pool.conn, "vacuum", &cfg.database, "Database compacted");
        success("Vacuum completed.");
    }

    Ok(())
}

/// SQLite integrity check plus presence of the attendance schema.
fn check_database(pool: &DbPool) -> AppResult<()> {
    info("Running integrity check…");

    let integrity: String = pool
        .conn
        .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

    if integrity == "ok" {
        success("Integrity check passed.");
    } else {
        warning(format!("Integrity check failed: {}", integrity));
    }

    let mut missing = Vec::new();
    for table in REQUIRED_TABLES {
        let found: Option<String> = pool
            .conn
            .query_row(
                "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                [table],
                |row| row.get(0),
            )
            .optional()?;
        if found.is_none() {
            missing.push(table);
        }
    }

    if missing.is_empty() {
        success("All qrattend tables are present.");
    } else {
        warning(format!(
            "Missing tables: {} (run `qrattend db --migrate`)",
            missing.join(", ")
        ));
    }

    Ok(())
}
