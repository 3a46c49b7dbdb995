use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::log::ttlog_or_warn;
use crate::errors::AppResult;
use crate::ui::messages::success;

use crate::cli::parser::Cli;
use rusqlite::Connection;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - the SQLite database and all pending migrations
///  - the QR badge folder
pub fn handle(cli: &Cli) -> AppResult<()> {
    let cfg = Config::init_all(cli.db.clone(), cli.qr_dir.clone(), cli.test)?;

    println!("⚙️  Initializing qrattend…");
    println!("📄 Config file : {}", Config::config_file().display());
    println!("🗄️  Database   : {}", &cfg.database);
    println!("🔳 QR folder  : {}", &cfg.qr_folder);

    let conn = Connection::open(&cfg.database)?;
    init_db(&conn)?;

    success(format!("Database initialized at {}", &cfg.database));

    ttlog_or_warn(
        &conn,
        "init",
        "Database initialized",
        &format!("Database initialized at {}", &cfg.database),
    );

    println!("🎉 qrattend initialization completed!");
    Ok(())
}
