use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for qrattend
#[derive(Parser)]
#[command(
    name = "qrattend",
    version = env!("CARGO_PKG_VERSION"),
    about = "QR attendance: register students from a spreadsheet, print QR badges, scan and log attendance in SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override the folder where QR badges are written
    #[arg(global = true, long = "qr-dir")]
    pub qr_dir: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Compact the database file")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database statistics")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Register students from a spreadsheet and generate their QR badges
    ///
    /// The file is an Excel workbook (.xlsx, .xls; first sheet) or a CSV
    /// file, with the headers `Student ID`, `Name` and `Mobile`. Existing
    /// students with the same id are overwritten.
    Register {
        /// Spreadsheet to import (.xlsx, .xls, .ods or .csv)
        #[arg(long, short, value_name = "FILE")]
        file: String,

        /// Register only, do not write QR badges
        #[arg(long = "no-qr")]
        no_qr: bool,
    },

    /// Regenerate QR badges for registered students (all when no id is given)
    Qr {
        /// Student ids to regenerate
        ids: Vec<String>,
    },

    /// List registered students
    Students,

    /// Scan QR badges and mark attendance
    ///
    /// Frames are read from a folder of images, in file-name order. Each
    /// detected badge is shown and must be confirmed ([c]) or discarded ([r]);
    /// [q] ends the session.
    Scan {
        /// Folder of frames to scan
        #[arg(long, value_name = "DIR")]
        frames: String,

        /// Stop scanning after this many frames in a row without a badge
        #[arg(long = "max-frames", value_name = "N")]
        max_frames: Option<u64>,

        /// Pause between frames in milliseconds (overrides config)
        #[arg(long = "interval-ms", value_name = "MS")]
        interval_ms: Option<u64>,

        /// Accept only ids present in the registry
        #[arg(long = "require-registered")]
        require_registered: bool,
    },

    /// Show attendance records, newest first
    Records,

    /// Create a backup copy of the database
    Backup {
        /// Destination file path
        #[arg(long, value_name = "FILE")]
        file: String,

        /// Compress the backup (zip)
        #[arg(long)]
        compress: bool,

        /// Overwrite destination without confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Export attendance records
    Export {
        /// Export format: csv, json, xlsx
        #[arg(long, value_enum, value_name = "FORMAT", default_value = "csv")]
        format: ExportFormat,

        /// Output file path (absolute path required)
        #[arg(long, value_name = "FILE")]
        file: String,

        /// Overwrite output file without confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },
}
