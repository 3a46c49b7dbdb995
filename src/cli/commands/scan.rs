use crate::camera::DirectoryCamera;
use crate::cli::parser::Commands;
use crate::config::{Config, IdentityCheck};
use crate::core::scanner::{ActionReport, ScanOutcome, Scanner};
use crate::db::initialize::open_db;
use crate::errors::AppResult;
use crate::qr::RqrrDetector;
use crate::ui::messages::{detected, error, info, success, warning};
use crate::utils::prompt::ask;
use std::thread;
use std::time::Duration;

const CHOICE_PROMPT: &str = "[c]onfirm / [r]escan / [q]uit: ";

/// Handle the `scan` command
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Scan {
        frames,
        max_frames,
        interval_ms,
        require_registered,
    } = cmd
    {
        let pool = open_db(&cfg.database)?;

        let identity_check = if *require_registered {
            IdentityCheck::Registry
        } else {
            cfg.identity_check
        };
        let interval = Duration::from_millis(interval_ms.unwrap_or(cfg.frame_interval_ms));

        let mut scanner = Scanner::new(
            &pool,
            DirectoryCamera::new(frames),
            RqrrDetector,
            identity_check,
        );

        show_warnings(scanner.start()?);
        if !scanner.state().camera_on() {
            return Ok(());
        }

        info(format!("Scanning frames from {}", frames));

        let mut misses: u64 = 0;
        let mut recorded: usize = 0;

        loop {
            match scanner.poll()? {
                ScanOutcome::Idle => break,
                ScanOutcome::NoFrame | ScanOutcome::NoDetection { .. } => {
                    misses += 1;
                    if let Some(max) = max_frames
                        && misses >= *max
                    {
                        info(format!("No QR code in the last {} frames, stopping.", misses));
                        break;
                    }
                }
                ScanOutcome::Warning(w) => warning(w),
                ScanOutcome::CameraStopped(e) => {
                    warning(format!("Scanning stopped: {}", e));
                    break;
                }
                ScanOutcome::Detected(student) | ScanOutcome::AwaitingConfirmation(student) => {
                    misses = 0;
                    detected(&student);

                    let choice = ask(CHOICE_PROMPT)?.map(|a| a.to_ascii_lowercase());
                    match choice.as_deref() {
                        Some("c") | Some("confirm") => match scanner.confirm() {
                            Ok(report) => {
                                if let Some(ev) = &report.recorded {
                                    success(format!(
                                        "Attendance marked for {} at {}",
                                        ev.name,
                                        ev.scan_time_str()
                                    ));
                                    recorded += 1;
                                }
                                show_warnings(report);
                            }
                            Err(e) => error(format!("Attendance not recorded: {}", e)),
                        },
                        Some("r") | Some("rescan") => show_warnings(scanner.rescan()?),
                        None | Some("q") | Some("quit") => break,
                        Some(other) => warning(format!("Unknown choice '{}'", other)),
                    }
                    continue;
                }
            }

            thread::sleep(interval);
        }

        scanner.stop()?;
        success(format!("Scan session ended, {} attendance record(s) added", recorded));
    }

    Ok(())
}

fn show_warnings(report: ActionReport) {
    for w in report.warnings {
        warning(w);
    }
}
