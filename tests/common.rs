#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use image::{GrayImage, Luma};
use qrattend::qr::render::render_png;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const STUDENTS_CSV: &str = "\
Student ID,Name,Mobile
S100,Jane Doe,5551234
S200,John Roe,0039555
";

pub fn qra() -> Command {
    cargo_bin_cmd!("qrattend")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_qrattend.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Fresh, empty directory inside tempdir
pub fn temp_dir(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_qrattend_dir", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create temp dir");
    path
}

/// Write a spreadsheet (CSV) into tempdir and return its path
pub fn write_students_csv(name: &str, content: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_students.csv", name));
    fs::write(&path, content).expect("write students csv");
    path.to_string_lossy().to_string()
}

/// Write a workbook into tempdir and return its path. Cells that parse as
/// numbers are stored as numbers, the way a spreadsheet app keeps them.
pub fn write_students_xlsx(name: &str, rows: &[&[&str]]) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_students.xlsx", name));

    let mut workbook = rust_xlsxwriter::Workbook::new();
    let sheet = workbook.add_worksheet();
    for (r, row) in rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            let written = match cell.parse::<f64>() {
                Ok(n) => sheet.write(r as u32, c as u16, n),
                Err(_) => sheet.write(r as u32, c as u16, *cell),
            };
            written.expect("write cell");
        }
    }
    workbook.save(&path).expect("save workbook");
    path.to_string_lossy().to_string()
}

/// Initialize DB and register the two students of STUDENTS_CSV
pub fn init_db_with_students(name: &str, db_path: &str, qr_dir: &Path) {
    qra()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    let csv = write_students_csv(name, STUDENTS_CSV);
    qra()
        .args([
            "--db",
            db_path,
            "--qr-dir",
            &qr_dir.to_string_lossy(),
            "register",
            "--file",
            &csv,
        ])
        .assert()
        .success();
}

/// Save a frame holding one QR symbol with `text`
pub fn qr_frame(dir: &Path, file: &str, text: &str) {
    render_png(text, &dir.join(file), 6).expect("render qr frame");
}

/// Save a blank white frame
pub fn blank_frame(dir: &Path, file: &str) {
    let img = GrayImage::from_pixel(120, 120, Luma([255u8]));
    img.save(dir.join(file)).expect("save blank frame");
}

pub fn count_attendance(db_path: &str) -> i64 {
    let conn = rusqlite::Connection::open(db_path).expect("open db");
    conn.query_row("SELECT COUNT(*) FROM attendance", [], |row| row.get(0))
        .expect("count attendance")
}
