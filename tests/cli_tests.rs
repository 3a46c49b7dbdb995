use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{
    STUDENTS_CSV, count_attendance, init_db_with_students, qra, setup_test_db, temp_dir,
    temp_out, write_students_csv, write_students_xlsx,
};

#[test]
fn test_init_creates_schema() {
    let db_path = setup_test_db("init_creates_schema");

    qra()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    let conn = rusqlite::Connection::open(&db_path).expect("open db");
    for table in ["students", "attendance", "log"] {
        let n: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
                [table],
                |row| row.get(0),
            )
            .expect("query sqlite_master");
        assert_eq!(n, 1, "missing table {table}");
    }
}

#[test]
fn test_register_writes_students_and_qr_files() {
    let db_path = setup_test_db("register_writes");
    let qr_dir = temp_dir("register_writes_qr");

    qra()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    let csv = write_students_csv("register_writes", STUDENTS_CSV);
    qra()
        .args([
            "--db",
            &db_path,
            "--qr-dir",
            &qr_dir.to_string_lossy(),
            "register",
            "--file",
            &csv,
        ])
        .assert()
        .success()
        .stdout(contains("Jane Doe"))
        .stdout(contains("Registered 2 students and generated 2 QR codes"));

    assert!(qr_dir.join("S100.png").exists());
    assert!(qr_dir.join("S200.png").exists());

    // mobile stays text: the leading zeros survive
    qra()
        .args(["--db", &db_path, "students"])
        .assert()
        .success()
        .stdout(contains("S100"))
        .stdout(contains("0039555"));
}

#[test]
fn test_register_from_excel_workbook() {
    let db_path = setup_test_db("register_xlsx");
    let qr_dir = temp_dir("register_xlsx_qr");

    qra()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    let xlsx = write_students_xlsx(
        "register_xlsx",
        &[
            &["Student ID", "Name", "Mobile"],
            &["S100", "Jane Doe", "5551234"],
            &["S200", "John Roe", "+39 0555"],
        ],
    );
    qra()
        .args([
            "--db",
            &db_path,
            "--qr-dir",
            &qr_dir.to_string_lossy(),
            "register",
            "--file",
            &xlsx,
        ])
        .assert()
        .success()
        .stdout(contains("Registered 2 students and generated 2 QR codes"));

    assert!(qr_dir.join("S100.png").exists());
    assert!(qr_dir.join("S200.png").exists());

    // a mobile stored as a number comes back as plain digits
    qra()
        .args(["--db", &db_path, "students"])
        .assert()
        .success()
        .stdout(contains("5551234"))
        .stdout(contains("+39 0555"));
}

#[test]
fn test_register_excel_missing_column_fails() {
    let db_path = setup_test_db("register_xlsx_missing");

    qra()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    let xlsx = write_students_xlsx(
        "register_xlsx_missing",
        &[&["Student ID", "Name"], &["S1", "Ann"]],
    );
    qra()
        .args(["--db", &db_path, "register", "--file", &xlsx, "--no-qr"])
        .assert()
        .failure()
        .stderr(contains("Missing required column 'Mobile'"));
}

#[test]
fn test_register_twice_keeps_one_row_per_student() {
    let db_path = setup_test_db("register_twice");
    let qr_dir = temp_dir("register_twice_qr");

    init_db_with_students("register_twice", &db_path, &qr_dir);

    let csv = write_students_csv(
        "register_twice_update",
        "Student ID,Name,Mobile\nS100,Jane Smith,5550000\n",
    );
    qra()
        .args(["--db", &db_path, "register", "--file", &csv, "--no-qr"])
        .assert()
        .success()
        .stdout(contains("generated 0 QR codes"));

    let conn = rusqlite::Connection::open(&db_path).expect("open db");
    let (n, name): (i64, String) = conn
        .query_row(
            "SELECT COUNT(*), MAX(name) FROM students WHERE student_id = 'S100'",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .expect("query students");
    assert_eq!(n, 1);
    assert_eq!(name, "Jane Smith");
}

#[test]
fn test_register_missing_column_fails() {
    let db_path = setup_test_db("register_missing_column");

    qra()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    let csv = write_students_csv("register_missing_column", "Student ID,Name\nS1,Ann\n");
    qra()
        .args(["--db", &db_path, "register", "--file", &csv, "--no-qr"])
        .assert()
        .failure()
        .stderr(contains("Missing required column 'Mobile'"));
}

#[test]
fn test_register_rejects_separator_in_fields() {
    let db_path = setup_test_db("register_separator");

    qra()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    let csv = write_students_csv(
        "register_separator",
        "Student ID,Name,Mobile\nS1,Ann,111\nS2,Bob|Jr,222\n",
    );
    qra()
        .args(["--db", &db_path, "register", "--file", &csv, "--no-qr"])
        .assert()
        .failure()
        .stderr(contains("Row 3"));

    // nothing of the batch was written
    qra()
        .args(["--db", &db_path, "students"])
        .assert()
        .success()
        .stdout(contains("No students registered."));
}

#[test]
fn test_qr_regenerates_badge() {
    let db_path = setup_test_db("qr_regenerate");
    let qr_dir = temp_dir("qr_regenerate_qr");

    init_db_with_students("qr_regenerate", &db_path, &qr_dir);
    fs::remove_file(qr_dir.join("S200.png")).expect("remove badge");

    qra()
        .args([
            "--db",
            &db_path,
            "--qr-dir",
            &qr_dir.to_string_lossy(),
            "qr",
            "S200",
        ])
        .assert()
        .success()
        .stdout(contains("Generated 1 QR codes"));

    assert!(qr_dir.join("S200.png").exists());

    qra()
        .args(["--db", &db_path, "qr", "S999"])
        .assert()
        .failure()
        .stderr(contains("Student not found: S999"));
}

#[test]
fn test_records_empty() {
    let db_path = setup_test_db("records_empty");

    qra()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    qra()
        .args(["--db", &db_path, "records"])
        .assert()
        .success()
        .stdout(contains("No attendance records."));
}

#[test]
fn test_export_csv_and_json() {
    let db_path = setup_test_db("export_csv_json");

    qra()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    {
        let conn = rusqlite::Connection::open(&db_path).expect("open db");
        conn.execute_batch(
            "INSERT INTO attendance (student_id, name, mobile, status, scan_time)
             VALUES ('S100', 'Jane Doe', '5551234', 'Present', '2025-09-01 08:59:12'),
                    ('S200', 'John Roe', '0039555', 'Present', '2025-09-01 09:01:40');",
        )
        .expect("seed attendance");
    }
    assert_eq!(count_attendance(&db_path), 2);

    qra()
        .args(["--db", &db_path, "records"])
        .assert()
        .success()
        .stdout(contains("2025-09-01 09:01:40"))
        .stdout(contains("Present"));

    let csv_out = temp_out("export_csv_json", "csv");
    qra()
        .args([
            "--db", &db_path, "export", "--format", "csv", "--file", &csv_out,
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&csv_out).expect("read exported csv");
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some("id,student_id,name,mobile,status,scan_time")
    );
    // newest first
    assert!(lines.next().is_some_and(|l| l.contains("S200")));

    let json_out = temp_out("export_csv_json", "json");
    qra()
        .args([
            "--db", &db_path, "export", "--format", "json", "--file", &json_out,
        ])
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_out).expect("read exported json"))
            .expect("valid json");
    assert_eq!(json.as_array().map(|a| a.len()), Some(2));
    assert_eq!(json[1]["mobile"], "5551234");
}

#[test]
fn test_export_requires_absolute_path() {
    let db_path = setup_test_db("export_relative");

    qra()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    qra()
        .args(["--db", &db_path, "export", "--file", "relative.csv"])
        .assert()
        .failure()
        .stderr(contains("must be absolute"));
}

#[test]
fn test_log_print_lists_operations() {
    let db_path = setup_test_db("log_print");
    let qr_dir = temp_dir("log_print_qr");

    init_db_with_students("log_print", &db_path, &qr_dir);

    qra()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("init").and(contains("register")))
        .stdout(contains("migration_applied"));
}

#[test]
fn test_backup_copies_database() {
    let db_path = setup_test_db("backup_copy");
    let out = temp_out("backup_copy", "sqlite");

    qra()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    qra()
        .args(["--db", &db_path, "backup", "--file", &out, "--force"])
        .assert()
        .success()
        .stdout(contains("Backup created"));

    assert!(fs::metadata(&out).is_ok_and(|m| m.len() > 0));
}

#[test]
fn test_backup_compressed_holds_database_snapshot() {
    let db_path = setup_test_db("backup_zip");
    let out = temp_out("backup_zip", "sqlite");
    let zip_path = std::path::Path::new(&out).with_extension("zip");
    fs::remove_file(&zip_path).ok();

    qra()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    qra()
        .args(["--db", &db_path, "backup", "--file", &out, "--compress", "-f"])
        .assert()
        .success();

    assert!(!std::path::Path::new(&out).exists());
    let archive =
        zip::ZipArchive::new(fs::File::open(&zip_path).expect("open zip")).expect("read zip");
    let names: Vec<&str> = archive.file_names().collect();
    assert_eq!(names, vec!["backup_zip_qrattend.sqlite"]);
}

#[test]
fn test_db_info() {
    let db_path = setup_test_db("db_info");
    let qr_dir = temp_dir("db_info_qr");

    init_db_with_students("db_info", &db_path, &qr_dir);

    qra()
        .args(["--db", &db_path, "db", "--info", "--check"])
        .assert()
        .success()
        .stdout(contains("Registered students:"))
        .stdout(contains("Integrity check passed."));
}
