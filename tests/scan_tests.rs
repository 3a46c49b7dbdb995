use predicates::str::contains;

mod common;
use common::{
    blank_frame, count_attendance, init_db_with_students, qr_frame, qra, setup_test_db,
    temp_dir,
};

#[test]
fn test_scan_confirm_records_each_confirmation() {
    let db_path = setup_test_db("scan_confirm");
    let qr_dir = temp_dir("scan_confirm_qr");
    let frames = temp_dir("scan_confirm_frames");

    init_db_with_students("scan_confirm", &db_path, &qr_dir);

    blank_frame(&frames, "01_blank.png");
    qr_frame(&frames, "02_badge.png", "S100|Jane Doe|5551234");
    qr_frame(&frames, "03_bad.png", "onlyonefield");
    qr_frame(&frames, "04_badge.png", "S100|Jane Doe|5551234");

    qra()
        .args([
            "--db",
            &db_path,
            "scan",
            "--frames",
            &frames.to_string_lossy(),
            "--interval-ms",
            "0",
        ])
        .write_stdin("c\nc\n")
        .assert()
        .success()
        .stdout(contains("Detected Student:"))
        .stdout(contains("QR format invalid"))
        .stdout(contains("2 attendance record(s) added"));

    // repeated scans of the same student are separate rows
    assert_eq!(count_attendance(&db_path), 2);

    qra()
        .args(["--db", &db_path, "records"])
        .assert()
        .success()
        .stdout(contains("Jane Doe"))
        .stdout(contains("Present"));
}

#[test]
fn test_scan_rescan_records_nothing() {
    let db_path = setup_test_db("scan_rescan");
    let qr_dir = temp_dir("scan_rescan_qr");
    let frames = temp_dir("scan_rescan_frames");

    init_db_with_students("scan_rescan", &db_path, &qr_dir);

    qr_frame(&frames, "01_badge.png", "S100|Jane Doe|5551234");
    qr_frame(&frames, "02_badge.png", "S200|John Roe|0039555");

    qra()
        .args([
            "--db",
            &db_path,
            "scan",
            "--frames",
            &frames.to_string_lossy(),
            "--interval-ms",
            "0",
        ])
        .write_stdin("r\nq\n")
        .assert()
        .success()
        .stdout(contains("John Roe"))
        .stdout(contains("0 attendance record(s) added"));

    assert_eq!(count_attendance(&db_path), 0);
}

#[test]
fn test_scan_require_registered_warns_on_unknown_id() {
    let db_path = setup_test_db("scan_registered");
    let qr_dir = temp_dir("scan_registered_qr");
    let frames = temp_dir("scan_registered_frames");

    init_db_with_students("scan_registered", &db_path, &qr_dir);

    qr_frame(&frames, "01_badge.png", "S999|Ghost|000");

    qra()
        .args([
            "--db",
            &db_path,
            "scan",
            "--frames",
            &frames.to_string_lossy(),
            "--interval-ms",
            "0",
            "--require-registered",
        ])
        .assert()
        .success()
        .stdout(contains("Student 'S999' is not registered"))
        .stdout(contains("Scanning stopped"));

    assert_eq!(count_attendance(&db_path), 0);
}

#[test]
fn test_scan_stops_after_max_frames_without_badge() {
    let db_path = setup_test_db("scan_max_frames");
    let frames = temp_dir("scan_max_frames_frames");

    qra()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    blank_frame(&frames, "01.png");
    blank_frame(&frames, "02.png");
    blank_frame(&frames, "03.png");

    qra()
        .args([
            "--db",
            &db_path,
            "scan",
            "--frames",
            &frames.to_string_lossy(),
            "--interval-ms",
            "0",
            "--max-frames",
            "2",
        ])
        .assert()
        .success()
        .stdout(contains("No QR code in the last 2 frames"));
}

#[test]
fn test_scan_missing_frames_dir_reports_camera_unavailable() {
    let db_path = setup_test_db("scan_no_camera");

    qra()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    qra()
        .args([
            "--db",
            &db_path,
            "scan",
            "--frames",
            "/nonexistent/qrattend/frames",
        ])
        .assert()
        .success()
        .stdout(contains("Camera unavailable"));
}
