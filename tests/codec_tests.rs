use image::{GrayImage, Luma};
use qrattend::camera::Frame;
use qrattend::errors::DecodeError;
use qrattend::models::StudentRecord;
use qrattend::qr::render::{is_safe_file_stem, render_image};
use qrattend::qr::{QrDetector, QrRenderer, RqrrDetector, decode, encode};

mod common;
use common::temp_dir;

#[test]
fn test_encode_joins_fields_with_pipe() {
    let s = StudentRecord::new("S100", "Jane Doe", "5551234");
    assert_eq!(encode(&s), "S100|Jane Doe|5551234");
}

#[test]
fn test_decode_valid_payload() {
    let id = decode("S100|Jane Doe|5551234").expect("valid payload");
    assert_eq!(id, StudentRecord::new("S100", "Jane Doe", "5551234"));
}

#[test]
fn test_decode_keeps_empty_fields() {
    let id = decode("S1||").expect("three fields");
    assert_eq!(id.name, "");
    assert_eq!(id.mobile, "");
}

#[test]
fn test_decode_rejects_wrong_field_count() {
    assert_eq!(
        decode("onlyonefield"),
        Err(DecodeError::MalformedPayload { fields: 1 })
    );
    assert_eq!(
        decode("S1|Ann"),
        Err(DecodeError::MalformedPayload { fields: 2 })
    );
    assert_eq!(
        decode("S1|Ann|111|extra"),
        Err(DecodeError::MalformedPayload { fields: 4 })
    );
}

#[test]
fn test_safe_file_stems() {
    assert!(is_safe_file_stem("S100"));
    assert!(!is_safe_file_stem(""));
    assert!(!is_safe_file_stem(".."));
    assert!(!is_safe_file_stem("a/b"));
}

#[test]
fn test_rendered_badge_is_detected() {
    let img = render_image("S100|Jane Doe|5551234", 6).expect("render");
    let frame = Frame {
        index: 0,
        image: img,
    };

    let found = RqrrDetector.detect(&frame);
    assert_eq!(found, vec!["S100|Jane Doe|5551234".to_string()]);
}

#[test]
fn test_blank_frame_has_no_detection() {
    let frame = Frame {
        index: 0,
        image: GrayImage::from_pixel(64, 64, Luma([255u8])),
    };
    assert!(RqrrDetector.detect(&frame).is_empty());
}

#[test]
fn test_renderer_overwrites_artifact() {
    let dir = temp_dir("renderer_overwrites");
    let renderer = QrRenderer::new(&dir, 4);

    let first = renderer
        .render_student(&StudentRecord::new("S1", "Ann", "111"))
        .expect("render first");
    let second = renderer
        .render_student(&StudentRecord::new("S1", "Ann Lee", "222"))
        .expect("render second");

    assert_eq!(first, second);
    assert_eq!(first, dir.join("S1.png"));

    let img = image::open(&second).expect("open badge").to_luma8();
    let found = RqrrDetector.detect(&Frame {
        index: 0,
        image: img,
    });
    assert_eq!(found, vec!["S1|Ann Lee|222".to_string()]);
}

#[test]
fn test_renderer_refuses_unsafe_id() {
    let dir = temp_dir("renderer_unsafe");
    let renderer = QrRenderer::new(&dir, 4);
    assert!(renderer.artifact_path("../escape").is_err());
}
