//! QR detection on camera frames.

use crate::camera::Frame;

/// Finds QR symbols in a frame and returns the decoded text of each one,
/// in detection order. Symbols that fail to decode are skipped.
pub trait QrDetector {
    fn detect(&mut self, frame: &Frame) -> Vec<String>;
}

/// Detector backed by `rqrr`.
#[derive(Debug, Default)]
pub struct RqrrDetector;

impl QrDetector for RqrrDetector {
    fn detect(&mut self, frame: &Frame) -> Vec<String> {
        let img = &frame.image;

        let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
            img.width() as usize,
            img.height() as usize,
            |x, y| img.get_pixel(x as u32, y as u32).0[0],
        );

        prepared
            .detect_grids()
            .into_iter()
            .filter_map(|grid| grid.decode().ok())
            .map(|(_meta, content)| content)
            .collect()
    }
}
