//! QR badge rendering: one PNG per student, named after the student id.

use crate::errors::{AppError, AppResult};
use crate::models::StudentRecord;
use crate::qr::payload;
use image::{GrayImage, Luma};
use qrcode::{Color, QrCode};
use std::fs;
use std::path::{Path, PathBuf};

/// Modules of white border around the symbol (ISO 18004 minimum).
const QUIET_ZONE: u32 = 4;

pub struct QrRenderer {
    folder: PathBuf,
    scale: u32,
}

impl QrRenderer {
    pub fn new(folder: impl Into<PathBuf>, scale: u32) -> Self {
        Self {
            folder: folder.into(),
            scale: scale.max(1),
        }
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// Path of the artifact for a student id, without touching the disk.
    pub fn artifact_path(&self, student_id: &str) -> AppResult<PathBuf> {
        if !is_safe_file_stem(student_id) {
            return Err(AppError::QrRender(format!(
                "student id '{student_id}' cannot be used as a file name"
            )));
        }
        Ok(self.folder.join(format!("{student_id}.png")))
    }

    /// Render the student's payload, overwriting any previous artifact.
    pub fn render_student(&self, student: &StudentRecord) -> AppResult<PathBuf> {
        let path = self.artifact_path(&student.student_id)?;
        fs::create_dir_all(&self.folder)?;
        render_png(&payload::encode(student), &path, self.scale)?;
        Ok(path)
    }
}

/// Encode arbitrary text as a QR symbol and save it as a greyscale PNG.
pub fn render_png(text: &str, path: &Path, scale: u32) -> AppResult<()> {
    let img = render_image(text, scale)?;
    img.save(path)?;
    Ok(())
}

pub fn render_image(text: &str, scale: u32) -> AppResult<GrayImage> {
    let code = QrCode::new(text.as_bytes()).map_err(|e| AppError::QrRender(e.to_string()))?;

    let width = code.width() as u32;
    let colors = code.to_colors();
    let scale = scale.max(1);
    let side = (width + 2 * QUIET_ZONE) * scale;

    let img = GrayImage::from_fn(side, side, |x, y| {
        let mx = x / scale;
        let my = y / scale;

        let inside = (QUIET_ZONE..QUIET_ZONE + width).contains(&mx)
            && (QUIET_ZONE..QUIET_ZONE + width).contains(&my);

        if inside {
            let idx = ((my - QUIET_ZONE) * width + (mx - QUIET_ZONE)) as usize;
            if colors[idx] == Color::Dark {
                return Luma([0u8]);
            }
        }
        Luma([255u8])
    });

    Ok(img)
}

/// Reject ids that would escape the output folder or produce an empty name.
pub fn is_safe_file_stem(id: &str) -> bool {
    !id.is_empty()
        && id != "."
        && id != ".."
        && !id.contains(['/', '\\'])
        && !id.chars().any(|c| c.is_control())
}
