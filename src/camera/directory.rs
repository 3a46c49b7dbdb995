//! Replays a folder of still images as a camera feed.
//!
//! Frames are served in file-name order. The read position survives
//! release/reopen, so a rescan continues with the next image instead of
//! detecting the same badge again.

use super::{Camera, Frame, FrameSource};
use crate::errors::CameraError;
use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

const FRAME_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];

pub struct DirectoryCamera {
    dir: PathBuf,
    cursor: Rc<Cell<usize>>,
}

impl DirectoryCamera {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cursor: Rc::new(Cell::new(0)),
        }
    }

    /// Number of frames already consumed.
    pub fn position(&self) -> usize {
        self.cursor.get()
    }
}

impl Camera for DirectoryCamera {
    type Stream = DirectoryStream;

    fn open(&mut self) -> Result<DirectoryStream, CameraError> {
        let frames = list_frames(&self.dir)?;

        Ok(DirectoryStream {
            frames,
            cursor: Rc::clone(&self.cursor),
        })
    }
}

pub struct DirectoryStream {
    frames: Vec<PathBuf>,
    cursor: Rc<Cell<usize>>,
}

impl FrameSource for DirectoryStream {
    fn next_frame(&mut self) -> Result<Option<Frame>, CameraError> {
        let idx = self.cursor.get();

        let path = self
            .frames
            .get(idx)
            .ok_or_else(|| CameraError::Unavailable("frame stream ended".to_string()))?;

        self.cursor.set(idx + 1);

        let image = image::open(path)
            .map_err(|e| {
                CameraError::Unavailable(format!("cannot read frame {}: {e}", path.display()))
            })?
            .to_luma8();

        Ok(Some(Frame {
            index: idx as u64,
            image,
        }))
    }

    fn release(self) {}
}

fn list_frames(dir: &Path) -> Result<Vec<PathBuf>, CameraError> {
    let entries = fs::read_dir(dir)
        .map_err(|e| CameraError::Unavailable(format!("{}: {e}", dir.display())))?;

    let mut frames: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && has_frame_extension(p))
        .collect();

    frames.sort();
    Ok(frames)
}

fn has_frame_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| FRAME_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}
