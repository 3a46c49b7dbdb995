//! Camera seam used by the scanner.
//!
//! A [`Camera`] is the device: opening it yields a [`FrameSource`], which is
//! the exclusive handle held while scanning. Releasing the handle consumes it,
//! so a handle can only be released once.

pub mod directory;

pub use directory::DirectoryCamera;

use crate::errors::CameraError;
use image::GrayImage;

/// One greyscale frame pulled from a camera.
#[derive(Debug, Clone)]
pub struct Frame {
    pub index: u64,
    pub image: GrayImage,
}

pub trait Camera {
    type Stream: FrameSource;

    fn open(&mut self) -> Result<Self::Stream, CameraError>;
}

pub trait FrameSource {
    /// Pull the next frame without blocking indefinitely.
    /// `Ok(None)` means no frame is ready this tick; an error ends scanning.
    fn next_frame(&mut self) -> Result<Option<Frame>, CameraError>;

    fn release(self);
}
