pub mod detect;
pub mod payload;
pub mod render;

pub use detect::{QrDetector, RqrrDetector};
pub use payload::{decode, encode};
pub use render::QrRenderer;
