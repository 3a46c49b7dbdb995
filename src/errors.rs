//! Unified application error type.
//! All modules (db, core, qr, camera, cli) return AppError to keep the error
//! handling consistent. The scan workflow has its own small error enums so
//! callers can match on the recoverable cases before they are flattened.

use std::io;
use thiserror::Error;

/// QR payload could not be turned into a student identity.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("QR format invalid: expected ID|Name|Mobile, got {fields} field(s)")]
    MalformedPayload { fields: usize },
}

/// Spreadsheet import rejected before anything was written.
#[derive(Error, Debug)]
pub enum RegistrationError {
    #[error("Missing required column '{0}'")]
    MissingColumn(String),

    #[error("Row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },

    #[error("Spreadsheet read error: {0}")]
    Read(#[from] csv::Error),

    #[error("Workbook read error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("Workbook has no data: {0}")]
    EmptyWorkbook(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CameraError {
    #[error("Camera unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store write failed: {0}")]
    WriteFailed(#[source] rusqlite::Error),
}

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Student not found: {0}")]
    StudentNotFound(String),

    // ---------------------------
    // Scan workflow
    // ---------------------------
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Camera(#[from] CameraError),

    #[error("No detected student is waiting for confirmation")]
    NoCandidate,

    #[error("QR generation failed: {0}")]
    QrRender(String),

    // ---------------------------
    // Registration
    // ---------------------------
    #[error("Registration failed: {0}")]
    Registration(#[from] RegistrationError),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration: {0}")]
    ConfigLoad(String),

    #[error("Failed to save configuration: {0}")]
    ConfigSave(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),
}

pub type AppResult<T> = Result<T, AppError>;
