//! Scan session state machine.
//!
//! `ScanState` is a plain value: the host keeps it between calls and feeds
//! it events. Every transition returns the new state together with the side
//! effects the host has to carry out, in order. Nothing here touches the
//! camera or the database.

use crate::errors::{CameraError, DecodeError};
use crate::models::StudentIdentity;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanState {
    /// Looking for a badge. The camera is held only while `camera_on`.
    Scanning { camera_on: bool },
    /// A badge was read; the camera is off until the operator decides.
    PendingConfirmation { candidate: StudentIdentity },
}

impl Default for ScanState {
    fn default() -> Self {
        ScanState::Scanning { camera_on: false }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    /// Operator switched scanning on or off.
    ToggleCamera(bool),
    /// First usable QR symbol of a frame, parsed into an identity.
    Detected(StudentIdentity),
    /// No symbol of the frame was usable; the first one did not parse.
    Malformed(DecodeError),
    /// No symbol of the frame was usable; the first one is not in the
    /// registry (registry check enabled).
    Unregistered(String),
    /// Camera could not be opened or read.
    CameraFailed(CameraError),
    Confirm,
    Rescan,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    AcquireCamera,
    ReleaseCamera,
    RecordAttendance(StudentIdentity),
    Warn(ScanWarning),
}

/// Recoverable conditions reported to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanWarning {
    Malformed(DecodeError),
    Unregistered(String),
    CameraStopped(CameraError),
}

impl fmt::Display for ScanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanWarning::Malformed(e) => write!(f, "{}", e),
            ScanWarning::Unregistered(id) => write!(f, "Student '{}' is not registered", id),
            ScanWarning::CameraStopped(e) => write!(f, "{} (scanning stopped)", e),
        }
    }
}

impl ScanState {
    pub fn camera_on(&self) -> bool {
        matches!(self, ScanState::Scanning { camera_on: true })
    }

    pub fn candidate(&self) -> Option<&StudentIdentity> {
        match self {
            ScanState::PendingConfirmation { candidate } => Some(candidate),
            ScanState::Scanning { .. } => None,
        }
    }

    /// Apply one event. Events that make no sense in the current state are
    /// ignored: the state comes back unchanged with no effects.
    pub fn transition(self, event: ScanEvent) -> (ScanState, Vec<Effect>) {
        use ScanState::{PendingConfirmation, Scanning};

        match (self, event) {
            (Scanning { camera_on: false }, ScanEvent::ToggleCamera(true)) => {
                (Scanning { camera_on: true }, vec![Effect::AcquireCamera])
            }
            (Scanning { camera_on: true }, ScanEvent::ToggleCamera(false)) => {
                (Scanning { camera_on: false }, vec![Effect::ReleaseCamera])
            }

            (Scanning { camera_on: true }, ScanEvent::Detected(candidate)) => (
                PendingConfirmation { candidate },
                vec![Effect::ReleaseCamera],
            ),
            (state @ Scanning { camera_on: true }, ScanEvent::Malformed(e)) => {
                (state, vec![Effect::Warn(ScanWarning::Malformed(e))])
            }
            (state @ Scanning { camera_on: true }, ScanEvent::Unregistered(id)) => {
                (state, vec![Effect::Warn(ScanWarning::Unregistered(id))])
            }
            (Scanning { camera_on: true }, ScanEvent::CameraFailed(e)) => (
                Scanning { camera_on: false },
                vec![
                    Effect::ReleaseCamera,
                    Effect::Warn(ScanWarning::CameraStopped(e)),
                ],
            ),

            // The ledger write comes first so a failed write leaves the
            // candidate in place.
            (PendingConfirmation { candidate }, ScanEvent::Confirm) => (
                Scanning { camera_on: true },
                vec![Effect::RecordAttendance(candidate), Effect::AcquireCamera],
            ),
            (PendingConfirmation { .. }, ScanEvent::Rescan) => {
                (Scanning { camera_on: true }, vec![Effect::AcquireCamera])
            }

            (state, _) => (state, Vec::new()),
        }
    }
}
