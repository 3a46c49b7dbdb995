//! Drives a [`ScanState`] against a real camera, detector and ledger.
//!
//! The host calls [`Scanner::poll`] at its own cadence and the operator
//! actions ([`Scanner::confirm`], [`Scanner::rescan`], [`Scanner::stop`])
//! whenever they happen. The camera stream is held only while the state is
//! `Scanning { camera_on: true }` and is released exactly once on the way out.

use crate::camera::{Camera, Frame, FrameSource};
use crate::config::IdentityCheck;
use crate::core::ledger::LedgerLogic;
use crate::core::registry::RegistryLogic;
use crate::core::session::{Effect, ScanEvent, ScanState, ScanWarning};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult, CameraError};
use crate::models::{AttendanceEvent, NewAttendance, StudentIdentity};
use crate::qr::{QrDetector, payload};
use std::collections::VecDeque;

/// Result of one [`Scanner::poll`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Scanning is switched off; nothing was pulled.
    Idle,
    /// The camera had no frame ready this tick.
    NoFrame,
    /// A frame was pulled and carried no usable QR code.
    NoDetection { frame: u64 },
    /// A QR code was read but rejected; still scanning.
    Warning(ScanWarning),
    /// A student was detected; the camera has been released.
    Detected(StudentIdentity),
    /// Still waiting for confirm/rescan from an earlier detection.
    AwaitingConfirmation(StudentIdentity),
    /// The camera failed; scanning ended and the device was released.
    CameraStopped(CameraError),
}

/// What an operator action produced.
#[derive(Debug, Default)]
pub struct ActionReport {
    pub recorded: Option<AttendanceEvent>,
    pub warnings: Vec<ScanWarning>,
}

pub struct Scanner<'p, C: Camera, D: QrDetector> {
    pool: &'p DbPool,
    camera: C,
    detector: D,
    identity_check: IdentityCheck,
    state: ScanState,
    stream: Option<C::Stream>,
    last_frame: Option<Frame>,
}

impl<'p, C: Camera, D: QrDetector> Scanner<'p, C, D> {
    pub fn new(pool: &'p DbPool, camera: C, detector: D, identity_check: IdentityCheck) -> Self {
        Self {
            pool,
            camera,
            detector,
            identity_check,
            state: ScanState::default(),
            stream: None,
            last_frame: None,
        }
    }

    pub fn state(&self) -> &ScanState {
        &self.state
    }

    /// True while a camera stream is held.
    pub fn camera_active(&self) -> bool {
        self.stream.is_some()
    }

    /// Most recent frame pulled from the camera (live preview).
    pub fn last_frame(&self) -> Option<&Frame> {
        self.last_frame.as_ref()
    }

    /// Switch scanning on. A camera that cannot be opened is reported as a
    /// warning and leaves scanning off.
    pub fn start(&mut self) -> AppResult<ActionReport> {
        self.dispatch(ScanEvent::ToggleCamera(true))
    }

    /// Switch scanning off and release the camera.
    pub fn stop(&mut self) -> AppResult<ActionReport> {
        self.dispatch(ScanEvent::ToggleCamera(false))
    }

    /// Pull at most one frame and advance the session.
    pub fn poll(&mut self) -> AppResult<ScanOutcome> {
        match &self.state {
            ScanState::PendingConfirmation { candidate } => {
                return Ok(ScanOutcome::AwaitingConfirmation(candidate.clone()));
            }
            ScanState::Scanning { camera_on: false } => return Ok(ScanOutcome::Idle),
            ScanState::Scanning { camera_on: true } => {}
        }

        let pulled = match self.stream.as_mut() {
            Some(stream) => stream.next_frame(),
            None => Err(CameraError::Unavailable("camera is not open".to_string())),
        };

        let frame = match pulled {
            Ok(Some(frame)) => frame,
            Ok(None) => return Ok(ScanOutcome::NoFrame),
            Err(e) => {
                self.dispatch(ScanEvent::CameraFailed(e.clone()))?;
                return Ok(ScanOutcome::CameraStopped(e));
            }
        };

        let index = frame.index;
        let texts = self.detector.detect(&frame);
        self.last_frame = Some(frame);

        // The first usable symbol wins; the rest of the frame is ignored.
        // A rejection is reported only when nothing in the frame is usable.
        let mut rejected = None;
        let mut accepted = None;
        for text in &texts {
            match self.classify(text)? {
                ev @ ScanEvent::Detected(_) => {
                    accepted = Some(ev);
                    break;
                }
                other => {
                    rejected.get_or_insert(other);
                }
            }
        }

        let Some(event) = accepted.or(rejected) else {
            return Ok(ScanOutcome::NoDetection { frame: index });
        };

        let report = self.dispatch(event)?;

        if let Some(candidate) = self.state.candidate() {
            return Ok(ScanOutcome::Detected(candidate.clone()));
        }

        Ok(report
            .warnings
            .into_iter()
            .next()
            .map(ScanOutcome::Warning)
            .unwrap_or(ScanOutcome::NoDetection { frame: index }))
    }

    /// Record the pending candidate as present and resume scanning.
    ///
    /// If the ledger write fails the candidate stays pending, so the call can
    /// be retried.
    pub fn confirm(&mut self) -> AppResult<ActionReport> {
        if self.state.candidate().is_none() {
            return Err(AppError::NoCandidate);
        }
        self.dispatch(ScanEvent::Confirm)
    }

    /// Drop the pending candidate without writing anything and resume scanning.
    pub fn rescan(&mut self) -> AppResult<ActionReport> {
        if self.state.candidate().is_none() {
            return Err(AppError::NoCandidate);
        }
        self.dispatch(ScanEvent::Rescan)
    }

    fn classify(&self, text: &str) -> AppResult<ScanEvent> {
        let identity = match payload::decode(text) {
            Ok(identity) => identity,
            Err(e) => return Ok(ScanEvent::Malformed(e)),
        };

        if self.identity_check == IdentityCheck::Registry
            && !RegistryLogic::contains(self.pool, &identity.student_id)?
        {
            return Ok(ScanEvent::Unregistered(identity.student_id));
        }

        Ok(ScanEvent::Detected(identity))
    }

    /// Run one transition and carry out its effects in order. The new state
    /// is committed only once every effect went through.
    fn dispatch(&mut self, event: ScanEvent) -> AppResult<ActionReport> {
        let (mut next, effects) = self.state.clone().transition(event);
        let mut queue: VecDeque<Effect> = effects.into();
        let mut report = ActionReport::default();

        while let Some(effect) = queue.pop_front() {
            match effect {
                Effect::RecordAttendance(identity) => {
                    let ev = LedgerLogic::append(self.pool, &NewAttendance::present(&identity))?;
                    report.recorded = Some(ev);
                }
                Effect::AcquireCamera => {
                    if let Err(e) = self.acquire_camera() {
                        let (after, more) = next.transition(ScanEvent::CameraFailed(e));
                        next = after;
                        queue.extend(more);
                    }
                }
                Effect::ReleaseCamera => self.release_camera(),
                Effect::Warn(w) => report.warnings.push(w),
            }
        }

        self.state = next;
        Ok(report)
    }

    fn acquire_camera(&mut self) -> Result<(), CameraError> {
        if self.stream.is_none() {
            self.stream = Some(self.camera.open()?);
        }
        Ok(())
    }

    fn release_camera(&mut self) {
        if let Some(stream) = self.stream.take() {
            stream.release();
        }
    }
}

impl<C: Camera, D: QrDetector> Drop for Scanner<'_, C, D> {
    fn drop(&mut self) {
        self.release_camera();
    }
}
