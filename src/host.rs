//! Host capability interfaces
//!
//! The engine never reaches for platform globals. Everything the platform
//! supplies — the permission-gated camera/microphone handle, wall-clock
//! time, identifier generation — enters through the traits in this module,
//! and platform-specific collaborators implement them.
//!
//! Speech recognition is intentionally absent here: the recognizer pushes
//! `(text, is_final)` fragments into the orchestrator, so there is nothing
//! for the engine to call.

use crate::error::EngineError;
use chrono::Utc;
use std::cell::Cell;
use std::rc::Rc;
use uuid::Uuid;

/// Permission-gated source of a combined camera + microphone capture.
pub trait CaptureSource {
    /// Request the capture handle. Fails with
    /// [`EngineError::CaptureUnavailable`] when permission is denied or no
    /// device exists; acquisition is the only suspending operation in a
    /// session and it happens outside the engine.
    fn acquire(&mut self) -> Result<Box<dyn CaptureHandle>, EngineError>;
}

/// An acquired capture resource, exclusively owned by the orchestrator for
/// the session's duration.
pub trait CaptureHandle {
    /// Whether the video track is still live.
    fn video_active(&self) -> bool;
    /// Whether the audio track is still live.
    fn audio_active(&self) -> bool;
    /// Stop all media tracks. Must be safe to call more than once.
    fn release(&mut self);
}

/// Wall-clock milliseconds.
pub trait Clock {
    fn now_ms(&self) -> i64;
}

/// Unique identifier generation for sessions.
pub trait IdGenerator {
    fn generate(&self) -> String;
}

/// System wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Manually driven clock for deterministic replay and tests.
///
/// Clones share the same underlying instant, so a handle kept by the caller
/// keeps steering a clock that was handed to the engine.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now_ms: Rc<Cell<i64>>,
}

impl ManualClock {
    pub fn new(now_ms: i64) -> Self {
        Self {
            now_ms: Rc::new(Cell::new(now_ms)),
        }
    }

    pub fn set(&self, now_ms: i64) {
        self.now_ms.set(now_ms);
    }

    pub fn advance(&self, delta_ms: i64) {
        self.now_ms.set(self.now_ms.get() + delta_ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now_ms.get()
    }
}

/// UUID v4 identifiers
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Capture source that always grants, used by replay and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrantedCapture;

impl CaptureSource for GrantedCapture {
    fn acquire(&mut self) -> Result<Box<dyn CaptureHandle>, EngineError> {
        Ok(Box::new(GrantedHandle { released: false }))
    }
}

#[derive(Debug)]
struct GrantedHandle {
    released: bool,
}

impl CaptureHandle for GrantedHandle {
    fn video_active(&self) -> bool {
        !self.released
    }

    fn audio_active(&self) -> bool {
        !self.released
    }

    fn release(&mut self) {
        self.released = true;
    }
}
