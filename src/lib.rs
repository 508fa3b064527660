//! Mockmeter - On-device scoring engine for live mock-interview sessions
//!
//! Mockmeter turns the raw media streams of a practice interview into
//! heuristic engagement metrics through a reactive pipeline: video frames →
//! motion/posture analysis, audio buffers → loudness, recognizer fragments →
//! refinement → speech metrics, all folded into one immutable session record
//! at interview end.
//!
//! ## Modules
//!
//! - **Analyzers**: [`frame`], [`audio`], [`speech`] derive metrics from the
//!   three producer streams; each is a pure state transition the host drives
//! - **Session**: [`session`] runs the Idle → Running → Ended lifecycle and
//!   [`store`] keeps the completed records, most recent first
//! - **Host seam**: [`host`] declares the capability interfaces the platform
//!   implements; [`context`] is the owned application object wiring it all

pub mod audio;
pub mod context;
pub mod error;
pub mod frame;
pub mod host;
pub mod questions;
pub mod replay;
pub mod session;
pub mod speech;
pub mod store;
pub mod transcript;
pub mod types;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use context::EngineContext;
pub use error::EngineError;
pub use session::{SessionConfig, SessionOrchestrator};
pub use store::SessionStore;
pub use types::{
    BodyMetrics, InterviewResult, MetricsSnapshot, QuestionFeedback, SessionPhase, SpeechMetrics,
};

/// Engine version embedded in the CLI and FFI surfaces
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name reported by the CLI
pub const PRODUCER_NAME: &str = "mockmeter";
