//! Session orchestration
//!
//! [`SessionOrchestrator`] drives one interview session end-to-end through
//! the **Idle → Running → Ended** lifecycle: it owns the capture handle, the
//! three analyzers, the question pointer, and the per-question feedback
//! slots, and at `stop` folds everything into one immutable
//! [`InterviewResult`].
//!
//! Time and identity enter as explicit parameters (`now_ms`, a generated
//! id), so every operation is a plain state transition the host's
//! single-threaded scheduler serializes. The capture resource is released on
//! every exit path from **Running**, including drop.

use crate::audio::LevelMeter;
use crate::error::EngineError;
use crate::frame::{FrameAnalyzer, VideoFrame};
use crate::host::{CaptureHandle, CaptureSource};
use crate::questions;
use crate::speech::SpeechTracker;
use crate::types::{
    BodyMetrics, InterviewResult, MetricsSnapshot, QuestionFeedback, SessionPhase, SpeechMetrics,
};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

/// Session setup, validated once at construction and never mid-session.
///
/// `difficulty`, `mode`, and `time_per_question_sec` are stored and echoed to
/// the host for display; nothing in the engine enforces them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionConfig {
    pub domain: String,
    #[serde(rename = "type")]
    pub interview_type: String,
    pub question_count: usize,
    pub difficulty: String,
    pub mode: String,
    pub time_per_question_sec: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            domain: questions::DEFAULT_DOMAIN.to_string(),
            interview_type: "technical".to_string(),
            question_count: 3,
            difficulty: "Mixed".to_string(),
            mode: "practice".to_string(),
            time_per_question_sec: 120,
        }
    }
}

/// Drives one interview session from configuration to persisted record.
pub struct SessionOrchestrator {
    config: SessionConfig,
    questions: Vec<String>,
    phase: SessionPhase,
    question_index: usize,
    feedback: Vec<Option<QuestionFeedback>>,
    session_transcript: String,
    speech: SpeechTracker,
    frames: FrameAnalyzer,
    volume: u8,
    started_at_ms: Option<i64>,
    capture: Option<Box<dyn CaptureHandle>>,
}

impl SessionOrchestrator {
    /// Validate the configuration and build an **Idle** orchestrator.
    ///
    /// An unresolvable domain silently falls back to the default bank entry
    /// and the question count is clamped to the resolved list's length.
    pub fn new(config: SessionConfig) -> Self {
        let resolved = questions::resolve_domain(&config.domain);
        if resolved != config.domain {
            debug!(
                "domain {:?} resolved to {:?} for question selection",
                config.domain, resolved
            );
        }
        let question_list = questions::select_questions(&config.domain, config.question_count);
        let slots = question_list.len();

        Self {
            config,
            questions: question_list,
            phase: SessionPhase::Idle,
            question_index: 0,
            feedback: vec![None; slots],
            session_transcript: String::new(),
            speech: SpeechTracker::new(),
            frames: FrameAnalyzer::new(),
            volume: 0,
            started_at_ms: None,
            capture: None,
        }
    }

    /// Acquire capture and transition **Idle → Running**.
    ///
    /// A capture failure leaves the orchestrator **Idle** with no partial
    /// state; the error carries the user-facing reason.
    pub fn start(
        &mut self,
        source: &mut dyn CaptureSource,
        now_ms: i64,
    ) -> Result<(), EngineError> {
        if self.phase != SessionPhase::Idle {
            return Err(EngineError::InvalidTransition {
                op: "start",
                phase: self.phase.as_str(),
            });
        }

        let handle = source.acquire().inspect_err(|e| {
            warn!("capture acquisition failed: {}", e);
        })?;

        self.capture = Some(handle);
        self.speech.reset(now_ms);
        self.started_at_ms = Some(now_ms);
        self.phase = SessionPhase::Running;
        info!(
            "session started: domain={:?} questions={}",
            self.config.domain,
            self.questions.len()
        );
        Ok(())
    }

    /// Feed the next captured video frame. Ignored outside **Running**.
    pub fn on_frame(&mut self, frame: &VideoFrame) {
        if self.phase == SessionPhase::Running {
            self.frames.on_frame(frame);
        }
    }

    /// Feed the next time-domain audio buffer. Ignored outside **Running**.
    pub fn on_audio_buffer(&mut self, samples: &[u8]) {
        if self.phase == SessionPhase::Running {
            self.volume = LevelMeter::volume(samples);
        }
    }

    /// Feed one recognizer fragment in arrival order. Ignored outside
    /// **Running**.
    pub fn on_fragment(&mut self, text: &str, is_final: bool) {
        if self.phase == SessionPhase::Running {
            self.speech.on_fragment(text, is_final);
        }
    }

    /// Record a transient recognizer error. Tracker state is untouched and
    /// the session keeps running.
    pub fn on_recognition_error(&self, reason: &str) {
        warn!("speech recognition error (session continues): {}", reason);
    }

    /// Finalize the current question and advance.
    ///
    /// Stores (or overwrites) the feedback slot for the current question,
    /// appends the finalized transcript to the session accumulator, resets
    /// the per-question speech metrics, and advances the pointer unless
    /// already on the last question.
    pub fn next(&mut self, now_ms: i64) -> Result<(), EngineError> {
        self.require_running("next")?;

        let clarity = clarity_score(self.speech.filler_count());
        let pace = self.speech.pace_wpm(now_ms);
        let score = question_score(clarity, pace);
        self.feedback[self.question_index] = Some(QuestionFeedback {
            question: self.questions[self.question_index].clone(),
            transcript: self.speech.current_transcript(),
            score,
            feedback: format!(
                "Clarity {}%. Pace {} wpm. Reduce filler words.",
                clarity as u8, pace
            ),
        });

        self.append_session_transcript();
        self.speech.reset(now_ms);
        if self.question_index < self.questions.len() - 1 {
            self.question_index += 1;
        }
        Ok(())
    }

    /// Move the question pointer back one step.
    ///
    /// When the current slot has no feedback yet, a zero-score placeholder is
    /// stored first so the slot is not lost; an existing slot is never
    /// overwritten. Speech accumulators are left running.
    pub fn prev(&mut self, _now_ms: i64) -> Result<(), EngineError> {
        self.require_running("prev")?;

        if self.question_index == 0 {
            return Ok(());
        }
        if self.feedback[self.question_index].is_none() {
            self.feedback[self.question_index] = Some(QuestionFeedback {
                question: self.questions[self.question_index].clone(),
                transcript: self.speech.current_transcript(),
                score: 0,
                feedback: String::new(),
            });
        }
        self.question_index -= 1;
        Ok(())
    }

    /// Clear the per-question speech accumulators without crossing a
    /// question boundary. Calling it twice equals calling it once.
    pub fn reset_speech_only(&mut self, now_ms: i64) -> Result<(), EngineError> {
        self.require_running("reset speech")?;
        self.speech.reset(now_ms);
        Ok(())
    }

    /// Halt capture and transition **Running → Ended**, producing the
    /// immutable session record.
    pub fn stop(&mut self, now_ms: i64, id: String) -> Result<InterviewResult, EngineError> {
        self.require_running("stop")?;
        self.release_capture();

        let started_at = self.started_at_ms.unwrap_or(now_ms);
        let ended_at = now_ms;
        let duration_sec = (((ended_at - started_at) as f64) / 1000.0).round() as i64;

        let filler_count = self.speech.filler_count();
        let pace = self.speech.pace_wpm(now_ms);
        let clarity = clarity_score(filler_count);
        let confidence = confidence_score(filler_count);
        let body = self.frames.metrics();
        let overall = overall_score(clarity, confidence, &body, pace);

        if self.feedback[self.question_index].is_none() {
            let score = question_score(clarity, pace);
            self.feedback[self.question_index] = Some(QuestionFeedback {
                question: self.questions[self.question_index].clone(),
                transcript: self.speech.current_transcript(),
                score,
                feedback: format!("Clarity {}%. Pace {} wpm.", clarity as u8, pace),
            });
        }
        self.append_session_transcript();

        self.phase = SessionPhase::Ended;
        info!(
            "session ended: duration={}s overall={}",
            duration_sec, overall
        );

        Ok(InterviewResult {
            id,
            started_at,
            ended_at,
            duration_sec,
            domain: self.config.domain.clone(),
            interview_type: self.config.interview_type.clone(),
            questions: self.feedback.clone(),
            transcript: self.session_transcript.clone(),
            speech: SpeechMetrics {
                clarity: clarity as u8,
                pace_wpm: pace,
                volume: self.volume,
                filler_words: filler_count,
                confidence: confidence as u8,
            },
            body,
            overall_score: overall,
        })
    }

    /// Live metrics view for the host UI.
    pub fn snapshot(&self, now_ms: i64) -> MetricsSnapshot {
        let body = self.frames.metrics();
        MetricsSnapshot {
            posture: body.posture,
            head_stability: body.head_stability,
            gesture_activity: body.gesture_activity,
            engagement: body.engagement,
            volume: self.volume,
            pace_wpm: self.speech.pace_wpm(now_ms),
            filler_count: self.speech.filler_count(),
            transcript: self.speech.current_transcript(),
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    pub fn question_index(&self) -> usize {
        self.question_index
    }

    pub fn current_question(&self) -> &str {
        &self.questions[self.question_index]
    }

    /// Whether the capture's video track is live.
    pub fn camera_active(&self) -> bool {
        self.capture.as_ref().is_some_and(|c| c.video_active())
    }

    /// Whether the capture's audio track is live.
    pub fn microphone_active(&self) -> bool {
        self.capture.as_ref().is_some_and(|c| c.audio_active())
    }

    fn require_running(&self, op: &'static str) -> Result<(), EngineError> {
        if self.phase != SessionPhase::Running {
            return Err(EngineError::InvalidTransition {
                op,
                phase: self.phase.as_str(),
            });
        }
        Ok(())
    }

    fn append_session_transcript(&mut self) {
        let finalized = self.speech.finalized().trim();
        if finalized.is_empty() {
            return;
        }
        if !self.session_transcript.is_empty() {
            self.session_transcript.push(' ');
        }
        self.session_transcript.push_str(finalized);
    }

    fn release_capture(&mut self) {
        if let Some(mut handle) = self.capture.take() {
            handle.release();
            debug!("capture released");
        }
    }
}

impl Drop for SessionOrchestrator {
    // The host may tear the session down without an explicit stop (page
    // navigation); the capture tracks still have to end.
    fn drop(&mut self) {
        self.release_capture();
    }
}

/// Clarity, decreasing with filler density
fn clarity_score(filler_count: u32) -> f64 {
    (100.0 - filler_count as f64 * 3.0).clamp(0.0, 100.0)
}

/// Confidence, increasing as filler density decreases
fn confidence_score(filler_count: u32) -> f64 {
    (60.0 + ((100.0 - filler_count as f64) / 2.0).floor()).clamp(0.0, 100.0)
}

/// Per-question score: clarity blended with capped pace
fn question_score(clarity: f64, pace_wpm: u32) -> u8 {
    ((clarity + pace_wpm.min(100) as f64) / 2.0).round() as u8
}

/// Weighted blend of the end-of-session sub-metrics, clamped to 0-100
fn overall_score(clarity: f64, confidence: f64, body: &BodyMetrics, pace_wpm: u32) -> u8 {
    let pace_term = 100.0 - (80.0 - pace_wpm as f64).abs();
    let blended = (clarity
        + confidence
        + body.posture as f64
        + body.head_stability as f64
        + pace_term)
        / 5.0;
    blended.round().clamp(0.0, 100.0) as u8
}
