//! Core types for the Mockmeter scoring engine
//!
//! This module defines the data structures that flow through a session:
//! live metric snapshots while the interview runs, per-question feedback at
//! each question boundary, and the persisted session record produced at the
//! end.
//!
//! Persisted types serialize with camelCase field names so records written by
//! the engine match the shape the hosting web app stores and displays.

use serde::{Deserialize, Serialize};

/// Lifecycle phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Idle,
    Running,
    Ended,
}

impl SessionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionPhase::Idle => "idle",
            SessionPhase::Running => "running",
            SessionPhase::Ended => "ended",
        }
    }
}

/// Speech-derived metrics, snapshotted at session end
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechMetrics {
    /// Clarity (0-100, decreases with filler density)
    pub clarity: u8,
    /// Speaking pace in words per minute
    pub pace_wpm: u32,
    /// Loudness (0-100)
    pub volume: u8,
    /// Running filler-word count
    pub filler_words: u32,
    /// Confidence (0-100, increases as filler density decreases)
    pub confidence: u8,
}

/// Video-derived metrics, snapshotted at session end
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyMetrics {
    /// Posture (0-100, from center-region luma)
    pub posture: u8,
    /// Head stability (0-100, higher is more stable)
    pub head_stability: u8,
    /// Gesture activity (0-100, higher is more movement)
    pub gesture_activity: u8,
    /// Engagement (0-100)
    pub engagement: u8,
}

impl Default for BodyMetrics {
    fn default() -> Self {
        // Mid-scale neutral readings until the analyzer has seen two frames.
        Self {
            posture: 50,
            head_stability: 50,
            gesture_activity: 50,
            engagement: 50,
        }
    }
}

/// Feedback recorded when a question boundary is crossed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionFeedback {
    /// Question text
    pub question: String,
    /// Transcript captured since the previous question boundary
    pub transcript: String,
    /// Per-question score (0-100)
    pub score: u8,
    /// Generated feedback summary
    pub feedback: String,
}

/// Persisted record of one completed session.
///
/// Immutable once appended to the [`SessionStore`](crate::store::SessionStore).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewResult {
    /// Unique session identifier
    pub id: String,
    /// Session start (unix epoch, milliseconds)
    pub started_at: i64,
    /// Session end (unix epoch, milliseconds)
    pub ended_at: i64,
    /// Whole-second session duration
    pub duration_sec: i64,
    /// Configured domain, echoed verbatim
    pub domain: String,
    /// Configured interview type, echoed verbatim
    #[serde(rename = "type")]
    pub interview_type: String,
    /// One slot per configured question index; unanswered slots stay empty
    pub questions: Vec<Option<QuestionFeedback>>,
    /// All finalized transcript text across the session
    pub transcript: String,
    /// Speech metrics at end time
    pub speech: SpeechMetrics,
    /// Body metrics at end time
    pub body: BodyMetrics,
    /// Weighted blend of the sub-metrics (0-100)
    pub overall_score: u8,
}

/// Live view of the current metrics while a session is running
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub posture: u8,
    pub head_stability: u8,
    pub gesture_activity: u8,
    pub engagement: u8,
    pub volume: u8,
    pub pace_wpm: u32,
    pub filler_count: u32,
    /// Finalized text plus any pending interim fragment
    pub transcript: String,
}
