//! Deterministic session replay
//!
//! Replays a recorded event stream — frames, audio buffers, recognizer
//! fragments, and question navigation, each stamped with a session-relative
//! time — through a complete session and returns the resulting
//! [`InterviewResult`]. The CLI and the FFI surface are thin wrappers over
//! this module, and it doubles as the end-to-end test harness.

use crate::error::EngineError;
use crate::frame::VideoFrame;
use crate::host::GrantedCapture;
use crate::session::{SessionConfig, SessionOrchestrator};
use crate::types::InterviewResult;
use serde::{Deserialize, Serialize};

/// One recorded session event.
///
/// `at_ms` is milliseconds since session start; events must be recorded in
/// arrival order, which is the order the live producers fed the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ReplayEvent {
    /// One captured video frame (RGBA8)
    Frame {
        at_ms: i64,
        width: usize,
        height: usize,
        pixels: Vec<u8>,
    },
    /// One time-domain audio buffer (bytes, 128 is silence)
    Audio { at_ms: i64, samples: Vec<u8> },
    /// One recognizer fragment
    Fragment {
        at_ms: i64,
        text: String,
        is_final: bool,
    },
    /// The user advanced to the next question
    Next { at_ms: i64 },
    /// The user went back one question
    Prev { at_ms: i64 },
}

impl ReplayEvent {
    fn at_ms(&self) -> i64 {
        match self {
            ReplayEvent::Frame { at_ms, .. }
            | ReplayEvent::Audio { at_ms, .. }
            | ReplayEvent::Fragment { at_ms, .. }
            | ReplayEvent::Next { at_ms }
            | ReplayEvent::Prev { at_ms } => *at_ms,
        }
    }
}

/// Parse NDJSON (newline-delimited JSON) replay events.
pub fn parse_ndjson(ndjson: &str) -> Result<Vec<ReplayEvent>, EngineError> {
    let mut events = Vec::new();
    for (line_num, line) in ndjson.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match serde_json::from_str::<ReplayEvent>(trimmed) {
            Ok(event) => events.push(event),
            Err(e) => {
                return Err(EngineError::ParseError(format!(
                    "Failed to parse line {}: {}",
                    line_num + 1,
                    e
                )));
            }
        }
    }
    Ok(events)
}

/// Run a full session over a recorded event stream.
///
/// The session starts at `started_at_ms` (wall-clock) and stops at
/// `started_at_ms + duration`, where the duration is the last event's
/// `at_ms` (or zero for an empty stream).
pub fn run_replay(
    config: SessionConfig,
    started_at_ms: i64,
    events: &[ReplayEvent],
    id: String,
) -> Result<InterviewResult, EngineError> {
    let mut session = SessionOrchestrator::new(config);
    session.start(&mut GrantedCapture, started_at_ms)?;

    let mut last_at = 0;
    for event in events {
        let now = started_at_ms + event.at_ms();
        last_at = last_at.max(event.at_ms());
        match event {
            ReplayEvent::Frame {
                width,
                height,
                pixels,
                ..
            } => {
                let frame = VideoFrame::new(*width, *height, pixels.clone()).ok_or_else(|| {
                    EngineError::ParseError(format!(
                        "frame buffer does not match {}x{} RGBA dimensions",
                        width, height
                    ))
                })?;
                session.on_frame(&frame);
            }
            ReplayEvent::Audio { samples, .. } => session.on_audio_buffer(samples),
            ReplayEvent::Fragment { text, is_final, .. } => session.on_fragment(text, *is_final),
            ReplayEvent::Next { .. } => session.next(now)?,
            ReplayEvent::Prev { .. } => session.prev(now)?,
        }
    }

    session.stop(started_at_ms + last_at, id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_events_ndjson() -> &'static str {
        r#"{"event":"fragment","at_ms":1000,"text":"um this is a test","is_final":true}
{"event":"audio","at_ms":1200,"samples":[192,64,192,64]}
{"event":"next","at_ms":30000}
{"event":"fragment","at_ms":31000,"text":"second answer","is_final":true}
{"event":"next","at_ms":60000}
{"event":"fragment","at_ms":61000,"text":"third answer","is_final":true}"#
    }

    #[test]
    fn test_parse_ndjson() {
        let events = parse_ndjson(sample_events_ndjson()).unwrap();
        assert_eq!(events.len(), 6);
        assert!(matches!(events[0], ReplayEvent::Fragment { .. }));
        assert!(matches!(events[2], ReplayEvent::Next { .. }));
    }

    #[test]
    fn test_parse_ndjson_skips_blank_lines() {
        let events = parse_ndjson("\n{\"event\":\"next\",\"at_ms\":5}\n\n").unwrap();
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_parse_ndjson_reports_line_numbers() {
        let err = parse_ndjson("{\"event\":\"next\",\"at_ms\":1}\nnot json").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("line 2"), "unexpected error: {}", message);
    }

    #[test]
    fn test_replay_produces_complete_result() {
        let events = parse_ndjson(sample_events_ndjson()).unwrap();
        let result = run_replay(
            SessionConfig::default(),
            1_000_000,
            &events,
            "replay-1".to_string(),
        )
        .unwrap();

        assert_eq!(result.id, "replay-1");
        assert_eq!(result.started_at, 1_000_000);
        assert_eq!(result.ended_at, 1_061_000);
        assert_eq!(result.duration_sec, 61);
        assert_eq!(result.questions.len(), 3);
        assert!(result.questions.iter().all(|q| q.is_some()));
        assert_eq!(result.speech.filler_words, 0);
        assert_eq!(
            result.transcript,
            "um this is a test. second answer. third answer."
        );
        assert_eq!(result.speech.volume, 70);
    }

    #[test]
    fn test_replay_empty_stream_still_ends_cleanly() {
        let result = run_replay(SessionConfig::default(), 500, &[], "empty".to_string()).unwrap();
        assert_eq!(result.duration_sec, 0);
        assert_eq!(result.questions.len(), 3);
        assert!(result.questions[0].is_some());
        assert!(result.questions[1].is_none());
    }

    #[test]
    fn test_replay_rejects_bad_frame_geometry() {
        let events = vec![ReplayEvent::Frame {
            at_ms: 0,
            width: 4,
            height: 4,
            pixels: vec![0; 7],
        }];
        let err = run_replay(SessionConfig::default(), 0, &events, "x".to_string()).unwrap_err();
        assert!(matches!(err, EngineError::ParseError(_)));
    }
}
