//! Speech metrics tracking
//!
//! [`SpeechTracker`] consumes the stream of (interim, final) transcript
//! fragments the host's recognizer pushes during a session and maintains the
//! running speech metrics: accumulated finalized text, filler-word count,
//! word count, and words-per-minute pace.
//!
//! The tracker never talks to a recognition engine itself; fragments are
//! applied in arrival order by the caller. Interim fragments only replace the
//! interim buffer and never affect counts — a later final fragment for the
//! same utterance supersedes them.

use crate::transcript::refine;

/// Disfluency tokens counted against clarity.
///
/// Matching happens on lowercased whitespace-split tokens, so multi-word
/// entries only match when the recognizer emits them as a single token.
pub const FILLER_WORDS: &[&str] = &["um", "uh", "like", "you know", "erm", "hmm"];

/// Tracks running speech metrics across one question segment
#[derive(Debug, Clone, Default)]
pub struct SpeechTracker {
    finalized: String,
    interim: String,
    filler_count: u32,
    word_count: u32,
    started_at_ms: Option<i64>,
}

impl SpeechTracker {
    /// Create an idle tracker; counts stay zero until [`reset`](Self::reset)
    /// starts the clock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one recognizer fragment in arrival order.
    ///
    /// Final fragments are refined, appended to the finalized text, and
    /// tokenized for filler/word counting. Interim fragments replace the
    /// interim buffer only.
    pub fn on_fragment(&mut self, text: &str, is_final: bool) {
        if !is_final {
            self.interim = text.to_string();
            return;
        }

        let refined = refine(text);
        if self.finalized.is_empty() {
            self.finalized = refined.clone();
        } else {
            self.finalized.push(' ');
            self.finalized.push_str(&refined);
        }
        self.interim.clear();

        let tokens: Vec<String> = refined
            .to_lowercase()
            .split_whitespace()
            .map(|t| t.to_string())
            .collect();
        let fillers = tokens
            .iter()
            .filter(|t| FILLER_WORDS.contains(&t.as_str()))
            .count() as u32;
        self.filler_count += fillers;
        self.word_count += tokens.len() as u32;
    }

    /// Finalized text plus any pending interim fragment.
    pub fn current_transcript(&self) -> String {
        if self.interim.is_empty() {
            self.finalized.trim().to_string()
        } else {
            format!("{} {}", self.finalized, self.interim)
                .trim()
                .to_string()
        }
    }

    /// Finalized text only (what the session accumulator collects).
    pub fn finalized(&self) -> &str {
        &self.finalized
    }

    /// Running filler-word count since the last reset.
    pub fn filler_count(&self) -> u32 {
        self.filler_count
    }

    /// Running word count since the last reset.
    pub fn word_count(&self) -> u32 {
        self.word_count
    }

    /// Words per minute since the last reset, 0 while unstarted or when no
    /// time has elapsed.
    pub fn pace_wpm(&self, now_ms: i64) -> u32 {
        let Some(started) = self.started_at_ms else {
            return 0;
        };
        let minutes = (now_ms - started) as f64 / 60_000.0;
        if minutes <= 0.0 {
            return 0;
        }
        (self.word_count as f64 / minutes).round() as u32
    }

    /// Clear all accumulators and restart the clock at `now_ms`.
    pub fn reset(&mut self, now_ms: i64) {
        self.finalized.clear();
        self.interim.clear();
        self.filler_count = 0;
        self.word_count = 0;
        self.started_at_ms = Some(now_ms);
    }
}
