//! Engine context
//!
//! [`EngineContext`] is the one explicitly-owned application object a host
//! constructs at startup and passes to every consumer: it owns the clock,
//! the identifier generator, the session store, and the single active
//! session. There is no ambient singleton anywhere in the crate — anything
//! that needs the engine holds a handle to this context.
//!
//! All three media producers and the UI call into the same `&mut` context,
//! so the host's cooperative scheduler serializes every mutation.

use crate::error::EngineError;
use crate::frame::VideoFrame;
use crate::host::{CaptureSource, Clock, IdGenerator, SystemClock, UuidGenerator};
use crate::session::{SessionConfig, SessionOrchestrator};
use crate::store::SessionStore;
use crate::types::{InterviewResult, MetricsSnapshot, SessionPhase};

/// Owns the engine's collaborators, the session store, and the active
/// session.
pub struct EngineContext {
    clock: Box<dyn Clock>,
    ids: Box<dyn IdGenerator>,
    store: SessionStore,
    active: Option<SessionOrchestrator>,
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineContext {
    /// Context with the system clock and UUID identifiers.
    pub fn new() -> Self {
        Self::with_collaborators(Box::new(SystemClock), Box::new(UuidGenerator))
    }

    /// Context with explicit collaborators (deterministic clocks in tests,
    /// host-supplied id schemes).
    pub fn with_collaborators(clock: Box<dyn Clock>, ids: Box<dyn IdGenerator>) -> Self {
        Self {
            clock,
            ids,
            store: SessionStore::new(),
            active: None,
        }
    }

    /// Replace the store wholesale, e.g. with records loaded from an
    /// injected persistence backend at startup.
    pub fn with_store(mut self, store: SessionStore) -> Self {
        self.store = store;
        self
    }

    /// Configure and start a new session.
    ///
    /// Fails when a session is already running or when capture acquisition
    /// is denied; in both cases no partial session state is left behind.
    pub fn begin_session(
        &mut self,
        config: SessionConfig,
        capture: &mut dyn CaptureSource,
    ) -> Result<(), EngineError> {
        if let Some(active) = &self.active {
            if active.phase() == SessionPhase::Running {
                return Err(EngineError::InvalidTransition {
                    op: "begin a session",
                    phase: active.phase().as_str(),
                });
            }
        }

        let mut session = SessionOrchestrator::new(config);
        session.start(capture, self.clock.now_ms())?;
        self.active = Some(session);
        Ok(())
    }

    /// Feed the next captured video frame to the active session.
    pub fn on_frame(&mut self, frame: &VideoFrame) {
        if let Some(session) = &mut self.active {
            session.on_frame(frame);
        }
    }

    /// Feed the next audio sample buffer to the active session.
    pub fn on_audio_buffer(&mut self, samples: &[u8]) {
        if let Some(session) = &mut self.active {
            session.on_audio_buffer(samples);
        }
    }

    /// Feed one recognizer fragment to the active session.
    pub fn on_fragment(&mut self, text: &str, is_final: bool) {
        if let Some(session) = &mut self.active {
            session.on_fragment(text, is_final);
        }
    }

    /// Relay a transient recognizer error. Non-fatal; the session keeps
    /// running with its tracker state intact.
    pub fn on_recognition_error(&self, reason: &str) {
        if let Some(session) = &self.active {
            session.on_recognition_error(reason);
        }
    }

    /// Finalize the current question and advance.
    pub fn next_question(&mut self) -> Result<(), EngineError> {
        let now = self.clock.now_ms();
        self.active_mut("advance question")?.next(now)
    }

    /// Move the question pointer back.
    pub fn previous_question(&mut self) -> Result<(), EngineError> {
        let now = self.clock.now_ms();
        self.active_mut("rewind question")?.prev(now)
    }

    /// Clear per-question speech accumulators.
    pub fn reset_speech(&mut self) -> Result<(), EngineError> {
        let now = self.clock.now_ms();
        self.active_mut("reset speech")?.reset_speech_only(now)
    }

    /// Stop the active session, append its record to the store, and return
    /// the record.
    pub fn end_session(&mut self) -> Result<InterviewResult, EngineError> {
        let now = self.clock.now_ms();
        let id = self.ids.generate();
        let result = self.active_mut("end a session")?.stop(now, id)?;
        self.store.append(result.clone());
        Ok(result)
    }

    /// Live metrics of the active session, if any.
    pub fn snapshot(&self) -> Option<MetricsSnapshot> {
        self.active
            .as_ref()
            .map(|s| s.snapshot(self.clock.now_ms()))
    }

    /// The active session, if any.
    pub fn session(&self) -> Option<&SessionOrchestrator> {
        self.active.as_ref()
    }

    /// Completed session records, most recent first.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    fn active_mut(&mut self, op: &'static str) -> Result<&mut SessionOrchestrator, EngineError> {
        self.active.as_mut().ok_or(EngineError::InvalidTransition {
            op,
            phase: "idle",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{GrantedCapture, ManualClock};

    struct FixedIds;

    impl IdGenerator for FixedIds {
        fn generate(&self) -> String {
            "fixed-id".to_string()
        }
    }

    fn context_at(clock: &ManualClock) -> EngineContext {
        EngineContext::with_collaborators(Box::new(clock.clone()), Box::new(FixedIds))
    }

    #[test]
    fn test_full_session_through_context() {
        let clock = ManualClock::new(1_000);
        let mut ctx = context_at(&clock);

        ctx.begin_session(SessionConfig::default(), &mut GrantedCapture)
            .unwrap();
        ctx.on_fragment("um this is a test", true);
        ctx.on_audio_buffer(&[192; 256]);

        clock.advance(30_000);
        ctx.next_question().unwrap();
        clock.advance(30_000);
        ctx.next_question().unwrap();

        clock.advance(30_000);
        let result = ctx.end_session().unwrap();
        assert_eq!(result.id, "fixed-id");
        assert_eq!(result.duration_sec, 90);
        assert_eq!(result.questions.len(), 3);
        assert!(result.questions.iter().all(|q| q.is_some()));
        assert_eq!(result.speech.volume, 70);

        assert_eq!(ctx.store().len(), 1);
        assert!(ctx.snapshot().is_some());
    }

    #[test]
    fn test_cannot_begin_while_running() {
        let clock = ManualClock::new(0);
        let mut ctx = context_at(&clock);
        ctx.begin_session(SessionConfig::default(), &mut GrantedCapture)
            .unwrap();

        let err = ctx
            .begin_session(SessionConfig::default(), &mut GrantedCapture)
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidTransition { .. }));
    }

    #[test]
    fn test_new_session_after_end() {
        let clock = ManualClock::new(0);
        let mut ctx = context_at(&clock);

        ctx.begin_session(SessionConfig::default(), &mut GrantedCapture)
            .unwrap();
        clock.advance(10_000);
        ctx.end_session().unwrap();

        // Ended is terminal for the old session; a fresh configuration
        // starts a fresh one.
        ctx.begin_session(SessionConfig::default(), &mut GrantedCapture)
            .unwrap();
        clock.advance(5_000);
        ctx.end_session().unwrap();

        assert_eq!(ctx.store().len(), 2);
    }

    #[test]
    fn test_store_ordering_across_sessions() {
        let clock = ManualClock::new(0);
        let mut ctx = EngineContext::with_collaborators(
            Box::new(clock.clone()),
            Box::new(crate::host::UuidGenerator),
        );

        ctx.begin_session(
            SessionConfig {
                domain: "HR".to_string(),
                ..SessionConfig::default()
            },
            &mut GrantedCapture,
        )
        .unwrap();
        ctx.end_session().unwrap();

        ctx.begin_session(
            SessionConfig {
                domain: "Sales".to_string(),
                ..SessionConfig::default()
            },
            &mut GrantedCapture,
        )
        .unwrap();
        ctx.end_session().unwrap();

        assert_eq!(ctx.store().records()[0].domain, "Sales");
        assert_eq!(ctx.store().records()[1].domain, "HR");
    }

    #[test]
    fn test_operations_without_a_session_fail() {
        let clock = ManualClock::new(0);
        let mut ctx = context_at(&clock);
        assert!(ctx.next_question().is_err());
        assert!(ctx.end_session().is_err());
        assert!(ctx.snapshot().is_none());
    }
}
