//! Session record store
//!
//! [`SessionStore`] is the append-only collection of completed session
//! records, ordered most-recent-first. Entries are immutable once appended,
//! so display collaborators can read the store freely while a session runs.
//!
//! Durability is injected: the store round-trips to JSON and any host can
//! supply a [`RecordPersistence`] backend (browser local storage, a file,
//! nothing at all). The engine itself never touches storage.

use crate::error::EngineError;
use crate::types::InterviewResult;
use serde::{Deserialize, Serialize};

/// Injected durability seam for session records.
pub trait RecordPersistence {
    /// Write the full record list (most-recent-first).
    fn persist(&mut self, records: &[InterviewResult]) -> Result<(), EngineError>;
    /// Read back the previously persisted list, empty when nothing exists.
    fn load(&mut self) -> Result<Vec<InterviewResult>, EngineError>;
}

/// In-memory persistence backend, used in tests and storage-less hosts.
#[derive(Debug, Clone, Default)]
pub struct MemoryPersistence {
    saved: Vec<InterviewResult>,
}

impl RecordPersistence for MemoryPersistence {
    fn persist(&mut self, records: &[InterviewResult]) -> Result<(), EngineError> {
        self.saved = records.to_vec();
        Ok(())
    }

    fn load(&mut self) -> Result<Vec<InterviewResult>, EngineError> {
        Ok(self.saved.clone())
    }
}

/// Append-only store of completed session records, most recent first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionStore {
    records: Vec<InterviewResult>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from an injected persistence backend.
    pub fn from_persistence(backend: &mut dyn RecordPersistence) -> Result<Self, EngineError> {
        Ok(Self {
            records: backend.load()?,
        })
    }

    /// Append a completed record at the front.
    pub fn append(&mut self, record: InterviewResult) {
        self.records.insert(0, record);
    }

    /// Records, most recent first.
    pub fn records(&self) -> &[InterviewResult] {
        &self.records
    }

    /// The most recently appended record.
    pub fn latest(&self) -> Option<&InterviewResult> {
        self.records.first()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Mean overall score across all records, `None` when empty.
    pub fn average_overall_score(&self) -> Option<f64> {
        if self.records.is_empty() {
            return None;
        }
        let sum: u32 = self.records.iter().map(|r| r.overall_score as u32).sum();
        Some(sum as f64 / self.records.len() as f64)
    }

    /// Hand the current record list to a persistence backend.
    pub fn save_to(&self, backend: &mut dyn RecordPersistence) -> Result<(), EngineError> {
        backend.persist(&self.records)
    }

    /// Load a store from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize the store to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BodyMetrics, SpeechMetrics};

    fn make_record(id: &str, overall: u8) -> InterviewResult {
        InterviewResult {
            id: id.to_string(),
            started_at: 0,
            ended_at: 60_000,
            duration_sec: 60,
            domain: "Software Development".to_string(),
            interview_type: "technical".to_string(),
            questions: vec![None],
            transcript: String::new(),
            speech: SpeechMetrics {
                clarity: 100,
                pace_wpm: 80,
                volume: 50,
                filler_words: 0,
                confidence: 100,
            },
            body: BodyMetrics::default(),
            overall_score: overall,
        }
    }

    #[test]
    fn test_most_recent_first_ordering() {
        let mut store = SessionStore::new();
        store.append(make_record("r1", 60));
        store.append(make_record("r2", 80));

        assert_eq!(store.len(), 2);
        assert_eq!(store.records()[0].id, "r2");
        assert_eq!(store.records()[1].id, "r1");
        assert_eq!(store.latest().unwrap().id, "r2");
    }

    #[test]
    fn test_average_overall_score() {
        let mut store = SessionStore::new();
        assert_eq!(store.average_overall_score(), None);

        store.append(make_record("r1", 60));
        store.append(make_record("r2", 80));
        assert_eq!(store.average_overall_score(), Some(70.0));
    }

    #[test]
    fn test_json_round_trip() {
        let mut store = SessionStore::new();
        store.append(make_record("r1", 42));

        let json = store.to_json().unwrap();
        let loaded = SessionStore::from_json(&json).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.records()[0].id, "r1");
        assert_eq!(loaded.records()[0].overall_score, 42);
    }

    #[test]
    fn test_persistence_round_trip() {
        let mut backend = MemoryPersistence::default();
        let mut store = SessionStore::new();
        store.append(make_record("r1", 55));
        store.append(make_record("r2", 65));
        store.save_to(&mut backend).unwrap();

        let restored = SessionStore::from_persistence(&mut backend).unwrap();
        assert_eq!(restored.len(), 2);
        assert_eq!(restored.records()[0].id, "r2");
    }
}
