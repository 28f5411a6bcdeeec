//! A survey engine bound to a snapshot store.
//!
//! Every state change is written through to the store. Storage failures are
//! logged and reported, but never block the survey: the in-memory engine
//! stays authoritative.

use crate::engine::SurveyEngine;
use crate::error::SurveyError;
use crate::report::SurveyResult;
use crate::storage::SnapshotStore;

/// Result of a mutating session operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Saved<T> {
    pub value: T,
    /// `false` if writing the snapshot failed.
    pub persisted: bool,
}

/// How the session's initial state was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// No snapshot was stored.
    Fresh,
    /// A stored snapshot was restored.
    Restored,
    /// A stored snapshot could not be used and was discarded.
    Discarded(String),
}

pub struct SurveySession<S: SnapshotStore> {
    engine: SurveyEngine,
    store: S,
    key: String,
    origin: Origin,
}

impl<S: SnapshotStore> SurveySession<S> {
    /// Open the session stored under `key`, starting fresh if nothing usable
    /// is stored.
    pub fn open(store: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let mut engine = SurveyEngine::new();

        let origin = match store.load(&key) {
            Ok(None) => Origin::Fresh,
            Ok(Some(snapshot)) => match engine.restore(&snapshot) {
                Ok(()) => {
                    tracing::debug!(key = %key, "restored saved progress");
                    Origin::Restored
                }
                Err(e) => {
                    tracing::warn!("discarding saved progress '{key}': {e}");
                    Origin::Discarded(e.to_string())
                }
            },
            Err(e) => {
                tracing::warn!("discarding saved progress '{key}': {e:#}");
                Origin::Discarded(format!("{e:#}"))
            }
        };

        Self {
            engine,
            store,
            key,
            origin,
        }
    }

    pub fn engine(&self) -> &SurveyEngine {
        &self.engine
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Record an answer and save. Returns the owning section's score.
    pub fn record_answer(&mut self, question: u32, value: u32) -> Result<Saved<u32>, SurveyError> {
        let score = self.engine.record_answer(question, value)?;
        Ok(self.persist(score))
    }

    /// Move forward one section and save.
    pub fn advance(&mut self) -> Result<Saved<u32>, SurveyError> {
        let section = self.engine.advance_section()?;
        Ok(self.persist(section))
    }

    /// Move back one section and save.
    pub fn retreat(&mut self) -> Result<Saved<u32>, SurveyError> {
        let section = self.engine.retreat_section()?;
        Ok(self.persist(section))
    }

    pub fn finalize(&self) -> Result<SurveyResult, SurveyError> {
        self.engine.finalize_and_interpret()
    }

    /// Restart the survey and save the empty state.
    pub fn reset(&mut self) -> Saved<()> {
        self.engine.reset();
        self.persist(())
    }

    /// Write the current state to the store.
    pub fn save(&mut self) -> anyhow::Result<()> {
        self.store.save(&self.key, &self.engine.serialize())
    }

    fn persist<T>(&mut self, value: T) -> Saved<T> {
        let persisted = match self.save() {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("failed to save progress '{}': {e:#}", self.key);
                false
            }
        };
        Saved { value, persisted }
    }
}
