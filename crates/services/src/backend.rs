//! Narrow interfaces the quiz core consumes from the remote backend,
//! plus an in-memory implementation for tests.

use std::sync::Mutex;

use async_trait::async_trait;

use quiz_core::model::{Question, ScoreEntry};

use crate::error::BackendError;

/// Yields the ordered question list for a round.
#[async_trait]
pub trait QuestionSupply: Send + Sync {
    async fn fetch_questions(&self) -> Result<Vec<Question>, BackendError>;
}

/// Accepts a finished round's score. Best-effort: callers log failures and
/// keep going.
#[async_trait]
pub trait ScoreSink: Send + Sync {
    /// Returns the backend's opaque acknowledgement string.
    async fn submit_score(&self, entry: &ScoreEntry) -> Result<String, BackendError>;
}

/// Read side of the scoreboard.
#[async_trait]
pub trait ScoreboardSource: Send + Sync {
    async fn list_scores(&self) -> Result<Vec<ScoreEntry>, BackendError>;
}

/// In-memory backend for tests: questions are seeded up front and submitted
/// scores land on the score list.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    questions: Vec<Question>,
    scores: Mutex<Vec<ScoreEntry>>,
}

impl InMemoryBackend {
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            scores: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn with_scores(questions: Vec<Question>, scores: Vec<ScoreEntry>) -> Self {
        Self {
            questions,
            scores: Mutex::new(scores),
        }
    }

    /// Snapshot of every score submitted so far.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Unavailable` if the score lock is poisoned.
    pub fn submitted(&self) -> Result<Vec<ScoreEntry>, BackendError> {
        Ok(self
            .scores
            .lock()
            .map_err(|e| BackendError::Unavailable(e.to_string()))?
            .clone())
    }
}

#[async_trait]
impl QuestionSupply for InMemoryBackend {
    async fn fetch_questions(&self) -> Result<Vec<Question>, BackendError> {
        Ok(self.questions.clone())
    }
}

#[async_trait]
impl ScoreSink for InMemoryBackend {
    async fn submit_score(&self, entry: &ScoreEntry) -> Result<String, BackendError> {
        let mut guard = self
            .scores
            .lock()
            .map_err(|e| BackendError::Unavailable(e.to_string()))?;
        guard.push(entry.clone());
        Ok("ok".to_owned())
    }
}

#[async_trait]
impl ScoreboardSource for InMemoryBackend {
    async fn list_scores(&self) -> Result<Vec<ScoreEntry>, BackendError> {
        Ok(self
            .scores
            .lock()
            .map_err(|e| BackendError::Unavailable(e.to_string()))?
            .clone())
    }
}
