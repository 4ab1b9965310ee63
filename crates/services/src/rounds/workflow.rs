use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use quiz_core::Clock;
use quiz_core::model::{Question, RoundSummary, ScoreEntry};

use crate::backend::{QuestionSupply, ScoreSink};
use crate::error::{BackendError, RoundError};
use crate::rounds::service::RoundService;

/// Orchestrates round start and finish across the backend interfaces.
///
/// Owns the cross-round bookkeeping: the question cache (one fetch per app
/// session) and the round counter, which starts at 1 and only ever moves
/// forward.
pub struct RoundLoopService {
    clock: Clock,
    questions: Arc<dyn QuestionSupply>,
    scores: Arc<dyn ScoreSink>,
    user: String,
    round: AtomicU32,
    cache: Mutex<Option<Vec<Question>>>,
}

impl RoundLoopService {
    #[must_use]
    pub fn new(
        clock: Clock,
        questions: Arc<dyn QuestionSupply>,
        scores: Arc<dyn ScoreSink>,
        user: impl Into<String>,
    ) -> Self {
        Self {
            clock,
            questions,
            scores,
            user: user.into(),
            round: AtomicU32::new(1),
            cache: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Round number the next `start_round` will use.
    #[must_use]
    pub fn current_round(&self) -> u32 {
        self.round.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Start a round over the cached (or freshly fetched) question list.
    ///
    /// # Errors
    ///
    /// Returns `RoundError::Empty` when the supply yields no questions and
    /// propagates fetch failures via `RoundError::Backend`.
    pub async fn start_round(&self) -> Result<RoundService, RoundError> {
        let questions = self.load_questions().await?;
        RoundService::new(self.current_round(), questions, self.clock.now())
    }

    /// Finish a completed round: submit the score best-effort and bump the
    /// round counter.
    ///
    /// A sink failure is logged and never alters round progression.
    ///
    /// # Errors
    ///
    /// Returns `RoundError::Incomplete` if the round has unanswered
    /// questions left.
    pub async fn finish_round(&self, round: &RoundService) -> Result<RoundSummary, RoundError> {
        let summary = round.build_summary()?;

        let entry = ScoreEntry {
            user: self.user.clone(),
            score: summary.score(),
            recorded_at: self.clock.now(),
        };
        match self.scores.submit_score(&entry).await {
            Ok(ack) => tracing::debug!(round = summary.round(), ack = %ack, "score submitted"),
            Err(err) => tracing::warn!(round = summary.round(), "score submission failed: {err}"),
        }

        self.round.fetch_add(1, Ordering::AcqRel);
        Ok(summary)
    }

    async fn load_questions(&self) -> Result<Vec<Question>, BackendError> {
        if let Some(cached) = self.cached_questions()? {
            return Ok(cached);
        }

        let fetched = self.questions.fetch_questions().await?;
        let mut guard = self
            .cache
            .lock()
            .map_err(|e| BackendError::Unavailable(e.to_string()))?;
        // A racing fetch may have landed first; either copy is fine.
        Ok(guard.get_or_insert(fetched).clone())
    }

    fn cached_questions(&self) -> Result<Option<Vec<Question>>, BackendError> {
        let guard = self
            .cache
            .lock()
            .map_err(|e| BackendError::Unavailable(e.to_string()))?;
        Ok(guard.clone())
    }
}
