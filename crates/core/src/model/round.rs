use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::{AnswerSelection, QuestionId};

/// One submitted answer inside a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundAnswer {
    pub question_id: QuestionId,
    pub selection: AnswerSelection,
    pub correct: bool,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RoundSummaryError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,

    #[error("too many answers for a single round: {len}")]
    TooManyAnswers { len: usize },

    #[error("score ({score}) exceeds question total ({total})")]
    ScoreExceedsTotal { score: u32, total: u32 },
}

/// Aggregate result of a completed round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSummary {
    round: u32,
    score: u32,
    total: u32,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
}

impl RoundSummary {
    /// Build a summary from already-counted values.
    ///
    /// # Errors
    ///
    /// Returns `RoundSummaryError::InvalidTimeRange` if `completed_at` is
    /// before `started_at`, or `ScoreExceedsTotal` if the counts do not
    /// align.
    pub fn new(
        round: u32,
        score: u32,
        total: u32,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Result<Self, RoundSummaryError> {
        if completed_at < started_at {
            return Err(RoundSummaryError::InvalidTimeRange);
        }
        if score > total {
            return Err(RoundSummaryError::ScoreExceedsTotal { score, total });
        }

        Ok(Self {
            round,
            score,
            total,
            started_at,
            completed_at,
        })
    }

    /// Build a summary by counting the correct entries in an answer log.
    ///
    /// # Errors
    ///
    /// Returns `RoundSummaryError::TooManyAnswers` if the log cannot fit in
    /// `u32`, plus any error `new` reports.
    pub fn from_answers(
        round: u32,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
        answers: &[RoundAnswer],
    ) -> Result<Self, RoundSummaryError> {
        let total = u32::try_from(answers.len())
            .map_err(|_| RoundSummaryError::TooManyAnswers { len: answers.len() })?;
        let score = answers.iter().filter(|answer| answer.correct).count();
        let score =
            u32::try_from(score).map_err(|_| RoundSummaryError::TooManyAnswers { len: score })?;

        Self::new(round, score, total, started_at, completed_at)
    }

    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }
}
