use std::fmt;

use chrono::{DateTime, Utc};

use quiz_core::model::{AnswerSelection, Question, RoundAnswer, RoundSummary};

use super::progress::RoundProgress;
use crate::error::RoundError;

//
// ─── ROUND ─────────────────────────────────────────────────────────────────────
//

/// In-memory state machine for one pass through the question list.
///
/// Steps through the questions sequentially. Answering and advancing are
/// separate operations: `submit` evaluates and records the answer, then the
/// caller advances after its feedback pause. A second submit before the
/// advance is rejected, which closes the double-submission window the UI
/// delay opens.
pub struct RoundService {
    round: u32,
    questions: Vec<Question>,
    current: usize,
    answers: Vec<RoundAnswer>,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl RoundService {
    /// Create a new round over the given questions.
    ///
    /// `started_at` should come from the services layer clock to keep time
    /// deterministic.
    ///
    /// # Errors
    ///
    /// Returns `RoundError::Empty` if no questions are provided.
    pub fn new(
        round: u32,
        questions: Vec<Question>,
        started_at: DateTime<Utc>,
    ) -> Result<Self, RoundError> {
        if questions.is_empty() {
            return Err(RoundError::Empty);
        }

        Ok(Self {
            round,
            questions,
            current: 0,
            answers: Vec::new(),
            started_at,
            completed_at: None,
        })
    }

    /// The round number this pass belongs to (1-based).
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn answers(&self) -> &[RoundAnswer] {
        &self.answers
    }

    /// Total number of questions in this round.
    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// Number of questions that have already been answered.
    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// Number of remaining questions without a submitted answer.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.questions.len().saturating_sub(self.answers.len())
    }

    /// Count of correct answers so far. Bounded by `total_questions`.
    #[must_use]
    pub fn score(&self) -> u32 {
        let correct = self.answers.iter().filter(|answer| answer.correct).count();
        u32::try_from(correct).unwrap_or(u32::MAX)
    }

    /// Returns a summary of the current round progress.
    #[must_use]
    pub fn progress(&self) -> RoundProgress {
        RoundProgress {
            total: self.total_questions(),
            answered: self.answered_count(),
            remaining: self.remaining(),
            score: self.score(),
            is_complete: self.is_complete(),
        }
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.current < self.questions.len() {
            Some(&self.questions[self.current])
        } else {
            None
        }
    }

    /// 0-based index of the question currently shown.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    /// True when the current question has an answer and the round is waiting
    /// for `advance`.
    #[must_use]
    pub fn awaiting_advance(&self) -> bool {
        !self.is_complete() && self.answers.len() > self.current
    }

    /// Evaluate and record a selection for the current question.
    ///
    /// The question index does not move; call `advance` once the feedback
    /// pause has elapsed.
    ///
    /// # Errors
    ///
    /// Returns `RoundError::Completed` if the round is already finished and
    /// `RoundError::AlreadyAnswered` if the current question was submitted
    /// before its advance fired.
    pub fn submit(&mut self, selection: AnswerSelection) -> Result<&RoundAnswer, RoundError> {
        if self.awaiting_advance() {
            return Err(RoundError::AlreadyAnswered);
        }
        let Some(question) = self.current_question() else {
            return Err(RoundError::Completed);
        };

        let correct = question.evaluate(&selection);
        let question_id = question.id();
        self.answers.push(RoundAnswer {
            question_id,
            selection,
            correct,
        });

        self.answers.last().ok_or(RoundError::Completed)
    }

    /// Move to the next question, completing the round past the last one.
    ///
    /// `at` should come from the services layer clock.
    ///
    /// # Errors
    ///
    /// Returns `RoundError::Completed` if the round is already finished and
    /// `RoundError::NotAnswered` if the current question has no submitted
    /// answer yet.
    pub fn advance(&mut self, at: DateTime<Utc>) -> Result<(), RoundError> {
        if self.is_complete() {
            return Err(RoundError::Completed);
        }
        if !self.awaiting_advance() {
            return Err(RoundError::NotAnswered);
        }

        self.current += 1;
        if self.current >= self.questions.len() {
            self.completed_at = Some(at);
        }
        Ok(())
    }

    /// Build the validated summary for a finished round.
    ///
    /// # Errors
    ///
    /// Returns `RoundError::Incomplete` before the last advance fired.
    pub fn build_summary(&self) -> Result<RoundSummary, RoundError> {
        let completed_at = self.completed_at.ok_or(RoundError::Incomplete)?;
        Ok(RoundSummary::from_answers(
            self.round,
            self.started_at,
            completed_at,
            &self.answers,
        )?)
    }
}

impl fmt::Debug for RoundService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoundService")
            .field("round", &self.round)
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("answers_len", &self.answers.len())
            .field("started_at", &self.started_at)
            .field("completed_at", &self.completed_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
