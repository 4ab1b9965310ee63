use quiz_core::Clock;
use quiz_core::model::{AnswerSelection, Question};
use services::{RoundLoopService, RoundProgress, RoundService};

use crate::views::ViewError;

/// What the quiz screen is doing for the current question.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizPhase {
    /// Waiting for a selection.
    Answering,
    /// Showing correctness feedback until the deferred advance fires.
    Feedback { correct: bool },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundOutcome {
    Continue,
    Completed,
}

/// View-model wrapping a `RoundService` so the component stays declarative.
pub struct QuizVm {
    round: RoundService,
    clock: Clock,
    phase: QuizPhase,
}

impl QuizVm {
    #[must_use]
    pub fn new(round: RoundService, clock: Clock) -> Self {
        Self {
            round,
            clock,
            phase: QuizPhase::Answering,
        }
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    #[must_use]
    pub fn round_number(&self) -> u32 {
        self.round.round()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.round.score()
    }

    #[must_use]
    pub fn progress(&self) -> RoundProgress {
        self.round.progress()
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.round.current_question()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.round.is_complete()
    }

    #[must_use]
    pub fn round(&self) -> &RoundService {
        &self.round
    }

    /// Submit the selection for the current question and enter feedback.
    ///
    /// Returns whether the submission was correct.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::Unknown` when the round rejects the submission
    /// (already answered, already complete).
    pub fn submit(&mut self, selection: AnswerSelection) -> Result<bool, ViewError> {
        let answer = self
            .round
            .submit(selection)
            .map_err(|_| ViewError::Unknown)?;
        let correct = answer.correct;
        self.phase = QuizPhase::Feedback { correct };
        Ok(correct)
    }

    /// Move past the current question once the feedback pause has elapsed.
    pub fn advance(&mut self) -> RoundOutcome {
        if self.round.advance(self.clock.now()).is_err() {
            // Only reachable out of phase; there is nothing to move past.
            return RoundOutcome::Completed;
        }
        self.phase = QuizPhase::Answering;
        if self.round.is_complete() {
            RoundOutcome::Completed
        } else {
            RoundOutcome::Continue
        }
    }
}

/// # Errors
///
/// Returns `ViewError::EmptyRound` when the supply has no questions and
/// `ViewError::Unknown` for other failures.
pub async fn start_round(round_loop: &RoundLoopService) -> Result<QuizVm, ViewError> {
    let round = match round_loop.start_round().await {
        Ok(round) => round,
        Err(services::RoundError::Empty) => return Err(ViewError::EmptyRound),
        Err(_) => return Err(ViewError::Unknown),
    };

    Ok(QuizVm::new(round, round_loop.clock()))
}
