//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::RoundSummaryError;

/// Errors surfaced by backend adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BackendError {
    #[error("backend request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

/// Errors emitted by the round state machine and its workflow.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RoundError {
    #[error("no questions available for this round")]
    Empty,
    #[error("round already completed")]
    Completed,
    #[error("round is not finished yet")]
    Incomplete,
    #[error("current question already has a submitted answer")]
    AlreadyAnswered,
    #[error("cannot advance before an answer is submitted")]
    NotAnswered,
    #[error(transparent)]
    Summary(#[from] RoundSummaryError),
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Errors emitted by `ScoreboardService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ScoreboardError {
    #[error(transparent)]
    Backend(#[from] BackendError),
}
