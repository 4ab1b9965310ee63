#![forbid(unsafe_code)]

pub mod backend;
pub mod error;
pub mod http;
pub mod rounds;
pub mod scoreboard_service;

pub use quiz_core::Clock;

pub use backend::{InMemoryBackend, QuestionSupply, ScoreSink, ScoreboardSource};
pub use error::{BackendError, RoundError, ScoreboardError};
pub use http::HttpBackend;
pub use rounds::{RoundLoopService, RoundProgress, RoundService};
pub use scoreboard_service::ScoreboardService;
