mod intro;
mod quiz;
mod scoreboard;
mod state;

pub use intro::IntroView;
pub use quiz::QuizView;
pub use scoreboard::ScoreboardView;
pub use state::{ViewError, ViewState, view_state_from_resource};
