mod quiz_vm;
mod scoreboard_vm;

pub use quiz_vm::{QuizPhase, QuizVm, RoundOutcome, start_round};
pub use scoreboard_vm::{ScoreboardRowVm, map_scoreboard_rows};
