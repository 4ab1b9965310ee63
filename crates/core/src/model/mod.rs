mod ids;
mod question;
mod round;
mod scoreboard;

pub use ids::QuestionId;
pub use question::{AnswerSelection, Question, QuestionDraft, QuestionError, QuestionKind};
pub use round::{RoundAnswer, RoundSummary, RoundSummaryError};
pub use scoreboard::{ScoreEntry, ScoreboardRow, aggregate_scores};
