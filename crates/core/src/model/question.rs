use std::collections::BTreeSet;

use thiserror::Error;

use crate::model::ids::QuestionId;

//
// ─── QUESTION TYPES ────────────────────────────────────────────────────────────
//

/// Presentation kind, derived from the size of the correct-answer set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    /// Exactly one correct choice; rendered as a radio group.
    SingleChoice,
    /// More than one correct choice; rendered as checkboxes.
    MultiChoice,
}

/// Unvalidated question shape as it arrives from the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub prompt: String,
    pub choices: Vec<String>,
    pub answers: Vec<usize>,
}

impl QuestionDraft {
    /// Validate the draft and attach its backend id.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when the prompt is blank, there are fewer than
    /// two choices, no correct index is given, or a correct index is out of
    /// range for the choice list.
    pub fn validate(self, id: QuestionId) -> Result<Question, QuestionError> {
        if self.prompt.trim().is_empty() {
            return Err(QuestionError::BlankPrompt);
        }
        if self.choices.len() < 2 {
            return Err(QuestionError::NotEnoughChoices {
                len: self.choices.len(),
            });
        }

        let answers: BTreeSet<usize> = self.answers.into_iter().collect();
        if answers.is_empty() {
            return Err(QuestionError::NoCorrectAnswers);
        }
        if let Some(&index) = answers.iter().find(|&&index| index >= self.choices.len()) {
            return Err(QuestionError::AnswerOutOfRange {
                index,
                choices: self.choices.len(),
            });
        }

        Ok(Question {
            id,
            prompt: self.prompt,
            choices: self.choices,
            answers,
        })
    }
}

/// A validated, immutable quiz question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    prompt: String,
    choices: Vec<String>,
    answers: BTreeSet<usize>,
}

impl Question {
    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    /// Indices of the choices marked correct, in ascending order.
    #[must_use]
    pub fn answers(&self) -> &BTreeSet<usize> {
        &self.answers
    }

    #[must_use]
    pub fn kind(&self) -> QuestionKind {
        if self.answers.len() > 1 {
            QuestionKind::MultiChoice
        } else {
            QuestionKind::SingleChoice
        }
    }

    /// Evaluate a submitted selection against the correct-answer set.
    ///
    /// A single selection is correct iff it equals the lowest correct index;
    /// only the first listed correct answer is checked, matching the
    /// backend's historical contract for radio questions. A multiple
    /// selection is correct iff it equals the correct set exactly, order
    /// irrelevant.
    #[must_use]
    pub fn evaluate(&self, selection: &AnswerSelection) -> bool {
        match selection {
            AnswerSelection::Single(chosen) => self.answers.first() == Some(chosen),
            AnswerSelection::Multiple(chosen) => chosen == &self.answers,
        }
    }
}

/// A submitted answer: one index for radio questions, a set for checkboxes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerSelection {
    Single(usize),
    Multiple(BTreeSet<usize>),
}

impl AnswerSelection {
    /// Convenience constructor for multi-select submissions.
    #[must_use]
    pub fn multiple<I: IntoIterator<Item = usize>>(indices: I) -> Self {
        Self::Multiple(indices.into_iter().collect())
    }
}

//
// ─── QUESTION VALIDATION ERRORS ────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt is blank")]
    BlankPrompt,

    #[error("question needs at least two choices, got {len}")]
    NotEnoughChoices { len: usize },

    #[error("question has no correct answers")]
    NoCorrectAnswers,

    #[error("correct-answer index {index} out of range for {choices} choices")]
    AnswerOutOfRange { index: usize, choices: usize },
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn build_question(answers: &[usize]) -> Question {
        QuestionDraft {
            prompt: "Which of these?".into(),
            choices: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            answers: answers.to_vec(),
        }
        .validate(QuestionId::new(1))
        .unwrap()
    }

    #[test]
    fn draft_rejects_blank_prompt() {
        let err = QuestionDraft {
            prompt: "   ".into(),
            choices: vec!["a".into(), "b".into()],
            answers: vec![0],
        }
        .validate(QuestionId::new(1))
        .unwrap_err();

        assert!(matches!(err, QuestionError::BlankPrompt));
    }

    #[test]
    fn draft_rejects_out_of_range_answer() {
        let err = QuestionDraft {
            prompt: "q".into(),
            choices: vec!["a".into(), "b".into()],
            answers: vec![0, 2],
        }
        .validate(QuestionId::new(1))
        .unwrap_err();

        assert_eq!(
            err,
            QuestionError::AnswerOutOfRange {
                index: 2,
                choices: 2
            }
        );
    }

    #[test]
    fn draft_rejects_empty_answer_set() {
        let err = QuestionDraft {
            prompt: "q".into(),
            choices: vec!["a".into(), "b".into()],
            answers: vec![],
        }
        .validate(QuestionId::new(1))
        .unwrap_err();

        assert!(matches!(err, QuestionError::NoCorrectAnswers));
    }

    #[test]
    fn kind_follows_answer_set_size() {
        assert_eq!(build_question(&[1]).kind(), QuestionKind::SingleChoice);
        assert_eq!(build_question(&[1, 3]).kind(), QuestionKind::MultiChoice);
    }

    #[test]
    fn single_select_checks_lowest_correct_index_only() {
        // Two indices marked correct but presented as listed: only the
        // lowest one counts for a radio submission.
        let question = QuestionDraft {
            prompt: "q".into(),
            choices: vec!["a".into(), "b".into(), "c".into()],
            answers: vec![2, 1],
        }
        .validate(QuestionId::new(1))
        .unwrap();

        assert!(question.evaluate(&AnswerSelection::Single(1)));
        assert!(!question.evaluate(&AnswerSelection::Single(2)));
        assert!(!question.evaluate(&AnswerSelection::Single(0)));
    }

    #[test]
    fn multi_select_requires_exact_set() {
        let question = build_question(&[0, 2]);

        assert!(question.evaluate(&AnswerSelection::multiple([2, 0])));
        // Strict subset and superset are both wrong.
        assert!(!question.evaluate(&AnswerSelection::multiple([0])));
        assert!(!question.evaluate(&AnswerSelection::multiple([0, 2, 3])));
        assert!(!question.evaluate(&AnswerSelection::multiple([])));
    }

    #[test]
    fn duplicate_answer_indices_collapse() {
        let question = QuestionDraft {
            prompt: "q".into(),
            choices: vec!["a".into(), "b".into(), "c".into()],
            answers: vec![0, 2, 2],
        }
        .validate(QuestionId::new(1))
        .unwrap();

        assert_eq!(question.answers().len(), 2);
        assert!(question.evaluate(&AnswerSelection::multiple([0, 2])));
    }
}
