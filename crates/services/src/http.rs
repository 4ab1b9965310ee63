//! `reqwest`-backed implementation of the backend interfaces.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use quiz_core::model::{Question, QuestionDraft, QuestionId, ScoreEntry};

use crate::backend::{QuestionSupply, ScoreSink, ScoreboardSource};
use crate::error::BackendError;

/// HTTP client for the quiz backend.
///
/// Endpoints: `GET /api/questions`, `POST /api/submit-score`,
/// `GET /api/scores`.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[async_trait]
impl QuestionSupply for HttpBackend {
    async fn fetch_questions(&self) -> Result<Vec<Question>, BackendError> {
        let response = self
            .client
            .get(self.endpoint("/api/questions"))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(BackendError::HttpStatus(response.status()));
        }

        let rows: Vec<QuestionRow> = response.json().await?;
        Ok(map_questions(rows))
    }
}

#[async_trait]
impl ScoreSink for HttpBackend {
    async fn submit_score(&self, entry: &ScoreEntry) -> Result<String, BackendError> {
        let payload = ScoreRow::from(entry);
        let response = self
            .client
            .post(self.endpoint("/api/submit-score"))
            .json(&payload)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(BackendError::HttpStatus(response.status()));
        }

        // The backend replies with an opaque acknowledgement string.
        Ok(response.text().await?)
    }
}

#[async_trait]
impl ScoreboardSource for HttpBackend {
    async fn list_scores(&self) -> Result<Vec<ScoreEntry>, BackendError> {
        let response = self.client.get(self.endpoint("/api/scores")).send().await?;
        if !response.status().is_success() {
            return Err(BackendError::HttpStatus(response.status()));
        }

        let rows: Vec<ScoreRow> = response.json().await?;
        Ok(rows.into_iter().map(ScoreRow::into_entry).collect())
    }
}

/// Map wire rows into validated questions, skipping malformed ones.
fn map_questions(rows: Vec<QuestionRow>) -> Vec<Question> {
    rows.into_iter()
        .filter_map(|row| {
            let id = QuestionId::new(row.id);
            let draft = QuestionDraft {
                prompt: row.prompt,
                choices: row.choices,
                answers: row.answer,
            };
            match draft.validate(id) {
                Ok(question) => Some(question),
                Err(err) => {
                    tracing::warn!("skipping question {id}: {err}");
                    None
                }
            }
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct QuestionRow {
    id: u64,
    prompt: String,
    choices: Vec<String>,
    answer: Vec<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ScoreRow {
    user: String,
    score: u32,
    date: DateTime<Utc>,
}

impl ScoreRow {
    fn into_entry(self) -> ScoreEntry {
        ScoreEntry {
            user: self.user,
            score: self.score,
            recorded_at: self.date,
        }
    }
}

impl From<&ScoreEntry> for ScoreRow {
    fn from(entry: &ScoreEntry) -> Self {
        Self {
            user: entry.user.clone(),
            score: entry.score,
            date: entry.recorded_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::AnswerSelection;
    use quiz_core::time::fixed_now;

    #[test]
    fn question_rows_parse_and_validate() {
        let json = r#"[
            {"id": 1, "prompt": "Pick one", "choices": ["a", "b"], "answer": [1]},
            {"id": 2, "prompt": "Pick two", "choices": ["a", "b", "c"], "answer": [0, 2]}
        ]"#;
        let rows: Vec<QuestionRow> = serde_json::from_str(json).unwrap();

        let questions = map_questions(rows);

        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].id(), QuestionId::new(1));
        assert!(questions[0].evaluate(&AnswerSelection::Single(1)));
        assert!(questions[1].evaluate(&AnswerSelection::multiple([2, 0])));
    }

    #[test]
    fn malformed_question_rows_are_skipped() {
        // Second row points past its choice list and must not survive.
        let json = r#"[
            {"id": 1, "prompt": "ok", "choices": ["a", "b"], "answer": [0]},
            {"id": 2, "prompt": "bad", "choices": ["a", "b"], "answer": [5]},
            {"id": 3, "prompt": " ", "choices": ["a", "b"], "answer": [0]}
        ]"#;
        let rows: Vec<QuestionRow> = serde_json::from_str(json).unwrap();

        let questions = map_questions(rows);

        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].id(), QuestionId::new(1));
    }

    #[test]
    fn score_row_round_trips_entry_fields() {
        let entry = ScoreEntry {
            user: "ana".into(),
            score: 3,
            recorded_at: fixed_now(),
        };

        let row = ScoreRow::from(&entry);
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["user"], "ana");
        assert_eq!(json["score"], 3);
        assert!(json["date"].is_string());

        let back: ScoreRow = serde_json::from_value(json).unwrap();
        assert_eq!(back.into_entry(), entry);
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let backend = HttpBackend::new("https://quiz.example.test/");
        assert_eq!(
            backend.endpoint("/api/questions"),
            "https://quiz.example.test/api/questions"
        );
    }
}
