use std::sync::Arc;

use quiz_core::model::{ScoreboardRow, aggregate_scores};

use crate::backend::ScoreboardSource;
use crate::error::ScoreboardError;

/// Read service for the scoreboard view: fetches raw score entries and
/// aggregates them per user.
pub struct ScoreboardService {
    source: Arc<dyn ScoreboardSource>,
}

impl ScoreboardService {
    #[must_use]
    pub fn new(source: Arc<dyn ScoreboardSource>) -> Self {
        Self { source }
    }

    /// Load the aggregated scoreboard, highest total first.
    ///
    /// # Errors
    ///
    /// Propagates backend failures as `ScoreboardError`.
    pub async fn load(&self) -> Result<Vec<ScoreboardRow>, ScoreboardError> {
        let entries = self.source.list_scores().await?;
        Ok(aggregate_scores(&entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::InMemoryBackend;
    use quiz_core::model::ScoreEntry;
    use quiz_core::time::fixed_now;

    #[tokio::test]
    async fn load_aggregates_entries_per_user() {
        let scores = vec![
            ScoreEntry {
                user: "ana".into(),
                score: 2,
                recorded_at: fixed_now(),
            },
            ScoreEntry {
                user: "ana".into(),
                score: 3,
                recorded_at: fixed_now(),
            },
            ScoreEntry {
                user: "bo".into(),
                score: 4,
                recorded_at: fixed_now(),
            },
        ];
        let backend = Arc::new(InMemoryBackend::with_scores(Vec::new(), scores));

        let rows = ScoreboardService::new(backend).load().await.unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].user, "ana");
        assert_eq!(rows[0].total_score, 5);
        assert_eq!(rows[0].rounds, 2);
        assert_eq!(rows[1].user, "bo");
        assert_eq!(rows[1].rounds, 1);
    }
}
