use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One finished round's score as reported to (or returned by) the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub user: String,
    pub score: u32,
    pub recorded_at: DateTime<Utc>,
}

/// Per-user scoreboard line: sum of scores and number of rounds played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreboardRow {
    pub user: String,
    pub total_score: u32,
    pub rounds: u32,
}

/// Aggregate raw score entries per user, highest total first.
///
/// Ties are broken by user name so the ordering is deterministic.
#[must_use]
pub fn aggregate_scores(entries: &[ScoreEntry]) -> Vec<ScoreboardRow> {
    let mut totals: BTreeMap<&str, (u32, u32)> = BTreeMap::new();
    for entry in entries {
        let slot = totals.entry(entry.user.as_str()).or_insert((0, 0));
        slot.0 = slot.0.saturating_add(entry.score);
        slot.1 = slot.1.saturating_add(1);
    }

    let mut rows: Vec<ScoreboardRow> = totals
        .into_iter()
        .map(|(user, (total_score, rounds))| ScoreboardRow {
            user: user.to_owned(),
            total_score,
            rounds,
        })
        .collect();
    rows.sort_by(|a, b| {
        b.total_score
            .cmp(&a.total_score)
            .then_with(|| a.user.cmp(&b.user))
    });
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn entry(user: &str, score: u32) -> ScoreEntry {
        ScoreEntry {
            user: user.into(),
            score,
            recorded_at: fixed_now(),
        }
    }

    #[test]
    fn aggregation_sums_scores_and_counts_rounds() {
        let entries = vec![
            entry("ana", 3),
            entry("bo", 2),
            entry("ana", 1),
            entry("bo", 0),
            entry("ana", 0),
        ];

        let rows = aggregate_scores(&entries);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].user, "ana");
        assert_eq!(rows[0].total_score, 4);
        assert_eq!(rows[0].rounds, 3);
        assert_eq!(rows[1].user, "bo");
        assert_eq!(rows[1].total_score, 2);
        assert_eq!(rows[1].rounds, 2);
    }

    #[test]
    fn ties_order_by_user_name() {
        let rows = aggregate_scores(&[entry("zed", 2), entry("amy", 2)]);

        assert_eq!(rows[0].user, "amy");
        assert_eq!(rows[1].user, "zed");
    }

    #[test]
    fn empty_input_yields_empty_board() {
        assert!(aggregate_scores(&[]).is_empty());
    }
}
