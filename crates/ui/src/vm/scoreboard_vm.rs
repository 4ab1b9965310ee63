use quiz_core::model::ScoreboardRow;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreboardRowVm {
    pub rank: usize,
    pub user: String,
    pub total_score: u32,
    pub rounds: u32,
}

impl ScoreboardRowVm {
    fn from_row(rank: usize, row: &ScoreboardRow) -> Self {
        Self {
            rank,
            user: row.user.clone(),
            total_score: row.total_score,
            rounds: row.rounds,
        }
    }
}

/// Attach 1-based ranks to aggregated rows for display.
#[must_use]
pub fn map_scoreboard_rows(rows: &[ScoreboardRow]) -> Vec<ScoreboardRowVm> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| ScoreboardRowVm::from_row(index + 1, row))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_ranked_in_order() {
        let rows = vec![
            ScoreboardRow {
                user: "ana".into(),
                total_score: 5,
                rounds: 2,
            },
            ScoreboardRow {
                user: "bo".into(),
                total_score: 3,
                rounds: 1,
            },
        ];

        let vms = map_scoreboard_rows(&rows);

        assert_eq!(vms[0].rank, 1);
        assert_eq!(vms[0].user, "ana");
        assert_eq!(vms[1].rank, 2);
        assert_eq!(vms[1].total_score, 3);
    }
}
