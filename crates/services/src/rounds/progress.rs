/// Aggregated view of round progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundProgress {
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    pub score: u32,
    pub is_complete: bool,
}
