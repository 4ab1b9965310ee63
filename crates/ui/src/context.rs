use std::sync::Arc;

use services::{RoundLoopService, ScoreboardService};

pub trait UiApp: Send + Sync {
    fn player_name(&self) -> String;

    fn round_loop(&self) -> Arc<RoundLoopService>;
    fn scoreboard(&self) -> Arc<ScoreboardService>;
}

#[derive(Clone)]
pub struct AppContext {
    player_name: String,

    round_loop: Arc<RoundLoopService>,
    scoreboard: Arc<ScoreboardService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            player_name: app.player_name(),
            round_loop: app.round_loop(),
            scoreboard: app.scoreboard(),
        }
    }

    #[must_use]
    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    #[must_use]
    pub fn round_loop(&self) -> Arc<RoundLoopService> {
        Arc::clone(&self.round_loop)
    }

    #[must_use]
    pub fn scoreboard(&self) -> Arc<ScoreboardService> {
        Arc::clone(&self.scoreboard)
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
