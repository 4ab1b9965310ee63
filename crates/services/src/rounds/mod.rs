mod progress;
mod service;
mod workflow;

// Public API of the round subsystem.
pub use crate::error::RoundError;
pub use progress::RoundProgress;
pub use service::RoundService;
pub use workflow::RoundLoopService;
