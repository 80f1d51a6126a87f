//! Statemate Core - Political Crisis Round Engine
//!
//! A five-round political crisis game: each round a crisis is drawn, the
//! player (optionally seated in a council of simulated ministers) votes for
//! one policy action, and a one-minute countdown runs out. Stats decay at
//! every round transition and the final average decides the outcome.
//!
//! # Architecture
//!
//! - **Logic** (`statemate_logic`): pure transitions over an immutable
//!   `GameState` value
//! - **Engine**: owns the latest state, the seeded RNG and the tick source
//! - **Scheduler**: supplies elapsed time, real or manual
//!
//! # Example
//!
//! ```rust,no_run
//! use statemate_core::prelude::*;
//!
//! let mut engine = GameEngine::new(GameConfig::council());
//! let mut clock = WallClock::new();
//!
//! engine.start_game();
//! engine.submit_action(ActionId::Security);
//!
//! while engine.is_active() {
//!     engine.pump(&mut clock);
//!     std::thread::sleep(std::time::Duration::from_millis(100));
//! }
//! println!("{:?}", engine.outcome());
//! ```

pub mod engine;
pub mod scheduler;
pub mod snapshot;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::engine::GameEngine;
    pub use crate::scheduler::{ManualClock, Scheduler, WallClock};
    pub use crate::snapshot::GameSnapshot;
    pub use statemate_logic::actions::ActionId;
    pub use statemate_logic::config::{GameConfig, GameMode};
    pub use statemate_logic::round::{CommandStatus, IgnoreReason, Phase};
    pub use statemate_logic::scoring::{Outcome, OutcomeTier};
    pub use statemate_logic::stats::{Stat, StatVector};
}
