//! Read-only view of the engine for presentation layers.

use serde::Serialize;

use statemate_logic::config::GameMode;
use statemate_logic::crisis::Crisis;
use statemate_logic::round::{format_clock, GameState, Phase};
use statemate_logic::scoring::Outcome;
use statemate_logic::stats::StatVector;
use statemate_logic::votes::{Participant, VoteTally};

/// Everything a screen needs to draw one frame of the game.
#[derive(Debug, Clone, Serialize)]
pub struct GameSnapshot {
    /// Bumped on every applied transition.
    pub revision: u64,
    pub mode: GameMode,
    pub phase: Phase,
    pub round: u8,
    pub rounds: u8,
    pub time_left: u8,
    pub clock: String,
    pub stats: StatVector,
    pub crisis: Crisis,
    pub voting_locked: bool,
    pub diversion: bool,
    pub participants: Vec<Participant>,
    pub tally: VoteTally,
    pub outcome: Option<Outcome>,
    /// Whether the tick source is still attached.
    pub active: bool,
}

impl GameSnapshot {
    pub fn capture(state: &GameState, rounds: u8, revision: u64, active: bool) -> Self {
        Self {
            revision,
            mode: state.mode(),
            phase: state.phase(),
            round: state.round(),
            rounds,
            time_left: state.time_left(),
            clock: format_clock(state.time_left()),
            stats: state.stats(),
            crisis: *state.crisis(),
            voting_locked: state.voting_locked(),
            diversion: state.diversion(),
            participants: state.participants().to_vec(),
            tally: state.tally(),
            outcome: state.outcome(),
            active,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
