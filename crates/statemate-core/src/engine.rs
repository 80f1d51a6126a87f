//! Game engine - owns the current state and drives it from a clock

use rand::rngs::StdRng;
use rand::SeedableRng;

use statemate_logic::actions::ActionId;
use statemate_logic::config::GameConfig;
use statemate_logic::round::{self, CommandStatus, GameState, IgnoreReason};
use statemate_logic::scoring::Outcome;

use crate::scheduler::Scheduler;
use crate::snapshot::GameSnapshot;

/// Main game engine
pub struct GameEngine {
    config: GameConfig,
    /// Latest state value; replaced wholesale on every transition
    state: GameState,
    rng: StdRng,
    /// Fractional seconds not yet turned into ticks
    tick_accum: f32,
    /// Whether a tick source is attached
    active: bool,
    revision: u64,
}

impl GameEngine {
    /// Create an engine with a game ready but not started.
    ///
    /// Uses the configured seed when present, entropy otherwise.
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    pub fn with_rng(config: GameConfig, mut rng: StdRng) -> Self {
        let state = round::start_game(&config, &mut rng);
        Self {
            config,
            state,
            rng,
            tick_accum: 0.0,
            active: false,
            revision: 0,
        }
    }

    /// Reset everything to round 1 and attach a fresh tick source.
    /// Valid from any phase.
    pub fn start_game(&mut self) {
        self.state = round::start_game(&self.config, &mut self.rng);
        self.tick_accum = 0.0;
        self.active = true;
        self.revision += 1;
        log::info!(
            "Game started: mode={:?}, rounds={}, participants={}",
            self.config.mode,
            self.config.rounds,
            self.state.participants().len()
        );
    }

    /// Detach the tick source (host navigated away). The state is kept
    /// but nothing advances until the next `start_game`.
    pub fn leave(&mut self) {
        if self.active {
            log::info!("Left game at round {}", self.state.round());
        }
        self.active = false;
        self.tick_accum = 0.0;
    }

    /// Submit the human's action for the current round.
    pub fn submit_action(&mut self, choice: ActionId) -> CommandStatus {
        if let Some(reason) = self.inactive_reason() {
            return self.ignored("submit_action", reason);
        }
        let (next, status) = round::submit_action(&self.state, choice, &mut self.rng);
        self.commit("submit_action", next, status)
    }

    /// Submit an action stamped with the round the player saw. Ignored if
    /// that round has already expired.
    pub fn submit_action_for_round(&mut self, choice: ActionId, round_no: u8) -> CommandStatus {
        if let Some(reason) = self.inactive_reason() {
            return self.ignored("submit_action", reason);
        }
        let (next, status) =
            round::submit_action_for_round(&self.state, choice, round_no, &mut self.rng);
        self.commit("submit_action", next, status)
    }

    pub fn set_diversion_mode(&mut self, enabled: bool) -> CommandStatus {
        if let Some(reason) = self.inactive_reason() {
            return self.ignored("set_diversion_mode", reason);
        }
        let (next, status) = round::set_diversion(&self.state, enabled);
        self.commit("set_diversion_mode", next, status)
    }

    /// Advance the countdown by one second.
    pub fn tick(&mut self) -> CommandStatus {
        if !self.active {
            return CommandStatus::Ignored(IgnoreReason::Inactive);
        }

        let prev_round = self.state.round();
        self.state = round::tick(&self.state, &self.config, &mut self.rng);
        self.revision += 1;

        if self.state.is_over() {
            self.active = false;
            self.tick_accum = 0.0;
            if let Some(outcome) = self.state.outcome() {
                log::info!(
                    "Game over: {} (average {:.2})",
                    outcome.tier.as_str(),
                    outcome.average
                );
            }
        } else if self.state.round() != prev_round {
            let stats = self.state.stats();
            log::info!(
                "Round {} begins: crisis='{}' economy={} security={} diplomacy={} social={}",
                self.state.round(),
                self.state.crisis().title,
                stats.economy(),
                stats.security(),
                stats.diplomacy(),
                stats.social()
            );
        }
        CommandStatus::Applied
    }

    /// Feed elapsed wall time; fires one tick per whole second.
    /// Returns the number of ticks fired.
    pub fn update(&mut self, delta_seconds: f32) -> u32 {
        if !self.active {
            return 0;
        }
        self.tick_accum += delta_seconds.max(0.0);

        let mut fired = 0;
        while self.active && self.tick_accum >= 1.0 {
            self.tick_accum -= 1.0;
            self.tick();
            fired += 1;
        }
        fired
    }

    /// Pull elapsed time from a scheduler and apply it.
    pub fn pump(&mut self, scheduler: &mut impl Scheduler) -> u32 {
        let elapsed = scheduler.elapsed_seconds();
        self.update(elapsed)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.state.outcome()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(&self.state, self.config.rounds, self.revision, self.active)
    }

    // Game-over is reported by the transition itself, so only a detached
    // tick source on a live game is checked here.
    fn inactive_reason(&self) -> Option<IgnoreReason> {
        (!self.active && !self.state.is_over()).then_some(IgnoreReason::Inactive)
    }

    fn commit(&mut self, command: &str, next: GameState, status: CommandStatus) -> CommandStatus {
        match status {
            CommandStatus::Applied => {
                self.state = next;
                self.revision += 1;
                log::debug!(
                    "{} applied in round {} ({}s left)",
                    command,
                    self.state.round(),
                    self.state.time_left()
                );
                status
            }
            CommandStatus::Ignored(reason) => self.ignored(command, reason),
        }
    }

    fn ignored(&self, command: &str, reason: IgnoreReason) -> CommandStatus {
        log::debug!("{} ignored: {:?}", command, reason);
        CommandStatus::Ignored(reason)
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
