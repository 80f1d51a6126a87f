//! Game constants — round limits, starting stats, decay, roster sizes.
//!
//! Plain values with no runtime dependency. `GameConfig::default()` is built
//! from these, and the tests assert against them directly.

pub mod rounds {
    /// Number of rounds in a standard game.
    pub const ROUND_COUNT: u8 = 5;
    /// Countdown length of one round, in ticks (nominally seconds).
    pub const ROUND_SECONDS: u8 = 60;
}

pub mod stats {
    pub const STAT_MIN: i32 = 0;
    pub const STAT_MAX: i32 = 100;

    pub const INITIAL_ECONOMY: i32 = 60;
    pub const INITIAL_SECURITY: i32 = 80;
    pub const INITIAL_DIPLOMACY: i32 = 20;
    pub const INITIAL_SOCIAL: i32 = 50;

    // Applied at every round transition.
    pub const DECAY_ECONOMY: i32 = -10;
    pub const DECAY_SECURITY: i32 = -5;
    pub const DECAY_DIPLOMACY: i32 = -5;
    pub const DECAY_SOCIAL: i32 = -10;
}

pub mod roster {
    /// Simulated council members seated next to the human player.
    pub const SIMULATED_PARTICIPANTS: u8 = 3;
    /// Upper bound accepted from configuration.
    pub const MAX_SIMULATED_PARTICIPANTS: u8 = 7;
    /// The human always takes the first seat.
    pub const HUMAN_ID: u32 = 0;
}

pub mod scoring {
    pub const VICTORY_THRESHOLD: f32 = 70.0;
    pub const STABILITY_THRESHOLD: f32 = 50.0;
    pub const CRISIS_THRESHOLD: f32 = 30.0;
}
