//! Round lifecycle — the timer-driven state machine for one game.
//!
//! Every transition is a pure function from one [`GameState`] to the next.
//! Nothing here mutates in place; a host keeps the latest value and swaps it
//! after each call.
//!
//! ```text
//!  start_game ──> AwaitingVote ──submit──> Resolved
//!                      │                      │
//!                      └──── time hits 0 ─────┘
//!                                 │
//!                           RoundAdvancing
//!                          /              \
//!              round < last                round == last
//!         (decay, new crisis)                   │
//!                 │                          GameOver
//!            AwaitingVote
//! ```

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::actions::ActionId;
use crate::config::{GameConfig, GameMode};
use crate::crisis::{draw_crisis, Crisis, CRISES, OPENING_CRISIS};
use crate::scoring::{classify, Outcome};
use crate::stats::StatVector;
use crate::votes::{
    cast_votes, clear_votes, resolved_effect, seat_council, tally, Participant, VoteTally,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Countdown running, ballot open.
    AwaitingVote,
    /// Countdown running, ballot locked until the round ends.
    Resolved,
    /// Countdown expired; the next call to [`advance_round`] settles it.
    RoundAdvancing,
    /// Final round expired. Stats are frozen.
    GameOver,
}

/// Why a command left the state unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    /// A ballot was already accepted this round.
    VotingLocked,
    GameOver,
    /// The command was issued for a round that has already ended.
    StaleRound,
    /// Diversion only exists in council games.
    SoloMode,
    /// The host has detached the tick source.
    Inactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandStatus {
    Applied,
    Ignored(IgnoreReason),
}

impl CommandStatus {
    pub fn is_applied(self) -> bool {
        self == CommandStatus::Applied
    }
}

/// Complete state of one game in progress.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameState {
    mode: GameMode,
    stats: StatVector,
    round: u8,
    time_left: u8,
    crisis: usize,
    phase: Phase,
    diversion: bool,
    participants: Vec<Participant>,
}

impl GameState {
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn stats(&self) -> StatVector {
        self.stats
    }

    pub fn round(&self) -> u8 {
        self.round
    }

    pub fn time_left(&self) -> u8 {
        self.time_left
    }

    pub fn crisis_index(&self) -> usize {
        self.crisis
    }

    pub fn crisis(&self) -> &'static Crisis {
        &CRISES[self.crisis]
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn diversion(&self) -> bool {
        self.diversion
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn human(&self) -> Option<&Participant> {
        self.participants.iter().find(|p| p.human)
    }

    pub fn tally(&self) -> VoteTally {
        tally(&self.participants)
    }

    /// Ballot is closed for the rest of this round (or for good).
    pub fn voting_locked(&self) -> bool {
        self.phase != Phase::AwaitingVote
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Final classification, available once the game is over.
    pub fn outcome(&self) -> Option<Outcome> {
        self.is_over().then(|| classify(&self.stats))
    }

    fn ballot_block(&self) -> Option<IgnoreReason> {
        match self.phase {
            Phase::AwaitingVote => None,
            Phase::Resolved | Phase::RoundAdvancing => Some(IgnoreReason::VotingLocked),
            Phase::GameOver => Some(IgnoreReason::GameOver),
        }
    }
}

/// Fresh game: round 1, full countdown, opening crisis, starting stats.
pub fn start_game(config: &GameConfig, rng: &mut impl Rng) -> GameState {
    let participants = match config.mode {
        GameMode::Solo => Vec::new(),
        GameMode::Council => seat_council(config.simulated_participants, rng),
    };

    GameState {
        mode: config.mode,
        stats: config.initial_stats,
        round: 1,
        time_left: config.round_seconds,
        crisis: OPENING_CRISIS,
        phase: Phase::AwaitingVote,
        diversion: false,
        participants,
    }
}

/// One unit of countdown. Expiry runs the round transition immediately.
pub fn tick(state: &GameState, config: &GameConfig, rng: &mut impl Rng) -> GameState {
    match state.phase {
        Phase::AwaitingVote | Phase::Resolved => {
            // The only path into expiry; the countdown never goes below 0.
            let time_left = state.time_left.saturating_sub(1);
            let next = GameState {
                time_left,
                ..state.clone()
            };
            if time_left == 0 {
                advance_round(&expire(&next), config, rng)
            } else {
                next
            }
        }
        Phase::RoundAdvancing => advance_round(state, config, rng),
        Phase::GameOver => state.clone(),
    }
}

/// End the current round's countdown, with or without a ballot.
pub fn expire(state: &GameState) -> GameState {
    match state.phase {
        Phase::AwaitingVote | Phase::Resolved => GameState {
            time_left: 0,
            phase: Phase::RoundAdvancing,
            ..state.clone()
        },
        _ => state.clone(),
    }
}

/// Settle an expired round: either finish the game or open the next round
/// with decay applied and a freshly drawn crisis.
pub fn advance_round(state: &GameState, config: &GameConfig, rng: &mut impl Rng) -> GameState {
    if state.phase != Phase::RoundAdvancing {
        return state.clone();
    }

    if state.round >= config.rounds {
        return GameState {
            phase: Phase::GameOver,
            time_left: 0,
            ..state.clone()
        };
    }

    GameState {
        round: state.round + 1,
        time_left: config.round_seconds,
        crisis: draw_crisis(rng),
        stats: state.stats.decay(&config.decay),
        participants: clear_votes(&state.participants),
        phase: Phase::AwaitingVote,
        ..state.clone()
    }
}

/// Accept the human's ballot for the current round.
///
/// Solo games apply the action directly. Council games also draw a ballot
/// for every simulated seat, then apply only the human's effect, inverted
/// when diversion is on.
pub fn submit_action(
    state: &GameState,
    choice: ActionId,
    rng: &mut impl Rng,
) -> (GameState, CommandStatus) {
    if let Some(reason) = state.ballot_block() {
        return (state.clone(), CommandStatus::Ignored(reason));
    }

    let next = match state.mode {
        GameMode::Solo => GameState {
            stats: state.stats.apply(&choice.action().effect, 1),
            phase: Phase::Resolved,
            ..state.clone()
        },
        GameMode::Council => GameState {
            stats: state.stats.apply(&resolved_effect(choice, state.diversion), 1),
            participants: cast_votes(&state.participants, choice, rng),
            phase: Phase::Resolved,
            ..state.clone()
        },
    };
    (next, CommandStatus::Applied)
}

/// Like [`submit_action`], but ignored if `round` is no longer current.
/// Lets a host drop a click that raced with the round expiring.
pub fn submit_action_for_round(
    state: &GameState,
    choice: ActionId,
    round: u8,
    rng: &mut impl Rng,
) -> (GameState, CommandStatus) {
    if !state.is_over() && round != state.round {
        return (state.clone(), CommandStatus::Ignored(IgnoreReason::StaleRound));
    }
    submit_action(state, choice, rng)
}

/// Toggle diversion. Only allowed in council games while the ballot is open.
pub fn set_diversion(state: &GameState, enabled: bool) -> (GameState, CommandStatus) {
    if state.mode == GameMode::Solo {
        return (state.clone(), CommandStatus::Ignored(IgnoreReason::SoloMode));
    }
    if let Some(reason) = state.ballot_block() {
        return (state.clone(), CommandStatus::Ignored(reason));
    }
    let next = GameState {
        diversion: enabled,
        ..state.clone()
    };
    (next, CommandStatus::Applied)
}

/// Countdown as `M:SS`.
pub fn format_clock(seconds: u8) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::ACTIONS;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn run_ticks(state: &GameState, n: u32, config: &GameConfig, rng: &mut StdRng) -> GameState {
        let mut s = state.clone();
        for _ in 0..n {
            s = tick(&s, config, rng);
        }
        s
    }

    #[test]
    fn test_start_game_defaults() {
        let mut rng = StdRng::seed_from_u64(1);
        let s = start_game(&GameConfig::default(), &mut rng);
        assert_eq!(s.stats(), StatVector::new(60, 80, 20, 50));
        assert_eq!(s.round(), 1);
        assert_eq!(s.time_left(), 60);
        assert_eq!(s.crisis_index(), 0);
        assert_eq!(s.phase(), Phase::AwaitingVote);
        assert!(!s.voting_locked());
        assert!(s.participants().is_empty());
        assert!(s.outcome().is_none());
    }

    #[test]
    fn test_tick_counts_down() {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        let s = start_game(&config, &mut rng);
        let s = run_ticks(&s, 59, &config, &mut rng);
        assert_eq!(s.round(), 1);
        assert_eq!(s.time_left(), 1);
    }

    #[test]
    fn test_submit_then_expire() {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        let s = start_game(&config, &mut rng);
        let (s, status) = submit_action(&s, ActionId::Economy, &mut rng);
        assert!(status.is_applied());
        assert_eq!(s.stats().economy(), 75);
        assert_eq!(s.stats().social(), 45);
        assert_eq!(s.phase(), Phase::Resolved);

        let s = run_ticks(&s, 60, &config, &mut rng);
        assert_eq!(s.round(), 2);
        assert_eq!(s.time_left(), 60);
        assert_eq!(s.stats(), StatVector::new(65, 75, 15, 35));
        assert!(!s.voting_locked());
    }

    #[test]
    fn test_second_submission_ignored() {
        let mut rng = StdRng::seed_from_u64(1);
        let s = start_game(&GameConfig::default(), &mut rng);
        let (once, _) = submit_action(&s, ActionId::Social, &mut rng);
        let (twice, status) = submit_action(&once, ActionId::Social, &mut rng);
        assert_eq!(status, CommandStatus::Ignored(IgnoreReason::VotingLocked));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_expire_without_vote_only_decays() {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(4);
        let s = start_game(&config, &mut rng);
        let s = advance_round(&expire(&s), &config, &mut rng);
        assert_eq!(s.round(), 2);
        assert_eq!(s.stats(), StatVector::new(50, 75, 15, 40));
    }

    #[test]
    fn test_expire_is_noop_after_game_over() {
        let config = GameConfig {
            rounds: 1,
            ..GameConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(4);
        let s = start_game(&config, &mut rng);
        let over = tick(&expire(&s), &config, &mut rng);
        assert!(over.is_over());
        assert_eq!(expire(&over), over);
        assert_eq!(advance_round(&over, &config, &mut rng), over);
    }

    #[test]
    fn test_game_over_after_last_round() {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(11);
        let s = start_game(&config, &mut rng);
        let s = run_ticks(&s, 4 * 60 + 59, &config, &mut rng);
        assert_eq!(s.round(), 5);
        assert!(!s.is_over());

        let s = tick(&s, &config, &mut rng);
        assert!(s.is_over());
        assert_eq!(s.round(), 5);
        assert_eq!(s.time_left(), 0);
        // Four transitions of decay, none on the final expiry
        assert_eq!(s.stats(), StatVector::new(20, 60, 0, 10));

        let later = run_ticks(&s, 120, &config, &mut rng);
        assert_eq!(later, s);
        assert_eq!(later.outcome().unwrap().tier.as_str(), "collapse");
    }

    #[test]
    fn test_submit_after_game_over() {
        let config = GameConfig {
            rounds: 1,
            round_seconds: 1,
            ..GameConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(2);
        let s = tick(&start_game(&config, &mut rng), &config, &mut rng);
        assert!(s.is_over());
        let (after, status) = submit_action(&s, ActionId::Economy, &mut rng);
        assert_eq!(status, CommandStatus::Ignored(IgnoreReason::GameOver));
        assert_eq!(after, s);
    }

    #[test]
    fn test_stale_round_submission() {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(2);
        let s = run_ticks(&start_game(&config, &mut rng), 60, &config, &mut rng);
        assert_eq!(s.round(), 2);
        let (after, status) = submit_action_for_round(&s, ActionId::Security, 1, &mut rng);
        assert_eq!(status, CommandStatus::Ignored(IgnoreReason::StaleRound));
        assert_eq!(after, s);

        let (_, status) = submit_action_for_round(&s, ActionId::Security, 2, &mut rng);
        assert!(status.is_applied());
    }

    #[test]
    fn test_council_submission() {
        let config = GameConfig::council();
        let mut rng = StdRng::seed_from_u64(8);
        let s = start_game(&config, &mut rng);
        assert_eq!(s.participants().len(), 4);

        let (s, status) = submit_action(&s, ActionId::Security, &mut rng);
        assert!(status.is_applied());
        assert_eq!(s.human().unwrap().vote, Some(ActionId::Security));
        assert!(s
            .participants()
            .iter()
            .all(|p| p.vote.map_or(false, |v| ACTIONS.iter().any(|a| a.id == v))));
        // Only the human's ballot moves the stats
        assert_eq!(s.stats(), StatVector::new(55, 100, 20, 50));
    }

    #[test]
    fn test_diversion_inverts_effect() {
        let config = GameConfig::council();
        let mut rng = StdRng::seed_from_u64(8);
        let s = start_game(&config, &mut rng);
        let (diverted, status) = set_diversion(&s, true);
        assert!(status.is_applied());

        let (normal, _) = submit_action(&s, ActionId::Diplomacy, &mut rng);
        let (inverted, _) = submit_action(&diverted, ActionId::Diplomacy, &mut rng);
        assert_eq!(normal.stats(), StatVector::new(60, 75, 38, 50));
        assert_eq!(inverted.stats(), StatVector::new(60, 85, 2, 50));
    }

    #[test]
    fn test_diversion_locked_after_vote() {
        let config = GameConfig::council();
        let mut rng = StdRng::seed_from_u64(8);
        let s = start_game(&config, &mut rng);
        let (s, _) = submit_action(&s, ActionId::Economy, &mut rng);
        let (after, status) = set_diversion(&s, true);
        assert_eq!(status, CommandStatus::Ignored(IgnoreReason::VotingLocked));
        assert!(!after.diversion());
    }

    #[test]
    fn test_diversion_rejected_in_solo() {
        let mut rng = StdRng::seed_from_u64(8);
        let s = start_game(&GameConfig::default(), &mut rng);
        let (after, status) = set_diversion(&s, true);
        assert_eq!(status, CommandStatus::Ignored(IgnoreReason::SoloMode));
        assert!(!after.diversion());
    }

    #[test]
    fn test_round_transition_clears_votes() {
        let config = GameConfig::council();
        let mut rng = StdRng::seed_from_u64(13);
        let s = start_game(&config, &mut rng);
        let (s, _) = submit_action(&s, ActionId::Social, &mut rng);
        assert_eq!(s.tally().total(), 4);
        let s = run_ticks(&s, 60, &config, &mut rng);
        assert_eq!(s.tally().total(), 0);
        assert!(s.participants().iter().all(|p| p.vote.is_none()));
    }

    #[test]
    fn test_invariants_under_random_play() {
        for seed in 0..40 {
            let config = if seed % 2 == 0 {
                GameConfig::default()
            } else {
                GameConfig::council()
            };
            let mut rng = StdRng::seed_from_u64(seed);
            let mut s = start_game(&config, &mut rng);
            while !s.is_over() {
                if rng.gen_bool(0.05) {
                    let choice = ActionId::ALL[rng.gen_range(0..4)];
                    s = submit_action(&s, choice, &mut rng).0;
                }
                if rng.gen_bool(0.02) {
                    s = set_diversion(&s, rng.gen_bool(0.5)).0;
                }
                s = tick(&s, &config, &mut rng);
                assert!(s.stats().in_bounds());
                assert!((1..=5).contains(&s.round()));
                assert!(s.time_left() <= 60);
                assert!(s.crisis_index() < CRISES.len());
            }
            assert_eq!(s.round(), 5);
        }
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(60), "1:00");
        assert_eq!(format_clock(59), "0:59");
        assert_eq!(format_clock(7), "0:07");
        assert_eq!(format_clock(0), "0:00");
    }
}
