//! Statemate Headless Simulation Harness
//!
//! Plays scripted and randomized games through the engine and checks the
//! rules hold. Runs entirely in-process: no rendering, no real clock.
//!
//! Usage:
//!   cargo run -p statemate-simtest
//!   cargo run -p statemate-simtest -- --verbose --seed 7
//!   cargo run -p statemate-simtest -- --rules data/council_rules.json --json

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use statemate_core::prelude::*;
use statemate_logic::actions::ACTIONS;
use statemate_logic::crisis::CRISES;
use statemate_logic::scoring::classify;

#[derive(Debug, Parser)]
#[command(name = "statemate-simtest", about = "Headless Statemate rules harness")]
struct Args {
    /// Print every check, not just failures, and enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Base seed for randomized sweeps
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of randomized games in the invariant sweep
    #[arg(long, default_value_t = 200)]
    games: u32,

    /// JSON rules file for the custom-rules game
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Dump the final snapshot of the custom-rules game as JSON
    #[arg(long)]
    json: bool,
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn check(name: &str, passed: bool, detail: impl Into<String>) -> TestResult {
    TestResult {
        name: name.into(),
        passed,
        detail: detail.into(),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .parse_default_env()
        .init();

    let rules = match &args.rules {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading rules from {}", path.display()))?,
        None => GameConfig::default(),
    };

    println!("=== Statemate Simulation Harness ===\n");

    let mut results = Vec::new();

    // 1. Catalogs
    results.extend(validate_catalogs());

    // 2. Solo action then expiry
    results.extend(validate_solo_round(args.seed));

    // 3. Five idle rounds
    results.extend(validate_idle_game(args.seed));

    // 4. Council ballot and diversion
    results.extend(validate_council_vote(args.seed));

    // 5. Outcome bands
    results.extend(validate_classification());

    // 6. Randomized invariant sweep
    results.extend(validate_invariants(args.seed, args.games));

    // 7. Custom rules
    results.extend(play_custom_rules(&rules, args.seed, args.json)?);

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || args.verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn started(config: GameConfig, seed: u64) -> GameEngine {
    let mut engine = GameEngine::new(config.with_seed(seed));
    engine.start_game();
    engine
}

// ── 1. Catalogs ─────────────────────────────────────────────────────────

fn validate_catalogs() -> Vec<TestResult> {
    println!("--- Catalogs ---");
    let mut results = Vec::new();

    results.push(check(
        "crisis_catalog_size",
        CRISES.len() == 5,
        format!("{} crises", CRISES.len()),
    ));

    results.push(check(
        "action_catalog_size",
        ACTIONS.len() == 4,
        format!("{} actions", ACTIONS.len()),
    ));

    let tradeoffs = ACTIONS.iter().all(|a| {
        let entries: Vec<_> = a.effect.entries().collect();
        entries.len() == 2
            && entries.iter().any(|(_, d)| *d > 0)
            && entries.iter().any(|(_, d)| *d < 0)
    });
    results.push(check(
        "actions_are_tradeoffs",
        tradeoffs,
        "each action has one gain and one cost",
    ));

    let unique_stats = Stat::ALL.iter().all(|stat| {
        ACTIONS
            .iter()
            .filter(|a| a.effect.get(*stat) > 0)
            .count()
            == 1
    });
    results.push(check(
        "one_action_per_stat",
        unique_stats,
        "every stat has exactly one action boosting it",
    ));

    results
}

// ── 2. Solo round ───────────────────────────────────────────────────────

fn validate_solo_round(seed: u64) -> Vec<TestResult> {
    println!("--- Solo round ---");
    let mut results = Vec::new();
    let mut engine = started(GameConfig::default(), seed);

    results.push(check(
        "opening_crisis",
        engine.state().crisis_index() == 0,
        engine.state().crisis().title,
    ));

    engine.submit_action(ActionId::Economy);
    let after_vote = engine.state().stats();
    results.push(check(
        "economy_action_applied",
        after_vote == StatVector::new(75, 80, 20, 45),
        format!("{:?}", after_vote),
    ));

    let second = engine.submit_action(ActionId::Security);
    results.push(check(
        "second_vote_ignored",
        second == CommandStatus::Ignored(IgnoreReason::VotingLocked)
            && engine.state().stats() == after_vote,
        format!("{:?}", second),
    ));

    let mut clock = ManualClock::new();
    clock.advance(60.0);
    engine.pump(&mut clock);
    let s = engine.state();
    results.push(check(
        "round_two_after_expiry",
        s.round() == 2
            && s.time_left() == 60
            && !s.voting_locked()
            && s.stats() == StatVector::new(65, 75, 15, 35),
        format!("round {} stats {:?}", s.round(), s.stats()),
    ));

    results
}

// ── 3. Idle game ────────────────────────────────────────────────────────

fn validate_idle_game(seed: u64) -> Vec<TestResult> {
    println!("--- Idle game ---");
    let mut results = Vec::new();
    let mut engine = started(GameConfig::default(), seed);

    let mut sums = vec![engine.state().stats().sum()];
    let mut ticks = 0u32;
    while engine.is_active() {
        let round = engine.state().round();
        engine.tick();
        ticks += 1;
        if engine.state().round() != round {
            sums.push(engine.state().stats().sum());
        }
    }

    results.push(check(
        "game_over_after_300_ticks",
        ticks == 300 && engine.state().is_over(),
        format!("{} ticks", ticks),
    ));
    results.push(check(
        "no_sixth_round",
        engine.state().round() == 5,
        format!("final round {}", engine.state().round()),
    ));
    results.push(check(
        "monotonic_decline",
        sums.windows(2).all(|w| w[1] < w[0]),
        format!("sums {:?}", sums),
    ));

    let frozen = engine.state().stats();
    engine.update(120.0);
    results.push(check(
        "stats_frozen_after_game_over",
        engine.state().stats() == frozen,
        format!("{:?}", frozen),
    ));

    results
}

// ── 4. Council ──────────────────────────────────────────────────────────

fn validate_council_vote(seed: u64) -> Vec<TestResult> {
    println!("--- Council vote ---");
    let mut results = Vec::new();

    for diversion in [false, true] {
        let mut engine = started(GameConfig::council(), seed);
        engine.set_diversion_mode(diversion);
        engine.submit_action(ActionId::Security);
        let s = engine.state();

        let simulated_voted = s
            .participants()
            .iter()
            .filter(|p| !p.human)
            .all(|p| p.vote.is_some());
        results.push(check(
            &format!("simulated_votes_diversion_{}", diversion),
            simulated_voted && s.tally().total() == 4,
            format!("tally {:?}", s.tally()),
        ));

        let expected = if diversion {
            StatVector::new(65, 60, 20, 50)
        } else {
            StatVector::new(55, 100, 20, 50)
        };
        results.push(check(
            &format!("human_effect_only_diversion_{}", diversion),
            s.stats() == expected,
            format!("{:?}", s.stats()),
        ));

        let locked = engine.set_diversion_mode(!diversion);
        results.push(check(
            &format!("diversion_locked_after_vote_{}", diversion),
            locked == CommandStatus::Ignored(IgnoreReason::VotingLocked),
            format!("{:?}", locked),
        ));
    }

    results
}

// ── 5. Classification ───────────────────────────────────────────────────

fn validate_classification() -> Vec<TestResult> {
    println!("--- Outcome bands ---");
    let cases = [
        (StatVector::new(70, 70, 70, 70), OutcomeTier::Victory),
        (StatVector::new(70, 70, 70, 69), OutcomeTier::Stability),
        (StatVector::new(50, 50, 50, 50), OutcomeTier::Stability),
        (StatVector::new(49, 49, 49, 49), OutcomeTier::Crisis),
        (StatVector::new(30, 30, 30, 30), OutcomeTier::Crisis),
        (StatVector::new(29, 29, 29, 29), OutcomeTier::Collapse),
    ];

    cases
        .iter()
        .map(|(stats, expected)| {
            let outcome = classify(stats);
            check(
                &format!("band_{:.2}", outcome.average),
                outcome.tier == *expected,
                format!("{} -> {}", outcome.average, outcome.label),
            )
        })
        .collect()
}

// ── 6. Invariant sweep ──────────────────────────────────────────────────

fn validate_invariants(seed: u64, games: u32) -> Vec<TestResult> {
    println!("--- Invariant sweep ({} games) ---", games);
    let mut violations = Vec::new();
    let mut tiers = [0u32; 4];

    for game in 0..games {
        let game_seed = seed.wrapping_add(game as u64);
        let config = if game % 2 == 0 {
            GameConfig::default()
        } else {
            GameConfig::council()
        };
        let mut engine = started(config, game_seed);
        let mut driver = StdRng::seed_from_u64(game_seed ^ 0x5eed);

        while engine.is_active() {
            match driver.gen_range(0..20) {
                0 => {
                    let id = ActionId::ALL[driver.gen_range(0..4)];
                    engine.submit_action(id);
                }
                1 => {
                    engine.set_diversion_mode(driver.gen_bool(0.5));
                }
                _ => {}
            }
            engine.update(driver.gen_range(0.0..3.0));

            let s = engine.state();
            if !s.stats().in_bounds()
                || !(1..=5).contains(&s.round())
                || s.time_left() > 60
                || s.crisis_index() >= CRISES.len()
            {
                violations.push(format!(
                    "game {} round {} t={} stats {:?}",
                    game,
                    s.round(),
                    s.time_left(),
                    s.stats()
                ));
                break;
            }
        }

        if let Some(outcome) = engine.outcome() {
            tiers[outcome.tier as usize] += 1;
        }
    }

    vec![
        check(
            "invariants_hold",
            violations.is_empty(),
            if violations.is_empty() {
                format!("{} games clean", games)
            } else {
                format!("{} violations, first: {}", violations.len(), violations[0])
            },
        ),
        check(
            "every_game_finishes",
            tiers.iter().sum::<u32>() == games,
            format!(
                "victory={} stability={} crisis={} collapse={}",
                tiers[0], tiers[1], tiers[2], tiers[3]
            ),
        ),
    ]
}

// ── 7. Custom rules ─────────────────────────────────────────────────────

fn play_custom_rules(rules: &GameConfig, seed: u64, json: bool) -> anyhow::Result<Vec<TestResult>> {
    println!("--- Custom rules ({:?}) ---", rules.mode);
    let config = GameConfig {
        seed: rules.seed.or(Some(seed)),
        ..rules.clone()
    };
    let mut engine = GameEngine::new(config.clone());
    engine.start_game();

    let mut round_seen = 0;
    while engine.is_active() {
        let round = engine.state().round();
        if round != round_seen {
            round_seen = round;
            // Always push the weakest stat
            let stats = engine.state().stats();
            let weakest = Stat::ALL
                .into_iter()
                .min_by_key(|s| stats.get(*s))
                .unwrap_or(Stat::Economy);
            let choice = ACTIONS
                .iter()
                .find(|a| a.effect.get(weakest) > 0)
                .map(|a| a.id)
                .unwrap_or(ActionId::Economy);
            engine.submit_action_for_round(choice, round);
        }
        engine.tick();
    }

    let snapshot = engine.snapshot();
    if json {
        println!("{}", snapshot.to_json()?);
    }

    Ok(vec![
        check(
            "custom_rules_finish",
            snapshot.phase == Phase::GameOver && snapshot.round == config.rounds,
            format!("{} rounds", snapshot.round),
        ),
        check(
            "custom_rules_outcome",
            snapshot.outcome.is_some(),
            snapshot
                .outcome
                .map(|o| format!("{} ({:.2})", o.label, o.average))
                .unwrap_or_default(),
        ),
    ])
}
