//! Pure round logic for Statemate.
//!
//! This crate holds every rule of the game with no clock, logger, or other
//! runtime attached. Transitions take a state value and return the next one;
//! randomness is passed in as `&mut impl Rng` so a seeded generator makes a
//! whole game reproducible.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`actions`] | The four policy actions and their stat trade-offs |
//! | [`config`] | Rules configuration (mode, seed, rounds, starting stats, decay) |
//! | [`constants`] | Round limits, starting values, decay, score thresholds |
//! | [`crisis`] | Crisis catalog and per-round draw |
//! | [`round`] | Round lifecycle state machine |
//! | [`scoring`] | Final average and outcome tier |
//! | [`stats`] | Clamped four-stat vector and partial deltas |
//! | [`votes`] | Council seating, simulated ballots, tally, diversion sign |

pub mod actions;
pub mod config;
pub mod constants;
pub mod crisis;
pub mod round;
pub mod scoring;
pub mod stats;
pub mod votes;
