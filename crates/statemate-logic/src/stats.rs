//! The four governance stats and their clamped update primitives.
//!
//! Every value lives in `[STAT_MIN, STAT_MAX]`. Writes go through
//! [`StatVector::apply`], which returns a new vector with all four fields
//! clamped, so a reader can never observe an out-of-range stat.

use serde::{Deserialize, Serialize};

use crate::constants::stats::*;

/// One of the four governance metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    Economy,
    Security,
    Diplomacy,
    Social,
}

impl Stat {
    pub const ALL: [Stat; 4] = [Stat::Economy, Stat::Security, Stat::Diplomacy, Stat::Social];

    pub fn name(self) -> &'static str {
        match self {
            Stat::Economy => "economy",
            Stat::Security => "security",
            Stat::Diplomacy => "diplomacy",
            Stat::Social => "social",
        }
    }

    /// Axis label shown on the stat chart.
    pub fn label(self) -> &'static str {
        match self {
            Stat::Economy => "Economy",
            Stat::Security => "Security",
            Stat::Diplomacy => "Diplomacy",
            Stat::Social => "Social",
        }
    }
}

/// A partial stat map of signed deltas. Missing entries are zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatDelta {
    pub economy: i32,
    pub security: i32,
    pub diplomacy: i32,
    pub social: i32,
}

impl StatDelta {
    pub const ZERO: StatDelta = StatDelta {
        economy: 0,
        security: 0,
        diplomacy: 0,
        social: 0,
    };

    /// Decay applied at every round transition.
    pub const DECAY: StatDelta = StatDelta {
        economy: DECAY_ECONOMY,
        security: DECAY_SECURITY,
        diplomacy: DECAY_DIPLOMACY,
        social: DECAY_SOCIAL,
    };

    pub fn get(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Economy => self.economy,
            Stat::Security => self.security,
            Stat::Diplomacy => self.diplomacy,
            Stat::Social => self.social,
        }
    }

    /// Non-zero entries, in catalog order.
    pub fn entries(&self) -> impl Iterator<Item = (Stat, i32)> + '_ {
        Stat::ALL
            .into_iter()
            .map(move |s| (s, self.get(s)))
            .filter(|(_, d)| *d != 0)
    }

    pub fn scaled(&self, multiplier: i32) -> StatDelta {
        StatDelta {
            economy: self.economy.saturating_mul(multiplier),
            security: self.security.saturating_mul(multiplier),
            diplomacy: self.diplomacy.saturating_mul(multiplier),
            social: self.social.saturating_mul(multiplier),
        }
    }
}

/// Raw, unchecked stat values as they appear in config files.
#[derive(Debug, Clone, Copy, Deserialize)]
struct RawStats {
    economy: i32,
    security: i32,
    diplomacy: i32,
    social: i32,
}

impl From<RawStats> for StatVector {
    fn from(raw: RawStats) -> Self {
        StatVector::new(raw.economy, raw.security, raw.diplomacy, raw.social)
    }
}

/// Current values of the four stats, each clamped to `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawStats")]
pub struct StatVector {
    economy: i32,
    security: i32,
    diplomacy: i32,
    social: i32,
}

fn clamp_stat(value: i32) -> i32 {
    value.clamp(STAT_MIN, STAT_MAX)
}

impl StatVector {
    pub fn new(economy: i32, security: i32, diplomacy: i32, social: i32) -> Self {
        Self {
            economy: clamp_stat(economy),
            security: clamp_stat(security),
            diplomacy: clamp_stat(diplomacy),
            social: clamp_stat(social),
        }
    }

    /// Starting values for a fresh game (60 / 80 / 20 / 50).
    pub fn initial() -> Self {
        Self::new(
            INITIAL_ECONOMY,
            INITIAL_SECURITY,
            INITIAL_DIPLOMACY,
            INITIAL_SOCIAL,
        )
    }

    pub fn economy(&self) -> i32 {
        self.economy
    }

    pub fn security(&self) -> i32 {
        self.security
    }

    pub fn diplomacy(&self) -> i32 {
        self.diplomacy
    }

    pub fn social(&self) -> i32 {
        self.social
    }

    pub fn get(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Economy => self.economy,
            Stat::Security => self.security,
            Stat::Diplomacy => self.diplomacy,
            Stat::Social => self.social,
        }
    }

    /// Add `delta * multiplier` to every field, then clamp. Arithmetic
    /// saturates, so an oversized delta pins the stat to the matching bound.
    pub fn apply(&self, delta: &StatDelta, multiplier: i32) -> StatVector {
        let d = delta.scaled(multiplier);
        StatVector::new(
            self.economy.saturating_add(d.economy),
            self.security.saturating_add(d.security),
            self.diplomacy.saturating_add(d.diplomacy),
            self.social.saturating_add(d.social),
        )
    }

    /// Apply a decay map through the same clamp path as actions.
    pub fn decay(&self, decay: &StatDelta) -> StatVector {
        self.apply(decay, 1)
    }

    pub fn sum(&self) -> i32 {
        self.economy + self.security + self.diplomacy + self.social
    }

    pub fn average(&self) -> f32 {
        self.sum() as f32 / 4.0
    }

    pub fn iter(&self) -> impl Iterator<Item = (Stat, i32)> + '_ {
        Stat::ALL.into_iter().map(move |s| (s, self.get(s)))
    }

    pub fn in_bounds(&self) -> bool {
        self.iter().all(|(_, v)| (STAT_MIN..=STAT_MAX).contains(&v))
    }
}

impl Default for StatVector {
    fn default() -> Self {
        Self::initial()
    }
}
