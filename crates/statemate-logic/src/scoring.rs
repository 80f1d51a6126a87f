//! End-of-game scoring — average the final stats and pick an outcome tier.

use serde::Serialize;

use crate::constants::scoring::*;
use crate::stats::StatVector;

/// Outcome tiers, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeTier {
    Victory,
    Stability,
    Crisis,
    Collapse,
}

impl OutcomeTier {
    /// Classify an average stat value. Bands are checked high to low.
    pub fn from_average(average: f32) -> Self {
        if average >= VICTORY_THRESHOLD {
            Self::Victory
        } else if average >= STABILITY_THRESHOLD {
            Self::Stability
        } else if average >= CRISIS_THRESHOLD {
            Self::Crisis
        } else {
            Self::Collapse
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Victory => "victory",
            Self::Stability => "stability",
            Self::Crisis => "crisis",
            Self::Collapse => "collapse",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Victory => "Ministers' Victory",
            Self::Stability => "Stability",
            Self::Crisis => "Crisis",
            Self::Collapse => "State Collapse",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Victory => "Trophy",
            Self::Stability => "Scale",
            Self::Crisis => "AlertTriangle",
            Self::Collapse => "Bomb",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Victory => "green",
            Self::Stability => "blue",
            Self::Crisis => "orange",
            Self::Collapse => "red",
        }
    }
}

/// Final classification of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Outcome {
    pub tier: OutcomeTier,
    pub average: f32,
    pub label: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

impl Outcome {
    /// Only a victory counts as a win on the player's profile.
    pub fn is_victory(&self) -> bool {
        self.tier == OutcomeTier::Victory
    }
}

pub fn classify(stats: &StatVector) -> Outcome {
    let average = stats.average();
    let tier = OutcomeTier::from_average(average);
    Outcome {
        tier,
        average,
        label: tier.label(),
        icon: tier.icon(),
        color: tier.color(),
    }
}
