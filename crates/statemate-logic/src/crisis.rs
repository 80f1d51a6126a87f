//! Crisis catalog and per-round selection.
//!
//! Crises are flavor only: the effects in their descriptions are realized by
//! decay and by the players' actions, not by the crisis itself.

use rand::Rng;
use serde::Serialize;

/// A per-round event card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Crisis {
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

pub static CRISES: &[Crisis] = &[
    Crisis {
        title: "Economic Downturn",
        description: "Economy -25% | Social stability -10%",
        icon: "TrendingDown",
    },
    Crisis {
        title: "Security Threat",
        description: "Security -30% | Diplomacy +5%",
        icon: "ShieldAlert",
    },
    Crisis {
        title: "International Conflict",
        description: "Diplomacy -40% | Economy -15%",
        icon: "Globe",
    },
    Crisis {
        title: "Social Protests",
        description: "Social -35% | Security -10%",
        icon: "Users",
    },
    Crisis {
        title: "Energy Crisis",
        description: "Economy -20% | Social -15%",
        icon: "Zap",
    },
];

/// Index of the crisis every game opens with.
pub const OPENING_CRISIS: usize = 0;

/// Look up a crisis by catalog index.
pub fn crisis(index: usize) -> Option<&'static Crisis> {
    CRISES.get(index)
}

/// Draw the crisis for a round transition: uniform, with replacement.
pub fn draw_crisis(rng: &mut impl Rng) -> usize {
    rng.gen_range(0..CRISES.len())
}
