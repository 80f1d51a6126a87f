//! Action catalog — the four policy moves a participant can vote for.
//!
//! Each action boosts one stat and costs a different one, so no choice is a
//! free win.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::stats::StatDelta;

/// Catalog id of an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionId {
    Economy,
    Security,
    Diplomacy,
    Social,
}

impl ActionId {
    pub const ALL: [ActionId; 4] = [
        ActionId::Economy,
        ActionId::Security,
        ActionId::Diplomacy,
        ActionId::Social,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ActionId::Economy => "economy",
            ActionId::Security => "security",
            ActionId::Diplomacy => "diplomacy",
            ActionId::Social => "social",
        }
    }

    /// The catalog entry for this id.
    pub fn action(self) -> &'static Action {
        &ACTIONS[self as usize]
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a catalog action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown action id: {0}")]
pub struct UnknownAction(pub String);

impl FromStr for ActionId {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownAction(s.to_string()))
    }
}

/// A selectable policy action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Action {
    pub id: ActionId,
    pub name: &'static str,
    pub icon: &'static str,
    pub effect: StatDelta,
    pub color: &'static str,
}

/// Ordered so that `ACTIONS[id as usize].id == id`.
pub static ACTIONS: [Action; 4] = [
    Action {
        id: ActionId::Economy,
        name: "Economy",
        icon: "DollarSign",
        effect: StatDelta {
            economy: 15,
            social: -5,
            ..StatDelta::ZERO
        },
        color: "green",
    },
    Action {
        id: ActionId::Security,
        name: "Security",
        icon: "Shield",
        effect: StatDelta {
            security: 20,
            economy: -5,
            ..StatDelta::ZERO
        },
        color: "blue",
    },
    Action {
        id: ActionId::Diplomacy,
        name: "Diplomacy",
        icon: "Handshake",
        effect: StatDelta {
            diplomacy: 18,
            security: -5,
            ..StatDelta::ZERO
        },
        color: "purple",
    },
    Action {
        id: ActionId::Social,
        name: "Social",
        icon: "Heart",
        effect: StatDelta {
            social: 20,
            economy: -5,
            ..StatDelta::ZERO
        },
        color: "pink",
    },
];

/// Look up an action by its string id.
pub fn find_action(id: &str) -> Option<&'static Action> {
    id.parse::<ActionId>().ok().map(ActionId::action)
}

/// Uniform pick from the catalog, used for simulated voters.
pub fn random_action(rng: &mut impl Rng) -> ActionId {
    ActionId::ALL[rng.gen_range(0..ActionId::ALL.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::Stat;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_catalog_index_matches_id() {
        for (i, action) in ACTIONS.iter().enumerate() {
            assert_eq!(action.id as usize, i);
            assert_eq!(action.id.action().name, action.name);
        }
    }

    #[test]
    fn test_each_action_is_a_tradeoff() {
        for action in ACTIONS.iter() {
            let entries: Vec<_> = action.effect.entries().collect();
            assert_eq!(entries.len(), 2, "{} should touch two stats", action.id);
            assert_eq!(entries.iter().filter(|(_, d)| *d > 0).count(), 1);
            assert_eq!(entries.iter().filter(|(_, d)| *d < 0).count(), 1);
        }
    }

    #[test]
    fn test_primary_stat_matches_id() {
        assert_eq!(ActionId::Economy.action().effect.get(Stat::Economy), 15);
        assert_eq!(ActionId::Security.action().effect.get(Stat::Security), 20);
        assert_eq!(ActionId::Diplomacy.action().effect.get(Stat::Diplomacy), 18);
        assert_eq!(ActionId::Social.action().effect.get(Stat::Social), 20);
    }

    #[test]
    fn test_parse_ids() {
        assert_eq!("diplomacy".parse::<ActionId>(), Ok(ActionId::Diplomacy));
        let err = "bribery".parse::<ActionId>().unwrap_err();
        assert_eq!(err, UnknownAction("bribery".to_string()));
        assert_eq!(err.to_string(), "unknown action id: bribery");
        assert_eq!(find_action("social").unwrap().icon, "Heart");
        assert!(find_action("").is_none());
    }

    #[test]
    fn test_random_action_in_catalog() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut counts = [0u32; 4];
        for _ in 0..400 {
            counts[random_action(&mut rng) as usize] += 1;
        }
        assert!(counts.iter().all(|c| *c > 0));
    }
}
