//! Council voting — the human's ballot plus simulated participants.
//!
//! Only the human's choice moves the stats. Simulated ballots are drawn
//! uniformly from the action catalog and kept for the vote board.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::actions::{random_action, ActionId};
use crate::constants::roster::HUMAN_ID;
use crate::stats::StatDelta;

/// A seat at the council table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: u32,
    pub name: String,
    pub avatar: String,
    /// Ballot for the current round, cleared at every round transition.
    pub vote: Option<ActionId>,
    /// Assigned at game start. Nothing reads it yet.
    pub opposition: bool,
    pub human: bool,
}

// (name, avatar color) for simulated seats, in seating order.
static SIMULATED_SEATS: &[(&str, &str)] = &[
    ("Minister Orlova", "purple"),
    ("General Kirov", "red"),
    ("Envoy Sato", "amber"),
    ("Treasurer Haddad", "green"),
    ("Speaker Lindqvist", "teal"),
    ("Governor Mbeki", "orange"),
    ("Advisor Castillo", "pink"),
];

/// Seat the human plus `simulated` computer participants.
///
/// Exactly one seat (possibly the human's) is flagged as opposition,
/// chosen uniformly at random.
pub fn seat_council(simulated: u8, rng: &mut impl Rng) -> Vec<Participant> {
    let mut seats = Vec::with_capacity(simulated as usize + 1);
    seats.push(Participant {
        id: HUMAN_ID,
        name: "You".to_string(),
        avatar: "blue".to_string(),
        vote: None,
        opposition: false,
        human: true,
    });

    for i in 0..simulated as usize {
        let (name, avatar) = SIMULATED_SEATS[i % SIMULATED_SEATS.len()];
        seats.push(Participant {
            id: HUMAN_ID + 1 + i as u32,
            name: name.to_string(),
            avatar: avatar.to_string(),
            vote: None,
            opposition: false,
            human: false,
        });
    }

    let opposition = rng.gen_range(0..seats.len());
    seats[opposition].opposition = true;
    seats
}

/// Record the human's ballot and draw an independent ballot for every
/// simulated seat.
pub fn cast_votes(
    participants: &[Participant],
    human_choice: ActionId,
    rng: &mut impl Rng,
) -> Vec<Participant> {
    participants
        .iter()
        .map(|p| Participant {
            vote: Some(if p.human {
                human_choice
            } else {
                random_action(rng)
            }),
            ..p.clone()
        })
        .collect()
}

pub fn clear_votes(participants: &[Participant]) -> Vec<Participant> {
    participants
        .iter()
        .map(|p| Participant {
            vote: None,
            ..p.clone()
        })
        .collect()
}

/// Sign applied to the human's effect: diversion turns help into harm.
pub fn effect_multiplier(diversion: bool) -> i32 {
    if diversion {
        -1
    } else {
        1
    }
}

/// The single effect a round's ballot resolves to.
pub fn resolved_effect(human_choice: ActionId, diversion: bool) -> StatDelta {
    human_choice
        .action()
        .effect
        .scaled(effect_multiplier(diversion))
}

/// Ballot counts per action for the vote board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct VoteTally {
    pub economy: u32,
    pub security: u32,
    pub diplomacy: u32,
    pub social: u32,
}

impl VoteTally {
    pub fn count(&self, id: ActionId) -> u32 {
        match id {
            ActionId::Economy => self.economy,
            ActionId::Security => self.security,
            ActionId::Diplomacy => self.diplomacy,
            ActionId::Social => self.social,
        }
    }

    pub fn total(&self) -> u32 {
        self.economy + self.security + self.diplomacy + self.social
    }
}

pub fn tally(participants: &[Participant]) -> VoteTally {
    let mut t = VoteTally::default();
    for vote in participants.iter().filter_map(|p| p.vote) {
        match vote {
            ActionId::Economy => t.economy += 1,
            ActionId::Security => t.security += 1,
            ActionId::Diplomacy => t.diplomacy += 1,
            ActionId::Social => t.social += 1,
        }
    }
    t
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_seat_council_layout() {
        let mut rng = StdRng::seed_from_u64(1);
        let seats = seat_council(3, &mut rng);
        assert_eq!(seats.len(), 4);
        assert_eq!(seats.iter().filter(|p| p.human).count(), 1);
        assert!(seats[0].human);
        assert_eq!(seats.iter().filter(|p| p.opposition).count(), 1);
        assert!(seats.iter().all(|p| p.vote.is_none()));
    }

    #[test]
    fn test_unique_ids() {
        let mut rng = StdRng::seed_from_u64(2);
        let seats = seat_council(7, &mut rng);
        let mut ids: Vec<_> = seats.iter().map(|p| p.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 8);
    }

    #[test]
    fn test_opposition_can_land_anywhere() {
        let mut seen = [false; 4];
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let seats = seat_council(3, &mut rng);
            let idx = seats.iter().position(|p| p.opposition).unwrap();
            seen[idx] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_cast_votes_fills_every_seat() {
        let mut rng = StdRng::seed_from_u64(5);
        let seats = seat_council(3, &mut rng);
        let voted = cast_votes(&seats, ActionId::Security, &mut rng);
        assert_eq!(voted[0].vote, Some(ActionId::Security));
        assert!(voted.iter().all(|p| p.vote.is_some()));
        assert_eq!(tally(&voted).total(), 4);
        assert!(tally(&voted).count(ActionId::Security) >= 1);
    }

    #[test]
    fn test_clear_votes() {
        let mut rng = StdRng::seed_from_u64(5);
        let seats = seat_council(2, &mut rng);
        let voted = cast_votes(&seats, ActionId::Social, &mut rng);
        let cleared = clear_votes(&voted);
        assert!(cleared.iter().all(|p| p.vote.is_none()));
        assert_eq!(tally(&cleared), VoteTally::default());
        // Seating survives the reset
        assert_eq!(cleared[1].name, voted[1].name);
        assert_eq!(
            cleared.iter().position(|p| p.opposition),
            voted.iter().position(|p| p.opposition)
        );
    }

    #[test]
    fn test_resolved_effect_sign() {
        let normal = resolved_effect(ActionId::Economy, false);
        let diverted = resolved_effect(ActionId::Economy, true);
        assert_eq!(normal.economy, 15);
        assert_eq!(diverted.economy, -15);
        assert_eq!(diverted.social, 5);
    }
}
