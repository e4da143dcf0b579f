//! Monster focus selection.

use std::cmp::Ordering;

use crate::combatants::{Character, Monster, Summon};
use crate::conditions::Condition;
use crate::core::{EntityId, HexCoord};

/// A candidate the monster could focus on.
#[derive(Clone, Copy, Debug)]
struct Candidate {
    id: EntityId,
    distance: u32,
    is_summon: bool,
    initiative: Option<u8>,
    input_order: usize,
}

impl Candidate {
    /// Lower sorts first: nearest, then summons before characters, then
    /// lowest initiative (unset last), then input order.
    fn cmp_focus(&self, other: &Self) -> Ordering {
        self.distance
            .cmp(&other.distance)
            .then(other.is_summon.cmp(&self.is_summon))
            .then_with(|| match (self.initiative, other.initiative) {
                (Some(a), Some(b)) => a.cmp(&b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
            .then(self.input_order.cmp(&other.input_order))
    }
}

fn reachable(position: Option<HexCoord>, invisible: bool) -> Option<HexCoord> {
    if invisible {
        None
    } else {
        position
    }
}

/// Pick the monster's focus among characters and summons.
///
/// Exhausted, dead, invisible, or off-map figures are never chosen. Pass
/// an empty `summons` slice when no summons are in play.
#[must_use]
pub fn select_focus_target(
    monster: &Monster,
    characters: &[&Character],
    summons: &[&Summon],
) -> Option<EntityId> {
    let origin = monster.vitals.position?;

    let character_candidates = characters
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_active())
        .filter_map(|(i, c)| {
            let hex = reachable(c.vitals.position, c.vitals.conditions.has(Condition::Invisible))?;
            Some(Candidate {
                id: c.id,
                distance: origin.distance(hex),
                is_summon: false,
                initiative: c.initiative,
                input_order: i,
            })
        });

    let summon_candidates = summons
        .iter()
        .enumerate()
        .filter(|(_, s)| !s.vitals.dead)
        .filter_map(|(i, s)| {
            let hex = reachable(s.vitals.position, s.vitals.conditions.has(Condition::Invisible))?;
            Some(Candidate {
                id: s.id,
                distance: origin.distance(hex),
                is_summon: true,
                initiative: s.initiative,
                input_order: i,
            })
        });

    character_candidates
        .chain(summon_candidates)
        .min_by(Candidate::cmp_focus)
        .map(|c| c.id)
}
