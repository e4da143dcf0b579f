//! Turn ordering for a round.
//!
//! Ascending initiative, with the fixed class priority breaking ties between
//! characters. Entities without a class (monsters, unowned summons) keep
//! their input order and act after characters at equal initiative.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::initiative::validate_initiative;
use crate::combatants::{CharacterClass, Combatant, CombatantKind, Monster};
use crate::core::{Battlefield, EngineError, EngineResult, EntityId};

/// One slot in the round's turn order. Rebuilt every round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnEntity {
    pub entity_id: EntityId,
    pub entity_type: CombatantKind,
    pub initiative: u8,
    pub name: String,
    pub character_class: Option<CharacterClass>,
}

impl TurnEntity {
    #[must_use]
    pub fn new(
        entity_id: EntityId,
        entity_type: CombatantKind,
        initiative: u8,
        name: impl Into<String>,
    ) -> Self {
        Self {
            entity_id,
            entity_type,
            initiative,
            name: name.into(),
            character_class: None,
        }
    }

    #[must_use]
    pub fn with_class(mut self, class: CharacterClass) -> Self {
        self.character_class = Some(class);
        self
    }

    fn sort_key(&self) -> (u8, u8) {
        let class_rank = self
            .character_class
            .map_or(u8::MAX, CharacterClass::turn_priority);
        (self.initiative, class_rank)
    }
}

/// Sort entities into acting order. Stable; empty input gives empty output.
#[must_use]
pub fn determine_turn_order(entities: &[TurnEntity]) -> Vec<TurnEntity> {
    let mut order = entities.to_vec();
    order.sort_by_key(TurnEntity::sort_key);
    order
}

/// Plain circular advance.
#[must_use]
pub fn next_entity_index(len: usize, current: usize) -> usize {
    if len == 0 {
        0
    } else {
        (current + 1) % len
    }
}

/// Circular advance that skips removed (dead or exhausted) entities.
///
/// The current entity itself is checked last. Returns `None` when every
/// entity is removed.
pub fn next_living_entity_index(
    order: &[TurnEntity],
    current: usize,
    is_removed: impl Fn(&TurnEntity) -> bool,
) -> Option<usize> {
    let len = order.len();
    (1..=len)
        .map(|step| (current + step) % len)
        .find(|&i| !is_removed(&order[i]))
}

/// Insert each owned summon immediately before its owner.
///
/// Summons whose owner is not in the order are dropped.
#[must_use]
pub fn sequence_with_summons(
    order: Vec<TurnEntity>,
    summons: impl IntoIterator<Item = (EntityId, TurnEntity)>,
) -> Vec<TurnEntity> {
    let summons: Vec<_> = summons.into_iter().collect();
    let mut sequenced = Vec::with_capacity(order.len() + summons.len());
    for entity in order {
        sequenced.extend(
            summons
                .iter()
                .filter(|(owner, _)| *owner == entity.entity_id)
                .map(|(_, summon)| summon.clone()),
        );
        sequenced.push(entity);
    }
    sequenced
}

/// Project the battlefield into the round's turn order.
///
/// Every active combatant must have an initiative for the round, except
/// owned summons, which follow their owner. Monster and unowned summon
/// initiatives must stay below the long-rest value.
pub fn build_turn_order(field: &Battlefield) -> EngineResult<Vec<TurnEntity>> {
    let mut characters = Vec::new();
    let mut monsters: Vec<&Monster> = Vec::new();
    let mut unowned = Vec::new();
    let mut owned = Vec::new();

    for combatant in field.iter().filter(|c| c.is_active()) {
        match combatant {
            Combatant::Character(c) => {
                let initiative = require_initiative(combatant)?;
                characters.push(
                    TurnEntity::new(c.id, CombatantKind::Character, initiative, &c.vitals.name)
                        .with_class(c.class),
                );
            }
            Combatant::Monster(m) => monsters.push(m),
            Combatant::Summon(s) => match s.owner {
                Some(owner) => owned.push((owner, s)),
                None => unowned.push(TurnEntity::new(
                    s.id,
                    CombatantKind::Summon,
                    validate_initiative(require_initiative(combatant)?)?,
                    &s.vitals.name,
                )),
            },
        }
    }

    // Group standees by type, elites first, then by standee number.
    monsters.sort_by(|a, b| {
        a.monster_type
            .cmp(&b.monster_type)
            .then(b.elite.cmp(&a.elite))
            .then(a.standee.cmp(&b.standee))
    });
    let mut entities = characters;
    for m in monsters {
        let initiative = m.initiative.ok_or_else(|| {
            EngineError::invalid_state(format!("{} has no initiative this round", m.vitals.name))
        })?;
        let initiative = validate_initiative(initiative)?;
        entities.push(TurnEntity::new(
            m.id,
            CombatantKind::Monster,
            initiative,
            &m.vitals.name,
        ));
    }
    entities.extend(unowned);

    let order = determine_turn_order(&entities);
    let summons: Vec<_> = owned
        .into_iter()
        .filter_map(|(owner, s)| {
            let owner_initiative = order
                .iter()
                .find(|e| e.entity_id == owner)
                .map(|e| e.initiative)?;
            Some((
                owner,
                TurnEntity::new(s.id, CombatantKind::Summon, owner_initiative, &s.vitals.name),
            ))
        })
        .collect();
    let order = sequence_with_summons(order, summons);

    trace!(entities = order.len(), "built turn order");
    Ok(order)
}

fn require_initiative(combatant: &Combatant) -> EngineResult<u8> {
    combatant.initiative().ok_or_else(|| {
        EngineError::invalid_state(format!("{} has no initiative this round", combatant.name()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monster(id: u32, initiative: u8) -> TurnEntity {
        TurnEntity::new(EntityId(id), CombatantKind::Monster, initiative, format!("m{id}"))
    }

    fn character(id: u32, initiative: u8, class: CharacterClass) -> TurnEntity {
        TurnEntity::new(EntityId(id), CombatantKind::Character, initiative, format!("c{id}"))
            .with_class(class)
    }

    #[test]
    fn test_ascending_initiative() {
        let order = determine_turn_order(&[monster(1, 30), monster(2, 10), monster(3, 20)]);
        let initiatives: Vec<_> = order.iter().map(|e| e.initiative).collect();
        assert_eq!(initiatives, vec![10, 20, 30]);
    }

    #[test]
    fn test_class_priority_breaks_ties() {
        let order = determine_turn_order(&[
            character(1, 99, CharacterClass::Tinkerer),
            character(2, 99, CharacterClass::Brute),
        ]);
        assert_eq!(order[0].entity_id, EntityId(2));
    }

    #[test]
    fn test_unclassed_after_classed_and_stable() {
        let order = determine_turn_order(&[
            monster(1, 40),
            character(2, 40, CharacterClass::BeastTyrant),
            monster(3, 40),
        ]);
        let ids: Vec<_> = order.iter().map(|e| e.entity_id.raw()).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn test_empty() {
        assert!(determine_turn_order(&[]).is_empty());
    }

    #[test]
    fn test_next_entity_index_wraps() {
        assert_eq!(next_entity_index(3, 0), 1);
        assert_eq!(next_entity_index(3, 2), 0);
        assert_eq!(next_entity_index(0, 0), 0);
    }

    #[test]
    fn test_next_living_skips_removed() {
        let order = vec![monster(0, 1), monster(1, 2), monster(2, 3)];
        let removed = |e: &TurnEntity| e.entity_id == EntityId(1);

        assert_eq!(next_living_entity_index(&order, 0, removed), Some(2));
        assert_eq!(next_living_entity_index(&order, 2, removed), Some(0));
        assert_eq!(next_living_entity_index(&order, 0, |_| true), None);
        assert_eq!(next_living_entity_index(&[], 0, |_| false), None);
    }

    #[test]
    fn test_summons_precede_owner() {
        let order = vec![character(1, 10, CharacterClass::Summoner), monster(2, 20)];
        let summon = TurnEntity::new(EntityId(5), CombatantKind::Summon, 10, "Bear");
        let sequenced = sequence_with_summons(order, [(EntityId(1), summon)]);

        let ids: Vec<_> = sequenced.iter().map(|e| e.entity_id.raw()).collect();
        assert_eq!(ids, vec![5, 1, 2]);
    }
}
