//! Monsters and summons.

use serde::{Deserialize, Serialize};

use super::vitals::Vitals;
use crate::cards::SummonDefinition;
use crate::core::{EntityId, HexCoord};

/// One monster standee.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Monster {
    pub id: EntityId,
    /// Group name; standees of one type share an initiative.
    pub monster_type: String,
    pub standee: u8,
    pub elite: bool,
    pub vitals: Vitals,
    pub attack: u32,
    pub movement: u32,
    /// Attack reach; `None` means melee.
    pub range: Option<u32>,
    /// Group initiative drawn for the current round.
    pub initiative: Option<u8>,
}

impl Monster {
    #[must_use]
    pub fn new(
        id: EntityId,
        monster_type: impl Into<String>,
        standee: u8,
        max_health: u32,
        attack: u32,
    ) -> Self {
        let monster_type = monster_type.into();
        Self {
            id,
            vitals: Vitals::new(format!("{monster_type} {standee}"), max_health),
            monster_type,
            standee,
            elite: false,
            attack,
            movement: 0,
            range: None,
            initiative: None,
        }
    }

    #[must_use]
    pub fn elite(mut self) -> Self {
        self.elite = true;
        self
    }

    #[must_use]
    pub fn with_range(mut self, range: u32) -> Self {
        self.range = Some(range);
        self
    }

    #[must_use]
    pub fn with_initiative(mut self, initiative: u8) -> Self {
        self.initiative = Some(initiative);
        self
    }

    #[must_use]
    pub fn at(mut self, position: HexCoord) -> Self {
        self.vitals.position = Some(position);
        self
    }
}

/// A summoned ally, usually owned by a character.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summon {
    pub id: EntityId,
    pub owner: Option<EntityId>,
    pub definition: SummonDefinition,
    pub vitals: Vitals,
    /// Own initiative, used when the summon has no owner to follow.
    pub initiative: Option<u8>,
}

impl Summon {
    #[must_use]
    pub fn new(id: EntityId, owner: Option<EntityId>, definition: SummonDefinition) -> Self {
        Self {
            id,
            owner,
            vitals: Vitals::new(definition.name.clone(), definition.health),
            definition,
            initiative: None,
        }
    }

    #[must_use]
    pub fn with_initiative(mut self, initiative: u8) -> Self {
        self.initiative = Some(initiative);
        self
    }

    #[must_use]
    pub fn at(mut self, position: HexCoord) -> Self {
        self.vitals.position = Some(position);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monster_name_from_type_and_standee() {
        let m = Monster::new(EntityId(7), "Bandit Guard", 2, 5, 2).elite();
        assert_eq!(m.vitals.name, "Bandit Guard 2");
        assert!(m.elite);
        assert_eq!(m.range, None);
    }

    #[test]
    fn test_summon_health_from_definition() {
        let def = SummonDefinition::new("Mystic Ally", 4, 2, 2, 3);
        let s = Summon::new(EntityId(9), Some(EntityId(1)), def);
        assert_eq!(s.vitals.health, 4);
        assert_eq!(s.vitals.name, "Mystic Ally");
        assert_eq!(s.owner, Some(EntityId(1)));
    }
}
