//! Combatants: characters, monsters, and summons.
//!
//! ## Key Types
//!
//! - `Combatant`: closed enum over the three kinds, with shared accessors
//! - `Vitals`: health, position, conditions, and bonuses common to all kinds
//! - `Character`: class, card piles, round selection, rest state
//! - `Monster` / `Summon`: enemies and summoned allies

mod character;
mod class;
mod monster;
mod vitals;

pub use character::{Character, ExhaustionReason, ShortRestState};
pub use class::CharacterClass;
pub use monster::{Monster, Summon};
pub use vitals::{ActiveBonus, Vitals};

use serde::{Deserialize, Serialize};

use crate::core::{DeckSide, EntityId, HexCoord};

/// Which kind of combatant an entity is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CombatantKind {
    Character,
    Monster,
    Summon,
}

/// Anything that takes turns on the battlefield.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Combatant {
    Character(Character),
    Monster(Monster),
    Summon(Summon),
}

impl Combatant {
    #[must_use]
    pub fn id(&self) -> EntityId {
        match self {
            Self::Character(c) => c.id,
            Self::Monster(m) => m.id,
            Self::Summon(s) => s.id,
        }
    }

    #[must_use]
    pub fn kind(&self) -> CombatantKind {
        match self {
            Self::Character(_) => CombatantKind::Character,
            Self::Monster(_) => CombatantKind::Monster,
            Self::Summon(_) => CombatantKind::Summon,
        }
    }

    /// The attack modifier deck this combatant draws from.
    #[must_use]
    pub fn deck_side(&self) -> DeckSide {
        match self {
            Self::Character(_) | Self::Summon(_) => DeckSide::Party,
            Self::Monster(_) => DeckSide::Monsters,
        }
    }

    #[must_use]
    pub fn vitals(&self) -> &Vitals {
        match self {
            Self::Character(c) => &c.vitals,
            Self::Monster(m) => &m.vitals,
            Self::Summon(s) => &s.vitals,
        }
    }

    pub fn vitals_mut(&mut self) -> &mut Vitals {
        match self {
            Self::Character(c) => &mut c.vitals,
            Self::Monster(m) => &mut m.vitals,
            Self::Summon(s) => &mut s.vitals,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.vitals().name
    }

    #[must_use]
    pub fn position(&self) -> Option<HexCoord> {
        self.vitals().position
    }

    #[must_use]
    pub fn initiative(&self) -> Option<u8> {
        match self {
            Self::Character(c) => c.initiative,
            Self::Monster(m) => m.initiative,
            Self::Summon(s) => s.initiative,
        }
    }

    /// Not dead and, for characters, not exhausted.
    #[must_use]
    pub fn is_active(&self) -> bool {
        match self {
            Self::Character(c) => c.is_active(),
            Self::Monster(_) | Self::Summon(_) => !self.vitals().dead,
        }
    }

    #[must_use]
    pub fn as_character(&self) -> Option<&Character> {
        match self {
            Self::Character(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_character_mut(&mut self) -> Option<&mut Character> {
        match self {
            Self::Character(c) => Some(c),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_monster(&self) -> Option<&Monster> {
        match self {
            Self::Monster(m) => Some(m),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_summon(&self) -> Option<&Summon> {
        match self {
            Self::Summon(s) => Some(s),
            _ => None,
        }
    }
}

impl From<Character> for Combatant {
    fn from(c: Character) -> Self {
        Self::Character(c)
    }
}

impl From<Monster> for Combatant {
    fn from(m: Monster) -> Self {
        Self::Monster(m)
    }
}

impl From<Summon> for Combatant {
    fn from(s: Summon) -> Self {
        Self::Summon(s)
    }
}
