//! State shared by every combatant: health, position, conditions, bonuses.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{BonusDuration, BonusKind};
use crate::conditions::ConditionSet;
use crate::core::HexCoord;

/// A shield, retaliate, or round bonus granted by a card action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveBonus {
    pub kind: BonusKind,
    pub value: u32,
    /// Retaliate reach; `None` means adjacent only.
    pub range: Option<u32>,
    pub duration: BonusDuration,
    /// Round the bonus was granted in.
    pub round: u32,
}

impl ActiveBonus {
    #[must_use]
    pub fn new(kind: BonusKind, value: u32, duration: BonusDuration, round: u32) -> Self {
        Self {
            kind,
            value,
            range: None,
            duration,
            round,
        }
    }

    #[must_use]
    pub fn with_range(mut self, range: u32) -> Self {
        self.range = Some(range);
        self
    }
}

/// Health, placement, conditions, and bonuses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vitals {
    pub name: String,
    pub position: Option<HexCoord>,
    pub health: u32,
    pub max_health: u32,
    pub conditions: ConditionSet,
    pub bonuses: Vector<ActiveBonus>,
    /// Set for monsters and summons reduced to 0 HP. Characters are
    /// exhausted instead.
    pub dead: bool,
}

impl Vitals {
    #[must_use]
    pub fn new(name: impl Into<String>, max_health: u32) -> Self {
        Self {
            name: name.into(),
            position: None,
            health: max_health,
            max_health,
            conditions: ConditionSet::new(),
            bonuses: Vector::new(),
            dead: false,
        }
    }

    /// Sum of active bonuses of one kind.
    #[must_use]
    pub fn bonus_total(&self, kind: BonusKind) -> u32 {
        self.bonuses
            .iter()
            .filter(|b| b.kind == kind)
            .map(|b| b.value)
            .sum()
    }

    #[must_use]
    pub fn shield(&self) -> u32 {
        self.bonus_total(BonusKind::Shield)
    }

    /// Strongest retaliate reaching `distance` hexes.
    #[must_use]
    pub fn retaliate_at(&self, distance: u32) -> u32 {
        self.bonuses
            .iter()
            .filter(|b| b.kind == BonusKind::Retaliate && distance <= b.range.unwrap_or(1))
            .map(|b| b.value)
            .sum()
    }

    /// Subtract damage, saturating at zero. Returns the damage actually dealt.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let dealt = amount.min(self.health);
        self.health -= dealt;
        dealt
    }

    /// Restore health up to the maximum. Returns the amount restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let restored = amount.min(self.max_health.saturating_sub(self.health));
        self.health += restored;
        restored
    }

    /// Drop bonuses that last only for the round.
    pub fn expire_round_bonuses(&mut self) {
        self.bonuses.retain(|b| b.duration != BonusDuration::Round);
    }
}
