//! Action modifiers.
//!
//! The tagged effects printed alongside an action (range, loss icon,
//! element infusion, applied conditions, shields). The modifier list on an
//! action is evaluated in order, each entry succeeding or failing on its own.

use serde::{Deserialize, Serialize};

use crate::conditions::Condition;
use crate::elements::Element;

/// Kind of bonus granted to the acting combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BonusKind {
    Attack,
    Move,
    Shield,
    Retaliate,
}

/// How long a granted bonus lasts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BonusDuration {
    /// Until the end of the current round.
    Round,
    /// Until explicitly removed.
    Persistent,
}

/// A tagged effect attached to a card action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ActionModifier {
    /// Ranged attack reach. Absent means melee.
    Range(u32),
    /// Ignore this much of the target's shield.
    Pierce(u32),
    /// Loss icon: the card goes to the lost pile after use.
    Lost,
    /// The effect stays in play beyond the round.
    Persistent,
    /// Grant a bonus to the actor.
    RoundBonus { bonus: BonusKind, value: u32 },
    /// Grant a shield to the actor.
    Shield { value: u32, duration: BonusDuration },
    /// Grant retaliate to the actor.
    Retaliate {
        value: u32,
        range: u32,
        duration: BonusDuration,
    },
    /// Make an element strong.
    Infuse(Element),
    /// Spend an element for an extra amount of the same action.
    Consume { element: Element, bonus: u32 },
    /// Apply a condition to the action's target.
    Condition(Condition),
    /// Award experience to the acting character.
    Experience(u32),
}

impl ActionModifier {
    /// Modifiers that only parameterise the core effect.
    #[must_use]
    pub fn is_parameter(&self) -> bool {
        matches!(
            self,
            Self::Range(_) | Self::Pierce(_) | Self::Lost | Self::Persistent
        )
    }
}
