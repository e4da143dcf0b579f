//! Status conditions and their fixed classifications.

use serde::{Deserialize, Serialize};

/// Every status condition a combatant can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    // Negative
    Poison,
    Wound,
    Immobilize,
    Disarm,
    Stun,
    Muddle,
    Curse,
    Brittle,
    Bane,
    Impair,

    // Positive
    Invisible,
    Strengthen,
    Bless,
    Regenerate,
    Ward,
}

/// How a condition state is removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionDuration {
    /// Expires once the round it was applied in is over.
    Round,
    /// Only removed explicitly.
    Persistent,
    /// Removed by a consuming effect (healing removes Wound).
    UntilConsumed,
}

/// Fixed condition categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionCategory {
    Damage,
    Control,
    Buff,
    Debuff,
}

impl Condition {
    pub const ALL: [Condition; 15] = [
        Condition::Poison,
        Condition::Wound,
        Condition::Immobilize,
        Condition::Disarm,
        Condition::Stun,
        Condition::Muddle,
        Condition::Curse,
        Condition::Brittle,
        Condition::Bane,
        Condition::Impair,
        Condition::Invisible,
        Condition::Strengthen,
        Condition::Bless,
        Condition::Regenerate,
        Condition::Ward,
    ];

    /// Duration used when an action applies this condition.
    #[must_use]
    pub const fn default_duration(self) -> ConditionDuration {
        match self {
            Condition::Poison
            | Condition::Wound
            | Condition::Brittle
            | Condition::Bane
            | Condition::Ward
            | Condition::Regenerate
            | Condition::Curse
            | Condition::Bless => ConditionDuration::UntilConsumed,
            Condition::Immobilize
            | Condition::Disarm
            | Condition::Stun
            | Condition::Muddle
            | Condition::Impair
            | Condition::Invisible
            | Condition::Strengthen => ConditionDuration::Round,
        }
    }

    #[must_use]
    pub const fn is_in(self, category: ConditionCategory) -> bool {
        match category {
            ConditionCategory::Damage => matches!(
                self,
                Condition::Poison | Condition::Wound | Condition::Brittle | Condition::Bane
            ),
            ConditionCategory::Control => matches!(
                self,
                Condition::Immobilize
                    | Condition::Disarm
                    | Condition::Stun
                    | Condition::Muddle
                    | Condition::Impair
            ),
            ConditionCategory::Buff => matches!(
                self,
                Condition::Invisible
                    | Condition::Strengthen
                    | Condition::Bless
                    | Condition::Regenerate
                    | Condition::Ward
            ),
            ConditionCategory::Debuff => matches!(
                self,
                Condition::Poison
                    | Condition::Wound
                    | Condition::Immobilize
                    | Condition::Disarm
                    | Condition::Stun
                    | Condition::Muddle
                    | Condition::Curse
                    | Condition::Brittle
                    | Condition::Bane
                    | Condition::Impair
            ),
        }
    }

    /// All conditions in a category, in enum order.
    pub fn in_category(category: ConditionCategory) -> impl Iterator<Item = Condition> {
        Self::ALL.into_iter().filter(move |c| c.is_in(category))
    }

    /// Stun, Immobilize, and Disarm prevent part or all of a turn.
    #[must_use]
    pub const fn incapacitates(self) -> bool {
        matches!(self, Condition::Stun | Condition::Immobilize | Condition::Disarm)
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", format!("{self:?}").to_lowercase())
    }
}
