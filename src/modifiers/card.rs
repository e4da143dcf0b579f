//! Attack modifier cards.

use serde::{Deserialize, Serialize};

/// What a modifier card does to an attack value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum ModifierValue {
    /// Flat addition (may be negative).
    Add(i32),
    /// The attack deals no damage.
    Null,
    /// The attack value is doubled.
    Double,
}

/// Tag on cards added to a deck by the Bless and Curse conditions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardEffect {
    Bless,
    Curse,
}

/// One attack modifier card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackModifierCard {
    pub value: ModifierValue,
    /// Drawing this card schedules a reshuffle before the next draw.
    pub is_reshuffle: bool,
    pub effect: Option<CardEffect>,
}

impl AttackModifierCard {
    #[must_use]
    pub const fn add(value: i32) -> Self {
        Self {
            value: ModifierValue::Add(value),
            is_reshuffle: false,
            effect: None,
        }
    }

    /// The Null card; always reshuffles.
    #[must_use]
    pub const fn null() -> Self {
        Self {
            value: ModifierValue::Null,
            is_reshuffle: true,
            effect: None,
        }
    }

    /// The ×2 card; always reshuffles.
    #[must_use]
    pub const fn double() -> Self {
        Self {
            value: ModifierValue::Double,
            is_reshuffle: true,
            effect: None,
        }
    }

    /// A +2 card tagged as a blessing.
    #[must_use]
    pub const fn bless() -> Self {
        Self {
            value: ModifierValue::Add(2),
            is_reshuffle: false,
            effect: Some(CardEffect::Bless),
        }
    }

    /// A Null card tagged as a curse. Does not trigger a reshuffle.
    #[must_use]
    pub const fn curse() -> Self {
        Self {
            value: ModifierValue::Null,
            is_reshuffle: false,
            effect: Some(CardEffect::Curse),
        }
    }

    /// Whether the card leaves the deck once drawn.
    #[must_use]
    pub const fn is_temporary(&self) -> bool {
        self.effect.is_some()
    }

    /// Apply the card to an attack value, never going below zero.
    #[must_use]
    pub fn apply(&self, base: u32) -> u32 {
        match self.value {
            ModifierValue::Add(delta) => (i64::from(base) + i64::from(delta)).max(0) as u32,
            ModifierValue::Null => 0,
            ModifierValue::Double => base.saturating_mul(2),
        }
    }

    /// Ordering key used to compare two drawn cards: Null lowest, ×2 highest.
    #[must_use]
    pub(crate) fn rank(&self) -> i32 {
        match self.value {
            ModifierValue::Null => i32::MIN,
            ModifierValue::Add(v) => v,
            ModifierValue::Double => i32::MAX,
        }
    }
}

impl std::fmt::Display for AttackModifierCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.value {
            ModifierValue::Add(v) => write!(f, "{v:+}"),
            ModifierValue::Null => write!(f, "null"),
            ModifierValue::Double => write!(f, "x2"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply() {
        assert_eq!(AttackModifierCard::add(1).apply(3), 4);
        assert_eq!(AttackModifierCard::add(-2).apply(1), 0);
        assert_eq!(AttackModifierCard::null().apply(5), 0);
        assert_eq!(AttackModifierCard::double().apply(3), 6);
        assert_eq!(AttackModifierCard::curse().apply(3), 0);
    }

    #[test]
    fn test_reshuffle_flags() {
        assert!(AttackModifierCard::null().is_reshuffle);
        assert!(AttackModifierCard::double().is_reshuffle);
        assert!(!AttackModifierCard::curse().is_reshuffle);
        assert!(!AttackModifierCard::add(0).is_reshuffle);
    }

    #[test]
    fn test_rank_order() {
        assert!(AttackModifierCard::null().rank() < AttackModifierCard::add(-2).rank());
        assert!(AttackModifierCard::add(2).rank() < AttackModifierCard::double().rank());
    }

    #[test]
    fn test_display() {
        assert_eq!(AttackModifierCard::add(1).to_string(), "+1");
        assert_eq!(AttackModifierCard::add(-1).to_string(), "-1");
        assert_eq!(AttackModifierCard::add(0).to_string(), "+0");
        assert_eq!(AttackModifierCard::double().to_string(), "x2");
    }
}
