//! Ability card templates - static card data.
//!
//! A `CardTemplate` is the immutable printed card: a name, an initiative,
//! and two actions (top and bottom). Which pile a character's copy sits in
//! is tracked separately by the `piles` module.

use serde::{Deserialize, Serialize};

use super::modifier::ActionModifier;
use crate::combatants::CharacterClass;
use crate::core::ActionPosition;

/// Unique identifier for an ability card template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Stat block for a summon created by a card action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummonDefinition {
    pub name: String,
    pub health: u32,
    pub attack: u32,
    pub movement: u32,
    pub range: u32,
}

impl SummonDefinition {
    #[must_use]
    pub fn new(name: impl Into<String>, health: u32, attack: u32, movement: u32, range: u32) -> Self {
        Self {
            name: name.into(),
            health,
            attack,
            movement,
            range,
        }
    }
}

/// What an action does.
///
/// Only move/attack/heal/loot carry a numeric value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ActionKind {
    Move { value: u32 },
    Attack { value: u32 },
    Heal { value: u32 },
    Loot { value: u32 },
    Summon(SummonDefinition),
    Special { text: String },
    Text { text: String },
}

/// Discriminant of `ActionKind`, used in results and events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    Move,
    Attack,
    Heal,
    Loot,
    Summon,
    Special,
    Text,
}

impl ActionKind {
    /// The kind discriminant.
    #[must_use]
    pub fn action_type(&self) -> ActionType {
        match self {
            Self::Move { .. } => ActionType::Move,
            Self::Attack { .. } => ActionType::Attack,
            Self::Heal { .. } => ActionType::Heal,
            Self::Loot { .. } => ActionType::Loot,
            Self::Summon(_) => ActionType::Summon,
            Self::Special { .. } => ActionType::Special,
            Self::Text { .. } => ActionType::Text,
        }
    }

    /// Numeric value for move/attack/heal/loot; `None` for everything else.
    #[must_use]
    pub fn value(&self) -> Option<u32> {
        match self {
            Self::Move { value }
            | Self::Attack { value }
            | Self::Heal { value }
            | Self::Loot { value } => Some(*value),
            Self::Summon(_) | Self::Special { .. } | Self::Text { .. } => None,
        }
    }
}

/// One half of an ability card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardAction {
    pub kind: ActionKind,
    #[serde(default)]
    pub modifiers: Vec<ActionModifier>,
}

impl CardAction {
    #[must_use]
    pub fn new(kind: ActionKind) -> Self {
        Self {
            kind,
            modifiers: Vec::new(),
        }
    }

    #[must_use]
    pub fn move_(value: u32) -> Self {
        Self::new(ActionKind::Move { value })
    }

    #[must_use]
    pub fn attack(value: u32) -> Self {
        Self::new(ActionKind::Attack { value })
    }

    #[must_use]
    pub fn heal(value: u32) -> Self {
        Self::new(ActionKind::Heal { value })
    }

    #[must_use]
    pub fn loot(value: u32) -> Self {
        Self::new(ActionKind::Loot { value })
    }

    #[must_use]
    pub fn summon(definition: SummonDefinition) -> Self {
        Self::new(ActionKind::Summon(definition))
    }

    #[must_use]
    pub fn special(text: impl Into<String>) -> Self {
        Self::new(ActionKind::Special { text: text.into() })
    }

    /// Add a modifier (builder pattern).
    #[must_use]
    pub fn with_modifier(mut self, modifier: ActionModifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    /// Whether playing this action sends the card to the lost pile.
    #[must_use]
    pub fn has_loss(&self) -> bool {
        self.modifiers.iter().any(|m| matches!(m, ActionModifier::Lost))
    }

    /// Attack range from a `Range` modifier; `None` means melee.
    #[must_use]
    pub fn range(&self) -> Option<u32> {
        self.modifiers.iter().find_map(|m| match m {
            ActionModifier::Range(r) => Some(*r),
            _ => None,
        })
    }

    /// Total pierce granted by `Pierce` modifiers.
    #[must_use]
    pub fn pierce(&self) -> u32 {
        self.modifiers
            .iter()
            .map(|m| match m {
                ActionModifier::Pierce(p) => *p,
                _ => 0,
            })
            .sum()
    }
}

/// Static ability card definition.
///
/// ```
/// use hexhaven_engine::cards::{CardAction, CardId, CardTemplate, ActionModifier};
/// use hexhaven_engine::combatants::CharacterClass;
///
/// let trample = CardTemplate::new(CardId::new(1), "Trample", CharacterClass::Brute, 1)
///     .with_initiative(72)
///     .with_top(CardAction::attack(3).with_modifier(ActionModifier::Pierce(2)))
///     .with_bottom(CardAction::move_(4).with_modifier(ActionModifier::Lost));
///
/// assert!(trample.bottom.has_loss());
/// assert_eq!(trample.top.pierce(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardTemplate {
    pub id: CardId,
    pub name: String,
    pub class: CharacterClass,
    pub level: u8,
    /// Printed initiative. Real cards are always below 99.
    pub initiative: Option<u8>,
    pub top: CardAction,
    pub bottom: CardAction,
}

impl CardTemplate {
    /// Create a template with placeholder text actions.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, class: CharacterClass, level: u8) -> Self {
        Self {
            id,
            name: name.into(),
            class,
            level,
            initiative: None,
            top: CardAction::new(ActionKind::Text { text: String::new() }),
            bottom: CardAction::new(ActionKind::Text { text: String::new() }),
        }
    }

    #[must_use]
    pub fn with_initiative(mut self, initiative: u8) -> Self {
        self.initiative = Some(initiative);
        self
    }

    #[must_use]
    pub fn with_top(mut self, action: CardAction) -> Self {
        self.top = action;
        self
    }

    #[must_use]
    pub fn with_bottom(mut self, action: CardAction) -> Self {
        self.bottom = action;
        self
    }

    /// The action printed on the given half.
    #[must_use]
    pub fn action(&self, position: ActionPosition) -> &CardAction {
        match position {
            ActionPosition::Top => &self.top,
            ActionPosition::Bottom => &self.bottom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id() {
        let id = CardId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(format!("{}", id), "Card(42)");
    }

    #[test]
    fn test_numeric_value_only_for_numeric_kinds() {
        assert_eq!(ActionKind::Move { value: 3 }.value(), Some(3));
        assert_eq!(ActionKind::Attack { value: 0 }.value(), Some(0));
        assert_eq!(ActionKind::Loot { value: 1 }.value(), Some(1));
        assert_eq!(ActionKind::Special { text: "x".into() }.value(), None);
        assert_eq!(
            ActionKind::Summon(SummonDefinition::new("Rat", 2, 1, 2, 0)).value(),
            None
        );
    }

    #[test]
    fn test_action_by_position() {
        let card = CardTemplate::new(CardId::new(3), "Spare Dagger", CharacterClass::Brute, 1)
            .with_top(CardAction::attack(3))
            .with_bottom(CardAction::move_(2));

        assert_eq!(card.action(ActionPosition::Top).kind.action_type(), ActionType::Attack);
        assert_eq!(card.action(ActionPosition::Bottom).kind.action_type(), ActionType::Move);
    }

    #[test]
    fn test_range_and_loss() {
        let action = CardAction::attack(2)
            .with_modifier(ActionModifier::Range(3))
            .with_modifier(ActionModifier::Lost);

        assert_eq!(action.range(), Some(3));
        assert!(action.has_loss());
        assert_eq!(CardAction::attack(2).range(), None);
    }

    #[test]
    fn test_template_serialization() {
        let card = CardTemplate::new(CardId::new(9), "Leaping Cleave", CharacterClass::Brute, 1)
            .with_initiative(54)
            .with_top(CardAction::attack(3))
            .with_bottom(CardAction::move_(3));

        let json = serde_json::to_string(&card).unwrap();
        let back: CardTemplate = serde_json::from_str(&json).unwrap();
        assert_eq!(card, back);
    }
}
