//! Player characters.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::class::CharacterClass;
use super::vitals::Vitals;
use crate::cards::CardId;
use crate::core::{EntityId, ExecutedActions, HexCoord};
use crate::turns::RestDeclaration;

/// Why a character left the scenario.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExhaustionReason {
    /// Reduced to 0 HP.
    Damage,
    /// Cannot field two cards and cannot rest.
    InsufficientCards,
}

/// A short rest in progress: the randomly chosen card to lose.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortRestState {
    pub card: CardId,
    pub rerolled: bool,
}

/// A character and its ability card piles.
///
/// `hand`, `discard`, and `lost` are disjoint; together they hold every
/// card the character brought into the scenario.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: EntityId,
    pub class: CharacterClass,
    pub vitals: Vitals,
    pub hand: Vector<CardId>,
    pub discard: Vector<CardId>,
    pub lost: Vector<CardId>,
    /// The two cards chosen for this round.
    pub selected_cards: Option<[CardId; 2]>,
    pub executed_actions: ExecutedActions,
    pub short_rest: Option<ShortRestState>,
    pub rest: RestDeclaration,
    pub initiative: Option<u8>,
    pub exhausted: Option<ExhaustionReason>,
    pub experience: u32,
}

impl Character {
    /// Create a character holding `hand` with empty discard and lost piles.
    #[must_use]
    pub fn new(
        id: EntityId,
        name: impl Into<String>,
        class: CharacterClass,
        max_health: u32,
        hand: impl IntoIterator<Item = CardId>,
    ) -> Self {
        Self {
            id,
            class,
            vitals: Vitals::new(name, max_health),
            hand: hand.into_iter().collect(),
            discard: Vector::new(),
            lost: Vector::new(),
            selected_cards: None,
            executed_actions: ExecutedActions::new(),
            short_rest: None,
            rest: RestDeclaration::None,
            initiative: None,
            exhausted: None,
            experience: 0,
        }
    }

    /// Place the character on the map (builder pattern).
    #[must_use]
    pub fn at(mut self, position: HexCoord) -> Self {
        self.vitals.position = Some(position);
        self
    }

    /// Replace the discard pile (builder pattern).
    #[must_use]
    pub fn with_discard(mut self, cards: impl IntoIterator<Item = CardId>) -> Self {
        self.discard = cards.into_iter().collect();
        self
    }

    /// Replace the lost pile (builder pattern).
    #[must_use]
    pub fn with_lost(mut self, cards: impl IntoIterator<Item = CardId>) -> Self {
        self.lost = cards.into_iter().collect();
        self
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.exhausted.is_some()
    }

    /// Still taking part in the scenario.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.is_exhausted() && !self.vitals.dead
    }

    #[must_use]
    pub fn is_selected(&self, card: CardId) -> bool {
        self.selected_cards.is_some_and(|cards| cards.contains(&card))
    }

    /// Cards across all three piles.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.hand.len() + self.discard.len() + self.lost.len()
    }
}
