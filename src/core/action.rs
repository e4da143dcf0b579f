//! Executed-action records.
//!
//! Each ability card has a top and a bottom half. During a turn a character
//! executes at most two halves, and the engine remembers which `(card, half)`
//! pairs were used so the opposite-card/opposite-half rule can be enforced.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::CardId;

/// Which half of an ability card an action comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionPosition {
    Top,
    Bottom,
}

impl ActionPosition {
    /// The other half of the card.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
        }
    }
}

impl std::fmt::Display for ActionPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Top => write!(f, "top"),
            Self::Bottom => write!(f, "bottom"),
        }
    }
}

/// One card half executed this turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExecutedAction {
    pub card_id: CardId,
    pub position: ActionPosition,
}

impl ExecutedAction {
    #[must_use]
    pub const fn new(card_id: CardId, position: ActionPosition) -> Self {
        Self { card_id, position }
    }
}

/// Actions executed this turn. Never more than two, so no heap allocation.
pub type ExecutedActions = SmallVec<[ExecutedAction; 2]>;
