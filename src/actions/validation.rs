//! Per-turn action rules.
//!
//! A character executes at most two actions per turn, one from each
//! selected card, one top half and one bottom half.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::combatants::Character;
use crate::core::{ActionPosition, EngineError, RulesConfig};

/// Why an action was refused before it reached the dispatcher.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum ActionRejection {
    #[error("no cards selected this round")]
    NoSelection,

    #[error("card was not selected this round")]
    CardNotSelected,

    #[error("maximum actions per turn reached")]
    MaximumActions,

    #[error("action was already executed this turn")]
    AlreadyExecuted,

    #[error("second action must come from the other card")]
    SameCard,

    #[error("second action must use the opposite half")]
    SamePosition,
}

impl From<ActionRejection> for EngineError {
    fn from(rejection: ActionRejection) -> Self {
        EngineError::InvalidState(rejection.to_string())
    }
}

/// Check whether `card`/`position` may be executed now.
///
/// Checks run in a fixed order and the first failure is reported.
pub fn validate_action_execution(
    ch: &Character,
    card: CardId,
    position: ActionPosition,
    config: &RulesConfig,
) -> Result<(), ActionRejection> {
    let selected = ch.selected_cards.ok_or(ActionRejection::NoSelection)?;
    if !selected.contains(&card) {
        return Err(ActionRejection::CardNotSelected);
    }

    let executed = &ch.executed_actions;
    if executed.len() >= config.max_actions_per_turn {
        return Err(ActionRejection::MaximumActions);
    }
    if executed
        .iter()
        .any(|a| a.card_id == card && a.position == position)
    {
        return Err(ActionRejection::AlreadyExecuted);
    }
    if executed.iter().any(|a| a.card_id == card) {
        return Err(ActionRejection::SameCard);
    }
    if executed.iter().any(|a| a.position == position) {
        return Err(ActionRejection::SamePosition);
    }
    Ok(())
}
