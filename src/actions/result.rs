//! Action results reported to the transport layer.

use serde::{Deserialize, Serialize};

use super::validation::ActionRejection;
use crate::cards::{ActionModifier, ActionType, CardId, SummonDefinition};
use crate::core::{ActionPosition, EntityId};
use crate::modifiers::AttackModifierCard;

/// Outcome of one modifier on an executed action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedModifier {
    pub modifier: ActionModifier,
    pub success: bool,
}

/// How an attack resolved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackOutcome {
    pub target: EntityId,
    /// Attack value before the modifier card.
    pub base: u32,
    /// Every card drawn (two with advantage or disadvantage).
    pub drawn: Vec<AttackModifierCard>,
    /// The card that was applied.
    pub applied: AttackModifierCard,
    /// Shield left after pierce.
    pub shield: u32,
    pub damage: u32,
    pub killed: bool,
    /// Damage the attacker took from retaliate.
    pub retaliate: u32,
}

/// Why an action did not resolve.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "reason", rename_all = "snake_case")]
pub enum ActionFailure {
    /// The opposite-card/opposite-half rules refused the action.
    Rejected(ActionRejection),
    /// The card template could not be found.
    CardNotFound,
    /// The dispatcher refused or could not resolve the effect.
    Dispatch,
}

/// Result of one executed card action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResult {
    pub actor_id: EntityId,
    pub card_id: CardId,
    pub position: ActionPosition,
    pub action_type: Option<ActionType>,
    pub success: bool,
    pub action_value: Option<u32>,
    pub modifiers: Vec<AppliedModifier>,
    pub affected_entities: Vec<EntityId>,
    pub summon_definition: Option<SummonDefinition>,
    pub damage: Option<AttackOutcome>,
    pub error: Option<String>,
    pub failure: Option<ActionFailure>,
}

impl ActionResult {
    /// A failed result with nothing applied.
    #[must_use]
    pub fn failed(
        actor_id: EntityId,
        card_id: CardId,
        position: ActionPosition,
        failure: ActionFailure,
        error: impl Into<String>,
    ) -> Self {
        Self {
            actor_id,
            card_id,
            position,
            action_type: None,
            success: false,
            action_value: None,
            modifiers: Vec::new(),
            affected_entities: Vec::new(),
            summon_definition: None,
            damage: None,
            error: Some(error.into()),
            failure: Some(failure),
        }
    }
}
