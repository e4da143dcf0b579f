//! Character action execution.
//!
//! Ties the per-turn rules, the card lookup, and a dispatcher together:
//! validate, resolve the printed action, dispatch, then record the
//! executed half so the next action must use the other card and half.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::dispatcher::{ActionDispatcher, DispatchRequest};
use super::result::{ActionFailure, ActionResult};
use super::validation::validate_action_execution;
use crate::cards::{AbilityCardLookup, CardId};
use crate::core::{
    ActionPosition, Battlefield, EngineError, EngineResult, EntityId, ExecutedAction, HexCoord,
    RandomSource, RulesConfig,
};

/// A client's request to execute one card half.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRequest {
    pub actor: EntityId,
    pub card_id: CardId,
    pub position: ActionPosition,
    #[serde(default)]
    pub target_id: Option<EntityId>,
    #[serde(default)]
    pub target_hex: Option<HexCoord>,
}

impl ActionRequest {
    #[must_use]
    pub fn new(actor: EntityId, card_id: CardId, position: ActionPosition) -> Self {
        Self {
            actor,
            card_id,
            position,
            target_id: None,
            target_hex: None,
        }
    }

    #[must_use]
    pub fn targeting(mut self, target: EntityId) -> Self {
        self.target_id = Some(target);
        self
    }

    #[must_use]
    pub fn at_hex(mut self, hex: HexCoord) -> Self {
        self.target_hex = Some(hex);
        self
    }
}

/// New battlefield plus the reported result.
///
/// For failed actions `field` is the unchanged input.
#[derive(Clone, Debug)]
pub struct ActionExecution {
    pub field: Battlefield,
    pub result: ActionResult,
}

/// Execute one card half for a character.
///
/// Rule rejections, unknown cards, and dispatcher failures come back as a
/// failed `ActionResult`. `Err` is reserved for a request naming an actor
/// that is not an active character.
pub fn execute_action<L, D, R>(
    field: &Battlefield,
    lookup: &L,
    dispatcher: &D,
    request: &ActionRequest,
    config: &RulesConfig,
    rng: &mut R,
) -> EngineResult<ActionExecution>
where
    L: AbilityCardLookup + ?Sized,
    D: ActionDispatcher,
    R: RandomSource,
{
    let ch = field.character(request.actor)?;
    if !ch.is_active() {
        return Err(EngineError::invalid_state(format!(
            "{} is exhausted",
            ch.vitals.name
        )));
    }

    let unchanged = |result| ActionExecution {
        field: field.clone(),
        result,
    };

    if let Err(rejection) =
        validate_action_execution(ch, request.card_id, request.position, config)
    {
        debug!(character = %request.actor, card = %request.card_id, %rejection, "action rejected");
        return Ok(unchanged(ActionResult::failed(
            request.actor,
            request.card_id,
            request.position,
            ActionFailure::Rejected(rejection),
            rejection.to_string(),
        )));
    }

    let Some(template) = lookup.find_card(request.card_id) else {
        warn!(card = %request.card_id, "selected card has no template");
        return Ok(unchanged(ActionResult::failed(
            request.actor,
            request.card_id,
            request.position,
            ActionFailure::CardNotFound,
            format!("{} not found", request.card_id),
        )));
    };
    let action = template.action(request.position);
    let action_type = action.kind.action_type();

    let dispatch = DispatchRequest {
        actor: request.actor,
        action,
        target_id: request.target_id,
        target_hex: request.target_hex,
    };
    let dispatched = match dispatcher.dispatch(field, &dispatch, rng) {
        Ok(dispatched) => dispatched,
        Err(err) => {
            debug!(character = %request.actor, card = %request.card_id, %err, "action failed");
            let mut result = ActionResult::failed(
                request.actor,
                request.card_id,
                request.position,
                ActionFailure::Dispatch,
                err.to_string(),
            );
            result.action_type = Some(action_type);
            return Ok(unchanged(result));
        }
    };

    let executed = ExecutedAction::new(request.card_id, request.position);
    let field = dispatched.field.update(request.actor, |c| {
        let ch = c
            .as_character_mut()
            .ok_or_else(|| EngineError::not_found("character", request.actor))?;
        ch.executed_actions.push(executed);
        Ok(())
    })?;

    debug!(
        character = %request.actor,
        card = %request.card_id,
        position = %request.position,
        ?action_type,
        "action executed"
    );
    Ok(ActionExecution {
        field,
        result: ActionResult {
            actor_id: request.actor,
            card_id: request.card_id,
            position: request.position,
            action_type: Some(action_type),
            success: true,
            action_value: dispatched.action_value,
            modifiers: dispatched.modifiers,
            affected_entities: dispatched.affected,
            summon_definition: dispatched.summon,
            damage: dispatched.damage,
            error: None,
            failure: None,
        },
    })
}
