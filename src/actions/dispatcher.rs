//! Action dispatch: resolving a card action against the battlefield.
//!
//! `ActionDispatcher` is the seam between per-turn bookkeeping and the
//! rules that give each action kind its effect. `CombatDispatcher` is the
//! shipped implementation of the printed combat rules.
//!
//! ## Resolution order
//!
//! 1. Consume modifiers are planned against the current element board and
//!    add their bonus to the action value
//! 2. The core effect resolves (move, attack, heal, loot, summon)
//! 3. Every modifier is evaluated in list order and reported individually
//!
//! A failing core effect fails the whole action and nothing is applied. A
//! failing modifier is reported and the rest of the action stands.

use tracing::{debug, trace};

use super::result::{AppliedModifier, AttackOutcome};
use crate::cards::{ActionKind, ActionModifier, BonusDuration, BonusKind, CardAction, SummonDefinition};
use crate::combatants::{ActiveBonus, Combatant, ExhaustionReason, Summon};
use crate::conditions::Condition;
use crate::core::{
    Battlefield, DeckSide, EngineError, EngineResult, EntityId, HexCoord, RandomSource, RulesConfig,
};
use crate::elements::ElementalBoard;
use crate::modifiers::{pick_advantage, pick_disadvantage, AttackModifierCard, CardEffect};
use crate::piles;

/// One action to resolve.
#[derive(Clone, Debug)]
pub struct DispatchRequest<'a> {
    pub actor: EntityId,
    pub action: &'a CardAction,
    pub target_id: Option<EntityId>,
    pub target_hex: Option<HexCoord>,
}

impl<'a> DispatchRequest<'a> {
    #[must_use]
    pub fn new(actor: EntityId, action: &'a CardAction) -> Self {
        Self {
            actor,
            action,
            target_id: None,
            target_hex: None,
        }
    }

    #[must_use]
    pub fn with_target(mut self, target: EntityId) -> Self {
        self.target_id = Some(target);
        self
    }

    #[must_use]
    pub fn with_hex(mut self, hex: HexCoord) -> Self {
        self.target_hex = Some(hex);
        self
    }
}

/// A resolved action: the new battlefield and what happened.
#[derive(Clone, Debug)]
pub struct Dispatched {
    pub field: Battlefield,
    pub action_value: Option<u32>,
    pub modifiers: Vec<AppliedModifier>,
    pub affected: Vec<EntityId>,
    pub damage: Option<AttackOutcome>,
    pub summon: Option<SummonDefinition>,
}

/// Gives card actions their effect.
///
/// Implementations must be pure with respect to `field`: on error the
/// caller keeps the original snapshot.
pub trait ActionDispatcher {
    /// Resolve one action.
    fn dispatch<R: RandomSource>(
        &self,
        field: &Battlefield,
        request: &DispatchRequest<'_>,
        rng: &mut R,
    ) -> EngineResult<Dispatched>;
}

/// The printed combat rules.
#[derive(Clone, Debug, Default)]
pub struct CombatDispatcher {
    config: RulesConfig,
}

impl CombatDispatcher {
    #[must_use]
    pub fn new(config: RulesConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    fn resolve_move(
        &self,
        out: &mut Dispatched,
        request: &DispatchRequest<'_>,
        value: u32,
    ) -> EngineResult<()> {
        let actor = out.field.get(request.actor)?;
        let conditions = &actor.vitals().conditions;
        if conditions.has(Condition::Immobilize) || conditions.has(Condition::Stun) {
            return Err(EngineError::invalid_state(format!("{} cannot move", actor.name())));
        }
        let Some(destination) = request.target_hex else {
            return Ok(());
        };

        let from = actor
            .position()
            .ok_or_else(|| EngineError::invalid_state(format!("{} is not on the map", actor.name())))?;
        let reach = value + actor.vitals().bonus_total(BonusKind::Move);
        if from.distance(destination) > reach {
            return Err(EngineError::validation(format!(
                "{destination} is {} hexes away, move is {reach}",
                from.distance(destination)
            )));
        }
        if out
            .field
            .occupant(destination)
            .is_some_and(|id| id != request.actor)
        {
            return Err(EngineError::invalid_state(format!("{destination} is occupied")));
        }

        out.field = out.field.update(request.actor, |c| {
            c.vitals_mut().position = Some(destination);
            Ok(())
        })?;
        out.affected.push(request.actor);
        Ok(())
    }

    fn resolve_attack<R: RandomSource>(
        &self,
        out: &mut Dispatched,
        request: &DispatchRequest<'_>,
        value: u32,
        rng: &mut R,
    ) -> EngineResult<()> {
        let actor = out.field.get(request.actor)?;
        let conditions = &actor.vitals().conditions;
        if conditions.has(Condition::Stun) || conditions.has(Condition::Disarm) {
            return Err(EngineError::invalid_state(format!("{} cannot attack", actor.name())));
        }

        let target_id = request
            .target_id
            .ok_or_else(|| EngineError::validation("attack needs a target"))?;
        if target_id == request.actor {
            return Err(EngineError::validation("cannot attack self"));
        }
        let target = out.field.get(target_id)?;
        if !target.is_active() {
            return Err(EngineError::invalid_state(format!("{} is not a valid target", target.name())));
        }

        let (from, to) = match (actor.position(), target.position()) {
            (Some(from), Some(to)) => (from, to),
            _ => return Err(EngineError::invalid_state("attacker and target must be on the map")),
        };
        let distance = from.distance(to);
        let range = request.action.range().unwrap_or(1);
        if distance > range {
            return Err(EngineError::invalid_state(format!(
                "{} is out of range ({distance} > {range})",
                target.name()
            )));
        }

        let mut base = value + actor.vitals().bonus_total(BonusKind::Attack);
        if target.vitals().conditions.has(Condition::Poison) {
            base += self.config.poison_bonus;
        }
        let shield = target.vitals().shield().saturating_sub(request.action.pierce());

        let side = actor.deck_side();
        let advantage = conditions.has(Condition::Strengthen);
        let disadvantage = conditions.has(Condition::Muddle);
        let (deck, drawn, applied) = if advantage != disadvantage {
            let deck = out.field.deck(side).prepare_draw(2, rng);
            let (deck, pair) = deck.draw_with_advantage()?;
            let applied = if advantage {
                pick_advantage(pair)
            } else {
                pick_disadvantage(pair)
            };
            (deck, pair.to_vec(), applied)
        } else {
            let deck = out.field.deck(side).prepare_draw(1, rng);
            let (deck, card) = deck.draw_card()?;
            (deck, vec![card], card)
        };
        let damage = applied.apply(base).saturating_sub(shield);

        let mut field = out.field.clone();
        field.set_deck(side, deck);
        field = spend_drawn_blessings(&field, request.actor, side, &drawn)?;

        let (mut field, killed) = deal_damage(&field, target_id, damage)?;
        let mut retaliate = 0;
        if !killed {
            retaliate = field.get(target_id)?.vitals().retaliate_at(distance);
            if retaliate > 0 {
                field = deal_damage(&field, request.actor, retaliate)?.0;
                out.affected.push(request.actor);
            }
        }

        trace!(
            attacker = %request.actor,
            target = %target_id,
            base,
            card = %applied,
            damage,
            killed,
            "attack resolved"
        );
        out.field = field;
        out.affected.push(target_id);
        out.damage = Some(AttackOutcome {
            target: target_id,
            base,
            drawn,
            applied,
            shield,
            damage,
            killed,
            retaliate,
        });
        Ok(())
    }

    fn resolve_heal(
        &self,
        out: &mut Dispatched,
        request: &DispatchRequest<'_>,
        value: u32,
    ) -> EngineResult<()> {
        let target_id = request.target_id.unwrap_or(request.actor);
        let target = out.field.get(target_id)?;
        if !target.is_active() {
            return Err(EngineError::invalid_state(format!("{} cannot be healed", target.name())));
        }
        if target_id != request.actor {
            if let (Some(range), Some(from), Some(to)) = (
                request.action.range(),
                out.field.get(request.actor)?.position(),
                target.position(),
            ) {
                if from.distance(to) > range {
                    return Err(EngineError::invalid_state(format!(
                        "{} is out of range",
                        target.name()
                    )));
                }
            }
        }

        out.field = out.field.update(target_id, |c| {
            let vitals = c.vitals_mut();
            if vitals.conditions.has(Condition::Poison) {
                vitals.conditions = vitals.conditions.remove(Condition::Poison);
            } else {
                vitals.heal(value);
            }
            vitals.conditions = vitals.conditions.remove(Condition::Wound);
            Ok(())
        })?;
        out.affected.push(target_id);
        Ok(())
    }

    fn resolve_summon(
        &self,
        out: &mut Dispatched,
        request: &DispatchRequest<'_>,
        definition: &SummonDefinition,
    ) -> EngineResult<()> {
        out.summon = Some(definition.clone());
        let Some(hex) = request.target_hex else {
            return Ok(());
        };
        if out.field.occupant(hex).is_some() {
            return Err(EngineError::invalid_state(format!("{hex} is occupied")));
        }

        let (field, id) = out.field.spawn(|id| {
            Summon::new(id, Some(request.actor), definition.clone())
                .at(hex)
                .into()
        });
        debug!(owner = %request.actor, summon = %id, name = %definition.name, "summon created");
        out.field = field;
        out.affected.push(id);
        Ok(())
    }

    fn apply_modifiers<R: RandomSource>(
        &self,
        out: &mut Dispatched,
        request: &DispatchRequest<'_>,
        planned_consumes: &[bool],
        rng: &mut R,
    ) {
        let round = out.field.round;
        let condition_target = match request.action.kind {
            ActionKind::Attack { .. } => request.target_id,
            ActionKind::Heal { .. } => Some(request.target_id.unwrap_or(request.actor)),
            _ => Some(request.actor),
        };

        for (modifier, &planned) in request.action.modifiers.iter().zip(planned_consumes) {
            let success = match modifier {
                ActionModifier::Range(_)
                | ActionModifier::Pierce(_)
                | ActionModifier::Lost
                | ActionModifier::Persistent => true,
                ActionModifier::RoundBonus { bonus, value } => grant(
                    out,
                    request.actor,
                    ActiveBonus::new(*bonus, *value, BonusDuration::Round, round),
                ),
                ActionModifier::Shield { value, duration } => grant(
                    out,
                    request.actor,
                    ActiveBonus::new(BonusKind::Shield, *value, *duration, round),
                ),
                ActionModifier::Retaliate {
                    value,
                    range,
                    duration,
                } => grant(
                    out,
                    request.actor,
                    ActiveBonus::new(BonusKind::Retaliate, *value, *duration, round)
                        .with_range(*range),
                ),
                ActionModifier::Infuse(element) => {
                    out.field.elements = out.field.elements.infuse(*element);
                    true
                }
                ActionModifier::Consume { element, .. } => {
                    planned
                        && match out.field.elements.consume(*element) {
                            Ok(board) => {
                                out.field.elements = board;
                                true
                            }
                            Err(_) => false,
                        }
                }
                ActionModifier::Condition(condition) => {
                    apply_condition(out, condition_target, request.actor, *condition, rng)
                }
                ActionModifier::Experience(xp) => {
                    let result = out.field.update(request.actor, |c| {
                        let ch = c
                            .as_character_mut()
                            .ok_or_else(|| EngineError::invalid_state("only characters gain experience"))?;
                        ch.experience += xp;
                        Ok(())
                    });
                    match result {
                        Ok(field) => {
                            out.field = field;
                            true
                        }
                        Err(_) => false,
                    }
                }
            };
            out.modifiers.push(AppliedModifier {
                modifier: modifier.clone(),
                success,
            });
        }
    }
}

impl ActionDispatcher for CombatDispatcher {
    fn dispatch<R: RandomSource>(
        &self,
        field: &Battlefield,
        request: &DispatchRequest<'_>,
        rng: &mut R,
    ) -> EngineResult<Dispatched> {
        let actor = field.get(request.actor)?;
        if !actor.is_active() {
            return Err(EngineError::invalid_state(format!("{} cannot act", actor.name())));
        }

        let (planned_consumes, extra) = plan_consumes(&field.elements, &request.action.modifiers);
        let action_value = request.action.kind.value().map(|v| v + extra);
        let mut out = Dispatched {
            field: field.clone(),
            action_value,
            modifiers: Vec::new(),
            affected: Vec::new(),
            damage: None,
            summon: None,
        };

        let value = action_value.unwrap_or(0);
        match &request.action.kind {
            ActionKind::Move { .. } => self.resolve_move(&mut out, request, value)?,
            ActionKind::Attack { .. } => self.resolve_attack(&mut out, request, value, rng)?,
            ActionKind::Heal { .. } => self.resolve_heal(&mut out, request, value)?,
            ActionKind::Loot { .. } => out.affected.push(request.actor),
            ActionKind::Summon(definition) => self.resolve_summon(&mut out, request, definition)?,
            ActionKind::Special { .. } | ActionKind::Text { .. } => {}
        }

        self.apply_modifiers(&mut out, request, &planned_consumes, rng);
        Ok(out)
    }
}

/// Which consume modifiers will succeed, and their total bonus.
///
/// Each element can be consumed once; elements infused by the same action
/// are not yet available.
fn plan_consumes(board: &ElementalBoard, modifiers: &[ActionModifier]) -> (Vec<bool>, u32) {
    let mut board = *board;
    let mut extra = 0;
    let plan = modifiers
        .iter()
        .map(|m| match m {
            ActionModifier::Consume { element, bonus } => match board.consume(*element) {
                Ok(next) => {
                    board = next;
                    extra += bonus;
                    true
                }
                Err(_) => false,
            },
            _ => false,
        })
        .collect();
    (plan, extra)
}

/// Subtract health; a combatant at 0 HP dies (monster, summon) or is
/// exhausted (character). Returns whether the combatant was removed.
fn deal_damage(field: &Battlefield, id: EntityId, amount: u32) -> EngineResult<(Battlefield, bool)> {
    let field = field.update(id, |c| {
        c.vitals_mut().take_damage(amount);
        Ok(())
    })?;
    let combatant = field.get(id)?;
    if combatant.vitals().health > 0 {
        return Ok((field, false));
    }

    debug!(entity = %id, name = %combatant.name(), "combatant removed by damage");
    match combatant {
        Combatant::Character(ch) => {
            let ch = piles::exhaust(ch, ExhaustionReason::Damage)?;
            Ok((field.with_character(ch)?, true))
        }
        Combatant::Monster(_) | Combatant::Summon(_) => {
            let field = field.update(id, |c| {
                let vitals = c.vitals_mut();
                vitals.dead = true;
                vitals.position = None;
                Ok(())
            })?;
            Ok((field, true))
        }
    }
}

/// Each drawn Bless or Curse card uses up one matching condition on its side.
///
/// The attacker's own state goes first, otherwise the earliest state held
/// by any figure drawing from the same deck.
fn spend_drawn_blessings(
    field: &Battlefield,
    attacker: EntityId,
    side: DeckSide,
    drawn: &[AttackModifierCard],
) -> EngineResult<Battlefield> {
    let mut field = field.clone();
    for effect in drawn.iter().filter_map(|c| c.effect) {
        let condition = match effect {
            CardEffect::Bless => Condition::Bless,
            CardEffect::Curse => Condition::Curse,
        };
        let holder = if field.get(attacker)?.vitals().conditions.consumable(condition).is_some() {
            Some(attacker)
        } else {
            field
                .iter()
                .filter(|c| c.deck_side() == side)
                .filter_map(|c| {
                    let state = c.vitals().conditions.consumable(condition)?;
                    Some((state.applied_at, c.id()))
                })
                .min()
                .map(|(_, id)| id)
        };
        let Some(holder) = holder else {
            continue;
        };
        trace!(entity = %holder, ?condition, "drawn card consumed condition");
        field = field.update(holder, |c| {
            let vitals = c.vitals_mut();
            vitals.conditions = vitals.conditions.consume(condition).0;
            Ok(())
        })?;
    }
    Ok(field)
}

fn grant(out: &mut Dispatched, actor: EntityId, bonus: ActiveBonus) -> bool {
    match out.field.update(actor, |c| {
        c.vitals_mut().bonuses.push_back(bonus);
        Ok(())
    }) {
        Ok(field) => {
            out.field = field;
            true
        }
        Err(_) => false,
    }
}

fn apply_condition<R: RandomSource>(
    out: &mut Dispatched,
    target: Option<EntityId>,
    source: EntityId,
    condition: Condition,
    rng: &mut R,
) -> bool {
    let Some(target) = target else {
        return false;
    };
    let side = match out.field.get(target) {
        Ok(c) if c.is_active() => c.deck_side(),
        _ => return false,
    };
    let Ok(mut field) = out.field.apply_condition(target, condition, Some(source)) else {
        return false;
    };
    match condition {
        Condition::Bless => {
            let deck = field.deck(side).add_bless(rng);
            field.set_deck(side, deck);
        }
        Condition::Curse => {
            let deck = field.deck(side).add_curse(rng);
            field.set_deck(side, deck);
        }
        _ => {}
    }
    out.field = field;
    true
}
