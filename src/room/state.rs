//! Round lifecycle of one room.
//!
//! A round runs through three phases:
//!
//! 1. **CardSelection**: characters pick two cards or declare a rest,
//!    monster groups receive their initiative
//! 2. **Acting**: combatants take turns in initiative order
//! 3. **Complete**: every turn is over and declared short rests have drawn
//!    their card (rerolls happen here); `end_round` cleans up and returns
//!    the room to card selection for the next round

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::actions::{
    self, ActionDispatcher, ActionResult, AttackOutcome, CombatDispatcher, DispatchRequest,
    ActionRequest,
};
use crate::cards::{AbilityCardLookup, ActionModifier, CardAction, CardId};
use crate::combatants::{Character, Combatant, CombatantKind};
use crate::core::{Battlefield, EngineError, EngineResult, EntityId, GameRng, RulesConfig};
use crate::piles;
use crate::targeting::select_focus_target;
use crate::turns::{
    build_turn_order, calculate_initiative, next_living_entity_index, validate_initiative,
    RestDeclaration, TurnEntity,
};

/// Where the room is within the current round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundPhase {
    CardSelection,
    Acting,
    Complete,
}

/// One room's combat: battlefield, generator, and turn cursor.
///
/// Mutation requires `&mut self`, so a room has a single writer.
#[derive(Clone, Debug)]
pub struct RoomState {
    field: Battlefield,
    rng: GameRng,
    config: RulesConfig,
    dispatcher: CombatDispatcher,
    phase: RoundPhase,
    turn_order: Vec<TurnEntity>,
    cursor: Option<usize>,
}

impl RoomState {
    /// Create a room with an entropy-seeded generator.
    #[must_use]
    pub fn new(field: Battlefield, config: RulesConfig) -> Self {
        Self::with_rng(field, config, GameRng::secure())
    }

    /// Create a room with a caller-supplied generator.
    #[must_use]
    pub fn with_rng(field: Battlefield, config: RulesConfig, rng: GameRng) -> Self {
        Self {
            field,
            rng,
            dispatcher: CombatDispatcher::new(config.clone()),
            config,
            phase: RoundPhase::CardSelection,
            turn_order: Vec::new(),
            cursor: None,
        }
    }

    #[must_use]
    pub fn field(&self) -> &Battlefield {
        &self.field
    }

    #[must_use]
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    #[must_use]
    pub fn round(&self) -> u32 {
        self.field.round
    }

    /// This round's acting order. Empty outside the acting phase.
    #[must_use]
    pub fn turn_order(&self) -> &[TurnEntity] {
        &self.turn_order
    }

    /// Whose turn it is.
    #[must_use]
    pub fn current_entity(&self) -> Option<&TurnEntity> {
        self.cursor.and_then(|i| self.turn_order.get(i))
    }

    fn require_phase(&self, phase: RoundPhase) -> EngineResult<()> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(EngineError::invalid_state(format!(
                "expected {phase:?} phase, room is in {:?}",
                self.phase
            )))
        }
    }

    fn require_turn(&self, id: EntityId) -> EngineResult<&TurnEntity> {
        self.require_phase(RoundPhase::Acting)?;
        match self.current_entity() {
            Some(entity) if entity.entity_id == id => Ok(entity),
            _ => Err(EngineError::invalid_state(format!("it is not {id}'s turn"))),
        }
    }

    /// Add a combatant during card selection.
    pub fn add_combatant(&mut self, combatant: impl Into<Combatant>) -> EngineResult<()> {
        self.require_phase(RoundPhase::CardSelection)?;
        self.field = self.field.add(combatant)?;
        Ok(())
    }

    /// Select a character's two cards for the round.
    pub fn submit_cards(&mut self, character: EntityId, first: CardId, second: CardId) -> EngineResult<()> {
        self.require_phase(RoundPhase::CardSelection)?;
        let ch = piles::select_cards(self.field.character(character)?, first, second)?;
        self.field = self.field.with_character(ch)?;
        Ok(())
    }

    /// Declare a short or long rest for the round.
    ///
    /// A short rest draws its card once the round's last turn ends.
    pub fn declare_rest(&mut self, character: EntityId, rest: RestDeclaration) -> EngineResult<()> {
        self.require_phase(RoundPhase::CardSelection)?;
        let current = self.field.character(character)?;
        let ch = match rest {
            RestDeclaration::Short => piles::declare_short_rest(current)?,
            RestDeclaration::Long => piles::declare_long_rest(current, &self.config)?.0,
            RestDeclaration::None => {
                return Err(EngineError::validation("a rest declaration must be short or long"))
            }
        };
        self.field = self.field.with_character(ch)?;
        Ok(())
    }

    /// Pay health to redraw the short-rest card during round cleanup.
    pub fn reroll_short_rest(&mut self, character: EntityId) -> EngineResult<()> {
        self.require_phase(RoundPhase::Complete)?;
        let ch = piles::reroll_short_rest(self.field.character(character)?, &self.config, &mut self.rng)?;
        self.field = self.field.with_character(ch)?;
        Ok(())
    }

    /// Set the round initiative of every standee of a monster type.
    pub fn set_monster_initiative(&mut self, monster_type: &str, initiative: u8) -> EngineResult<()> {
        self.require_phase(RoundPhase::CardSelection)?;
        let initiative = validate_initiative(initiative)?;
        let ids: Vec<EntityId> = self
            .field
            .iter()
            .filter_map(Combatant::as_monster)
            .filter(|m| m.monster_type == monster_type)
            .map(|m| m.id)
            .collect();
        if ids.is_empty() {
            return Err(EngineError::not_found("monster type", monster_type));
        }
        let mut field = self.field.clone();
        for id in ids {
            field = field.update(id, |c| {
                if let Combatant::Monster(m) = c {
                    m.initiative = Some(initiative);
                }
                Ok(())
            })?;
        }
        self.field = field;
        Ok(())
    }

    /// Compute initiatives and the turn order, and hand the first turn out.
    pub fn start_round<L: AbilityCardLookup + ?Sized>(&mut self, lookup: &L) -> EngineResult<()> {
        self.require_phase(RoundPhase::CardSelection)?;

        let mut field = self.field.clone();
        for ch in self.field.characters().filter(|c| c.is_active()) {
            let initiative = character_initiative(ch, lookup)?;
            field = field.update(ch.id, |c| {
                if let Combatant::Character(ch) = c {
                    ch.initiative = Some(initiative);
                }
                Ok(())
            })?;
        }

        let order = build_turn_order(&field)?;
        debug!(round = field.round, entities = order.len(), "round started");

        self.field = field;
        self.cursor = if order.is_empty() { None } else { Some(0) };
        self.phase = if order.is_empty() {
            RoundPhase::Complete
        } else {
            RoundPhase::Acting
        };
        self.turn_order = order;
        if self.phase == RoundPhase::Complete {
            self.draw_short_rests()?;
        }
        Ok(())
    }

    /// Execute one card half for the character whose turn it is.
    pub fn execute_action<L: AbilityCardLookup + ?Sized>(
        &mut self,
        lookup: &L,
        request: &ActionRequest,
    ) -> EngineResult<ActionResult> {
        self.require_turn(request.actor)?;
        let execution = actions::execute_action(
            &self.field,
            lookup,
            &self.dispatcher,
            request,
            &self.config,
            &mut self.rng,
        )?;
        self.field = execution.field;
        Ok(execution.result)
    }

    /// Lose the chosen card to finish a long rest.
    pub fn finalize_long_rest(&mut self, character: EntityId, card: CardId) -> EngineResult<()> {
        self.require_turn(character)?;
        let ch = piles::finalize_long_rest(self.field.character(character)?, card, &self.config)?;
        self.field = self.field.with_character(ch)?;
        Ok(())
    }

    /// The current monster attacks its focus.
    ///
    /// Returns `None` when no target is eligible or in range.
    pub fn run_monster_attack(&mut self) -> EngineResult<Option<AttackOutcome>> {
        let entity = self
            .current_entity()
            .filter(|e| e.entity_type == CombatantKind::Monster)
            .ok_or_else(|| EngineError::invalid_state("it is not a monster's turn"))?;
        let monster = self
            .field
            .get(entity.entity_id)?
            .as_monster()
            .ok_or_else(|| EngineError::not_found("monster", entity.entity_id))?;

        let characters: Vec<&Character> = self.field.characters().collect();
        let summons: Vec<_> = self.field.iter().filter_map(Combatant::as_summon).collect();
        let Some(target) = select_focus_target(monster, &characters, &summons) else {
            trace!(monster = %monster.id, "no focus");
            return Ok(None);
        };

        let range = monster.range.unwrap_or(1);
        let in_range = match (monster.vitals.position, self.field.get(target)?.position()) {
            (Some(from), Some(to)) => from.distance(to) <= range,
            _ => false,
        };
        if !in_range {
            trace!(monster = %monster.id, focus = %target, "focus out of range");
            return Ok(None);
        }

        let mut action = CardAction::attack(monster.attack);
        if let Some(range) = monster.range {
            action = action.with_modifier(ActionModifier::Range(range));
        }
        let request = DispatchRequest::new(monster.id, &action).with_target(target);
        let dispatched = self.dispatcher.dispatch(&self.field, &request, &mut self.rng)?;

        self.field = dispatched.field;
        Ok(dispatched.damage)
    }

    /// Finish the current turn and move the cursor on.
    ///
    /// A character's two selected cards leave the hand; a card goes to the
    /// lost pile when the half executed from it carries a loss icon.
    pub fn end_turn<L: AbilityCardLookup + ?Sized>(&mut self, lookup: &L) -> EngineResult<()> {
        self.require_phase(RoundPhase::Acting)?;
        let (index, entity) = self
            .cursor
            .and_then(|i| self.turn_order.get(i).map(|e| (i, e)))
            .ok_or_else(|| EngineError::invalid_state("no turn in progress"))?;

        let mut field = self.field.clone();
        if let Combatant::Character(ch) = self.field.get(entity.entity_id)? {
            if ch.is_active() {
                field = field.with_character(route_played_cards(ch, lookup)?)?;
            }
        }

        let next = next_living_entity_index(&self.turn_order, index, |e| {
            !field.get(e.entity_id).is_ok_and(Combatant::is_active)
        });
        trace!(entity = %entity.entity_id, "turn ended");

        self.field = field;
        match next {
            Some(i) if i > index => self.cursor = Some(i),
            _ => {
                self.cursor = None;
                self.phase = RoundPhase::Complete;
                self.draw_short_rests()?;
            }
        }
        Ok(())
    }

    /// Draw the card each declared short rest will lose.
    ///
    /// Runs once every turn is over, so the round's played cards are in the
    /// discard pile. A character left with too few discards skips the rest.
    fn draw_short_rests(&mut self) -> EngineResult<()> {
        let mut field = self.field.clone();
        let pending = |c: &&Character| {
            c.is_active() && c.rest == RestDeclaration::Short && c.short_rest.is_none()
        };
        for ch in self.field.characters().filter(pending) {
            let next = if piles::can_rest(ch, &self.config) {
                piles::begin_short_rest(ch, &self.config, &mut self.rng)?
            } else {
                debug!(character = %ch.id, "short rest skipped, too few discarded cards");
                let mut next = ch.clone();
                next.rest = RestDeclaration::None;
                next
            };
            field = field.with_character(next)?;
        }
        self.field = field;
        Ok(())
    }

    /// Clean up after the last turn and open card selection for the next round.
    ///
    /// Pending short rests are finalized here; long rests must already be
    /// finalized on the character's turn.
    pub fn end_round(&mut self) -> EngineResult<()> {
        self.require_phase(RoundPhase::Complete)?;

        let mut field = self.field.clone();
        for ch in self.field.characters() {
            if ch.rest == RestDeclaration::Long && ch.is_active() {
                return Err(EngineError::invalid_state(format!(
                    "{} must finalize the long rest first",
                    ch.vitals.name
                )));
            }
            let mut next = ch.clone();
            if next.short_rest.is_some() && next.is_active() {
                next = piles::finalize_short_rest(&next)?;
            }
            next = piles::clear_selection(&next);
            next.rest = RestDeclaration::None;
            if next.is_active() {
                if let Some(reason) = piles::check_exhaustion(&next, true, &self.config) {
                    next = piles::exhaust(&next, reason)?;
                }
            }
            field = field.with_character(next)?;
        }

        let next_round = field.round + 1;
        let ids: Vec<EntityId> = field.iter().map(Combatant::id).collect();
        for id in ids {
            field = field.update(id, |c| {
                if let Combatant::Monster(m) = c {
                    m.initiative = None;
                }
                let vitals = c.vitals_mut();
                let (conditions, expired) = vitals.conditions.expire_round_based(next_round);
                if !expired.is_empty() {
                    trace!(entity = %id, ?expired, "conditions expired");
                }
                vitals.conditions = conditions;
                vitals.expire_round_bonuses();
                Ok(())
            })?;
        }
        field.elements = field.elements.decay();
        field.round = next_round;

        debug!(round = next_round, "round ended");
        self.field = field;
        self.turn_order.clear();
        self.cursor = None;
        self.phase = RoundPhase::CardSelection;
        Ok(())
    }
}

fn character_initiative<L: AbilityCardLookup + ?Sized>(ch: &Character, lookup: &L) -> EngineResult<u8> {
    if ch.rest == RestDeclaration::Long {
        return calculate_initiative(None, None, RestDeclaration::Long);
    }
    let [first, second] = ch.selected_cards.ok_or_else(|| {
        EngineError::invalid_state(format!("{} has not selected cards", ch.vitals.name))
    })?;
    let initiative_of = |id: CardId| {
        lookup
            .find_card(id)
            .map(|card| card.initiative)
            .ok_or_else(|| EngineError::not_found("card", id))
    };
    calculate_initiative(initiative_of(first)?, initiative_of(second)?, ch.rest)
}

/// Move the selected cards out of the hand using the executed halves' loss icons.
fn route_played_cards<L: AbilityCardLookup + ?Sized>(ch: &Character, lookup: &L) -> EngineResult<Character> {
    let Some([first, second]) = ch.selected_cards else {
        let mut next = ch.clone();
        next.executed_actions.clear();
        return Ok(next);
    };

    let has_loss = |card: CardId| -> EngineResult<bool> {
        let Some(executed) = ch.executed_actions.iter().find(|a| a.card_id == card) else {
            return Ok(false);
        };
        let template = lookup
            .find_card(card)
            .ok_or_else(|| EngineError::not_found("card", card))?;
        Ok(template.action(executed.position).has_loss())
    };

    let mut next = piles::play_cards(ch, first, second, has_loss(first)?, has_loss(second)?)?;
    next.selected_cards = None;
    next.executed_actions.clear();
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardRegistry, CardTemplate};
    use crate::combatants::{CharacterClass, Monster};
    use crate::core::{ActionPosition, HexCoord};
    use crate::modifiers::AttackModifierDeck;

    const HERO: EntityId = EntityId(0);
    const GUARD: EntityId = EntityId(1);

    fn registry() -> CardRegistry {
        CardRegistry::from_cards([
            CardTemplate::new(CardId(1), "Trample", CharacterClass::Brute, 1)
                .with_initiative(72)
                .with_top(CardAction::attack(3))
                .with_bottom(CardAction::move_(2).with_modifier(ActionModifier::Lost)),
            CardTemplate::new(CardId(2), "Shield Bash", CharacterClass::Brute, 1)
                .with_initiative(15)
                .with_top(CardAction::attack(1))
                .with_bottom(CardAction::loot(1)),
            CardTemplate::new(CardId(3), "Warding Strength", CharacterClass::Brute, 1)
                .with_initiative(32),
        ])
        .unwrap()
    }

    fn room() -> RoomState {
        let field = Battlefield::new(AttackModifierDeck::standard_unshuffled())
            .add(
                Character::new(HERO, "Hero", CharacterClass::Brute, 10, [CardId(1), CardId(2), CardId(3)])
                    .at(HexCoord::new(0, 0)),
            )
            .unwrap()
            .add(Monster::new(GUARD, "Bandit Guard", 1, 5, 2).at(HexCoord::new(1, 0)))
            .unwrap();
        RoomState::with_rng(field, RulesConfig::default(), GameRng::new(7))
    }

    #[test]
    fn test_start_round_orders_by_initiative() {
        let mut room = room();
        room.submit_cards(HERO, CardId(1), CardId(2)).unwrap();
        room.set_monster_initiative("Bandit Guard", 40).unwrap();
        room.start_round(&registry()).unwrap();

        assert_eq!(room.phase(), RoundPhase::Acting);
        let ids: Vec<_> = room.turn_order().iter().map(|e| e.entity_id).collect();
        assert_eq!(ids, vec![HERO, GUARD]);
        assert_eq!(room.field().character(HERO).unwrap().initiative, Some(15));
    }

    #[test]
    fn test_start_round_requires_selection() {
        let mut room = room();
        room.set_monster_initiative("Bandit Guard", 40).unwrap();
        assert!(room.start_round(&registry()).is_err());
        assert_eq!(room.phase(), RoundPhase::CardSelection);
    }

    #[test]
    fn test_only_current_entity_acts() {
        let mut room = room();
        room.submit_cards(HERO, CardId(1), CardId(2)).unwrap();
        room.set_monster_initiative("Bandit Guard", 10).unwrap();
        room.start_round(&registry()).unwrap();

        let request = ActionRequest::new(HERO, CardId(2), ActionPosition::Bottom);
        assert!(room.execute_action(&registry(), &request).is_err());
    }

    #[test]
    fn test_full_round() {
        let registry = registry();
        let mut room = room();
        room.submit_cards(HERO, CardId(1), CardId(2)).unwrap();
        room.set_monster_initiative("Bandit Guard", 40).unwrap();
        room.start_round(&registry).unwrap();

        let attack = ActionRequest::new(HERO, CardId(2), ActionPosition::Top).targeting(GUARD);
        assert!(room.execute_action(&registry, &attack).unwrap().success);
        let step = ActionRequest::new(HERO, CardId(1), ActionPosition::Bottom);
        assert!(room.execute_action(&registry, &step).unwrap().success);
        room.end_turn(&registry).unwrap();

        let hero = room.field().character(HERO).unwrap();
        assert_eq!(hero.hand, im::Vector::from(vec![CardId(3)]));
        assert_eq!(hero.discard, im::Vector::from(vec![CardId(2)]));
        assert_eq!(hero.lost, im::Vector::from(vec![CardId(1)]));

        assert_eq!(room.current_entity().map(|e| e.entity_id), Some(GUARD));
        room.run_monster_attack().unwrap();
        room.end_turn(&registry).unwrap();
        assert_eq!(room.phase(), RoundPhase::Complete);

        room.end_round().unwrap();
        assert_eq!(room.round(), 2);
        assert_eq!(room.phase(), RoundPhase::CardSelection);
        // One card left and cannot rest: exhausted.
        assert!(room.field().character(HERO).unwrap().is_exhausted());
    }

    #[test]
    fn test_declare_rest_none_rejected() {
        let mut room = room();
        assert!(room.declare_rest(HERO, RestDeclaration::None).is_err());
    }
}
