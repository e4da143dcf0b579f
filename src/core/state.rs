//! Battlefield snapshot.
//!
//! ## Battlefield
//!
//! Complete combat state of one room:
//! - Combatant arena keyed by `EntityId`
//! - Party and monster attack modifier decks
//! - Elemental board
//! - Round number and condition sequence counter
//!
//! Uses `im` persistent data structures, so cloning is O(1) and every
//! mutation below is a pure `&self -> Self` transformation: a failed
//! operation leaves the original snapshot untouched.

use im::OrdMap;
use serde::{Deserialize, Serialize};

use super::entity::EntityId;
use super::error::{EngineError, EngineResult};
use super::hex::HexCoord;
use crate::combatants::{Character, Combatant};
use crate::conditions::{Condition, ConditionDuration, ConditionState};
use crate::elements::ElementalBoard;
use crate::modifiers::AttackModifierDeck;

/// Which attack modifier deck a combatant draws from.
///
/// Characters and their summons share the party deck; every monster draws
/// from the monster deck. Bless and Curse cards go into the deck of the
/// side that received the condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeckSide {
    Party,
    Monsters,
}

/// Combat state of one room.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Battlefield {
    combatants: OrdMap<EntityId, Combatant>,

    party_deck: AttackModifierDeck,
    monster_deck: AttackModifierDeck,

    pub elements: ElementalBoard,

    /// Current round (starts at 1).
    pub round: u32,

    next_entity_id: u32,
    condition_seq: u64,
}

impl Battlefield {
    /// Create an empty battlefield in round 1.
    ///
    /// Both sides start with their own copy of `deck`.
    #[must_use]
    pub fn new(deck: AttackModifierDeck) -> Self {
        Self::with_decks(deck.clone(), deck)
    }

    /// Create an empty battlefield with separate starting decks.
    #[must_use]
    pub fn with_decks(party_deck: AttackModifierDeck, monster_deck: AttackModifierDeck) -> Self {
        Self {
            combatants: OrdMap::new(),
            party_deck,
            monster_deck,
            elements: ElementalBoard::new(),
            round: 1,
            next_entity_id: 0,
            condition_seq: 0,
        }
    }

    #[must_use]
    pub fn deck(&self, side: DeckSide) -> &AttackModifierDeck {
        match side {
            DeckSide::Party => &self.party_deck,
            DeckSide::Monsters => &self.monster_deck,
        }
    }

    /// Replace one side's deck.
    pub fn set_deck(&mut self, side: DeckSide, deck: AttackModifierDeck) {
        match side {
            DeckSide::Party => self.party_deck = deck,
            DeckSide::Monsters => self.monster_deck = deck,
        }
    }

    /// Add a combatant with a caller-chosen id.
    pub fn add(&self, combatant: impl Into<Combatant>) -> EngineResult<Self> {
        let combatant = combatant.into();
        let id = combatant.id();
        if self.combatants.contains_key(&id) {
            return Err(EngineError::validation(format!("duplicate combatant {id}")));
        }
        let mut next = self.clone();
        next.next_entity_id = next.next_entity_id.max(id.raw() + 1);
        next.combatants.insert(id, combatant);
        Ok(next)
    }

    /// Add a combatant built around a freshly allocated id.
    #[must_use]
    pub fn spawn(&self, build: impl FnOnce(EntityId) -> Combatant) -> (Self, EntityId) {
        let mut next = self.clone();
        let id = EntityId::new(next.next_entity_id);
        next.next_entity_id += 1;
        next.combatants.insert(id, build(id));
        (next, id)
    }

    /// Look up a combatant.
    pub fn get(&self, id: EntityId) -> EngineResult<&Combatant> {
        self.combatants
            .get(&id)
            .ok_or_else(|| EngineError::not_found("combatant", id))
    }

    /// Look up a combatant that must be a character.
    pub fn character(&self, id: EntityId) -> EngineResult<&Character> {
        self.get(id)?
            .as_character()
            .ok_or_else(|| EngineError::not_found("character", id))
    }

    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.combatants.contains_key(&id)
    }

    /// Apply a fallible in-place edit to one combatant of a copy.
    pub fn update(
        &self,
        id: EntityId,
        edit: impl FnOnce(&mut Combatant) -> EngineResult<()>,
    ) -> EngineResult<Self> {
        let mut combatant = self.get(id)?.clone();
        edit(&mut combatant)?;
        let mut next = self.clone();
        next.combatants.insert(id, combatant);
        Ok(next)
    }

    /// Replace a character with a new snapshot of itself.
    pub fn with_character(&self, character: Character) -> EngineResult<Self> {
        self.character(character.id)?;
        let mut next = self.clone();
        next.combatants.insert(character.id, Combatant::Character(character));
        Ok(next)
    }

    /// Iterate all combatants in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Combatant> {
        self.combatants.values()
    }

    pub fn characters(&self) -> impl Iterator<Item = &Character> {
        self.iter().filter_map(Combatant::as_character)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.combatants.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.combatants.is_empty()
    }

    /// The active combatant standing on a hex.
    #[must_use]
    pub fn occupant(&self, hex: HexCoord) -> Option<EntityId> {
        self.iter()
            .find(|c| c.is_active() && c.position() == Some(hex))
            .map(Combatant::id)
    }

    /// Apply a condition with its default duration.
    ///
    /// Round-based conditions are stamped with the current round.
    pub fn apply_condition(
        &self,
        target: EntityId,
        condition: Condition,
        source: Option<EntityId>,
    ) -> EngineResult<Self> {
        let mut next = self.clone();
        next.condition_seq += 1;
        let mut state =
            ConditionState::new(condition, condition.default_duration(), next.condition_seq);
        if state.duration == ConditionDuration::Round {
            state = state.in_round(self.round);
        }
        if let Some(source) = source {
            state = state.from_source(source);
        }
        next.update(target, |c| {
            let vitals = c.vitals_mut();
            vitals.conditions = vitals.conditions.apply(state);
            Ok(())
        })
    }
}
