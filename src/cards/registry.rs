//! Ability card lookup.
//!
//! The engine consumes card templates through the `AbilityCardLookup`
//! trait so that any persistent store can back it. `CardRegistry` is the
//! in-memory implementation used by hosts that load templates up front and
//! by tests.

use rustc_hash::FxHashMap;

use super::definition::{CardId, CardTemplate};
use crate::combatants::CharacterClass;
use crate::core::{EngineError, EngineResult};

/// Read access to ability card templates.
pub trait AbilityCardLookup {
    /// Find a template by ID.
    fn find_card(&self, id: CardId) -> Option<&CardTemplate>;

    /// All templates of a class up to and including `max_level`,
    /// ordered by card ID.
    fn cards_for_class(&self, class: CharacterClass, max_level: u8) -> Vec<&CardTemplate>;
}

/// Registry of ability card templates.
///
/// ```
/// use hexhaven_engine::cards::{AbilityCardLookup, CardId, CardRegistry, CardTemplate};
/// use hexhaven_engine::combatants::CharacterClass;
///
/// let mut registry = CardRegistry::new();
/// registry
///     .register(CardTemplate::new(CardId::new(1), "Trample", CharacterClass::Brute, 1))
///     .unwrap();
///
/// assert_eq!(registry.find_card(CardId::new(1)).unwrap().name, "Trample");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, CardTemplate>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template. Fails if the ID is already taken.
    pub fn register(&mut self, card: CardTemplate) -> EngineResult<()> {
        if self.cards.contains_key(&card.id) {
            return Err(EngineError::validation(format!(
                "{} already registered",
                card.id
            )));
        }
        self.cards.insert(card.id, card);
        Ok(())
    }

    /// Build a registry from a set of templates.
    pub fn from_cards(cards: impl IntoIterator<Item = CardTemplate>) -> EngineResult<Self> {
        let mut registry = Self::new();
        for card in cards {
            registry.register(card)?;
        }
        Ok(registry)
    }

    /// Get a template, failing with `NotFound`.
    pub fn get(&self, id: CardId) -> EngineResult<&CardTemplate> {
        self.cards
            .get(&id)
            .ok_or_else(|| EngineError::not_found("card template", id))
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    /// Get the number of registered templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all templates.
    pub fn iter(&self) -> impl Iterator<Item = &CardTemplate> {
        self.cards.values()
    }
}

impl AbilityCardLookup for CardRegistry {
    fn find_card(&self, id: CardId) -> Option<&CardTemplate> {
        self.cards.get(&id)
    }

    fn cards_for_class(&self, class: CharacterClass, max_level: u8) -> Vec<&CardTemplate> {
        let mut cards: Vec<_> = self
            .cards
            .values()
            .filter(|c| c.class == class && c.level <= max_level)
            .collect();
        cards.sort_by_key(|c| c.id);
        cards
    }
}
