//! Attack modifier deck: draw pile, discard pile, and reshuffle flag.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::card::{AttackModifierCard, CardEffect};
use crate::core::{EngineError, EngineResult, RandomSource};

/// A persistent attack modifier deck.
///
/// The draw pile and the discard pile always partition the deck. Cards
/// tagged with Bless or Curse leave the deck when drawn instead of being
/// discarded. Every operation returns a new deck.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackModifierDeck {
    draw_pile: Vector<AttackModifierCard>,
    discard_pile: Vector<AttackModifierCard>,
    needs_reshuffle: bool,
}

impl AttackModifierDeck {
    /// The printed 20-card deck, unshuffled.
    ///
    /// 1×Null, 1×x2 (both reshuffle), 5×+1, 5×−1, 6×+0, 1×−2, 1×+2.
    #[must_use]
    pub fn standard_unshuffled() -> Self {
        let mut cards = Vector::new();
        cards.push_back(AttackModifierCard::null());
        cards.push_back(AttackModifierCard::double());
        for _ in 0..5 {
            cards.push_back(AttackModifierCard::add(1));
        }
        for _ in 0..5 {
            cards.push_back(AttackModifierCard::add(-1));
        }
        for _ in 0..6 {
            cards.push_back(AttackModifierCard::add(0));
        }
        cards.push_back(AttackModifierCard::add(-2));
        cards.push_back(AttackModifierCard::add(2));

        Self {
            draw_pile: cards,
            discard_pile: Vector::new(),
            needs_reshuffle: false,
        }
    }

    /// The standard deck, shuffled.
    #[must_use]
    pub fn standard(rng: &mut impl RandomSource) -> Self {
        Self::standard_unshuffled().shuffle(rng)
    }

    /// Build a deck from explicit piles.
    #[must_use]
    pub fn from_piles(
        draw_pile: impl IntoIterator<Item = AttackModifierCard>,
        discard_pile: impl IntoIterator<Item = AttackModifierCard>,
    ) -> Self {
        Self {
            draw_pile: draw_pile.into_iter().collect(),
            discard_pile: discard_pile.into_iter().collect(),
            needs_reshuffle: false,
        }
    }

    /// Cards left to draw, top first.
    #[must_use]
    pub fn draw_pile(&self) -> &Vector<AttackModifierCard> {
        &self.draw_pile
    }

    #[must_use]
    pub fn discard_pile(&self) -> &Vector<AttackModifierCard> {
        &self.discard_pile
    }

    /// Whether a reshuffle card has been drawn since the last reshuffle.
    #[must_use]
    pub fn needs_reshuffle(&self) -> bool {
        self.needs_reshuffle
    }

    /// Draw pile plus discard pile.
    #[must_use]
    pub fn len(&self) -> usize {
        self.draw_pile.len() + self.discard_pile.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Shuffle the draw pile only.
    #[must_use]
    pub fn shuffle(&self, rng: &mut impl RandomSource) -> Self {
        let mut cards: Vec<_> = self.draw_pile.iter().copied().collect();
        rng.shuffle(&mut cards);
        Self {
            draw_pile: cards.into_iter().collect(),
            ..self.clone()
        }
    }

    /// Move the discard pile back into the draw pile and shuffle everything.
    #[must_use]
    pub fn reshuffle(&self, rng: &mut impl RandomSource) -> Self {
        let mut draw_pile = self.draw_pile.clone();
        draw_pile.append(self.discard_pile.clone());
        debug!(cards = draw_pile.len(), "reshuffling attack modifier deck");
        Self {
            draw_pile,
            discard_pile: Vector::new(),
            needs_reshuffle: false,
        }
        .shuffle(rng)
    }

    /// Reshuffle if a reshuffle card was drawn or fewer than `needed` cards remain.
    #[must_use]
    pub fn prepare_draw(&self, needed: usize, rng: &mut impl RandomSource) -> Self {
        if self.needs_reshuffle || self.draw_pile.len() < needed {
            self.reshuffle(rng)
        } else {
            self.clone()
        }
    }

    /// Draw the top card.
    pub fn draw_card(&self) -> EngineResult<(Self, AttackModifierCard)> {
        let mut next = self.clone();
        let card = next.draw_pile.pop_front().ok_or(EngineError::EmptyDeck)?;
        if card.is_reshuffle {
            next.needs_reshuffle = true;
        }
        if !card.is_temporary() {
            next.discard_pile.push_back(card);
        }
        Ok((next, card))
    }

    /// Draw two cards for an attack with advantage or disadvantage.
    pub fn draw_with_advantage(&self) -> EngineResult<(Self, [AttackModifierCard; 2])> {
        if self.draw_pile.len() < 2 {
            return Err(EngineError::InsufficientCards {
                needed: 2,
                available: self.draw_pile.len(),
            });
        }
        let (deck, first) = self.draw_card()?;
        let (deck, second) = deck.draw_card()?;
        Ok((deck, [first, second]))
    }

    /// Add a blessing (+2) card and shuffle the draw pile.
    #[must_use]
    pub fn add_bless(&self, rng: &mut impl RandomSource) -> Self {
        self.add_tagged(AttackModifierCard::bless(), rng)
    }

    /// Add a curse (Null) card and shuffle the draw pile.
    #[must_use]
    pub fn add_curse(&self, rng: &mut impl RandomSource) -> Self {
        self.add_tagged(AttackModifierCard::curse(), rng)
    }

    /// Remove one blessing card if present.
    #[must_use]
    pub fn remove_bless(&self) -> Self {
        self.remove_tagged(CardEffect::Bless)
    }

    /// Remove one curse card if present.
    #[must_use]
    pub fn remove_curse(&self) -> Self {
        self.remove_tagged(CardEffect::Curse)
    }

    /// Count cards carrying an effect tag across both piles.
    #[must_use]
    pub fn count_tagged(&self, effect: CardEffect) -> usize {
        self.draw_pile
            .iter()
            .chain(self.discard_pile.iter())
            .filter(|c| c.effect == Some(effect))
            .count()
    }

    fn add_tagged(&self, card: AttackModifierCard, rng: &mut impl RandomSource) -> Self {
        let mut next = self.clone();
        next.draw_pile.push_back(card);
        next.shuffle(rng)
    }

    fn remove_tagged(&self, effect: CardEffect) -> Self {
        let mut next = self.clone();
        if let Some(i) = next.draw_pile.iter().position(|c| c.effect == Some(effect)) {
            next.draw_pile.remove(i);
        } else if let Some(i) = next.discard_pile.iter().position(|c| c.effect == Some(effect)) {
            next.discard_pile.remove(i);
        }
        next
    }
}

/// The better of two drawn cards. Ties keep the first.
#[must_use]
pub fn pick_advantage(cards: [AttackModifierCard; 2]) -> AttackModifierCard {
    if cards[1].rank() > cards[0].rank() {
        cards[1]
    } else {
        cards[0]
    }
}

/// The worse of two drawn cards. Ties keep the first.
#[must_use]
pub fn pick_disadvantage(cards: [AttackModifierCard; 2]) -> AttackModifierCard {
    if cards[1].rank() < cards[0].rank() {
        cards[1]
    } else {
        cards[0]
    }
}
