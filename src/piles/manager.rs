//! Card movement between hand, discard, and lost piles.
//!
//! Every function takes a `&Character` and returns a new snapshot. A
//! failing call returns an error and the input is left as it was, so the
//! total card count can never drift.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cards::CardId;
use crate::combatants::{Character, ExhaustionReason};
use crate::core::{EngineError, EngineResult, RulesConfig};
use crate::turns::RestDeclaration;

/// One of a character's three card piles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PileKind {
    Hand,
    Discard,
    Lost,
}

impl std::fmt::Display for PileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hand => write!(f, "hand"),
            Self::Discard => write!(f, "discard"),
            Self::Lost => write!(f, "lost"),
        }
    }
}

/// Pile sizes at a point in time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardCounts {
    pub hand: usize,
    pub discard: usize,
    pub lost: usize,
    pub total: usize,
}

pub(crate) fn pile(ch: &Character, kind: PileKind) -> &Vector<CardId> {
    match kind {
        PileKind::Hand => &ch.hand,
        PileKind::Discard => &ch.discard,
        PileKind::Lost => &ch.lost,
    }
}

fn pile_mut(ch: &mut Character, kind: PileKind) -> &mut Vector<CardId> {
    match kind {
        PileKind::Hand => &mut ch.hand,
        PileKind::Discard => &mut ch.discard,
        PileKind::Lost => &mut ch.lost,
    }
}

/// Move one card between piles, appending it to the destination.
pub fn move_card(
    ch: &Character,
    card: CardId,
    from: PileKind,
    to: PileKind,
) -> EngineResult<Character> {
    let index = pile(ch, from)
        .index_of(&card)
        .ok_or_else(|| EngineError::invalid_state(format!("{card} is not in {from}")))?;

    let mut next = ch.clone();
    pile_mut(&mut next, from).remove(index);
    pile_mut(&mut next, to).push_back(card);
    Ok(next)
}

/// Route both played cards out of the hand.
///
/// Each card goes to the lost pile if its executed action had a loss icon,
/// otherwise to the discard pile. The top card is handled first.
pub fn play_cards(
    ch: &Character,
    top: CardId,
    bottom: CardId,
    top_has_loss: bool,
    bottom_has_loss: bool,
) -> EngineResult<Character> {
    if top == bottom {
        return Err(EngineError::validation(format!(
            "cannot play {top} as both top and bottom"
        )));
    }
    for card in [top, bottom] {
        if !ch.hand.contains(&card) {
            return Err(EngineError::invalid_state(format!("{card} is not in hand")));
        }
    }

    let destination = |loss: bool| if loss { PileKind::Lost } else { PileKind::Discard };
    let next = move_card(ch, top, PileKind::Hand, destination(top_has_loss))?;
    let next = move_card(&next, bottom, PileKind::Hand, destination(bottom_has_loss))?;

    debug!(
        character = %ch.id,
        %top,
        %bottom,
        top_has_loss,
        bottom_has_loss,
        "played cards"
    );
    Ok(next)
}

/// Current pile sizes.
#[must_use]
pub fn card_counts(ch: &Character) -> CardCounts {
    CardCounts {
        hand: ch.hand.len(),
        discard: ch.discard.len(),
        lost: ch.lost.len(),
        total: ch.total_cards(),
    }
}

/// Choose the round's two cards.
pub fn select_cards(ch: &Character, first: CardId, second: CardId) -> EngineResult<Character> {
    if ch.is_exhausted() {
        return Err(EngineError::invalid_state(format!(
            "{} is exhausted",
            ch.vitals.name
        )));
    }
    if ch.rest == RestDeclaration::Long {
        return Err(EngineError::invalid_state(format!(
            "{} is taking a long rest",
            ch.vitals.name
        )));
    }
    if first == second {
        return Err(EngineError::validation("two different cards must be selected"));
    }
    for card in [first, second] {
        if !ch.hand.contains(&card) {
            return Err(EngineError::invalid_state(format!("{card} is not in hand")));
        }
    }

    let mut next = ch.clone();
    next.selected_cards = Some([first, second]);
    Ok(next)
}

/// Forget the round's selection and the turn's executed actions.
#[must_use]
pub fn clear_selection(ch: &Character) -> Character {
    let mut next = ch.clone();
    next.selected_cards = None;
    next.executed_actions.clear();
    next.initiative = None;
    next
}

/// Whether a rest is allowed: enough discarded cards and not exhausted.
#[must_use]
pub fn can_rest(ch: &Character, config: &RulesConfig) -> bool {
    !ch.is_exhausted() && ch.discard.len() >= config.rest_discard_minimum
}

/// Why the character must leave the scenario, if at all.
///
/// `must_play` is set when the character has to field cards this round.
#[must_use]
pub fn check_exhaustion(
    ch: &Character,
    must_play: bool,
    config: &RulesConfig,
) -> Option<ExhaustionReason> {
    if ch.vitals.health == 0 {
        return Some(ExhaustionReason::Damage);
    }
    if must_play && ch.hand.len() < config.minimum_hand && !can_rest(ch, config) {
        return Some(ExhaustionReason::InsufficientCards);
    }
    None
}

/// Remove the character from play.
///
/// The hand moves into the lost pile and the figure leaves the map.
pub fn exhaust(ch: &Character, reason: ExhaustionReason) -> EngineResult<Character> {
    if ch.is_exhausted() {
        return Err(EngineError::invalid_state(format!(
            "{} is already exhausted",
            ch.vitals.name
        )));
    }

    let mut next = ch.clone();
    let hand = std::mem::take(&mut next.hand);
    next.lost.append(hand);
    next.vitals.position = None;
    next.selected_cards = None;
    next.short_rest = None;
    next.rest = RestDeclaration::None;
    next.exhausted = Some(reason);

    debug!(character = %ch.id, ?reason, "character exhausted");
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatants::CharacterClass;
    use crate::core::{EntityId, ErrorKind, HexCoord};

    fn cards(ids: &[u32]) -> Vec<CardId> {
        ids.iter().copied().map(CardId).collect()
    }

    fn brute() -> Character {
        Character::new(
            EntityId(1),
            "Brute",
            CharacterClass::Brute,
            10,
            cards(&[1, 2, 3, 4]),
        )
    }

    #[test]
    fn test_move_card() {
        let ch = move_card(&brute(), CardId(2), PileKind::Hand, PileKind::Discard).unwrap();
        assert_eq!(ch.hand, Vector::from(cards(&[1, 3, 4])));
        assert_eq!(ch.discard, Vector::from(cards(&[2])));
    }

    #[test]
    fn test_move_card_missing() {
        let err = move_card(&brute(), CardId(9), PileKind::Hand, PileKind::Lost).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
    }

    #[test]
    fn test_play_cards_routes_by_loss() {
        let ch = brute()
            .with_discard(cards(&[5]))
            .with_lost(cards(&[6]));
        let ch = play_cards(&ch, CardId(1), CardId(2), true, false).unwrap();

        assert_eq!(ch.hand, Vector::from(cards(&[3, 4])));
        assert_eq!(ch.discard, Vector::from(cards(&[5, 2])));
        assert_eq!(ch.lost, Vector::from(cards(&[6, 1])));
    }

    #[test]
    fn test_play_same_card_twice() {
        let err = play_cards(&brute(), CardId(1), CardId(1), false, false).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_replaying_discarded_card_fails() {
        let ch = play_cards(&brute(), CardId(1), CardId(2), false, false).unwrap();
        let err = play_cards(&ch, CardId(1), CardId(3), false, false).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
        assert_eq!(card_counts(&ch).total, 4);
    }

    #[test]
    fn test_select_cards() {
        let ch = select_cards(&brute(), CardId(1), CardId(3)).unwrap();
        assert_eq!(ch.selected_cards, Some([CardId(1), CardId(3)]));

        assert!(select_cards(&brute(), CardId(1), CardId(1)).is_err());
        assert!(select_cards(&brute(), CardId(1), CardId(7)).is_err());

        let cleared = clear_selection(&ch);
        assert_eq!(cleared.selected_cards, None);
    }

    #[test]
    fn test_can_rest_needs_two_discards() {
        let config = RulesConfig::default();
        assert!(!can_rest(&brute().with_discard(cards(&[5])), &config));
        assert!(can_rest(&brute().with_discard(cards(&[5, 6])), &config));
    }

    #[test]
    fn test_check_exhaustion() {
        let config = RulesConfig::default();
        let mut ch = Character::new(EntityId(1), "Brute", CharacterClass::Brute, 10, cards(&[1]));
        assert_eq!(check_exhaustion(&ch, false, &config), None);
        assert_eq!(
            check_exhaustion(&ch, true, &config),
            Some(ExhaustionReason::InsufficientCards)
        );

        ch = ch.with_discard(cards(&[2, 3]));
        assert_eq!(check_exhaustion(&ch, true, &config), None);

        ch.vitals.health = 0;
        assert_eq!(check_exhaustion(&ch, false, &config), Some(ExhaustionReason::Damage));
    }

    #[test]
    fn test_exhaust_moves_hand_to_lost() {
        let ch = brute()
            .with_discard(cards(&[5]))
            .at(HexCoord::new(2, 2));
        let ch = exhaust(&ch, ExhaustionReason::Damage).unwrap();

        assert!(ch.hand.is_empty());
        assert_eq!(ch.lost.len(), 4);
        assert_eq!(ch.discard.len(), 1);
        assert_eq!(card_counts(&ch).total, 5);
        assert_eq!(ch.vitals.position, None);
        assert_eq!(ch.exhausted, Some(ExhaustionReason::Damage));

        assert!(exhaust(&ch, ExhaustionReason::Damage).is_err());
    }
}
