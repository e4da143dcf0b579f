//! Short and long rests.
//!
//! Both rests recover the discard pile into the hand at the cost of one
//! card, which goes to the lost pile. A short rest is declared during card
//! selection and resolved at round cleanup: it loses a random card (one
//! paid reroll allowed). A long rest lets the player choose, heals, and
//! costs the round's turn at initiative 99.

use tracing::debug;

use super::manager::{can_rest, move_card, PileKind};
use crate::cards::CardId;
use crate::combatants::{Character, ShortRestState};
use crate::core::{EngineError, EngineResult, RandomSource, RulesConfig};
use crate::turns::RestDeclaration;

fn ensure_not_resting(ch: &Character) -> EngineResult<()> {
    if ch.rest != RestDeclaration::None || ch.short_rest.is_some() {
        return Err(EngineError::invalid_state(format!(
            "{} is already resting",
            ch.vitals.name
        )));
    }
    Ok(())
}

fn ensure_enough_discards(ch: &Character, config: &RulesConfig) -> EngineResult<()> {
    if !can_rest(ch, config) {
        return Err(EngineError::invalid_state(format!(
            "{} needs at least {} discarded cards to rest",
            ch.vitals.name, config.rest_discard_minimum
        )));
    }
    Ok(())
}

/// Move `lost_card` to the lost pile and everything else in discard back to hand.
fn recover_discard(ch: &Character, lost_card: CardId) -> EngineResult<Character> {
    let mut next = move_card(ch, lost_card, PileKind::Discard, PileKind::Lost)?;
    let discard = std::mem::take(&mut next.discard);
    next.hand.append(discard);
    Ok(next)
}

/// Declare a short rest for the round.
///
/// No card is drawn yet: the discard pile only reaches its final size once
/// the round's played cards land in it.
pub fn declare_short_rest(ch: &Character) -> EngineResult<Character> {
    ensure_not_resting(ch)?;
    if ch.is_exhausted() {
        return Err(EngineError::invalid_state(format!("{} is exhausted", ch.vitals.name)));
    }

    let mut next = ch.clone();
    next.rest = RestDeclaration::Short;

    debug!(character = %ch.id, "short rest declared");
    Ok(next)
}

/// Start a short rest by picking a random discarded card to lose.
///
/// Works on a character with no rest declared or with a declared short rest
/// that has not drawn its card yet.
pub fn begin_short_rest(
    ch: &Character,
    config: &RulesConfig,
    rng: &mut impl RandomSource,
) -> EngineResult<Character> {
    if ch.rest == RestDeclaration::Long || ch.short_rest.is_some() {
        return Err(EngineError::invalid_state(format!(
            "{} is already resting",
            ch.vitals.name
        )));
    }
    ensure_enough_discards(ch, config)?;

    let card = ch.discard[rng.random_index(ch.discard.len())];
    let mut next = ch.clone();
    next.short_rest = Some(ShortRestState {
        card,
        rerolled: false,
    });
    next.rest = RestDeclaration::Short;

    debug!(character = %ch.id, %card, "short rest started");
    Ok(next)
}

/// Pay health to draw a different random card. Allowed once per rest.
pub fn reroll_short_rest(
    ch: &Character,
    config: &RulesConfig,
    rng: &mut impl RandomSource,
) -> EngineResult<Character> {
    let state = ch
        .short_rest
        .ok_or_else(|| EngineError::invalid_state("no short rest in progress"))?;
    if state.rerolled {
        return Err(EngineError::invalid_state("short rest was already rerolled"));
    }
    if ch.vitals.health <= config.short_rest_reroll_cost {
        return Err(EngineError::invalid_state(format!(
            "{} has too little health to reroll",
            ch.vitals.name
        )));
    }

    let others: Vec<CardId> = ch.discard.iter().copied().filter(|&c| c != state.card).collect();
    if others.is_empty() {
        return Err(EngineError::invalid_state("no other card to reroll into"));
    }
    let card = others[rng.random_index(others.len())];

    let mut next = ch.clone();
    next.vitals.health -= config.short_rest_reroll_cost;
    next.short_rest = Some(ShortRestState {
        card,
        rerolled: true,
    });

    debug!(character = %ch.id, from = %state.card, to = %card, "short rest rerolled");
    Ok(next)
}

/// Lose the chosen card and take the rest of the discard pile back.
pub fn finalize_short_rest(ch: &Character) -> EngineResult<Character> {
    let state = ch
        .short_rest
        .ok_or_else(|| EngineError::invalid_state("no short rest in progress"))?;

    let mut next = recover_discard(ch, state.card)?;
    next.short_rest = None;
    next.rest = RestDeclaration::None;

    debug!(character = %ch.id, lost = %state.card, "short rest finished");
    Ok(next)
}

/// Declare a long rest for the round.
///
/// The returned declaration is what the turn order needs to place the
/// character at initiative 99.
pub fn declare_long_rest(
    ch: &Character,
    config: &RulesConfig,
) -> EngineResult<(Character, RestDeclaration)> {
    ensure_not_resting(ch)?;
    ensure_enough_discards(ch, config)?;

    let mut next = ch.clone();
    next.rest = RestDeclaration::Long;
    next.selected_cards = None;

    debug!(character = %ch.id, "long rest declared");
    Ok((next, RestDeclaration::Long))
}

/// Lose the chosen discarded card, recover the rest, and heal.
pub fn finalize_long_rest(
    ch: &Character,
    card: CardId,
    config: &RulesConfig,
) -> EngineResult<Character> {
    if ch.rest != RestDeclaration::Long {
        return Err(EngineError::invalid_state(format!(
            "{} has not declared a long rest",
            ch.vitals.name
        )));
    }
    if !ch.discard.contains(&card) {
        return Err(EngineError::invalid_state(format!("{card} is not in discard")));
    }

    let mut next = recover_discard(ch, card)?;
    let healed = next.vitals.heal(config.long_rest_heal);
    next.rest = RestDeclaration::None;

    debug!(character = %ch.id, lost = %card, healed, "long rest finished");
    Ok(next)
}
