//! Card pile state machine.
//!
//! A character's ability cards live in exactly one of three piles:
//!
//! - **Hand**: playable this round
//! - **Discard**: played, recoverable by resting
//! - **Lost**: gone for the rest of the scenario
//!
//! Cards only ever move between piles; none are created or destroyed.

mod manager;
mod rest;

pub use manager::{
    can_rest, card_counts, check_exhaustion, clear_selection, exhaust, move_card, play_cards,
    select_cards, CardCounts, PileKind,
};
pub use rest::{
    begin_short_rest, declare_long_rest, declare_short_rest, finalize_long_rest,
    finalize_short_rest, reroll_short_rest,
};
