//! Attack modifier deck.
//!
//! Every attack draws one card (two with advantage or disadvantage) that
//! adjusts the attack value. Drawing a reshuffle card (Null or x2) schedules
//! a reshuffle before the next draw.

mod card;
mod deck;

pub use card::{AttackModifierCard, CardEffect, ModifierValue};
pub use deck::{pick_advantage, pick_disadvantage, AttackModifierDeck};
