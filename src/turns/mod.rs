//! Turn order service.
//!
//! Computes each combatant's initiative and the round's acting order, and
//! advances the turn cursor past dead or exhausted combatants.

mod initiative;
mod order;

pub use initiative::{
    calculate_initiative, validate_initiative, RestDeclaration, LONG_REST_INITIATIVE,
};
pub use order::{
    build_turn_order, determine_turn_order, next_entity_index, next_living_entity_index,
    sequence_with_summons, TurnEntity,
};
