//! # hexhaven-engine
//!
//! Combat resolution engine for a cooperative, card-driven hex-grid
//! dungeon crawler.
//!
//! ## Design Principles
//!
//! 1. **Pure transformations**: rules operations take a snapshot and
//!    return a new one. A failed operation never leaves partial changes.
//!
//! 2. **Persistent data structures**: card piles, condition lists, and the
//!    combatant arena use `im`, so snapshots clone in O(1).
//!
//! 3. **Closed vocabularies**: action kinds, action modifiers, conditions,
//!    and elements are enums matched exhaustively.
//!
//! 4. **Explicit ownership**: each room owns its battlefield and random
//!    generator; rooms live in a `RoomRegistry` passed to callers.
//!
//! ## Modules
//!
//! - `core`: ids, hex math, RNG, configuration, errors, battlefield
//! - `cards`: ability card templates, actions, modifiers, lookup
//! - `combatants`: characters, monsters, summons
//! - `conditions`: status conditions and their lifecycle
//! - `elements`: elemental infusion board
//! - `modifiers`: attack modifier deck
//! - `piles`: hand/discard/lost state machine, rests, exhaustion
//! - `turns`: initiative and turn order
//! - `actions`: action validation, dispatch, execution
//! - `targeting`: monster focus selection
//! - `room`: round lifecycle and room registry

pub mod actions;
pub mod cards;
pub mod combatants;
pub mod conditions;
pub mod core;
pub mod elements;
pub mod modifiers;
pub mod piles;
pub mod room;
pub mod targeting;
pub mod turns;

// Re-export commonly used types
pub use crate::core::{
    ActionPosition, Battlefield, DeckSide, EngineError, EngineResult, EntityId, ErrorKind,
    ExecutedAction, GameRng, HexCoord, RandomSource, RulesConfig,
};

pub use crate::cards::{
    AbilityCardLookup, ActionKind, ActionModifier, CardAction, CardId, CardRegistry, CardTemplate,
    SummonDefinition,
};

pub use crate::combatants::{Character, CharacterClass, Combatant, Monster, Summon};

pub use crate::conditions::{Condition, ConditionSet};

pub use crate::elements::{Element, ElementState, ElementalBoard};

pub use crate::modifiers::{AttackModifierCard, AttackModifierDeck};

pub use crate::turns::{RestDeclaration, TurnEntity};

pub use crate::actions::{
    execute_action, ActionDispatcher, ActionRequest, ActionResult, CombatDispatcher,
};

pub use crate::targeting::select_focus_target;

pub use crate::room::{RoomId, RoomRegistry, RoomState, RoundPhase};
