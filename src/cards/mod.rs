//! Ability cards: templates, actions, modifiers, and lookup.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for ability card templates
//! - `CardTemplate`: Printed card with initiative and top/bottom actions
//! - `ActionKind` / `ActionModifier`: closed enums matched exhaustively at dispatch
//! - `AbilityCardLookup`: read seam for any template store
//! - `CardRegistry`: in-memory lookup

pub mod definition;
pub mod modifier;
pub mod registry;

pub use definition::{ActionKind, ActionType, CardAction, CardId, CardTemplate, SummonDefinition};
pub use modifier::{ActionModifier, BonusDuration, BonusKind};
pub use registry::{AbilityCardLookup, CardRegistry};
