//! Core engine types: ids, hex math, executed-action records, RNG,
//! configuration, errors, and the battlefield snapshot.
//!
//! Everything here is independent of the specific rules modules that build
//! on top of it.

pub mod action;
pub mod config;
pub mod entity;
pub mod error;
pub mod hex;
pub mod rng;
pub mod state;

pub use action::{ActionPosition, ExecutedAction, ExecutedActions};
pub use config::RulesConfig;
pub use entity::EntityId;
pub use error::{EngineError, EngineResult, ErrorKind};
pub use hex::HexCoord;
pub use rng::{GameRng, RandomSource};
pub use state::{Battlefield, DeckSide};
