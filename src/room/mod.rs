//! Room lifecycle.
//!
//! - `RoomState`: one room's battlefield, generator, and round phase
//! - `RoomRegistry`: owned map of live rooms, passed to entry points

mod registry;
mod state;

pub use registry::{RoomId, RoomRegistry};
pub use state::{RoomState, RoundPhase};
