//! Condition engine: status conditions and their lifecycle.
//!
//! - `Condition`: the closed set of status conditions with fixed categories
//! - `ConditionDuration`: what removes a state (round end, consumption, explicit)
//! - `ConditionSet`: pure, im-backed list of states on one combatant

mod condition;
mod set;

pub use condition::{Condition, ConditionCategory, ConditionDuration};
pub use set::{ConditionSet, ConditionState};
