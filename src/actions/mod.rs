//! Action execution and dispatch.
//!
//! ## Key Types
//!
//! - `validate_action_execution`: the opposite-card/opposite-half rules
//! - `ActionDispatcher`: the seam that gives each action kind its effect
//! - `CombatDispatcher`: the printed combat rules
//! - `execute_action`: validate, resolve, dispatch, record
//! - `ActionResult`: serializable report for the transport layer

mod dispatcher;
mod executor;
mod result;
mod validation;

pub use dispatcher::{ActionDispatcher, CombatDispatcher, DispatchRequest, Dispatched};
pub use executor::{execute_action, ActionExecution, ActionRequest};
pub use result::{ActionFailure, ActionResult, AppliedModifier, AttackOutcome};
pub use validation::{validate_action_execution, ActionRejection};
