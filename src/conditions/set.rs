//! Per-combatant condition state list.
//!
//! The active-condition set is never stored: it is always projected from
//! the list of `ConditionState`s, so removing a condition removes every
//! state that carries it.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::condition::{Condition, ConditionCategory, ConditionDuration};
use crate::core::EntityId;

/// One application of a condition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionState {
    pub condition: Condition,
    /// Battlefield-wide application sequence number.
    pub applied_at: u64,
    pub duration: ConditionDuration,
    /// Round the state was applied in; set for round-based durations.
    pub round_number: Option<u32>,
    pub source: Option<EntityId>,
    #[serde(default)]
    pub metadata: FxHashMap<String, i64>,
}

impl ConditionState {
    #[must_use]
    pub fn new(condition: Condition, duration: ConditionDuration, applied_at: u64) -> Self {
        Self {
            condition,
            applied_at,
            duration,
            round_number: None,
            source: None,
            metadata: FxHashMap::default(),
        }
    }

    /// Set the round the condition was applied in (builder pattern).
    #[must_use]
    pub fn in_round(mut self, round: u32) -> Self {
        self.round_number = Some(round);
        self
    }

    /// Set the combatant that applied the condition (builder pattern).
    #[must_use]
    pub fn from_source(mut self, source: EntityId) -> Self {
        self.source = Some(source);
        self
    }

    /// Attach a metadata value (builder pattern).
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: i64) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    fn is_expired(&self, current_round: u32) -> bool {
        match (self.duration, self.round_number) {
            (ConditionDuration::Round, Some(applied)) => current_round > applied,
            _ => false,
        }
    }
}

/// All condition states on one combatant.
///
/// Backed by `im::Vector`, so every operation returns a new set in O(log n)
/// without touching the original.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionSet {
    states: Vector<ConditionState>,
}

impl ConditionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a condition state.
    #[must_use]
    pub fn apply(&self, state: ConditionState) -> Self {
        let mut states = self.states.clone();
        states.push_back(state);
        Self { states }
    }

    /// Remove every state of a condition.
    #[must_use]
    pub fn remove(&self, condition: Condition) -> Self {
        Self {
            states: self
                .states
                .iter()
                .filter(|s| s.condition != condition)
                .cloned()
                .collect(),
        }
    }

    /// Remove everything.
    #[must_use]
    pub fn clear(&self) -> Self {
        Self::default()
    }

    #[must_use]
    pub fn has(&self, condition: Condition) -> bool {
        self.states.iter().any(|s| s.condition == condition)
    }

    /// Active conditions, deduplicated, in enum order.
    #[must_use]
    pub fn list(&self) -> Vec<Condition> {
        let mut active: Vec<_> = self.states.iter().map(|s| s.condition).collect();
        active.sort();
        active.dedup();
        active
    }

    /// The earliest state of a condition.
    #[must_use]
    pub fn get_state(&self, condition: Condition) -> Option<&ConditionState> {
        self.states.iter().find(|s| s.condition == condition)
    }

    /// Iterate all raw states in application order.
    pub fn states(&self) -> impl Iterator<Item = &ConditionState> {
        self.states.iter()
    }

    /// Drop round-based states applied before `current_round`.
    ///
    /// Returns the new set and the conditions that are no longer active.
    #[must_use]
    pub fn expire_round_based(&self, current_round: u32) -> (Self, Vec<Condition>) {
        let before = self.list();
        let next = Self {
            states: self
                .states
                .iter()
                .filter(|s| !s.is_expired(current_round))
                .cloned()
                .collect(),
        };
        let expired = before.into_iter().filter(|c| !next.has(*c)).collect();
        (next, expired)
    }

    /// The earliest until-consumed state of a condition.
    #[must_use]
    pub fn consumable(&self, condition: Condition) -> Option<&ConditionState> {
        self.states
            .iter()
            .find(|s| s.condition == condition && s.duration == ConditionDuration::UntilConsumed)
    }

    /// Consume the earliest until-consumed state of a condition.
    ///
    /// Returns the new set and whether anything was consumed. Later
    /// applications stay active, and round and persistent states of the
    /// same condition are left alone.
    #[must_use]
    pub fn consume(&self, condition: Condition) -> (Self, bool) {
        let Some(index) = self
            .states
            .iter()
            .position(|s| s.condition == condition && s.duration == ConditionDuration::UntilConsumed)
        else {
            return (self.clone(), false);
        };
        let mut states = self.states.clone();
        states.remove(index);
        (Self { states }, true)
    }

    /// Active conditions in a category.
    #[must_use]
    pub fn in_category(&self, category: ConditionCategory) -> Vec<Condition> {
        self.list().into_iter().filter(|c| c.is_in(category)).collect()
    }

    /// True iff Stun, Immobilize, or Disarm is active.
    #[must_use]
    pub fn is_incapacitated(&self) -> bool {
        self.states.iter().any(|s| s.condition.incapacitates())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
