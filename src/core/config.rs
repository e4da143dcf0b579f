//! Rules configuration.
//!
//! The numeric constants of the rulebook that the engine consults. Hosts
//! build a `RulesConfig` at startup (or deserialize one) and hand it to each
//! room; the defaults match the printed rules.

use serde::{Deserialize, Serialize};

/// Rule constants consulted by rests, action validation, and combat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Hit points restored when a long rest is finalized.
    pub long_rest_heal: u32,

    /// Hit points paid to reroll the random short-rest card.
    pub short_rest_reroll_cost: u32,

    /// Discard pile size needed before any rest is allowed.
    pub rest_discard_minimum: usize,

    /// Cards a character must be able to field each round.
    pub minimum_hand: usize,

    /// Card actions a character may execute per turn.
    pub max_actions_per_turn: usize,

    /// Extra damage dealt to a poisoned target.
    pub poison_bonus: u32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            long_rest_heal: 2,
            short_rest_reroll_cost: 1,
            rest_discard_minimum: 2,
            minimum_hand: 2,
            max_actions_per_turn: 2,
            poison_bonus: 1,
        }
    }
}

impl RulesConfig {
    /// Create the standard rules configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the long-rest heal amount.
    #[must_use]
    pub fn with_long_rest_heal(mut self, heal: u32) -> Self {
        self.long_rest_heal = heal;
        self
    }

    /// Set the short-rest reroll cost.
    #[must_use]
    pub fn with_short_rest_reroll_cost(mut self, cost: u32) -> Self {
        self.short_rest_reroll_cost = cost;
        self
    }

    /// Set the poison damage bonus.
    #[must_use]
    pub fn with_poison_bonus(mut self, bonus: u32) -> Self {
        self.poison_bonus = bonus;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_rulebook() {
        let config = RulesConfig::default();
        assert_eq!(config.long_rest_heal, 2);
        assert_eq!(config.short_rest_reroll_cost, 1);
        assert_eq!(config.rest_discard_minimum, 2);
        assert_eq!(config.minimum_hand, 2);
        assert_eq!(config.max_actions_per_turn, 2);
        assert_eq!(config.poison_bonus, 1);
    }

    #[test]
    fn test_builder() {
        let config = RulesConfig::new()
            .with_long_rest_heal(3)
            .with_short_rest_reroll_cost(2)
            .with_poison_bonus(0);

        assert_eq!(config.long_rest_heal, 3);
        assert_eq!(config.short_rest_reroll_cost, 2);
        assert_eq!(config.poison_bonus, 0);
    }

    #[test]
    fn test_partial_deserialization_uses_defaults() {
        let config: RulesConfig = serde_json::from_str(r#"{"long_rest_heal": 4}"#).unwrap();
        assert_eq!(config.long_rest_heal, 4);
        assert_eq!(config.minimum_hand, 2);
    }
}
