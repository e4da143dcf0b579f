//! Elemental infusion board.

use serde::{Deserialize, Serialize};

use crate::core::{EngineError, EngineResult};

/// The six elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Fire,
    Ice,
    Air,
    Earth,
    Light,
    Dark,
}

impl Element {
    pub const ALL: [Element; 6] = [
        Element::Fire,
        Element::Ice,
        Element::Air,
        Element::Earth,
        Element::Light,
        Element::Dark,
    ];

    const fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Element::Fire => "fire",
            Element::Ice => "ice",
            Element::Air => "air",
            Element::Earth => "earth",
            Element::Light => "light",
            Element::Dark => "dark",
        };
        f.write_str(name)
    }
}

/// Infusion level of one element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementState {
    #[default]
    Inert,
    Waning,
    Strong,
}

impl ElementState {
    /// One step of end-of-round decay.
    #[must_use]
    pub const fn decayed(self) -> Self {
        match self {
            Self::Strong => Self::Waning,
            Self::Waning | Self::Inert => Self::Inert,
        }
    }

    /// Whether the element can be consumed.
    #[must_use]
    pub const fn is_available(self) -> bool {
        !matches!(self, Self::Inert)
    }
}

/// State of all six elements. Copyable value; every operation returns a new board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementalBoard {
    states: [ElementState; 6],
}

impl ElementalBoard {
    /// A board with every element inert.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self, element: Element) -> ElementState {
        self.states[element.index()]
    }

    /// Make an element strong.
    #[must_use]
    pub fn infuse(&self, element: Element) -> Self {
        let mut next = *self;
        next.states[element.index()] = ElementState::Strong;
        next
    }

    /// Spend a strong or waning element, leaving it inert.
    pub fn consume(&self, element: Element) -> EngineResult<Self> {
        if !self.state(element).is_available() {
            return Err(EngineError::invalid_state(format!(
                "{element} is inert and cannot be consumed"
            )));
        }
        let mut next = *self;
        next.states[element.index()] = ElementState::Inert;
        Ok(next)
    }

    /// End-of-round decay applied to every element at once.
    #[must_use]
    pub fn decay(&self) -> Self {
        let mut next = *self;
        for state in &mut next.states {
            *state = state.decayed();
        }
        next
    }

    /// Iterate `(element, state)` pairs in board order.
    pub fn iter(&self) -> impl Iterator<Item = (Element, ElementState)> + '_ {
        Element::ALL.iter().map(move |&e| (e, self.state(e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_inert() {
        let board = ElementalBoard::new();
        assert!(board.iter().all(|(_, s)| s == ElementState::Inert));
    }

    #[test]
    fn test_decay_cycle() {
        let board = ElementalBoard::new().infuse(Element::Fire);
        assert_eq!(board.state(Element::Fire), ElementState::Strong);

        let board = board.decay();
        assert_eq!(board.state(Element::Fire), ElementState::Waning);

        let board = board.decay();
        assert_eq!(board.state(Element::Fire), ElementState::Inert);

        let board = board.decay();
        assert_eq!(board.state(Element::Fire), ElementState::Inert);
    }

    #[test]
    fn test_decay_is_simultaneous() {
        let board = ElementalBoard::new()
            .infuse(Element::Ice)
            .decay()
            .infuse(Element::Dark)
            .decay();

        assert_eq!(board.state(Element::Ice), ElementState::Inert);
        assert_eq!(board.state(Element::Dark), ElementState::Waning);
        assert_eq!(board.state(Element::Air), ElementState::Inert);
    }

    #[test]
    fn test_consume() {
        let board = ElementalBoard::new().infuse(Element::Light).decay();
        let consumed = board.consume(Element::Light).unwrap();
        assert_eq!(consumed.state(Element::Light), ElementState::Inert);

        // Original value untouched
        assert_eq!(board.state(Element::Light), ElementState::Waning);

        assert!(consumed.consume(Element::Light).is_err());
    }
}
