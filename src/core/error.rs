//! Engine error taxonomy.
//!
//! Every engine operation returns `Result<_, EngineError>`. Errors are local
//! and recoverable: a failed operation never mutates state, it is simply
//! reported upward for the transport layer to surface to the client.

use serde::{Deserialize, Serialize};

/// Coarse error classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Malformed or missing input (wrong card count, duplicate ids).
    Validation,
    /// Operation violates a pile, turn, or rest invariant.
    InvalidState,
    /// A referenced card, template, combatant, or room does not exist.
    NotFound,
    /// Drawing from an empty or undersized deck.
    EmptyResource,
}

/// Errors surfaced by engine operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("{what} not found: {id}")]
    NotFound { what: &'static str, id: String },

    #[error("modifier deck is empty")]
    EmptyDeck,

    #[error("modifier deck has {available} cards, {needed} needed")]
    InsufficientCards { needed: usize, available: usize },
}

impl EngineError {
    /// Shorthand for a validation error.
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation(reason.into())
    }

    /// Shorthand for an invalid-state error.
    pub fn invalid_state(reason: impl Into<String>) -> Self {
        Self::InvalidState(reason.into())
    }

    /// Shorthand for a not-found error.
    pub fn not_found(what: &'static str, id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            what,
            id: id.to_string(),
        }
    }

    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::InvalidState(_) => ErrorKind::InvalidState,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::EmptyDeck | Self::InsufficientCards { .. } => ErrorKind::EmptyResource,
        }
    }
}

/// Result alias used throughout the engine.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(EngineError::validation("x").kind(), ErrorKind::Validation);
        assert_eq!(EngineError::invalid_state("x").kind(), ErrorKind::InvalidState);
        assert_eq!(EngineError::not_found("card", 3).kind(), ErrorKind::NotFound);
        assert_eq!(EngineError::EmptyDeck.kind(), ErrorKind::EmptyResource);
        assert_eq!(
            EngineError::InsufficientCards { needed: 2, available: 1 }.kind(),
            ErrorKind::EmptyResource
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            EngineError::not_found("card", 7).to_string(),
            "card not found: 7"
        );
        assert_eq!(
            EngineError::InsufficientCards { needed: 2, available: 1 }.to_string(),
            "modifier deck has 1 cards, 2 needed"
        );
    }
}
