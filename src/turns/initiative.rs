//! Initiative values for the round.

use serde::{Deserialize, Serialize};

use crate::core::{EngineError, EngineResult};

/// Initiative of a character taking a long rest.
///
/// Printed cards never carry this value, so long-resters always act last.
pub const LONG_REST_INITIATIVE: u8 = 99;

/// What a character declared instead of (or alongside) playing cards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RestDeclaration {
    #[default]
    None,
    Short,
    Long,
}

/// Check an initiative set directly on a monster group or an unowned summon.
///
/// Values from 99 up are reserved, so nothing outranks a long rest.
pub fn validate_initiative(value: u8) -> EngineResult<u8> {
    if value >= LONG_REST_INITIATIVE {
        return Err(EngineError::validation(format!(
            "initiative {value} is reserved for long rests"
        )));
    }
    Ok(value)
}

/// Initiative from the two selected cards, or 99 for a long rest.
///
/// The lower card initiative wins. One missing value falls back to the
/// other; both missing is an error.
pub fn calculate_initiative(
    top: Option<u8>,
    bottom: Option<u8>,
    rest: RestDeclaration,
) -> EngineResult<u8> {
    if rest == RestDeclaration::Long {
        return Ok(LONG_REST_INITIATIVE);
    }

    for value in [top, bottom].into_iter().flatten() {
        validate_initiative(value)?;
    }

    match (top, bottom) {
        (Some(a), Some(b)) => Ok(a.min(b)),
        (Some(v), None) | (None, Some(v)) => Ok(v),
        (None, None) => Err(EngineError::invalid_state(
            "no initiative available from selected cards",
        )),
    }
}
