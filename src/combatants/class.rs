//! Character classes and their fixed tie-break priority.

use serde::{Deserialize, Serialize};

/// Playable character classes.
///
/// Declaration order is the turn-order tie-break priority: at equal
/// initiative a class listed earlier acts first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum CharacterClass {
    Brute,
    Tinkerer,
    Spellweaver,
    Scoundrel,
    Cragheart,
    Mindthief,
    Sunkeeper,
    Quartermaster,
    Summoner,
    Nightshroud,
    Plagueherald,
    Berserker,
    Soothsinger,
    Doomstalker,
    Sawbones,
    Elementalist,
    BeastTyrant,
}

impl CharacterClass {
    pub const ALL: [CharacterClass; 17] = [
        CharacterClass::Brute,
        CharacterClass::Tinkerer,
        CharacterClass::Spellweaver,
        CharacterClass::Scoundrel,
        CharacterClass::Cragheart,
        CharacterClass::Mindthief,
        CharacterClass::Sunkeeper,
        CharacterClass::Quartermaster,
        CharacterClass::Summoner,
        CharacterClass::Nightshroud,
        CharacterClass::Plagueherald,
        CharacterClass::Berserker,
        CharacterClass::Soothsinger,
        CharacterClass::Doomstalker,
        CharacterClass::Sawbones,
        CharacterClass::Elementalist,
        CharacterClass::BeastTyrant,
    ];

    /// Tie-break rank; lower acts first.
    #[must_use]
    pub const fn turn_priority(self) -> u8 {
        self as u8
    }
}

impl std::fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BeastTyrant => f.write_str("Beast Tyrant"),
            other => write!(f, "{other:?}"),
        }
    }
}
