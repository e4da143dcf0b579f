//! Explicitly owned map of live rooms.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::state::RoomState;
use crate::core::{EngineError, EngineResult};

/// Identifier for a room.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RoomId(pub u64);

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Room({})", self.0)
    }
}

/// All rooms owned by one process or shard.
///
/// Rooms share no mutable state; the registry is passed to whatever entry
/// point needs it rather than living in a global.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: FxHashMap<RoomId, RoomState>,
    next_id: u64,
}

impl RoomRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a room and return its id.
    pub fn create_room(&mut self, room: RoomState) -> RoomId {
        let id = RoomId(self.next_id);
        self.next_id += 1;
        self.rooms.insert(id, room);
        debug!(room = %id, "room created");
        id
    }

    pub fn room(&self, id: RoomId) -> EngineResult<&RoomState> {
        self.rooms.get(&id).ok_or_else(|| EngineError::not_found("room", id))
    }

    pub fn room_mut(&mut self, id: RoomId) -> EngineResult<&mut RoomState> {
        self.rooms.get_mut(&id).ok_or_else(|| EngineError::not_found("room", id))
    }

    /// Run a fallible operation against one room.
    pub fn with_room<T>(
        &mut self,
        id: RoomId,
        op: impl FnOnce(&mut RoomState) -> EngineResult<T>,
    ) -> EngineResult<T> {
        op(self.room_mut(id)?)
    }

    pub fn remove_room(&mut self, id: RoomId) -> EngineResult<RoomState> {
        let room = self.rooms.remove(&id).ok_or_else(|| EngineError::not_found("room", id))?;
        debug!(room = %id, "room removed");
        Ok(room)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Ids of every live room, ascending.
    #[must_use]
    pub fn ids(&self) -> Vec<RoomId> {
        let mut ids: Vec<_> = self.rooms.keys().copied().collect();
        ids.sort();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Battlefield, ErrorKind, GameRng, RulesConfig};
    use crate::modifiers::AttackModifierDeck;

    fn empty_room(seed: u64) -> RoomState {
        RoomState::with_rng(
            Battlefield::new(AttackModifierDeck::standard_unshuffled()),
            RulesConfig::default(),
            GameRng::new(seed),
        )
    }

    #[test]
    fn test_create_and_remove() {
        let mut registry = RoomRegistry::new();
        let a = registry.create_room(empty_room(1));
        let b = registry.create_room(empty_room(2));

        assert_ne!(a, b);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.ids(), vec![a, b]);

        registry.remove_room(a).unwrap();
        assert_eq!(registry.room(a).unwrap_err().kind(), ErrorKind::NotFound);
        assert!(registry.room(b).is_ok());
    }

    #[test]
    fn test_with_room() {
        let mut registry = RoomRegistry::new();
        let id = registry.create_room(empty_room(1));

        let round = registry.with_room(id, |room| Ok(room.round())).unwrap();
        assert_eq!(round, 1);
        assert!(registry.with_room(RoomId(99), |room| Ok(room.round())).is_err());
    }

    #[test]
    fn test_rooms_are_isolated() {
        let mut registry = RoomRegistry::new();
        let a = registry.create_room(empty_room(1));
        let b = registry.create_room(empty_room(2));

        registry
            .with_room(a, |room| {
                let mut field = room.field().clone();
                field.round = 5;
                *room = RoomState::with_rng(field, RulesConfig::default(), GameRng::new(1));
                Ok(())
            })
            .unwrap();

        assert_eq!(registry.room(a).unwrap().round(), 5);
        assert_eq!(registry.room(b).unwrap().round(), 1);
    }
}
