//! The world arena: rooms and portals addressed by integer handles, plus the
//! characters standing in them.

mod portal;
mod room;

pub use portal::*;
pub use room::*;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::entities::{Character, EntityId};
use crate::error::{WorldError, WorldResult};

/// Handle to a room in a [`World`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomId(pub u32);

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handle to a portal in a [`World`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PortalId(pub u32);

impl std::fmt::Display for PortalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "portal#{}", self.0)
    }
}

/// Every room, portal and character the perception engine can reach.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct World {
    rooms: Vec<Room>,
    portals: Vec<Portal>,
    characters: HashMap<EntityId, Character>,
    /// Current room of each placed character.
    character_locations: HashMap<EntityId, RoomId>,
}

impl World {
    /// Create a new empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a room; its handle is its arena index.
    pub fn add_room(&mut self, room: Room) -> RoomId {
        let id = RoomId(self.rooms.len() as u32);
        self.rooms.push(room);
        id
    }

    /// Add a portal and attach it to both of its rooms.
    pub fn add_portal(&mut self, portal: Portal) -> WorldResult<PortalId> {
        self.room(portal.room)?;
        self.room(portal.room2)?;

        let id = PortalId(self.portals.len() as u32);
        let (a, b) = (portal.room, portal.room2);
        self.portals.push(portal);
        self.room_mut(a)?.portals.push(id);
        if b != a {
            self.room_mut(b)?.portals.push(id);
        }
        Ok(id)
    }

    /// Connect two rooms with a default open portal.
    pub fn connect(&mut self, a: RoomId, b: RoomId) -> WorldResult<PortalId> {
        self.add_portal(Portal::new(a, b))
    }

    pub fn room(&self, id: RoomId) -> WorldResult<&Room> {
        self.rooms
            .get(id.0 as usize)
            .ok_or(WorldError::UnknownRoom(id))
    }

    pub fn room_mut(&mut self, id: RoomId) -> WorldResult<&mut Room> {
        self.rooms
            .get_mut(id.0 as usize)
            .ok_or(WorldError::UnknownRoom(id))
    }

    pub fn portal(&self, id: PortalId) -> WorldResult<&Portal> {
        self.portals
            .get(id.0 as usize)
            .ok_or(WorldError::UnknownPortal(id))
    }

    pub fn portal_mut(&mut self, id: PortalId) -> WorldResult<&mut Portal> {
        self.portals
            .get_mut(id.0 as usize)
            .ok_or(WorldError::UnknownPortal(id))
    }

    /// Resolve a portal and the room on its far side from `from`.
    pub fn traverse(&self, from: RoomId, portal_id: PortalId) -> WorldResult<(&Portal, RoomId)> {
        let portal = self.portal(portal_id)?;
        let target = portal.other_side(from).ok_or(WorldError::DanglingPortal {
            portal: portal_id,
            room: from,
        })?;
        Ok((portal, target))
    }

    /// First portal directly joining `a` and `b`, in `a`'s portal order.
    pub fn portal_between(&self, a: RoomId, b: RoomId) -> Option<PortalId> {
        let room = self.room(a).ok()?;
        room.portals.iter().copied().find(|id| {
            self.portal(*id)
                .map(|p| p.other_side(a) == Some(b))
                .unwrap_or(false)
        })
    }

    /// Every room in `area`, in arena order.
    pub fn rooms_in_area(&self, area: &str) -> Vec<RoomId> {
        self.rooms
            .iter()
            .enumerate()
            .filter(|(_, room)| room.area.as_deref() == Some(area))
            .map(|(i, _)| RoomId(i as u32))
            .collect()
    }

    pub fn room_ids(&self) -> impl Iterator<Item = RoomId> {
        (0..self.rooms.len() as u32).map(RoomId)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn portal_count(&self) -> usize {
        self.portals.len()
    }

    /// Add a character to the world without placing it anywhere.
    pub fn add_character(&mut self, character: Character) -> EntityId {
        let id = character.id;
        self.characters.insert(id, character);
        id
    }

    pub fn character(&self, id: EntityId) -> WorldResult<&Character> {
        self.characters
            .get(&id)
            .ok_or(WorldError::UnknownCharacter(id))
    }

    pub fn character_mut(&mut self, id: EntityId) -> WorldResult<&mut Character> {
        self.characters
            .get_mut(&id)
            .ok_or(WorldError::UnknownCharacter(id))
    }

    pub fn location_of(&self, id: EntityId) -> Option<RoomId> {
        self.character_locations.get(&id).copied()
    }

    /// Put a character in `room`, removing it from wherever it stood before.
    /// The character joins the end of the room's occupant list.
    pub fn place_character(&mut self, id: EntityId, room: RoomId) -> WorldResult<()> {
        self.character(id)?;
        self.room(room)?;

        if let Some(previous) = self.character_locations.insert(id, room) {
            if previous == room {
                return Ok(());
            }
            self.room_mut(previous)?.occupants.retain(|o| *o != id);
        }
        let occupants = &mut self.room_mut(room)?.occupants;
        if !occupants.contains(&id) {
            occupants.push(id);
        }
        Ok(())
    }

    /// Add a character and place it in one step.
    pub fn spawn(&mut self, character: Character, room: RoomId) -> WorldResult<EntityId> {
        let id = self.add_character(character);
        self.place_character(id, room)?;
        Ok(id)
    }

    /// A character's name as others in `room` would tell it apart.
    ///
    /// Unique names are returned as-is; otherwise the character's 1-based rank
    /// among same-named occupants is appended, e.g. `Guard (2)`.
    pub fn display_name(&self, id: EntityId, room: RoomId) -> WorldResult<String> {
        let character = self.character(id)?;
        let room = self.room(room)?;

        let mut rank = 0;
        let mut namesakes = 0;
        for occupant in &room.occupants {
            let other = self.character(*occupant)?;
            if other.shares_name_with(character) {
                namesakes += 1;
                if other.id == id {
                    rank = namesakes;
                }
            }
        }

        if namesakes > 1 && rank > 0 {
            Ok(format!("{} ({})", character.name, rank))
        } else {
            Ok(character.name.clone())
        }
    }
}
