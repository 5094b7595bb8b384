//! Rooms: the nodes of the location graph.

use serde::{Deserialize, Serialize};

use super::PortalId;
use crate::channel::{Channel, ChannelMultiplierMap};
use crate::entities::EntityId;
use crate::geometry::Position;

/// A location in the world.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub name: String,
    pub description: String,
    pub position: Position,
    /// Rooms sharing an area hear area-wide announcements together.
    pub area: Option<String>,
    /// Attached portals, in the order they were connected.
    pub portals: Vec<PortalId>,
    /// Present characters, in arrival order.
    pub occupants: Vec<EntityId>,
    pub multipliers: ChannelMultiplierMap,
    pub no_ceiling: bool,
    pub no_floor: bool,
    pub no_walls: bool,
    /// Set when the description changed and the room must be written back.
    #[serde(skip)]
    pub needs_persisting: bool,
}

impl Room {
    /// Create a new enclosed room at `position`.
    pub fn new(name: impl Into<String>, position: Position) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            position,
            area: None,
            portals: Vec::new(),
            occupants: Vec::new(),
            multipliers: ChannelMultiplierMap::default(),
            no_ceiling: false,
            no_floor: false,
            no_walls: false,
            needs_persisting: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn in_area(mut self, area: impl Into<String>) -> Self {
        self.area = Some(area.into());
        self
    }

    pub fn with_multiplier(mut self, channel: Channel, multiplier: f64) -> Self {
        self.multipliers.set(channel, multiplier);
        self
    }

    pub fn without_ceiling(mut self) -> Self {
        self.no_ceiling = true;
        self
    }

    pub fn without_floor(mut self) -> Self {
        self.no_floor = true;
        self
    }

    pub fn without_walls(mut self) -> Self {
        self.no_walls = true;
        self
    }

    /// Elevation in meters, used as the flood threshold.
    pub fn elevation(&self) -> i32 {
        self.position.z
    }

    pub fn is_occupied_by(&self, id: EntityId) -> bool {
        self.occupants.contains(&id)
    }

    /// Append a line to the description and flag the room for saving.
    pub fn append_description(&mut self, text: &str) {
        if !self.description.is_empty() {
            self.description.push('\n');
        }
        self.description.push_str(text);
        self.needs_persisting = true;
    }
}
