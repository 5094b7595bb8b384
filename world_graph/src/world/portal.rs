//! Portals: the edges of the location graph.

use serde::{Deserialize, Serialize};

use super::RoomId;
use crate::channel::{Channel, ChannelMultiplierMap};

/// Things that may cross a portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    See,
    Hear,
    Shoot,
    Pass,
}

/// One capability bit per [`Capability`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permeability {
    pub see: bool,
    pub hear: bool,
    pub shoot: bool,
    pub pass: bool,
}

impl Permeability {
    pub const ALL: Permeability = Permeability {
        see: true,
        hear: true,
        shoot: true,
        pass: true,
    };

    pub const NONE: Permeability = Permeability {
        see: false,
        hear: false,
        shoot: false,
        pass: false,
    };

    /// A shut wooden door: muffled sound gets through, nothing else.
    pub const HEAR_ONLY: Permeability = Permeability {
        hear: true,
        ..Permeability::NONE
    };

    pub fn allows(&self, capability: Capability) -> bool {
        match capability {
            Capability::See => self.see,
            Capability::Hear => self.hear,
            Capability::Shoot => self.shoot,
            Capability::Pass => self.pass,
        }
    }

    pub fn with(mut self, capability: Capability, allowed: bool) -> Self {
        match capability {
            Capability::See => self.see = allowed,
            Capability::Hear => self.hear = allowed,
            Capability::Shoot => self.shoot = allowed,
            Capability::Pass => self.pass = allowed,
        }
        self
    }
}

/// A portal as seen from one of its two rooms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortalView {
    /// Exit name, e.g. "north" or "the oak door".
    pub name: String,
    pub description: String,
    /// Capabilities while the portal is closed.
    pub closed: Permeability,
    /// Capabilities while the portal is open.
    pub open: Permeability,
}

impl PortalView {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_closed(mut self, closed: Permeability) -> Self {
        self.closed = closed;
        self
    }

    pub fn with_open(mut self, open: Permeability) -> Self {
        self.open = open;
        self
    }

    pub fn permeability(&self, is_open: bool) -> Permeability {
        if is_open {
            self.open
        } else {
            self.closed
        }
    }
}

impl Default for PortalView {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            closed: Permeability::HEAR_ONLY,
            open: Permeability::ALL,
        }
    }
}

/// A connection between exactly two rooms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Portal {
    pub room: RoomId,
    pub room2: RoomId,
    /// The portal as seen from `room`.
    pub forward: PortalView,
    /// The portal as seen from `room2`.
    pub backward: PortalView,
    pub is_open: bool,
    /// Applied only while the portal is closed but still lets the channel through.
    pub multipliers: ChannelMultiplierMap,
}

impl Portal {
    /// Create an open, fully permeable portal.
    pub fn new(room: RoomId, room2: RoomId) -> Self {
        Self {
            room,
            room2,
            forward: PortalView::default(),
            backward: PortalView::default(),
            is_open: true,
            multipliers: ChannelMultiplierMap::default(),
        }
    }

    /// Name each side; `forward` is the exit name from `room`.
    pub fn named(mut self, forward: impl Into<String>, backward: impl Into<String>) -> Self {
        self.forward.name = forward.into();
        self.backward.name = backward.into();
        self
    }

    pub fn with_views(mut self, forward: PortalView, backward: PortalView) -> Self {
        self.forward = forward;
        self.backward = backward;
        self
    }

    /// Apply the same capability sets to both sides.
    pub fn with_permeability(mut self, closed: Permeability, open: Permeability) -> Self {
        for view in [&mut self.forward, &mut self.backward] {
            view.closed = closed;
            view.open = open;
        }
        self
    }

    pub fn closed(mut self) -> Self {
        self.is_open = false;
        self
    }

    pub fn with_multiplier(mut self, channel: Channel, multiplier: f64) -> Self {
        self.multipliers.set(channel, multiplier);
        self
    }

    pub fn connects(&self, room: RoomId) -> bool {
        self.room == room || self.room2 == room
    }

    /// The room on the far side from `from`.
    pub fn other_side(&self, from: RoomId) -> Option<RoomId> {
        if from == self.room {
            Some(self.room2)
        } else if from == self.room2 {
            Some(self.room)
        } else {
            None
        }
    }

    /// The view belonging to the side `from` stands on.
    pub fn view_from(&self, from: RoomId) -> Option<&PortalView> {
        if from == self.room {
            Some(&self.forward)
        } else if from == self.room2 {
            Some(&self.backward)
        } else {
            None
        }
    }

    /// Whether `capability` may cross from `from` in the portal's current state.
    pub fn allows(&self, from: RoomId, capability: Capability) -> bool {
        self.view_from(from)
            .map(|view| view.permeability(self.is_open).allows(capability))
            .unwrap_or(false)
    }

    /// Strength multiplier for `channel` crossing in the current state.
    pub fn multiplier(&self, channel: Channel) -> f64 {
        if self.is_open {
            1.0
        } else {
            self.multipliers.get(channel)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rooms() -> (RoomId, RoomId, RoomId) {
        (RoomId(0), RoomId(1), RoomId(2))
    }

    #[test]
    fn test_other_side() {
        let (a, b, c) = rooms();
        let portal = Portal::new(a, b);
        assert_eq!(portal.other_side(a), Some(b));
        assert_eq!(portal.other_side(b), Some(a));
        assert_eq!(portal.other_side(c), None);
        assert!(portal.connects(b));
        assert!(!portal.connects(c));
    }

    #[test]
    fn test_views_are_directed() {
        let (a, b, _) = rooms();
        let portal = Portal::new(a, b).named("north", "south");
        assert_eq!(portal.view_from(a).unwrap().name, "north");
        assert_eq!(portal.view_from(b).unwrap().name, "south");
    }

    #[test]
    fn test_default_capabilities() {
        let (a, b, c) = rooms();
        let open = Portal::new(a, b);
        assert!(open.allows(a, Capability::See));
        assert!(open.allows(b, Capability::Pass));
        assert!(!open.allows(c, Capability::Hear));

        let shut = Portal::new(a, b).closed();
        assert!(shut.allows(a, Capability::Hear));
        assert!(!shut.allows(a, Capability::See));
        assert!(!shut.allows(a, Capability::Pass));
    }

    #[test]
    fn test_one_way_capability() {
        let (a, b, _) = rooms();
        let peephole = PortalView::named("peephole")
            .with_closed(Permeability::NONE.with(Capability::See, true));
        let blank = PortalView::named("door").with_closed(Permeability::NONE);
        let portal = Portal::new(a, b).with_views(peephole, blank).closed();

        assert!(portal.allows(a, Capability::See));
        assert!(!portal.allows(b, Capability::See));
    }

    #[test]
    fn test_multiplier_only_when_closed() {
        let (a, b, _) = rooms();
        let mut portal = Portal::new(a, b).with_multiplier(Channel::Sound, 0.4);
        assert_eq!(portal.multiplier(Channel::Sound), 1.0);

        portal.is_open = false;
        assert_eq!(portal.multiplier(Channel::Sound), 0.4);
        assert_eq!(portal.multiplier(Channel::Visual), 1.0);
    }
}
