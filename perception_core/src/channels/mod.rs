//! Channel strategies: how each kind of event attenuates, what blocks it, and
//! how it is phrased.
//!
//! Sound and visual events (and speech and movement, which build on them)
//! share [`radiate`]. Flood and area events have their own visits.

pub(crate) mod area;
pub(crate) mod flood;
pub(crate) mod movement;
pub(crate) mod speech;
pub(crate) mod visual;

pub use movement::{Movement, MovementVerbs};
pub use speech::Speech;
pub use visual::line_of_sight;

use rand::Rng;
use world_graph::{Capability, Channel, RoomId, World};

use crate::config::PerceptionConfig;
use crate::delivery::PerceptionSink;
use crate::error::PerceptionResult;
use crate::event::{Event, EventKind};

/// Attenuation rules for a radiating channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Propagation {
    /// Key into room and portal multiplier tables.
    pub channel: Channel,
    /// What a portal must let through.
    pub capability: Capability,
    /// Fraction of strength lost per meter.
    pub falloff: f64,
    pub line_of_sight: bool,
}

impl Propagation {
    pub fn sound(config: &PerceptionConfig) -> Self {
        Self {
            channel: Channel::Sound,
            capability: Capability::Hear,
            falloff: config.sound_falloff,
            line_of_sight: false,
        }
    }

    pub fn visual(config: &PerceptionConfig) -> Self {
        Self {
            channel: Channel::Visual,
            capability: Capability::See,
            falloff: config.visual_falloff,
            line_of_sight: true,
        }
    }

    /// The rule for `kind`, or `None` for kinds that do not radiate.
    pub fn for_kind(kind: &EventKind, config: &PerceptionConfig) -> Option<Self> {
        match kind {
            EventKind::Sound | EventKind::Speech(_) | EventKind::MovementSound(_) => {
                Some(Self::sound(config))
            }
            EventKind::Visual | EventKind::MovementVisual(_) => Some(Self::visual(config)),
            EventKind::Flood | EventKind::Area { .. } => None,
        }
    }

    /// Geometric falloff over `distance` meters, never below zero.
    pub fn distance_factor(&self, distance: i32) -> f64 {
        (1.0 - self.falloff * distance as f64).max(0.0)
    }
}

/// Visit a room for a radiating channel: attenuate by the room, deliver, then
/// offer each unvisited neighbour the strength that reaches it.
pub(crate) fn radiate<S, R>(
    event: &mut Event,
    world: &World,
    sink: &mut S,
    rng: &mut R,
    room_id: RoomId,
    incoming: f64,
) -> PerceptionResult<()>
where
    S: PerceptionSink + ?Sized,
    R: Rng + ?Sized,
{
    let Some(rule) = Propagation::for_kind(&event.kind, &event.config) else {
        return Ok(());
    };
    let floor = event.config.perceptibility_floor;
    let room = world.room(room_id)?;
    let strength = incoming * room.multipliers.get(rule.channel);

    let forced = event.forced_room() == Some(room_id);
    if strength < floor && !forced {
        return Ok(());
    }

    event.deliver_room(world, sink, rng, room_id, strength)?;

    for &portal_id in &room.portals {
        let (portal, target) = world.traverse(room_id, portal_id)?;
        if event.frontier.has_been_visited(target) {
            continue;
        }
        if !portal.allows(room_id, rule.capability) {
            continue;
        }
        if rule.line_of_sight && !line_of_sight(world, event.origin, room_id, target)? {
            continue;
        }

        let distance = room.position.distance_to(world.room(target)?.position);
        let next = strength * portal.multiplier(rule.channel) * rule.distance_factor(distance);
        if next >= floor {
            event.frontier.add_visit(target, next);
        }
    }
    Ok(())
}
