//! Flood: rising water that marks every room it reaches.

use rand::Rng;
use tracing::trace;
use world_graph::{Capability, RoomId, World};

use crate::delivery::PerceptionSink;
use crate::error::PerceptionResult;
use crate::event::Event;

/// Visit a room at water `level`: record the flood in the room's description,
/// tell the occupants, then spill through passable portals into rooms no
/// higher than the water.
pub(crate) fn visit<S, R>(
    event: &mut Event,
    world: &mut World,
    sink: &mut S,
    rng: &mut R,
    room_id: RoomId,
    level: f64,
) -> PerceptionResult<()>
where
    S: PerceptionSink + ?Sized,
    R: Rng + ?Sized,
{
    if level < event.config.perceptibility_floor {
        return Ok(());
    }

    let text = event
        .descriptions
        .select(level, &event.config)
        .map(str::to_string);
    if let Some(text) = text {
        let room = world.room_mut(room_id)?;
        room.append_description(&text);
        trace!(room = %room_id, "flood recorded in room description");
    }

    let world = &*world;
    event.deliver_room(world, sink, rng, room_id, level)?;

    for &portal_id in &world.room(room_id)?.portals {
        let (portal, target) = world.traverse(room_id, portal_id)?;
        if event.frontier.has_been_visited(target) {
            continue;
        }
        if !portal.allows(room_id, Capability::Pass) {
            continue;
        }
        if f64::from(world.room(target)?.elevation()) > level {
            continue;
        }
        event.frontier.add_visit(target, level);
    }
    Ok(())
}
