//! Line of sight for visual channels.

use world_graph::{Direction, RoomId, World, WorldResult};

/// Whether an event seen from `origin` can be seen in `target` when looking
/// onward from `source`.
///
/// Sight carries straight on through a chain of rooms, leaves any room from
/// the origin itself, and escapes sideways or vertically only where the
/// source room lacks the walls, ceiling or floor that would block it.
pub fn line_of_sight(
    world: &World,
    origin: RoomId,
    source: RoomId,
    target: RoomId,
) -> WorldResult<bool> {
    if source == origin {
        return Ok(true);
    }

    let origin_position = world.room(origin)?.position;
    let source_room = world.room(source)?;
    let target_position = world.room(target)?.position;

    let incoming = (source_room.position - origin_position).normalized();
    let onward = (target_position - source_room.position).normalized();
    if onward.is_zero() {
        return Ok(true);
    }
    if !incoming.is_zero() && incoming == onward {
        return Ok(true);
    }

    let visible = match onward.direction() {
        Some(Direction::Up) => source_room.no_ceiling,
        Some(Direction::Down) => source_room.no_floor,
        Some(_) => source_room.no_walls,
        None => true,
    };
    Ok(visible)
}
