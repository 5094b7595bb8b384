//! Area: one message for every room in a named region, no traversal.

use rand::Rng;
use world_graph::{RoomId, World, WorldResult};

use crate::delivery::PerceptionSink;
use crate::error::PerceptionResult;
use crate::event::{Event, Frontier};

/// Queue the rest of the origin's area behind the origin itself.
pub(crate) fn seed(
    frontier: &mut Frontier,
    world: &World,
    origin: RoomId,
    strength: f64,
) -> WorldResult<()> {
    let Some(area) = world.room(origin)?.area.as_deref() else {
        return Ok(());
    };
    for room in world.rooms_in_area(area) {
        if room != origin {
            frontier.add_visit(room, strength);
        }
    }
    Ok(())
}

/// Deliver the area message in one room. Strength is not attenuated.
pub(crate) fn visit<S, R>(
    event: &mut Event,
    world: &World,
    sink: &mut S,
    rng: &mut R,
    room_id: RoomId,
    strength: f64,
) -> PerceptionResult<()>
where
    S: PerceptionSink + ?Sized,
    R: Rng + ?Sized,
{
    event.deliver_room(world, sink, rng, room_id, strength)
}

#[cfg(test)]
mod tests {
    use crate::delivery::MessageLog;
    use crate::event::Event;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use world_graph::{Character, Position, Room, World};

    #[test]
    fn test_area_reaches_unconnected_rooms() {
        let mut world = World::new();
        let market = world.add_room(Room::new("Market", Position::new(0, 0, 0)).in_area("town"));
        let gate = world.add_room(Room::new("Gate", Position::new(500, 0, 0)).in_area("town"));
        let forest = world.add_room(Room::new("Forest", Position::new(10, 0, 0)).in_area("wilds"));
        world.connect(market, forest).unwrap();
        let guard = world.spawn(Character::new("Guard"), gate).unwrap();
        let hunter = world.spawn(Character::player("Hunter"), forest).unwrap();
        let mut log = MessageLog::new();
        let mut rng = StdRng::seed_from_u64(0);

        let event = Event::area(&world, market, 1.0, "The town bell tolls.").unwrap();
        assert_eq!(event.frontier().entries(), &[(market, 1.0), (gate, 1.0)]);
        let report = event.fire(&mut world, &mut log, &mut rng);

        assert_eq!(report.visited_rooms, 2);
        assert_eq!(log.messages_for(guard), vec!["The town bell tolls."]);
        assert_eq!(log.deliveries[0].hook.as_deref(), Some("onvisual"));
        assert!(!log.received(hunter));
    }

    #[test]
    fn test_room_without_area_is_alone() {
        let mut world = World::new();
        let hut = world.add_room(Room::new("Hut", Position::new(0, 0, 0)));
        let shed = world.add_room(Room::new("Shed", Position::new(5, 0, 0)));
        world.connect(hut, shed).unwrap();
        let hermit = world.spawn(Character::player("Hermit"), hut).unwrap();
        let mut log = MessageLog::new();
        let mut rng = StdRng::seed_from_u64(0);

        let report = Event::area(&world, hut, 1.0, "The wind howls.")
            .unwrap()
            .fire(&mut world, &mut log, &mut rng);

        assert_eq!(report.visited_rooms, 1);
        assert_eq!(report.affected, vec![hermit]);
    }

    #[test]
    fn test_unknown_origin_fails() {
        let world = World::new();
        assert!(Event::area(&world, world_graph::RoomId(3), 1.0, "Silence.").is_err());
    }
}
