//! Movement: a character walking from one room to another, seen or heard.

use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_3;
use world_graph::{Channel, Character, Direction, EntityId, RoomId, World};

use crate::error::PerceptionResult;
use crate::event::Event;

/// Verb forms used when narrating a movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementVerbs {
    /// "walked"
    pub past: String,
    /// "walking"
    pub gerund: String,
}

impl MovementVerbs {
    pub fn new(past: impl Into<String>, gerund: impl Into<String>) -> Self {
        Self {
            past: past.into(),
            gerund: gerund.into(),
        }
    }
}

impl Default for MovementVerbs {
    fn default() -> Self {
        Self::new("walked", "walking")
    }
}

/// A character moving out of the event's origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    pub subject: EntityId,
    pub destination: RoomId,
    pub verbs: MovementVerbs,
}

impl Movement {
    pub fn new(subject: EntityId, destination: RoomId) -> Self {
        Self {
            subject,
            destination,
            verbs: MovementVerbs::default(),
        }
    }

    pub fn with_verbs(mut self, verbs: MovementVerbs) -> Self {
        self.verbs = verbs;
        self
    }
}

/// How the subject's path relates to a listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Motion {
    Approaching,
    Receding,
    Lateral,
}

impl Motion {
    /// Classify by the angle between the path and the origin-to-listener line.
    fn classify(angle: f64) -> Self {
        if angle.is_nan() {
            Motion::Lateral
        } else if angle < FRAC_PI_3 {
            Motion::Approaching
        } else if angle > 2.0 * FRAC_PI_3 {
            Motion::Receding
        } else {
            Motion::Lateral
        }
    }
}

fn heading(direction: Option<Direction>) -> String {
    match direction {
        Some(Direction::Up) => ", heading upwards".to_string(),
        Some(Direction::Down) => ", heading downwards".to_string(),
        Some(d) => format!(", heading {}", d),
        None => String::new(),
    }
}

/// Phrase `movement` for an occupant of `room_id`.
pub(crate) fn phrase(
    movement: &Movement,
    channel: Channel,
    event: &Event,
    world: &World,
    room_id: RoomId,
    _listener: &Character,
    strength: f64,
) -> PerceptionResult<String> {
    let verbs = &movement.verbs;

    if room_id == event.origin {
        let name = world.display_name(movement.subject, room_id)?;
        return Ok(match exit_name(movement, event.origin, world)? {
            Some(exit) if exit == "outside" => format!("{} {} off outside.", name, verbs.past),
            Some(exit) => format!("{} {} off to the {}.", name, verbs.past, exit),
            None => format!("{} {} off.", name, verbs.past),
        });
    }
    if room_id == movement.destination {
        let name = world.display_name(movement.subject, room_id)?;
        return Ok(format!("{} {} up to you.", name, verbs.past));
    }

    let config = &event.config;
    let subject = world.character(movement.subject)?;
    let who = if strength >= config.identify_name {
        world.display_name(movement.subject, room_id)?
    } else if strength >= config.identify_noun {
        subject.gender.noun().to_string()
    } else if strength >= config.identify_someone {
        "someone".to_string()
    } else if channel == Channel::Visual {
        "a shape".to_string()
    } else {
        "something".to_string()
    };

    let origin = world.room(event.origin)?.position;
    let destination = world.room(movement.destination)?.position;
    let here = world.room(room_id)?.position;
    let path = destination - origin;

    let motion = match Motion::classify(path.angle(here - origin)) {
        Motion::Approaching => match (origin - here).direction() {
            Some(d) => format!("towards you {}", d.from_phrase()),
            None => "towards you".to_string(),
        },
        Motion::Receding => format!("away from you{}", heading(path.direction())),
        Motion::Lateral => format!("past{}", heading(path.direction())),
    };

    let sense = if channel == Channel::Visual { "see" } else { "hear" };
    let frame = if strength >= config.near_threshold {
        format!("You {}", sense)
    } else if strength >= config.distant_threshold {
        format!("Not far off, you {}", sense)
    } else {
        format!("In the distance, you {}", sense)
    };

    Ok(format!("{} {} {} {}.", frame, who, verbs.gerund, motion))
}

/// What the origin's occupants see the subject leave by: the connecting
/// portal's name, "outside" into open air, or a compass direction.
fn exit_name(
    movement: &Movement,
    origin: RoomId,
    world: &World,
) -> PerceptionResult<Option<String>> {
    if let Some(portal_id) = world.portal_between(origin, movement.destination) {
        let portal = world.portal(portal_id)?;
        if let Some(view) = portal.view_from(origin) {
            if !view.name.is_empty() {
                return Ok(Some(view.name.clone()));
            }
        }
    }

    let destination = world.room(movement.destination)?;
    if destination.no_ceiling {
        return Ok(Some("outside".to_string()));
    }
    let path = destination.position - world.room(origin)?.position;
    Ok(path.direction().map(|d| d.name().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delivery::MessageLog;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use world_graph::{Gender, Portal, Position, Room};

    struct Street {
        world: World,
        square: RoomId,
        north: RoomId,
        south: RoomId,
        east: RoomId,
        walker: EntityId,
    }

    /// A square with lanes leading north, south and east.
    fn street() -> Street {
        let mut world = World::new();
        let square = world.add_room(Room::new("Square", Position::new(0, 0, 0)));
        let north = world.add_room(Room::new("North lane", Position::new(0, 10, 0)));
        let south = world.add_room(Room::new("South lane", Position::new(0, -10, 0)));
        let east = world.add_room(Room::new("East lane", Position::new(10, 0, 0)));
        world
            .add_portal(Portal::new(square, north).named("north", "south"))
            .unwrap();
        world.connect(square, south).unwrap();
        world.connect(square, east).unwrap();
        let walker = world
            .spawn(Character::new("Bob").with_gender(Gender::Male), square)
            .unwrap();
        Street {
            world,
            square,
            north,
            south,
            east,
            walker,
        }
    }

    fn phrase_for(
        street: &Street,
        channel: Channel,
        destination: RoomId,
        room: RoomId,
        strength: f64,
    ) -> String {
        let movement = Movement::new(street.walker, destination);
        let event = Event::movement_visual(street.square, 1.0, movement.clone());
        let listener = Character::player("Watcher");
        phrase(&movement, channel, &event, &street.world, room, &listener, strength).unwrap()
    }

    #[test]
    fn test_origin_uses_portal_name() {
        let s = street();
        assert_eq!(
            phrase_for(&s, Channel::Visual, s.north, s.square, 1.0),
            "Bob walked off to the north."
        );
    }

    #[test]
    fn test_origin_falls_back_to_direction() {
        let s = street();
        assert_eq!(
            phrase_for(&s, Channel::Visual, s.east, s.square, 1.0),
            "Bob walked off to the east."
        );
    }

    #[test]
    fn test_origin_outside() {
        let mut s = street();
        s.world.room_mut(s.east).unwrap().no_ceiling = true;
        assert_eq!(
            phrase_for(&s, Channel::Visual, s.east, s.square, 1.0),
            "Bob walked off outside."
        );
    }

    #[test]
    fn test_destination_walked_up() {
        let s = street();
        assert_eq!(
            phrase_for(&s, Channel::Sound, s.north, s.north, 0.05),
            "Bob walked up to you."
        );
    }

    #[test]
    fn test_receding_and_passing() {
        let s = street();
        // Walking north, seen from the south lane.
        assert_eq!(
            phrase_for(&s, Channel::Visual, s.north, s.south, 0.99),
            "You see Bob walking away from you, heading north."
        );
        // Walking south, seen from the north lane.
        assert_eq!(
            phrase_for(&s, Channel::Visual, s.south, s.north, 0.99),
            "You see Bob walking away from you, heading south."
        );
        // Walking north, seen from the east lane: passing by.
        assert_eq!(
            phrase_for(&s, Channel::Visual, s.north, s.east, 0.99),
            "You see Bob walking past, heading north."
        );
    }

    #[test]
    fn test_approaching() {
        let mut s = street();
        let far_north = s
            .world
            .add_room(Room::new("Gate", Position::new(0, 30, 0)));
        s.world.connect(s.north, far_north).unwrap();
        // Walking north from the square towards someone at the gate.
        assert_eq!(
            phrase_for(&s, Channel::Visual, s.north, far_north, 0.99),
            "You see Bob walking towards you from the south."
        );
    }

    #[test]
    fn test_identification_ladder() {
        let s = street();
        assert!(phrase_for(&s, Channel::Visual, s.north, s.east, 0.7)
            .starts_with("You see a man walking"));
        assert!(phrase_for(&s, Channel::Visual, s.north, s.east, 0.5)
            .starts_with("Not far off, you see someone walking"));
        assert!(phrase_for(&s, Channel::Visual, s.north, s.east, 0.2)
            .starts_with("In the distance, you see a shape walking"));
        assert!(phrase_for(&s, Channel::Sound, s.north, s.east, 0.2)
            .starts_with("In the distance, you hear something walking"));
    }

    #[test]
    fn test_custom_verbs() {
        let s = street();
        let movement =
            Movement::new(s.walker, s.north).with_verbs(MovementVerbs::new("crept", "creeping"));
        let event = Event::movement_sound(s.square, 1.0, movement.clone());
        let listener = Character::player("Watcher");
        let text =
            phrase(&movement, Channel::Sound, &event, &s.world, s.square, &listener, 1.0).unwrap();
        assert_eq!(text, "Bob crept off to the north.");
    }

    #[test]
    fn test_arrival_always_perceived() {
        let mut s = street();
        // A heavily muffled destination still notices the arrival.
        s.world.room_mut(s.north).unwrap().multipliers.set(Channel::Sound, 0.01);
        let resident = s.world.spawn(Character::player("Resident"), s.north).unwrap();
        let mut log = MessageLog::new();
        let mut rng = StdRng::seed_from_u64(0);

        let report = Event::movement_sound(s.square, 0.3, Movement::new(s.walker, s.north))
            .fire(&mut s.world, &mut log, &mut rng);

        assert_eq!(log.messages_for(resident), vec!["Bob walked up to you."]);
        assert!(!log.received(s.walker));
        assert!(report.affected.contains(&resident));
    }
}
