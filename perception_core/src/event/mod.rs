//! Perception events and the frontier drain that carries them through the world.
//!
//! An event starts at an origin room with an initial strength. Draining it
//! works through a growing frontier of rooms:
//! 1. **Visit**: take the next queued room and apply the channel's rules
//! 2. **Deliver**: phrase the event for each occupant and hand it to the sink
//! 3. **Spread**: offer neighbouring rooms to the frontier at reduced strength
//! 4. **Finish**: stop once every queued room, including late arrivals, is visited

mod frontier;

pub use frontier::*;

use rand::Rng;
use serde::Serialize;
use tracing::{debug, trace, warn};
use world_graph::{Channel, Character, EntityId, RoomId, World, WorldResult};

use crate::channels::{area, flood, movement, radiate, speech, Movement, Speech};
use crate::config::PerceptionConfig;
use crate::delivery::{deliver_to, PerceptionSink};
use crate::error::{PerceptionError, PerceptionResult};
use crate::phrasing::DescriptionTiers;

/// The closed set of perception channels an event can travel on.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    Sound,
    Visual,
    Speech(Speech),
    MovementSound(Movement),
    MovementVisual(Movement),
    Flood,
    Area { message: String },
}

impl EventKind {
    /// The medium this kind travels through.
    pub fn channel(&self) -> Channel {
        match self {
            EventKind::Sound | EventKind::Speech(_) | EventKind::MovementSound(_) => Channel::Sound,
            EventKind::Visual | EventKind::MovementVisual(_) => Channel::Visual,
            EventKind::Flood => Channel::Flood,
            EventKind::Area { .. } => Channel::Area,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EventKind::Sound => "sound",
            EventKind::Visual => "visual",
            EventKind::Speech(_) => "speech",
            EventKind::MovementSound(_) => "movement_sound",
            EventKind::MovementVisual(_) => "movement_visual",
            EventKind::Flood => "flood",
            EventKind::Area { .. } => "area",
        }
    }

    fn movement(&self) -> Option<&Movement> {
        match self {
            EventKind::MovementSound(m) | EventKind::MovementVisual(m) => Some(m),
            _ => None,
        }
    }
}

/// Lifecycle of an event. There is no way back to an earlier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EventState {
    Pending,
    Draining,
    Done,
}

/// Summary of a finished drain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerceptionReport {
    pub kind: &'static str,
    pub channel: Channel,
    pub origin: RoomId,
    pub visited_rooms: usize,
    pub affected: Vec<EntityId>,
}

/// A perceptible happening, spreading outward from one room.
#[derive(Debug, Clone)]
pub struct Event {
    pub(crate) kind: EventKind,
    pub(crate) origin: RoomId,
    pub(crate) strength: f64,
    pub(crate) descriptions: DescriptionTiers,
    /// Never notified.
    pub(crate) excluded: Vec<EntityId>,
    /// Everyone notified so far, in delivery order.
    pub(crate) affected: Vec<EntityId>,
    pub(crate) frontier: Frontier,
    pub(crate) state: EventState,
    pub(crate) config: PerceptionConfig,
}

impl Event {
    fn new(kind: EventKind, origin: RoomId, strength: f64) -> Self {
        let mut frontier = Frontier::new();
        frontier.add_visit(origin, strength);
        Self {
            kind,
            origin,
            strength,
            descriptions: DescriptionTiers::default(),
            excluded: Vec::new(),
            affected: Vec::new(),
            frontier,
            state: EventState::Pending,
            config: PerceptionConfig::default(),
        }
    }

    /// A noise: attenuates quickly with distance, passes portals that let sound through.
    pub fn sound(origin: RoomId, strength: f64) -> Self {
        Self::new(EventKind::Sound, origin, strength)
    }

    /// Something seen: attenuates slowly but needs a line of sight.
    pub fn visual(origin: RoomId, strength: f64) -> Self {
        Self::new(EventKind::Visual, origin, strength)
    }

    /// Someone talking. The speaker is never told their own words.
    pub fn speech(origin: RoomId, strength: f64, speech: Speech) -> Self {
        let speaker = speech.speaker;
        Self::new(EventKind::Speech(speech), origin, strength).excluding(speaker)
    }

    /// Footsteps from a character leaving `origin`.
    pub fn movement_sound(origin: RoomId, strength: f64, movement: Movement) -> Self {
        Self::movement(EventKind::MovementSound, origin, strength, movement)
    }

    /// The sight of a character leaving `origin`.
    pub fn movement_visual(origin: RoomId, strength: f64, movement: Movement) -> Self {
        Self::movement(EventKind::MovementVisual, origin, strength, movement)
    }

    fn movement(
        kind: fn(Movement) -> EventKind,
        origin: RoomId,
        strength: f64,
        movement: Movement,
    ) -> Self {
        let (subject, destination) = (movement.subject, movement.destination);
        let mut event = Self::new(kind(movement), origin, strength).excluding(subject);
        // The arrival is always perceived at the destination.
        event.frontier.add_visit(destination, strength);
        event
    }

    /// Rising water. `level` is compared against room elevations.
    pub fn flood(origin: RoomId, level: f64) -> Self {
        Self::new(EventKind::Flood, origin, level)
    }

    /// A fixed message for every room in the origin's area.
    pub fn area(
        world: &World,
        origin: RoomId,
        strength: f64,
        message: impl Into<String>,
    ) -> WorldResult<Self> {
        let kind = EventKind::Area {
            message: message.into(),
        };
        let mut event = Self::new(kind, origin, strength);
        area::seed(&mut event.frontier, world, origin, strength)?;
        Ok(event)
    }

    pub fn with_descriptions(mut self, descriptions: DescriptionTiers) -> Self {
        self.descriptions = descriptions;
        self
    }

    pub fn with_near(mut self, text: impl Into<String>) -> Self {
        self.descriptions.near = Some(text.into());
        self
    }

    pub fn with_distant(mut self, text: impl Into<String>) -> Self {
        self.descriptions.distant = Some(text.into());
        self
    }

    pub fn with_very_distant(mut self, text: impl Into<String>) -> Self {
        self.descriptions.very_distant = Some(text.into());
        self
    }

    /// Never notify `id`.
    pub fn excluding(mut self, id: EntityId) -> Self {
        if !self.excluded.contains(&id) {
            self.excluded.push(id);
        }
        self
    }

    pub fn with_config(mut self, config: PerceptionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn kind(&self) -> &EventKind {
        &self.kind
    }

    pub fn channel(&self) -> Channel {
        self.kind.channel()
    }

    pub fn origin(&self) -> RoomId {
        self.origin
    }

    pub fn strength(&self) -> f64 {
        self.strength
    }

    pub fn state(&self) -> EventState {
        self.state
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    pub fn has_been_visited(&self, room: RoomId) -> bool {
        self.frontier.has_been_visited(room)
    }

    /// Rooms processed by the drain.
    pub fn visited_count(&self) -> usize {
        self.frontier.drained()
    }

    pub fn affected(&self) -> &[EntityId] {
        &self.affected
    }

    pub fn excluded(&self) -> &[EntityId] {
        &self.excluded
    }

    pub fn report(&self) -> PerceptionReport {
        PerceptionReport {
            kind: self.kind.name(),
            channel: self.channel(),
            origin: self.origin,
            visited_rooms: self.visited_count(),
            affected: self.affected.clone(),
        }
    }

    /// Run the event to completion.
    ///
    /// Every queued room is visited, including rooms queued during the drain.
    /// A fault part-way through leaves earlier deliveries in place and still
    /// moves the event to [`EventState::Done`].
    pub fn drain<S, R>(
        &mut self,
        world: &mut World,
        sink: &mut S,
        rng: &mut R,
    ) -> PerceptionResult<()>
    where
        S: PerceptionSink + ?Sized,
        R: Rng + ?Sized,
    {
        if self.state != EventState::Pending {
            return Err(PerceptionError::AlreadyDrained);
        }
        self.state = EventState::Draining;
        debug!(
            kind = self.kind.name(),
            origin = %self.origin,
            strength = self.strength,
            "perception event draining"
        );

        let result = self.drain_frontier(world, sink, rng);
        self.state = EventState::Done;

        debug!(
            kind = self.kind.name(),
            visited = self.visited_count(),
            affected = self.affected.len(),
            "perception event done"
        );
        result
    }

    /// Drain, log any fault, and return whatever was achieved.
    pub fn fire<S, R>(mut self, world: &mut World, sink: &mut S, rng: &mut R) -> PerceptionReport
    where
        S: PerceptionSink + ?Sized,
        R: Rng + ?Sized,
    {
        if let Err(err) = self.drain(world, sink, rng) {
            warn!(
                kind = self.kind.name(),
                origin = %self.origin,
                error = %err,
                "perception event abandoned"
            );
        }
        self.report()
    }

    fn drain_frontier<S, R>(
        &mut self,
        world: &mut World,
        sink: &mut S,
        rng: &mut R,
    ) -> PerceptionResult<()>
    where
        S: PerceptionSink + ?Sized,
        R: Rng + ?Sized,
    {
        while let Some((room, strength)) = self.frontier.advance() {
            trace!(room = %room, strength, "visiting room");
            match self.kind {
                EventKind::Flood => flood::visit(self, world, sink, rng, room, strength)?,
                EventKind::Area { .. } => area::visit(self, world, sink, rng, room, strength)?,
                _ => radiate(self, world, sink, rng, room, strength)?,
            }
        }
        Ok(())
    }

    /// The movement destination, which is perceived whatever its strength.
    pub(crate) fn forced_room(&self) -> Option<RoomId> {
        self.kind.movement().map(|m| m.destination)
    }

    /// Phrase and deliver the event to every eligible occupant of `room_id`.
    pub(crate) fn deliver_room<S, R>(
        &mut self,
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
        let room = world.room(room_id)?;
        let hook = self.channel().hook_name();

        for &occupant in &room.occupants {
            if self.excluded.contains(&occupant) {
                continue;
            }
            let listener = world.character(occupant)?;
            if let Some(text) = self.phrase(world, room_id, listener, strength, rng)? {
                deliver_to(sink, listener, hook, &text);
                self.affected.push(occupant);
            }
        }
        Ok(())
    }

    /// The text `listener` in `room_id` perceives at `strength`, if any.
    fn phrase<R: Rng + ?Sized>(
        &self,
        world: &World,
        room_id: RoomId,
        listener: &Character,
        strength: f64,
        rng: &mut R,
    ) -> PerceptionResult<Option<String>> {
        let text = match &self.kind {
            EventKind::Sound | EventKind::Visual | EventKind::Flood => self
                .descriptions
                .select(strength, &self.config)
                .map(str::to_string),
            EventKind::Speech(speech) => Some(speech::phrase(
                speech, self, world, room_id, listener, strength, rng,
            )?),
            EventKind::MovementSound(m) | EventKind::MovementVisual(m) => Some(movement::phrase(
                m,
                self.channel(),
                self,
                world,
                room_id,
                listener,
                strength,
            )?),
            EventKind::Area { message } => Some(message.clone()),
        };
        Ok(text)
    }
}
