//! Speech: sound that carries words.

use rand::Rng;
use serde::{Deserialize, Serialize};
use world_graph::{Character, EntityId, Gender, RoomId, World};

use crate::error::PerceptionResult;
use crate::event::Event;
use crate::phrasing::{garble, terminate_sentence};

/// Who said what, how loudly, and to whom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Speech {
    pub speaker: EntityId,
    pub message: String,
    pub shouted: bool,
    pub addressee: Option<EntityId>,
}

impl Speech {
    pub fn new(speaker: EntityId, message: impl Into<String>) -> Self {
        Self {
            speaker,
            message: message.into(),
            shouted: false,
            addressee: None,
        }
    }

    pub fn shouted(mut self) -> Self {
        self.shouted = true;
        self
    }

    pub fn to(mut self, addressee: EntityId) -> Self {
        self.addressee = Some(addressee);
        self
    }

    fn noise(&self) -> &'static str {
        if self.shouted {
            "shout"
        } else {
            "mutter"
        }
    }

    fn verb(&self) -> &'static str {
        if self.shouted {
            "shouts"
        } else {
            "says"
        }
    }
}

/// Phrase `speech` for `listener` standing in `room_id`.
pub(crate) fn phrase<R: Rng + ?Sized>(
    speech: &Speech,
    event: &Event,
    world: &World,
    room_id: RoomId,
    listener: &Character,
    strength: f64,
    rng: &mut R,
) -> PerceptionResult<String> {
    let config = &event.config;

    if strength >= config.speech_verbatim {
        return verbatim(speech, world, room_id, listener);
    }

    let listener_position = world.room(room_id)?.position;
    let origin_position = world.room(event.origin)?.position;
    let direction = (origin_position - listener_position).direction();

    if strength >= config.speech_garbled {
        let heard = garble(&speech.message, strength, config, rng);
        let text = match (direction, heard.surviving_words) {
            (Some(d), 0) => format!(
                "Someone {} something {}, but you cannot make out a word of it.",
                speech.verb(),
                d.from_phrase()
            ),
            (None, 0) => format!(
                "Someone nearby {} something, but you cannot make out a word of it.",
                speech.verb()
            ),
            (Some(d), _) => format!(
                "Someone {} {}, \"{}\"",
                speech.verb(),
                d.from_phrase(),
                heard.text
            ),
            (None, _) => format!("Someone nearby {}, \"{}\"", speech.verb(), heard.text),
        };
        return Ok(text);
    }

    let floor = match world.character(speech.speaker)?.gender {
        Gender::Female => config.speech_floor_female,
        Gender::Male | Gender::Neuter => config.speech_floor_male,
    };
    match direction {
        Some(d) if strength >= floor => Ok(format!(
            "You hear a distant {} {}.",
            speech.noise(),
            d.from_phrase()
        )),
        _ => Ok(format!("You hear a distant {}.", speech.noise())),
    }
}

fn verbatim(
    speech: &Speech,
    world: &World,
    room_id: RoomId,
    listener: &Character,
) -> PerceptionResult<String> {
    let name = world.display_name(speech.speaker, room_id)?;
    let line = terminate_sentence(&speech.message, speech.shouted);
    let question = line.ends_with('?');

    let addressee = match speech.addressee {
        Some(id) if id == listener.id => Some("you".to_string()),
        Some(id) => Some(world.display_name(id, room_id)?),
        None => None,
    };

    let attribution = match (speech.shouted, question, addressee) {
        (true, _, Some(to)) => format!("shouts to {}", to),
        (true, _, None) => "shouts".to_string(),
        (false, true, Some(to)) => format!("asks {}", to),
        (false, true, None) => "asks".to_string(),
        (false, false, Some(to)) => format!("says to {}", to),
        (false, false, None) => "says".to_string(),
    };
    Ok(format!("{} {}, \"{}\"", name, attribution, line))
}
