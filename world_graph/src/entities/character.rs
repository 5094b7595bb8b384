//! Character definitions.

use serde::{Deserialize, Serialize};

use super::{Controller, EntityId, Gender};

/// A character as seen by the perception engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub id: EntityId,
    pub name: String,
    pub gender: Gender,
    pub controller: Controller,
}

impl Character {
    /// Create a new non-player character with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            gender: Gender::default(),
            controller: Controller::NonPlayer,
        }
    }

    /// Create a new player-controlled character.
    pub fn player(name: impl Into<String>) -> Self {
        Self::new(name).with_controller(Controller::Player)
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    pub fn with_controller(mut self, controller: Controller) -> Self {
        self.controller = controller;
        self
    }

    /// Check if a connected player drives this character.
    pub fn is_player(&self) -> bool {
        self.controller == Controller::Player
    }

    /// Case-insensitive name comparison used for disambiguation.
    pub fn shares_name_with(&self, other: &Character) -> bool {
        self.name.eq_ignore_ascii_case(&other.name)
    }
}
