//! Characters that occupy rooms and perceive events.

mod character;

pub use character::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    /// Create a new random entity ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an entity ID from a specific UUID.
    /// Create a nil/empty entity ID.
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Gender drives pronoun-free nouns and how far a voice carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Gender {
    Male,
    Female,
    #[default]
    Neuter,
}

impl Gender {
    /// Generic noun with its article, for when a face can't be made out.
    pub fn noun(&self) -> &'static str {
        match self {
            Gender::Male => "a man",
            Gender::Female => "a woman",
            Gender::Neuter => "a person",
        }
    }
}

/// Who is driving a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Controller {
    /// Connected player: receives text directly.
    Player,
    /// Scripted character: reacts through named hooks.
    #[default]
    NonPlayer,
}
