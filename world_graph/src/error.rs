//! Errors raised when a handle does not resolve inside the world arena.

use thiserror::Error;

use crate::entities::EntityId;
use crate::world::{PortalId, RoomId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    #[error("room {0} does not exist")]
    UnknownRoom(RoomId),

    #[error("portal {0} does not exist")]
    UnknownPortal(PortalId),

    #[error("character {0} does not exist")]
    UnknownCharacter(EntityId),

    #[error("portal {portal} is not attached to room {room}")]
    DanglingPortal { portal: PortalId, room: RoomId },
}

pub type WorldResult<T> = Result<T, WorldError>;
