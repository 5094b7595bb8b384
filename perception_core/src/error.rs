//! Errors surfaced by a drain.

use thiserror::Error;
use world_graph::WorldError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PerceptionError {
    /// A room, portal or character handle did not resolve mid-drain.
    #[error(transparent)]
    World(#[from] WorldError),

    #[error("event has already been drained")]
    AlreadyDrained,
}

pub type PerceptionResult<T> = Result<T, PerceptionError>;
