//! # World Graph
//!
//! The location graph the perception engine propagates through: rooms joined by
//! portals, the characters standing in them, and the integer geometry used to
//! measure distance and direction between rooms.
//!
//! This crate holds world data only. It does not decide who perceives what.

pub mod channel;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod world;

pub use channel::*;
pub use entities::*;
pub use error::*;
pub use geometry::*;
pub use world::*;
