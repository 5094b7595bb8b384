//! # Perception Core
//!
//! Carries perceptible happenings (noises, sights, speech, footsteps, rising
//! water and region-wide announcements) outward from an origin room through
//! the `world_graph` arena, and tells each occupant what they perceived.
//!
//! ## Core Components
//!
//! - **event**: The event type, its lifecycle and the frontier drain
//! - **channels**: Per-channel attenuation, line of sight and phrasing
//! - **phrasing**: Strength-banded descriptions and speech garbling
//! - **delivery**: The sink that receives phrased text
//! - **config**: Tunable thresholds, loadable from TOML
//!
//! ## Design Philosophy
//!
//! - **Deterministic**: Randomness is injected, so a seeded drain always reads the same
//! - **Synchronous**: A drain runs to completion on the caller's thread
//! - **World-agnostic delivery**: Output goes through [`PerceptionSink`], never to a socket

pub mod channels;
pub mod config;
pub mod delivery;
pub mod error;
pub mod event;
pub mod phrasing;

pub use channels::*;
pub use config::*;
pub use delivery::*;
pub use error::*;
pub use event::*;
pub use phrasing::*;
