//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame-stepped, single-threaded
//! - Seeded RNG only
//! - No rendering or platform dependencies; the windowing shell feeds key and
//!   cursor events in and drains [`GameEvent`]s out

pub mod components;
pub mod hull;
pub mod input;
pub mod physics;
pub mod registry;
pub mod spawn;
pub mod world;

pub use components::{Collision, Color, DeathTimer, LightUp, Motion};
pub use hull::HullKind;
pub use input::{Key, KeyAction, Modifiers};
pub use registry::Registry;
pub use world::{GameEvent, GamePhase, GameWorld};
