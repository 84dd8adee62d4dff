//! Platform abstraction layer
//!
//! Handles the host-facing seams of the simulation:
//! - Input events (latched into per-tick commands)
//! - Vertical physics and the collision oracle

pub mod input;
pub mod physics;

pub use input::InputLatch;
pub use physics::{BallisticPhysics, Physics};
