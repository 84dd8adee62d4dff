//! Gameplay simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering,
//! audio and platform code:
//! - Seeded RNG only
//! - `tick` is the single mutator of `GameState`
//! - Physics and collision are reached only through the `Physics` trait

pub mod collision;
pub mod generator;
pub mod spikes;
pub mod state;
pub mod tick;

pub use collision::{Aabb, hits_kill_zone, hits_wall, spike_box};
pub use generator::{choose_subset, interpolate};
pub use spikes::{ActiveSpikeSet, SpikeField, SpikeSide, SpikeSlot};
pub use state::{Facing, GameEvent, GamePhase, GameState, PlayerAppearance, PlayerBody};
pub use tick::{TickInput, tick};
