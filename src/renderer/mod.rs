//! Rendering hand-off
//!
//! The simulation never draws. Each frame the host captures the numeric
//! transforms of the player and every spike and pushes them to a [`SceneSink`].

pub mod frame;

pub use frame::{Frame, PlayerPose, SceneSink, SpikeInstance};
