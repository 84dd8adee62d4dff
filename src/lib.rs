//! Spike Bounce - a wall-bouncing, spike-dodging arcade game
//!
//! Core modules:
//! - `sim`: Gameplay state machine (motion, spikes, scoring, reset cycle)
//! - `tuning`: Data-driven game balance
//! - `platform`: Input latch and the physics/collision service contract
//! - `audio`, `ui`, `renderer`: Fire-and-forget sinks the host feeds from game events
//! - `host`: Frame driver that ties the simulation to its collaborators

pub mod audio;
pub mod host;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use host::Host;
pub use tuning::{ConfigError, DifficultyCurve, Tuning};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Player collision box
    pub const PLAYER_WIDTH: f32 = 60.0;
    pub const PLAYER_HEIGHT: f32 = 98.0;

    /// Kill zone: the player's box may not cross these y bounds
    pub const KILL_ZONE_TOP: f32 = 250.0;
    pub const KILL_ZONE_BOTTOM: f32 = -250.0;

    /// x at which the player bounces off a wall (mirrored for the left wall)
    pub const WALL_X: f32 = 296.0;

    /// Spike x offsets for the right side (mirrored for the left side)
    pub const SPIKE_HOME_X: f32 = 400.0;
    pub const SPIKE_DEPLOYED_X: f32 = 333.0;

    /// Vertical side layout: y = origin + i * spacing
    pub const SPIKES_PER_SIDE: usize = 5;
    pub const SIDE_SLOT_ORIGIN: f32 = -170.0;
    pub const SIDE_SLOT_SPACING: f32 = 84.0;

    /// Decorative top/bottom rows: x = origin + i * spacing, at y = ±ROW_Y
    pub const SPIKES_PER_ROW: usize = 10;
    pub const ROW_SLOT_ORIGIN: f32 = -382.0;
    pub const ROW_SLOT_SPACING: f32 = 76.0;
    pub const ROW_Y: f32 = 284.0;

    /// Spike triangle circumradius and its vertical stretch
    pub const SPIKE_RADIUS: f32 = 35.0;
    pub const SPIKE_STRETCH: f32 = 1.1;

    /// Below this y a dead player has fallen off-screen
    pub const DEATH_DEPTH: f32 = -1000.0;
    /// How close a retreating set must be to home before the reset completes
    pub const RESET_EPSILON: f32 = 1.0;

    /// Vertical physics (units/s and units/s²)
    pub const GRAVITY: f32 = -1350.0;
    pub const FLAP_VELOCITY: f32 = 1.0;
    pub const FLAP_IMPULSE: f32 = 400.0;

    /// Horizontal motion
    pub const LAUNCH_SPEED: f32 = 225.0;
    /// Permanent speed gain per second of flight
    pub const SPEED_DRIFT: f32 = 1.0;

    /// Spike slide rate (fraction of remaining distance per second)
    pub const INTERP_RATE: f32 = 10.0;

    /// Death animation
    pub const TUMBLE_STEP_DEG: f32 = 6.0;
    pub const FADE_RATE: f32 = 1.0;
    /// Flaps are ignored while the player is fainter than this
    pub const FLAP_ALPHA_MIN: f32 = 0.9;
}
