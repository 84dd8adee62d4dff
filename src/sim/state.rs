//! Game state and core simulation types
//!
//! One [`GameState`] owns everything the state machine mutates.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::spikes::{SpikeField, SpikeSide};
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting at the origin for the first flap
    Idle,
    /// Bouncing between the walls
    Flying,
    /// Dead, tumbling off the bottom of the screen
    GameOver,
    /// Waiting for both spike walls to retreat before starting over
    Resetting,
}

/// Direction the player sprite faces
///
/// A `Left`-facing player travels toward +x.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    Left,
    Right,
}

impl Facing {
    /// Sign applied to horizontal speed
    #[inline]
    pub fn travel_sign(self) -> f32 {
        match self {
            Facing::Left => 1.0,
            Facing::Right => -1.0,
        }
    }

    /// Wall the player is heading for
    pub fn approached_wall(self) -> SpikeSide {
        match self {
            Facing::Left => SpikeSide::Right,
            Facing::Right => SpikeSide::Left,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }
}

/// The player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerBody {
    /// World position; y is driven by the physics service
    pub position: Vec2,
    pub facing: Facing,
    /// Horizontal speed magnitude
    pub speed: f32,
    pub alive: bool,
}

impl Default for PlayerBody {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            facing: Facing::Left,
            speed: 0.0,
            alive: true,
        }
    }
}

/// Cosmetic player state handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerAppearance {
    /// Roll in radians (tumble after death)
    pub rotation: f32,
    /// Opacity, 0..=1
    pub alpha: f32,
    /// Sprite drawn mirrored (toggles on every bounce)
    pub mirrored: bool,
    /// Flap frame shown while the flap key is held
    pub flap_frame: bool,
}

impl Default for PlayerAppearance {
    fn default() -> Self {
        Self {
            rotation: 0.0,
            alpha: 1.0,
            mirrored: false,
            flap_frame: false,
        }
    }
}

/// Something the host should react to after a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// First flap of a run; the score display restarts at zero
    Launched,
    /// An accepted flap
    Flapped,
    /// A wall set drew a fresh subset
    SpikesGenerated { side: SpikeSide, count: usize },
    /// Bounced off a wall
    WallBounce { side: SpikeSide, score: u32 },
    /// Left the field vertically
    KilledByZone,
    /// Touched a deployed spike
    KilledBySpike { side: SpikeSide, slot: u8 },
    /// Fell past the death depth; spikes are retreating
    ResetStarted,
    /// Back to Idle
    Reset,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub score: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: PlayerBody,
    pub appearance: PlayerAppearance,
    pub spikes: SpikeField,
    /// Events raised since the host last drained them
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with the given seed and default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let spikes = SpikeField::new(tuning.spike_home_x);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            phase: GamePhase::Idle,
            score: 0,
            time_ticks: 0,
            player: PlayerBody::default(),
            appearance: PlayerAppearance::default(),
            spikes,
            events: Vec::new(),
        }
    }

    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Wall the player is heading for
    pub fn approaching_side(&self) -> SpikeSide {
        self.player.facing.approached_wall()
    }

    /// Player collision box
    pub fn player_bounds(&self) -> Aabb {
        Aabb::new(self.player.position, self.tuning.player_half_extents())
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
