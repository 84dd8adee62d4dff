//! Data-driven game balance
//!
//! Every gameplay constant the state machine reads lives in [`Tuning`]. The
//! defaults give the classic arcade feel; a JSON file can override any
//! subset of fields.

use std::fmt;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// How many slot draws a spike generation makes for a given score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DifficultyCurve {
    /// Draw count is uniform in `min_draws..=max_draws` regardless of score
    Flat { min_draws: u32, max_draws: u32 },
    /// One extra draw per `points_per_step` points, capped at `max_draws`
    Stepped {
        min_draws: u32,
        max_draws: u32,
        points_per_step: u32,
    },
}

impl Default for DifficultyCurve {
    fn default() -> Self {
        // Two to four draws, independent of score
        DifficultyCurve::Flat {
            min_draws: 2,
            max_draws: 4,
        }
    }
}

impl DifficultyCurve {
    /// Inclusive draw-count range for the given score
    pub fn draw_range(&self, score: u32) -> (u32, u32) {
        match *self {
            DifficultyCurve::Flat {
                min_draws,
                max_draws,
            } => (min_draws, max_draws),
            DifficultyCurve::Stepped {
                min_draws,
                max_draws,
                points_per_step,
            } => {
                let bonus = score / points_per_step.max(1);
                let low = min_draws.saturating_add(bonus).min(max_draws);
                (low, max_draws)
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let (min_draws, max_draws) = match *self {
            DifficultyCurve::Flat {
                min_draws,
                max_draws,
            } => (min_draws, max_draws),
            DifficultyCurve::Stepped {
                min_draws,
                max_draws,
                points_per_step,
            } => {
                if points_per_step == 0 {
                    return Err(ConfigError::Invalid {
                        field: "difficulty.points_per_step",
                        reason: "must be at least 1",
                    });
                }
                (min_draws, max_draws)
            }
        };
        if min_draws == 0 {
            return Err(ConfigError::Invalid {
                field: "difficulty.min_draws",
                reason: "must be at least 1",
            });
        }
        if max_draws < min_draws {
            return Err(ConfigError::Invalid {
                field: "difficulty.max_draws",
                reason: "must not be below min_draws",
            });
        }
        Ok(())
    }
}

/// Gameplay constants (units are world units and seconds)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Collision box (width, height)
    pub player_size: Vec2,
    /// Horizontal speed set on launch
    pub launch_speed: f32,
    /// Horizontal speed gained per second while launched
    pub speed_drift: f32,
    /// Vertical velocity override applied before each flap impulse
    pub flap_velocity: f32,
    /// Upward impulse per flap
    pub flap_impulse: f32,
    /// Gravity handed to the physics service
    pub gravity: f32,

    // === Arena ===
    /// Kill zone bounds (bottom, top)
    pub kill_zone: (f32, f32),
    /// |x| at which the player bounces
    pub wall_x: f32,
    /// |x| of a retreated spike set
    pub spike_home_x: f32,
    /// |x| of a deployed spike set
    pub spike_deployed_x: f32,

    // === Spikes ===
    /// Slide rate toward the current target
    pub interp_rate: f32,
    /// Slot draw count per generation
    pub difficulty: DifficultyCurve,

    // === Death and reset ===
    /// Radians added per tick while tumbling
    pub tumble_step: f32,
    /// Alpha lost per second while dead
    pub fade_rate: f32,
    /// Minimum alpha for a flap to register
    pub flap_alpha_min: f32,
    /// y below which the dead player starts the reset
    pub death_depth: f32,
    /// Distance from home that counts as retreated
    pub reset_epsilon: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            launch_speed: LAUNCH_SPEED,
            speed_drift: SPEED_DRIFT,
            flap_velocity: FLAP_VELOCITY,
            flap_impulse: FLAP_IMPULSE,
            gravity: GRAVITY,

            kill_zone: (KILL_ZONE_BOTTOM, KILL_ZONE_TOP),
            wall_x: WALL_X,
            spike_home_x: SPIKE_HOME_X,
            spike_deployed_x: SPIKE_DEPLOYED_X,

            interp_rate: INTERP_RATE,
            difficulty: DifficultyCurve::default(),

            tumble_step: TUMBLE_STEP_DEG.to_radians(),
            fade_rate: FADE_RATE,
            flap_alpha_min: FLAP_ALPHA_MIN,
            death_depth: DEATH_DEPTH,
            reset_epsilon: RESET_EPSILON,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON; missing fields keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json).map_err(ConfigError::Parse)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        let tuning = Self::from_json_str(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values the state machine cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: "must be a positive number",
                })
            }
        }

        positive("player_size.x", self.player_size.x)?;
        positive("player_size.y", self.player_size.y)?;
        positive("launch_speed", self.launch_speed)?;
        positive("interp_rate", self.interp_rate)?;
        positive("wall_x", self.wall_x)?;
        positive("reset_epsilon", self.reset_epsilon)?;

        if !(self.speed_drift.is_finite() && self.speed_drift >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "speed_drift",
                reason: "must be zero or positive",
            });
        }
        if self.kill_zone.0 >= self.kill_zone.1 {
            return Err(ConfigError::Invalid {
                field: "kill_zone",
                reason: "bottom must be below top",
            });
        }
        if self.spike_deployed_x >= self.spike_home_x {
            return Err(ConfigError::Invalid {
                field: "spike_deployed_x",
                reason: "must be closer to the field than spike_home_x",
            });
        }
        if self.death_depth >= self.kill_zone.0 {
            return Err(ConfigError::Invalid {
                field: "death_depth",
                reason: "must be below the kill zone",
            });
        }
        if !(0.0..=1.0).contains(&self.flap_alpha_min) {
            return Err(ConfigError::Invalid {
                field: "flap_alpha_min",
                reason: "must be within 0..=1",
            });
        }
        self.difficulty.validate()
    }

    /// Half extents of the player box
    pub fn player_half_extents(&self) -> Vec2 {
        self.player_size * 0.5
    }
}

/// Failure to load a [`Tuning`]
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read tuning file: {err}"),
            Self::Parse(err) => write!(f, "malformed tuning JSON: {err}"),
            Self::Invalid { field, reason } => write!(f, "invalid tuning `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Invalid { .. } => None,
        }
    }
}
