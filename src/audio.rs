//! Audio cue sink
//!
//! The simulation only decides which cue fires; mixing and playback belong
//! to whatever implements [`AudioSink`].

use serde::{Deserialize, Serialize};

use crate::sim::GameEvent;

/// Sound cues the game can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    /// Wing flap
    Flap,
    /// Player bounced off a wall
    WallHit,
    /// Player died
    GameOver,
}

impl SoundCue {
    /// Cue for a game event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Flapped => Some(SoundCue::Flap),
            GameEvent::WallBounce { .. } => Some(SoundCue::WallHit),
            GameEvent::KilledByZone | GameEvent::KilledBySpike { .. } => Some(SoundCue::GameOver),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SoundCue::Flap => "flap",
            SoundCue::WallHit => "wall_hit",
            SoundCue::GameOver => "game_over",
        }
    }
}

/// Fire-and-forget cue playback
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);
}

/// Volume-aware sink that logs cues instead of producing sound
#[derive(Debug, Clone)]
pub struct AudioManager {
    master_volume: f32,
    muted: bool,
    played: Vec<SoundCue>,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            muted: false,
            played: Vec::new(),
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume
        }
    }

    /// Cues that were audible, oldest first
    pub fn played(&self) -> &[SoundCue] {
        &self.played
    }
}

impl AudioSink for AudioManager {
    fn play(&mut self, cue: SoundCue) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        log::debug!("play {} at {:.2}", cue.as_str(), vol);
        self.played.push(cue);
    }
}
