//! Per-frame transforms for the scene

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{GameState, SpikeSide};

/// Where to draw one spike
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpikeInstance {
    pub side: SpikeSide,
    pub slot: u8,
    pub position: Vec2,
}

/// Where and how to draw the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerPose {
    pub position: Vec2,
    pub rotation: f32,
    /// Horizontal scale sign (-1 when mirrored)
    pub scale_x: f32,
    pub alpha: f32,
    pub flap_frame: bool,
}

/// Receives transforms for visual instances
pub trait SceneSink {
    fn place_spike(&mut self, spike: &SpikeInstance);
    fn place_player(&mut self, pose: &PlayerPose);
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub player: PlayerPose,
    pub spikes: Vec<SpikeInstance>,
}

impl Frame {
    /// Snapshot the drawable state
    ///
    /// Wall slots outside the current active set are parked at home.
    pub fn capture(state: &GameState) -> Self {
        let home = state.tuning.spike_home_x;
        let mut spikes = Vec::with_capacity(30);

        for side in [SpikeSide::Left, SpikeSide::Right] {
            let set = state.spikes.set(side);
            for slot in state.spikes.slots(side) {
                let x = if set.contains(slot.index) {
                    set.shared_x_offset
                } else {
                    side.x_sign() * home
                };
                spikes.push(SpikeInstance {
                    side,
                    slot: slot.index,
                    position: slot.position(x),
                });
            }
        }

        for side in [SpikeSide::Top, SpikeSide::Bottom] {
            for slot in state.spikes.slots(side) {
                spikes.push(SpikeInstance {
                    side,
                    slot: slot.index,
                    position: slot.position(0.0),
                });
            }
        }

        let appearance = &state.appearance;
        let player = PlayerPose {
            position: state.player.position,
            rotation: appearance.rotation,
            scale_x: if appearance.mirrored { -1.0 } else { 1.0 },
            alpha: appearance.alpha,
            flap_frame: appearance.flap_frame,
        };

        Self { player, spikes }
    }

    /// Push every transform into the sink
    pub fn submit(&self, sink: &mut dyn SceneSink) {
        for spike in &self.spikes {
            sink.place_spike(spike);
        }
        sink.place_player(&self.player);
    }
}
