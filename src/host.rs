//! Frame driver
//!
//! Owns the game state together with its collaborators. Each display frame
//! it runs fixed-timestep ticks, then forwards the events those ticks raised
//! to the audio and score sinks.

use crate::audio::{AudioSink, SoundCue};
use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::platform::{InputLatch, Physics};
use crate::renderer::{Frame, SceneSink};
use crate::sim::{GameEvent, GamePhase, GameState, tick};
use crate::ui::ScoreDisplay;

/// Longest frame delta accepted before the simulation falls behind on purpose
pub const MAX_FRAME_DT: f32 = 0.1;

pub struct Host<P, A, S> {
    pub state: GameState,
    pub physics: P,
    pub input: InputLatch,
    pub audio: A,
    pub score_display: S,
    accumulator: f32,
    last_phase: GamePhase,
}

impl<P: Physics, A: AudioSink, S: ScoreDisplay> Host<P, A, S> {
    pub fn new(state: GameState, physics: P, audio: A, score_display: S) -> Self {
        let last_phase = state.phase;
        Self {
            state,
            physics,
            input: InputLatch::new(),
            audio,
            score_display,
            accumulator: 0.0,
            last_phase,
        }
    }

    /// Run as many fixed ticks as `frame_dt` covers; returns the tick count
    pub fn update(&mut self, frame_dt: f32) -> u32 {
        let dt = frame_dt.clamp(0.0, MAX_FRAME_DT);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            // Edges go to the first substep only; later ones see an empty latch
            let input = self.input.take();
            tick(&mut self.state, &input, SIM_DT, &mut self.physics);
            self.accumulator -= SIM_DT;
            substeps += 1;

            self.dispatch_events();
        }

        let phase = self.state.phase;
        if phase != self.last_phase {
            log::info!("Phase {:?} -> {:?}", self.last_phase, phase);
            self.last_phase = phase;
        }

        substeps
    }

    /// Push the current transforms to a renderer
    pub fn render(&self, sink: &mut dyn SceneSink) {
        Frame::capture(&self.state).submit(sink);
    }

    fn dispatch_events(&mut self) {
        for event in self.state.drain_events() {
            if let Some(cue) = SoundCue::for_event(&event) {
                self.audio.play(cue);
            }
            match event {
                GameEvent::Launched => self.score_display.set_text("0"),
                GameEvent::WallBounce { score, .. } => {
                    self.score_display.set_text(&score.to_string())
                }
                _ => {}
            }
        }
    }
}
