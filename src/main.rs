//! Spike Bounce headless runner
//!
//! Plays the game with a simple altitude-holding autopilot at a fixed frame
//! rate and prints a JSON summary of the runs.
//!
//! Usage: `spike-bounce [--tuning FILE] [--seed N] [--seconds N] [--volume V] [--mute]`

use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;

use spike_bounce::audio::{AudioManager, SoundCue};
use spike_bounce::consts::SIM_DT;
use spike_bounce::platform::BallisticPhysics;
use spike_bounce::renderer::{PlayerPose, SceneSink, SpikeInstance};
use spike_bounce::sim::{GamePhase, GameState};
use spike_bounce::ui::ScoreText;
use spike_bounce::{Host, Tuning};

/// Flap when the player is falling below this height
const AUTOPILOT_FLOOR: f32 = -40.0;
/// Ticks to wait in Idle before relaunching
const RELAUNCH_DELAY: u32 = 60;

#[derive(Parser, Debug)]
#[command(name = "spike-bounce")]
#[command(about = "Headless Spike Bounce runner with an altitude-holding autopilot")]
struct Cli {
    /// JSON tuning file; missing fields keep their defaults
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// RNG seed for spike generation
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Simulated seconds to play
    #[arg(long, default_value_t = 60.0)]
    seconds: f32,
    /// Master volume for sound cues (0.0 - 1.0)
    #[arg(long, default_value_t = 0.8)]
    volume: f32,
    /// Drop all sound cues
    #[arg(long)]
    mute: bool,
}

/// Tracks how far the spike walls reach into the field
#[derive(Default)]
struct SceneStats {
    frames: u64,
    deepest_spike_x: f32,
}

impl SceneSink for SceneStats {
    fn place_spike(&mut self, spike: &SpikeInstance) {
        if spike.side.is_vertical() {
            let reach = spike.position.x.abs();
            if self.deepest_spike_x == 0.0 || reach < self.deepest_spike_x {
                self.deepest_spike_x = reach;
            }
        }
    }

    fn place_player(&mut self, _pose: &PlayerPose) {
        self.frames += 1;
    }
}

#[derive(Debug, Serialize)]
struct RunSummary {
    seed: u64,
    seconds: f32,
    runs: u32,
    best_score: u32,
    scores: Vec<u32>,
    flap_cues: usize,
    frames_rendered: u64,
    deepest_spike_x: f32,
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let tuning = match &cli.tuning {
        Some(path) => match Tuning::load(path) {
            Ok(tuning) => tuning,
            Err(err) => {
                log::error!("{err}");
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };

    log::info!("Spike Bounce (headless) starting with seed {}", cli.seed);

    let physics = BallisticPhysics::new(tuning.gravity);
    let state = GameState::with_tuning(cli.seed, tuning);
    let mut audio = AudioManager::new();
    audio.set_master_volume(cli.volume);
    audio.set_muted(cli.mute);
    let mut host = Host::new(state, physics, audio, ScoreText::default());
    let mut scene = SceneStats::default();

    let total_ticks = (cli.seconds / SIM_DT) as u32;
    let mut idle_ticks = 0;
    let mut scores = Vec::new();
    let mut last_phase = host.state.phase;

    for _ in 0..total_ticks {
        match host.state.phase {
            GamePhase::Idle => {
                idle_ticks += 1;
                if idle_ticks >= RELAUNCH_DELAY {
                    host.input.press();
                    idle_ticks = 0;
                }
            }
            GamePhase::Flying => {
                let falling = host.physics.velocity().y < 0.0;
                if falling && host.state.player.position.y < AUTOPILOT_FLOOR {
                    host.input.press();
                } else {
                    host.input.release();
                }
            }
            _ => host.input.release(),
        }

        host.update(SIM_DT);
        host.render(&mut scene);

        if host.state.phase == GamePhase::GameOver && last_phase != GamePhase::GameOver {
            scores.push(host.state.score);
        }
        last_phase = host.state.phase;
    }

    let summary = RunSummary {
        seed: cli.seed,
        seconds: cli.seconds,
        runs: scores.len() as u32,
        best_score: scores.iter().copied().max().unwrap_or(0),
        scores,
        flap_cues: host
            .audio
            .played()
            .iter()
            .filter(|c| **c == SoundCue::Flap)
            .count(),
        frames_rendered: scene.frames,
        deepest_spike_x: scene.deepest_spike_x,
    };

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("Failed to encode summary: {err}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser hosts drive `Host` directly
}
