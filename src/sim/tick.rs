//! Per-frame simulation tick
//!
//! Drives the Idle → Flying → GameOver → Resetting → Idle cycle. `tick` is
//! the only code that mutates a [`GameState`].

use glam::Vec2;

use super::collision::{hits_kill_zone, hits_wall, spike_box};
use super::generator::{choose_subset, interpolate};
use super::spikes::SpikeSide;
use super::state::{GameEvent, GamePhase, GameState, PlayerAppearance, PlayerBody};
use crate::platform::Physics;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Flap key went down since the last tick
    pub flap: bool,
    /// Flap key went up since the last tick
    pub flap_released: bool,
}

/// Advance the game state by one frame of `dt` seconds
///
/// `dt` must not be negative. The caller is responsible for clamping long
/// frames.
pub fn tick<P: Physics + ?Sized>(
    state: &mut GameState,
    input: &TickInput,
    dt: f32,
    physics: &mut P,
) {
    assert!(dt >= 0.0, "tick called with negative dt ({dt})");
    state.time_ticks += 1;

    match state.phase {
        GamePhase::Idle => {
            if input.flap && can_flap(state) {
                launch(state, physics);
                flap(state, physics);
            }
            if input.flap_released {
                state.appearance.flap_frame = false;
            }
        }

        GamePhase::Flying => {
            if input.flap && can_flap(state) {
                flap(state, physics);
            }
            if input.flap_released {
                state.appearance.flap_frame = false;
            }
            fly(state, dt, physics);
        }

        GamePhase::GameOver => {
            advance(state, dt, physics);
            tumble(state, dt);

            if state.player.position.y < state.tuning.death_depth {
                log::debug!("Player off-screen, retreating spikes");
                state.phase = GamePhase::Resetting;
                state.events.push(GameEvent::ResetStarted);
            }
        }

        GamePhase::Resetting => {
            advance(state, dt, physics);
            tumble(state, dt);

            let home = state.tuning.spike_home_x;
            slide(state, SpikeSide::Left, -home, dt);
            slide(state, SpikeSide::Right, home, dt);

            let epsilon = state.tuning.reset_epsilon;
            if state.spikes.left.is_home(SpikeSide::Left, home, epsilon)
                && state.spikes.right.is_home(SpikeSide::Right, home, epsilon)
            {
                reset(state, physics);
            }
        }
    }
}

fn can_flap(state: &GameState) -> bool {
    state.appearance.alpha >= state.tuning.flap_alpha_min
}

/// First flap of a run
fn launch<P: Physics + ?Sized>(state: &mut GameState, physics: &mut P) {
    physics.attach(&state.player);
    state.player.speed = state.tuning.launch_speed;
    state.spikes.clear_generated();
    state.phase = GamePhase::Flying;
    state.events.push(GameEvent::Launched);
    log::info!("Launched (seed {})", state.seed);
}

fn flap<P: Physics + ?Sized>(state: &mut GameState, physics: &mut P) {
    state.appearance.flap_frame = true;
    physics.set_velocity(Vec2::new(0.0, state.tuning.flap_velocity));
    physics.apply_impulse(
        Vec2::new(0.0, state.tuning.flap_impulse),
        state.player.position,
    );
    state.events.push(GameEvent::Flapped);
}

/// Vertical motion from the physics service, horizontal drift from us
fn advance<P: Physics + ?Sized>(state: &mut GameState, dt: f32, physics: &mut P) {
    physics.integrate(&mut state.player, dt);

    let player = &mut state.player;
    player.position.x += player.speed * dt * player.facing.travel_sign();
    player.speed += state.tuning.speed_drift * dt;
}

fn fly<P: Physics + ?Sized>(state: &mut GameState, dt: f32, physics: &mut P) {
    advance(state, dt, physics);

    let size = state.tuning.player_size;
    if hits_kill_zone(state.player.position.y, size.y, state.tuning.kill_zone) {
        game_over(state, GameEvent::KilledByZone);
        return;
    }

    // One wall deploys while the other retreats
    let approaching = state.approaching_side();
    let retreating = approaching.opposite();
    refresh_spikes(state, approaching);
    let deployed_x = approaching.x_sign() * state.tuning.spike_deployed_x;
    let home_x = retreating.x_sign() * state.tuning.spike_home_x;
    slide(state, approaching, deployed_x, dt);
    slide(state, retreating, home_x, dt);

    if hits_wall(state.player.facing, state.player.position.x, state.tuning.wall_x) {
        state.player.facing = state.player.facing.flipped();
        state.score += 1;
        state.spikes.set_mut(retreating).generated_this_cycle = false;
        state.appearance.mirrored = !state.appearance.mirrored;
        state.events.push(GameEvent::WallBounce {
            side: approaching,
            score: state.score,
        });
        log::debug!("Bounced off {:?} wall, score {}", approaching, state.score);
    }

    // Check against the wall we were heading for this tick
    let player_box = state.player_bounds();
    let set = state.spikes.set(approaching);
    let hit = set
        .members
        .iter()
        .find(|slot| physics.intersects(&player_box, &spike_box(slot, set.shared_x_offset)))
        .map(|slot| slot.index);

    if let Some(slot) = hit {
        game_over(
            state,
            GameEvent::KilledBySpike {
                side: approaching,
                slot,
            },
        );
    }
}

/// Draw a fresh subset for `side` if it has not had one this bounce cycle
fn refresh_spikes(state: &mut GameState, side: SpikeSide) {
    if state.spikes.set(side).generated_this_cycle {
        return;
    }

    let curve = state.tuning.difficulty;
    let score = state.score;
    let indices = choose_subset(state.rng(), score, &curve);
    state.spikes.activate(side, &indices);

    log::debug!("{:?} spikes generated: {:?}", side, indices);
    state.events.push(GameEvent::SpikesGenerated {
        side,
        count: indices.len(),
    });
}

fn slide(state: &mut GameState, side: SpikeSide, target_x: f32, dt: f32) {
    let rate = state.tuning.interp_rate;
    let set = state.spikes.set_mut(side);
    set.shared_x_offset = interpolate(set.shared_x_offset, target_x, rate, dt);
}

fn game_over(state: &mut GameState, cause: GameEvent) {
    state.phase = GamePhase::GameOver;
    state.player.alive = false;
    state.appearance.flap_frame = false;
    log::info!("Game over ({:?}) with score {}", cause, state.score);
    state.events.push(cause);
}

/// Death animation: spin and fade
fn tumble(state: &mut GameState, dt: f32) {
    let appearance = &mut state.appearance;
    appearance.rotation += state.tuning.tumble_step;
    appearance.alpha = (appearance.alpha - state.tuning.fade_rate * dt).max(0.0);
}

fn reset<P: Physics + ?Sized>(state: &mut GameState, physics: &mut P) {
    physics.detach();
    state.player = PlayerBody::default();
    state.appearance = PlayerAppearance::default();
    state.score = 0;
    state.phase = GamePhase::Idle;
    state.events.push(GameEvent::Reset);
    log::info!("Reset to idle");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::platform::BallisticPhysics;
    use crate::sim::collision::Aabb;
    use crate::sim::state::Facing;
    use proptest::prelude::*;

    /// Holds the player at its current altitude; spikes only hit when `solid`
    #[derive(Debug, Default)]
    struct HoverPhysics {
        attached: bool,
        impulses: u32,
        solid: bool,
    }

    impl Physics for HoverPhysics {
        fn attach(&mut self, _body: &PlayerBody) {
            self.attached = true;
        }
        fn detach(&mut self) {
            self.attached = false;
        }
        fn set_velocity(&mut self, _velocity: Vec2) {}
        fn apply_impulse(&mut self, _impulse: Vec2, _at: Vec2) {
            self.impulses += 1;
        }
        fn integrate(&mut self, _body: &mut PlayerBody, _dt: f32) {}
        fn intersects(&self, a: &Aabb, b: &Aabb) -> bool {
            self.solid && a.overlaps(b)
        }
    }

    fn flap_input() -> TickInput {
        TickInput {
            flap: true,
            ..Default::default()
        }
    }

    fn launched(seed: u64, physics: &mut HoverPhysics) -> GameState {
        let mut state = GameState::new(seed);
        tick(&mut state, &flap_input(), SIM_DT, physics);
        state
    }

    #[test]
    fn test_idle_stays_idle_without_flap() {
        let mut state = GameState::new(1);
        let mut physics = HoverPhysics::default();
        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), SIM_DT, &mut physics);
        }
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.player.position, Vec2::ZERO);
        assert_eq!(state.player.speed, 0.0);
        assert!(!physics.attached);
    }

    #[test]
    fn test_flap_launches() {
        let mut physics = HoverPhysics::default();
        let mut state = GameState::new(1);
        state.spikes.left.generated_this_cycle = true;
        tick(&mut state, &flap_input(), SIM_DT, &mut physics);

        assert_eq!(state.phase, GamePhase::Flying);
        assert_eq!(state.player.speed, state.tuning.launch_speed);
        assert!(!state.spikes.left.generated_this_cycle);
        assert!(!state.spikes.right.generated_this_cycle);
        assert!(physics.attached);
        assert_eq!(physics.impulses, 1);
        assert!(state.appearance.flap_frame);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::Launched, GameEvent::Flapped]
        );
    }

    #[test]
    fn test_faded_player_cannot_launch() {
        let mut physics = HoverPhysics::default();
        let mut state = GameState::new(1);
        state.appearance.alpha = 0.5;
        tick(&mut state, &flap_input(), SIM_DT, &mut physics);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(physics.impulses, 0);
    }

    #[test]
    fn test_release_restores_frame() {
        let mut physics = HoverPhysics::default();
        let mut state = launched(1, &mut physics);
        assert!(state.appearance.flap_frame);
        let release = TickInput {
            flap_released: true,
            ..Default::default()
        };
        tick(&mut state, &release, SIM_DT, &mut physics);
        assert!(!state.appearance.flap_frame);
    }

    #[test]
    fn test_flying_moves_and_drifts() {
        let mut physics = HoverPhysics::default();
        let mut state = launched(1, &mut physics);
        tick(&mut state, &TickInput::default(), SIM_DT, &mut physics);

        let expected_x = state.tuning.launch_speed * SIM_DT;
        assert!((state.player.position.x - expected_x).abs() < 1e-4);
        assert!(state.player.speed > state.tuning.launch_speed);
    }

    #[test]
    fn test_kill_zone_ends_flight() {
        let mut physics = HoverPhysics::default();
        let mut state = launched(1, &mut physics);
        state.player.position.y = 202.0;
        tick(&mut state, &TickInput::default(), SIM_DT, &mut physics);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(!state.player.alive);
        assert!(state.events.contains(&GameEvent::KilledByZone));

        let mut state = launched(1, &mut physics);
        state.player.position.y = 200.0;
        tick(&mut state, &TickInput::default(), SIM_DT, &mut physics);
        assert_eq!(state.phase, GamePhase::Flying);
    }

    #[test]
    fn test_generation_happens_once_per_cycle() {
        let mut physics = HoverPhysics::default();
        let mut state = launched(5, &mut physics);
        tick(&mut state, &TickInput::default(), SIM_DT, &mut physics);

        assert!(state.spikes.right.generated_this_cycle);
        assert!(!state.spikes.left.generated_this_cycle);
        let members = state.spikes.right.members.clone();
        let mut offset = state.spikes.right.shared_x_offset;

        for _ in 0..60 {
            tick(&mut state, &TickInput::default(), SIM_DT, &mut physics);
            assert_eq!(state.spikes.right.members, members);
            // Deploying: offset only moves toward the field
            assert!(state.spikes.right.shared_x_offset < offset);
            offset = state.spikes.right.shared_x_offset;
        }
        let generations = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::SpikesGenerated { .. }))
            .count();
        assert_eq!(generations, 1);
    }

    #[test]
    fn test_bounce_threshold() {
        let mut physics = HoverPhysics::default();
        let mut state = launched(1, &mut physics);
        state.player.position.x = 290.0;
        tick(&mut state, &TickInput::default(), SIM_DT, &mut physics);
        assert_eq!(state.score, 0);

        // 295 + 225/120 crosses 296
        state.player.position.x = 295.0;
        tick(&mut state, &TickInput::default(), SIM_DT, &mut physics);
        assert_eq!(state.score, 1);
        assert_eq!(state.player.facing, Facing::Right);
        assert!(state.appearance.mirrored);
    }

    #[test]
    fn test_launch_then_first_bounce() {
        let mut physics = HoverPhysics::default();
        let mut state = GameState::new(3);
        tick(&mut state, &flap_input(), SIM_DT, &mut physics);
        assert_eq!(state.phase, GamePhase::Flying);
        assert_eq!(state.player.speed, 225.0);
        assert!(!state.spikes.left.generated_this_cycle);
        assert!(!state.spikes.right.generated_this_cycle);

        let mut ticks = 0;
        while state.score == 0 {
            let before = state.player.position.x;
            tick(&mut state, &TickInput::default(), SIM_DT, &mut physics);
            ticks += 1;
            assert!(ticks < 1000, "never reached the wall");
            if state.score == 1 {
                assert!(before < 296.0);
                assert!(state.player.position.x >= 296.0);
            }
        }

        assert_eq!(state.phase, GamePhase::Flying);
        assert_eq!(state.score, 1);
        assert_eq!(state.player.facing, Facing::Right);
        assert!(!state.spikes.left.generated_this_cycle);
        assert!(state.spikes.right.generated_this_cycle);
        assert!(state.events.contains(&GameEvent::WallBounce {
            side: SpikeSide::Right,
            score: 1
        }));

        // Next tick the left wall draws its subset and starts deploying
        tick(&mut state, &TickInput::default(), SIM_DT, &mut physics);
        assert!(state.spikes.left.generated_this_cycle);
        assert!(state.spikes.left.shared_x_offset > -400.0);
    }

    #[test]
    fn test_deployed_spike_kills() {
        let mut physics = HoverPhysics {
            solid: true,
            ..Default::default()
        };
        let mut state = launched(1, &mut physics);
        state.spikes.activate(SpikeSide::Right, &[0, 1, 2, 3, 4]);
        state.spikes.right.shared_x_offset = 333.0;
        state.player.position.x = 290.0;
        tick(&mut state, &TickInput::default(), SIM_DT, &mut physics);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.events.contains(&GameEvent::KilledBySpike {
            side: SpikeSide::Right,
            slot: 2
        }));
    }

    #[test]
    fn test_one_slot_gap_can_be_flown_through() {
        let mut physics = HoverPhysics {
            solid: true,
            ..Default::default()
        };
        let mut state = launched(1, &mut physics);
        state.spikes.activate(SpikeSide::Right, &[0, 2]);
        state.spikes.right.shared_x_offset = 333.0;
        state.player.position = Vec2::new(290.0, -86.0);
        tick(&mut state, &TickInput::default(), SIM_DT, &mut physics);

        assert_eq!(state.phase, GamePhase::Flying);
        assert!(state.player.alive);
    }

    #[test]
    fn test_bounce_tick_checks_the_wall_just_hit() {
        let mut physics = HoverPhysics {
            solid: true,
            ..Default::default()
        };
        let mut state = launched(1, &mut physics);
        state.spikes.activate(SpikeSide::Right, &[0, 1, 2, 3, 4]);
        state.spikes.right.shared_x_offset = 333.0;
        state.player.position.x = 295.0;
        state.events.clear();
        tick(&mut state, &TickInput::default(), SIM_DT, &mut physics);

        // Bounced and died on the same tick
        assert_eq!(state.score, 1);
        assert_eq!(state.player.facing, Facing::Right);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.events.iter().any(|e| matches!(
            e,
            GameEvent::KilledBySpike {
                side: SpikeSide::Right,
                ..
            }
        )));
    }

    #[test]
    fn test_retreated_spikes_are_harmless() {
        let mut physics = HoverPhysics {
            solid: true,
            ..Default::default()
        };
        let mut state = launched(1, &mut physics);
        // Left wall is home, player near it but heading right
        state.player.position.x = -290.0;
        tick(&mut state, &TickInput::default(), SIM_DT, &mut physics);
        assert_eq!(state.phase, GamePhase::Flying);
    }

    #[test]
    fn test_game_over_ignores_flaps_and_tumbles() {
        let mut physics = HoverPhysics::default();
        let mut state = launched(1, &mut physics);
        state.player.position.y = 240.0;
        tick(&mut state, &TickInput::default(), SIM_DT, &mut physics);
        assert_eq!(state.phase, GamePhase::GameOver);

        let impulses = physics.impulses;
        tick(&mut state, &flap_input(), SIM_DT, &mut physics);
        assert_eq!(physics.impulses, impulses);
        assert!(state.appearance.rotation > 0.0);
        assert!(state.appearance.alpha < 1.0);
    }

    #[test]
    fn test_full_reset_cycle() {
        let mut physics = BallisticPhysics::new(-1350.0);
        let mut state = GameState::new(9);
        tick(&mut state, &flap_input(), SIM_DT, &mut physics);

        // Fly until something kills us (no more flaps: the floor will)
        let mut ticks = 0;
        while state.phase == GamePhase::Flying {
            tick(&mut state, &TickInput::default(), SIM_DT, &mut physics);
            ticks += 1;
            assert!(ticks < 2000);
        }
        assert_eq!(state.phase, GamePhase::GameOver);

        while state.phase == GamePhase::GameOver {
            tick(&mut state, &TickInput::default(), SIM_DT, &mut physics);
            ticks += 1;
            assert!(ticks < 5000);
        }
        assert_eq!(state.phase, GamePhase::Resetting);
        assert!(state.player.position.y < -1000.0);

        while state.phase == GamePhase::Resetting {
            tick(&mut state, &TickInput::default(), SIM_DT, &mut physics);
            ticks += 1;
            assert!(ticks < 10000);
        }

        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.score, 0);
        assert_eq!(state.player.position, Vec2::ZERO);
        assert_eq!(state.player.facing, Facing::Left);
        assert_eq!(state.player.speed, 0.0);
        assert!(state.player.alive);
        assert_eq!(state.appearance, PlayerAppearance::default());
        assert!(state.spikes.left.shared_x_offset <= -399.0);
        assert!(state.spikes.right.shared_x_offset >= 399.0);
        assert!(!physics.is_attached());
        assert!(state.events.contains(&GameEvent::Reset));
    }

    #[test]
    fn test_reset_waits_for_both_walls() {
        let mut physics = HoverPhysics::default();
        let mut state = launched(1, &mut physics);
        state.score = 4;
        state.phase = GamePhase::Resetting;
        state.spikes.left.shared_x_offset = -333.0;

        tick(&mut state, &TickInput::default(), SIM_DT, &mut physics);
        assert_eq!(state.phase, GamePhase::Resetting);
        assert_eq!(state.score, 4);

        for _ in 0..600 {
            tick(&mut state, &TickInput::default(), SIM_DT, &mut physics);
        }
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.score, 0);
    }

    #[test]
    #[should_panic(expected = "negative dt")]
    fn test_negative_dt_is_rejected() {
        let mut physics = HoverPhysics::default();
        let mut state = GameState::new(1);
        tick(&mut state, &TickInput::default(), -0.1, &mut physics);
    }

    #[test]
    fn test_determinism() {
        let mut physics1 = BallisticPhysics::new(-1350.0);
        let mut physics2 = BallisticPhysics::new(-1350.0);
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        for i in 0..600 {
            let input = TickInput {
                flap: i % 30 == 0,
                flap_released: i % 30 == 5,
            };
            tick(&mut state1, &input, SIM_DT, &mut physics1);
            tick(&mut state2, &input, SIM_DT, &mut physics2);
        }

        assert_eq!(state1.phase, state2.phase);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.player, state2.player);
        assert_eq!(state1.spikes, state2.spikes);
    }

    proptest! {
        #[test]
        fn prop_score_steps_by_one_on_bounce(
            seed in any::<u64>(),
            flaps in proptest::collection::vec(any::<bool>(), 400),
        ) {
            let mut physics = BallisticPhysics::new(-1350.0);
            let mut state = GameState::new(seed);
            tick(&mut state, &flap_input(), SIM_DT, &mut physics);

            for (i, &flap) in flaps.iter().enumerate() {
                // Flap at most every 20 ticks so the player stays in the air a while
                let input = TickInput { flap: flap && i % 20 == 0, flap_released: i % 20 == 3 };
                let was_flying = state.phase == GamePhase::Flying;
                let score = state.score;
                let facing = state.player.facing;
                state.events.clear();
                tick(&mut state, &input, SIM_DT, &mut physics);

                if was_flying {
                    prop_assert!(state.score == score || state.score == score + 1);
                    let bounced = state.events.iter().any(|e| matches!(e, GameEvent::WallBounce { .. }));
                    prop_assert_eq!(bounced, state.score == score + 1);
                    prop_assert_eq!(bounced, state.player.facing != facing);
                    let generations = state.events.iter().filter(|e| matches!(e, GameEvent::SpikesGenerated { .. })).count();
                    prop_assert!(generations <= 1);
                }
            }
        }
    }
}
