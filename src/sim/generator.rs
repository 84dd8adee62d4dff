//! Spike activation: subset selection and offset interpolation

use rand::Rng;

use crate::consts::SPIKES_PER_SIDE;
use crate::tuning::DifficultyCurve;

/// Pick the slot indices a wall activates for the next bounce cycle
///
/// Draws a count from the curve, then that many indices in `0..5` with
/// replacement. Duplicates collapse, so the result can be shorter than the
/// draw count, but it is never empty. First-drawn order is preserved.
pub fn choose_subset<R: Rng + ?Sized>(rng: &mut R, score: u32, curve: &DifficultyCurve) -> Vec<u8> {
    let (min_draws, max_draws) = curve.draw_range(score);
    let draws = rng.random_range(min_draws.max(1)..=max_draws.max(1));

    let mut indices: Vec<u8> = Vec::with_capacity(draws as usize);
    for _ in 0..draws {
        let index = rng.random_range(0..SPIKES_PER_SIDE as u8);
        if !indices.contains(&index) {
            indices.push(index);
        }
    }
    indices
}

/// Move `current` a fraction of the way toward `target`
///
/// The fraction is `rate * dt`, clamped to `[0, 1]` so a long frame lands on
/// the target instead of overshooting it.
#[inline]
pub fn interpolate(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    let t = (rate * dt).clamp(0.0, 1.0);
    current + (target - current) * t
}
