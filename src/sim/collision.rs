//! Geometry checks for the arena
//!
//! Boxes are axis-aligned; the physics service decides whether two boxes
//! touch; the kill zone and wall checks are plain comparisons on the
//! player's position.

use std::f32::consts::FRAC_PI_3;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::spikes::SpikeSlot;
use super::state::Facing;
use crate::consts::{SPIKE_RADIUS, SPIKE_STRETCH};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec2,
    pub half_extents: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            center,
            half_extents,
        }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half_extents
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half_extents
    }

    /// Overlap test; touching edges do not count
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        a_min.x < b_max.x && b_min.x < a_max.x && a_min.y < b_max.y && b_min.y < a_max.y
    }
}

/// Bounding box of a wall spike whose set sits at `x_offset`
///
/// A spike is an equilateral triangle inscribed in a circle of
/// `SPIKE_RADIUS`, stretched vertically by `SPIKE_STRETCH`. Its tip lies a
/// full radius toward the field and its base half a radius behind the slot,
/// so the box is off-centre.
pub fn spike_box(slot: &SpikeSlot, x_offset: f32) -> Aabb {
    let tip = SPIKE_RADIUS;
    let base = SPIKE_RADIUS * 0.5;
    let half_height = SPIKE_RADIUS * FRAC_PI_3.sin() * SPIKE_STRETCH;

    // Walls point their tips inward, away from their own side
    let inward = -slot.side.x_sign();
    let mut center = slot.position(x_offset);
    center.x += inward * (tip - base) / 2.0;

    Aabb::new(center, Vec2::new((tip + base) / 2.0, half_height))
}

/// Whether the player's box crosses the top or bottom bound
///
/// `kill_zone` is `(bottom, top)`.
#[inline]
pub fn hits_kill_zone(y: f32, height: f32, kill_zone: (f32, f32)) -> bool {
    let (bottom, top) = kill_zone;
    y + height / 2.0 > top || y - height / 2.0 < bottom
}

/// Whether the player has reached the wall it is travelling toward
#[inline]
pub fn hits_wall(facing: Facing, x: f32, wall_x: f32) -> bool {
    match facing {
        Facing::Left => x >= wall_x,
        Facing::Right => x <= -wall_x,
    }
}
